use std::sync::Arc;

use crate::external::dashboard_api::DashboardApi;
use crate::services::fetch::FetchCoordinator;
use crate::services::refresh::RefreshCoordinator;
use crate::session::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn DashboardApi>,
    pub sessions: Arc<SessionStore>,
    pub refresh: Arc<RefreshCoordinator>,
    pub fetches: Arc<FetchCoordinator>,
}
