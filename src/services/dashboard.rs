use crate::models::{AccountOverview, PortfolioData, Transaction};
use crate::services::allocation;
use crate::services::fetch::FetchScope;
use crate::state::AppState;

const SCREEN: &str = "dashboard";
const TRANSACTION_LIMIT: u32 = 10;

/// One content area of the dashboard. A section either rendered or it shows
/// its fallback message; there is no partial rendering of a failed section.
#[derive(Debug, Clone, PartialEq)]
pub enum Section<T> {
    Ready(T),
    Unavailable(String),
}

impl<T> Section<T> {
    #[allow(dead_code)]
    pub fn is_ready(&self) -> bool {
        matches!(self, Section::Ready(_))
    }

    fn failed(what: &str) -> Self {
        Section::Unavailable(format!("Failed to load {}", what))
    }

    fn no_data() -> Self {
        Section::Unavailable("No data available".to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub account_id: String,
    pub overview: Section<AccountOverview>,
    pub allocation: Section<PortfolioData>,
    pub transactions: Section<Vec<Transaction>>,
}

/// Load the dashboard for the active account.
///
/// Family-group accounts are served by the flat allocation endpoint and
/// grouped client-side; everyone else gets the pre-aggregated payload.
/// Returns `None` when the snapshot was superseded mid-flight (account
/// switched or logged out) and must not be applied.
pub async fn load_snapshot(state: &AppState) -> Option<DashboardSnapshot> {
    // Without session prerequisites the fetches are skipped entirely.
    let Some(session) = state.sessions.session() else {
        return Some(DashboardSnapshot {
            account_id: String::new(),
            overview: Section::no_data(),
            allocation: Section::no_data(),
            transactions: Section::no_data(),
        });
    };

    let scope = FetchScope {
        account_id: session.account_id.clone(),
        auth_token: session.auth_token.clone(),
    };
    let ticket = state.fetches.begin(SCREEN, scope);

    let overview = match state
        .api
        .account_overview(&session.auth_token, &session.account_id)
        .await
    {
        Ok(overview) => Section::Ready(overview),
        Err(e) => {
            tracing::warn!("account overview fetch failed: {}", e);
            Section::failed("account overview")
        }
    };
    if !state.fetches.is_current(&ticket) {
        tracing::info!("dashboard fetch superseded, discarding response");
        return None;
    }

    let allocation = if session.account_type.is_family_group() {
        match state
            .api
            .asset_allocation_summary_family(&session.auth_token, &session.account_id)
            .await
        {
            Ok(records) if records.is_empty() => Section::no_data(),
            Ok(records) => Section::Ready(allocation::aggregate_family(&records)),
            Err(e) => {
                tracing::warn!("family allocation fetch failed: {}", e);
                Section::failed("asset allocation")
            }
        }
    } else {
        match state
            .api
            .asset_allocation_summary(&session.auth_token, &session.account_id)
            .await
        {
            Ok(data) if data.asset_categories.is_empty() => Section::no_data(),
            Ok(data) => Section::Ready(data),
            Err(e) => {
                tracing::warn!("allocation fetch failed: {}", e);
                Section::failed("asset allocation")
            }
        }
    };
    if !state.fetches.is_current(&ticket) {
        tracing::info!("dashboard fetch superseded, discarding response");
        return None;
    }

    let transactions = match state
        .api
        .recent_transactions(&session.auth_token, &session.account_id, TRANSACTION_LIMIT)
        .await
    {
        Ok(transactions) => Section::Ready(transactions),
        Err(e) => {
            tracing::warn!("transactions fetch failed: {}", e);
            Section::failed("recent transactions")
        }
    };
    if !state.fetches.is_current(&ticket) {
        tracing::info!("dashboard fetch superseded, discarding response");
        return None;
    }

    Some(DashboardSnapshot {
        account_id: session.account_id,
        overview,
        allocation,
        transactions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::dashboard_api::{DashboardApi, GatewayError};
    use crate::models::{
        AccountType, AllocationRecord, LinkedAccount, LoginOutcome, VersionManifest,
    };
    use crate::services::fetch::FetchCoordinator;
    use crate::services::refresh::RefreshCoordinator;
    use crate::session::{SessionStore, SessionVault};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    type Hook = Box<dyn Fn() + Send + Sync>;

    /// Canned-response gateway; `on_overview` runs inside the first fetch to
    /// simulate things happening mid-flight.
    struct FakeApi {
        overview_calls: AtomicUsize,
        family_records: Result<Vec<AllocationRecord>, GatewayError>,
        summary: Result<PortfolioData, GatewayError>,
        overview: Result<AccountOverview, GatewayError>,
        on_overview: Option<Hook>,
    }

    impl FakeApi {
        fn healthy() -> Self {
            Self {
                overview_calls: AtomicUsize::new(0),
                family_records: Ok(vec![
                    AllocationRecord {
                        asset_category: "Cash".to_string(),
                        asset_class: "Cash".to_string(),
                        market_value: 100.0,
                        market_percentage: 10.0,
                    },
                    AllocationRecord {
                        asset_category: "Cash".to_string(),
                        asset_class: "Term Deposit".to_string(),
                        market_value: 50.0,
                        market_percentage: 5.0,
                    },
                ]),
                summary: Ok(PortfolioData {
                    asset_categories: vec![],
                    total_market_value: 0.0,
                    total_percentage: 0.0,
                }),
                overview: Ok(AccountOverview {
                    account_id: "ACC-1".to_string(),
                    total_market_value: 1000.0,
                    total_book_value: 900.0,
                    cash_balance: 100.0,
                    as_of_date: None,
                }),
                on_overview: None,
            }
        }
    }

    fn clone_err(e: &GatewayError) -> GatewayError {
        match e {
            GatewayError::Network(m) => GatewayError::Network(m.clone()),
            GatewayError::Unauthorized => GatewayError::Unauthorized,
            GatewayError::Status(c) => GatewayError::Status(*c),
            GatewayError::Malformed(m) => GatewayError::Malformed(m.clone()),
        }
    }

    fn clone_result<T: Clone>(r: &Result<T, GatewayError>) -> Result<T, GatewayError> {
        match r {
            Ok(v) => Ok(v.clone()),
            Err(e) => Err(clone_err(e)),
        }
    }

    #[async_trait]
    impl DashboardApi for FakeApi {
        async fn login(&self, _: &str, _: &str) -> Result<LoginOutcome, GatewayError> {
            unimplemented!()
        }
        async fn linked_accounts(
            &self,
            _: &str,
            _: &str,
        ) -> Result<Vec<LinkedAccount>, GatewayError> {
            Ok(vec![])
        }
        async fn asset_allocation_summary(
            &self,
            _: &str,
            _: &str,
        ) -> Result<PortfolioData, GatewayError> {
            clone_result(&self.summary)
        }
        async fn asset_allocation_summary_family(
            &self,
            _: &str,
            _: &str,
        ) -> Result<Vec<AllocationRecord>, GatewayError> {
            clone_result(&self.family_records)
        }
        async fn account_overview(
            &self,
            _: &str,
            _: &str,
        ) -> Result<AccountOverview, GatewayError> {
            self.overview_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(hook) = &self.on_overview {
                hook();
            }
            clone_result(&self.overview)
        }
        async fn recent_transactions(
            &self,
            _: &str,
            _: &str,
            _: u32,
        ) -> Result<Vec<Transaction>, GatewayError> {
            Ok(vec![])
        }
        async fn version_manifest(&self) -> Result<VersionManifest, GatewayError> {
            unimplemented!()
        }
    }

    fn state_with(api: Arc<FakeApi>) -> AppState {
        AppState {
            api,
            sessions: Arc::new(SessionStore::new(SessionVault::temporary().unwrap())),
            refresh: Arc::new(RefreshCoordinator::new()),
            fetches: Arc::new(FetchCoordinator::new()),
        }
    }

    fn login(state: &AppState, account_type: AccountType) {
        state
            .sessions
            .login_succeeded(LoginOutcome {
                auth_token: "tok".to_string(),
                account_id: "ACC-1".to_string(),
                account_type,
            })
            .unwrap();
    }

    #[tokio::test]
    async fn test_family_account_gets_client_side_aggregation() {
        let state = state_with(Arc::new(FakeApi::healthy()));
        login(&state, AccountType::FamilyGroup);

        let snapshot = load_snapshot(&state).await.unwrap();
        match snapshot.allocation {
            Section::Ready(data) => {
                assert_eq!(data.asset_categories.len(), 1);
                assert_eq!(data.total_market_value, 150.0);
                assert_eq!(data.asset_categories[0].percentage, 15.0);
            }
            Section::Unavailable(msg) => panic!("expected allocation, got: {}", msg),
        }
    }

    #[tokio::test]
    async fn test_unauthorized_renders_failed_section_without_crash() {
        let mut api = FakeApi::healthy();
        api.overview = Err(GatewayError::Unauthorized);
        let state = state_with(Arc::new(api));
        login(&state, AccountType::Individual);

        let snapshot = load_snapshot(&state).await.unwrap();
        assert_eq!(
            snapshot.overview,
            Section::Unavailable("Failed to load account overview".to_string())
        );
    }

    #[tokio::test]
    async fn test_empty_summary_shows_no_data() {
        let state = state_with(Arc::new(FakeApi::healthy()));
        login(&state, AccountType::Individual);

        let snapshot = load_snapshot(&state).await.unwrap();
        assert_eq!(
            snapshot.allocation,
            Section::Unavailable("No data available".to_string())
        );
    }

    #[tokio::test]
    async fn test_without_session_no_fetch_is_attempted() {
        let api = Arc::new(FakeApi::healthy());
        let state = state_with(api.clone());

        let snapshot = load_snapshot(&state).await.unwrap();
        assert!(!snapshot.overview.is_ready());
        assert!(!snapshot.allocation.is_ready());
        assert_eq!(
            snapshot.overview,
            Section::Unavailable("No data available".to_string())
        );
        assert_eq!(api.overview_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_superseded_snapshot_is_discarded() {
        let mut api = FakeApi::healthy();
        let fetches = Arc::new(FetchCoordinator::new());
        let fetches_in_hook = fetches.clone();
        // While the overview request is in flight, a newer fetch for another
        // account begins; the snapshot under way must be thrown away.
        api.on_overview = Some(Box::new(move || {
            fetches_in_hook.begin(
                SCREEN,
                FetchScope {
                    account_id: "FAM-2".to_string(),
                    auth_token: "tok".to_string(),
                },
            );
        }));

        let state = AppState {
            api: Arc::new(api),
            sessions: Arc::new(SessionStore::new(SessionVault::temporary().unwrap())),
            refresh: Arc::new(RefreshCoordinator::new()),
            fetches,
        };
        login(&state, AccountType::Individual);

        assert!(load_snapshot(&state).await.is_none());
    }
}
