use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    AccountOverview, AllocationRecord, LinkedAccount, LoginOutcome, PortfolioData, Transaction,
    VersionManifest,
};

/// Why a gateway call failed. The original mobile client collapsed all of
/// these into a bare `null`; keeping them apart lets callers distinguish
/// "empty but valid" from "failed" and single out expired sessions.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("network error: {0}")]
    Network(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("malformed payload: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// `POST /Auth/mobile/android`. The only call that issues a token.
    async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, GatewayError>;

    /// Entity accounts reachable from the authenticated account, used to
    /// build the account-switch list.
    async fn linked_accounts(
        &self,
        auth_token: &str,
        account_id: &str,
    ) -> Result<Vec<LinkedAccount>, GatewayError>;

    /// Pre-aggregated allocation payload for individual/entity accounts.
    async fn asset_allocation_summary(
        &self,
        auth_token: &str,
        account_id: &str,
    ) -> Result<PortfolioData, GatewayError>;

    /// Flat per-class records for family-group accounts; the client groups
    /// these into a `PortfolioData` itself.
    async fn asset_allocation_summary_family(
        &self,
        auth_token: &str,
        account_id: &str,
    ) -> Result<Vec<AllocationRecord>, GatewayError>;

    async fn account_overview(
        &self,
        auth_token: &str,
        account_id: &str,
    ) -> Result<AccountOverview, GatewayError>;

    async fn recent_transactions(
        &self,
        auth_token: &str,
        account_id: &str,
        limit: u32,
    ) -> Result<Vec<Transaction>, GatewayError>;

    /// Static JSON manifest; fetched unauthenticated at startup.
    async fn version_manifest(&self) -> Result<VersionManifest, GatewayError>;
}
