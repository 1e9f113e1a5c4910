use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::config::AppConfig;
use crate::external::dashboard_api::{DashboardApi, GatewayError};
use crate::models::{
    AccountOverview, AllocationRecord, LinkedAccount, LoginOutcome, PortfolioData, Transaction,
    VersionManifest,
};

/// Reqwest-backed gateway against the dashboard backend. One shared client,
/// bearer auth, JSON in and out. No retries and no timeout tuning; a failed
/// call surfaces immediately as a `GatewayError` (spinner-level UX, not a
/// sync engine).
pub struct RestGateway {
    client: reqwest::Client,
    base_url: String,
    manifest_url: String,
}

impl RestGateway {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            manifest_url: config.version_manifest_url.clone(),
        }
    }

    fn map_status(status: reqwest::StatusCode) -> GatewayError {
        match status.as_u16() {
            401 | 403 => GatewayError::Unauthorized,
            code => GatewayError::Status(code),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        auth_token: &str,
        path: &str,
    ) -> Result<T, GatewayError> {
        let url = format!("{}{}", self.base_url, path);

        let resp = self
            .client
            .get(&url)
            .bearer_auth(auth_token)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!("GET {} returned {}", path, status);
            return Err(Self::map_status(status));
        }

        resp.json::<T>()
            .await
            .map_err(|e| GatewayError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl DashboardApi for RestGateway {
    async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, GatewayError> {
        // The platform segment is part of the backend contract.
        let url = format!("{}/Auth/mobile/android", self.base_url);

        let resp = self
            .client
            .post(&url)
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!("login returned {}", status);
            return Err(Self::map_status(status));
        }

        let outcome: LoginOutcome = resp
            .json()
            .await
            .map_err(|e| GatewayError::Malformed(e.to_string()))?;

        if outcome.auth_token.is_empty() {
            return Err(GatewayError::Malformed("empty auth token".into()));
        }
        Ok(outcome)
    }

    async fn linked_accounts(
        &self,
        auth_token: &str,
        account_id: &str,
    ) -> Result<Vec<LinkedAccount>, GatewayError> {
        self.get_json(auth_token, &format!("/ClientDashboard/LinkedAccounts/{}", account_id))
            .await
    }

    async fn asset_allocation_summary(
        &self,
        auth_token: &str,
        account_id: &str,
    ) -> Result<PortfolioData, GatewayError> {
        self.get_json(
            auth_token,
            &format!("/ClientDashboard/AssetAllocationSummary/{}", account_id),
        )
        .await
    }

    async fn asset_allocation_summary_family(
        &self,
        auth_token: &str,
        account_id: &str,
    ) -> Result<Vec<AllocationRecord>, GatewayError> {
        self.get_json(
            auth_token,
            &format!("/ClientDashboard/AssetAllocationSummaryFamily/{}", account_id),
        )
        .await
    }

    async fn account_overview(
        &self,
        auth_token: &str,
        account_id: &str,
    ) -> Result<AccountOverview, GatewayError> {
        self.get_json(auth_token, &format!("/ClientDashboard/AccountOverview/{}", account_id))
            .await
    }

    async fn recent_transactions(
        &self,
        auth_token: &str,
        account_id: &str,
        limit: u32,
    ) -> Result<Vec<Transaction>, GatewayError> {
        self.get_json(
            auth_token,
            &format!("/ClientDashboard/RecentTransactions/{}?limit={}", account_id, limit),
        )
        .await
    }

    async fn version_manifest(&self) -> Result<VersionManifest, GatewayError> {
        let resp = self
            .client
            .get(&self.manifest_url)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Self::map_status(status));
        }

        resp.json::<VersionManifest>()
            .await
            .map_err(|e| GatewayError::Malformed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_status_splits_out_unauthorized() {
        assert!(matches!(
            RestGateway::map_status(reqwest::StatusCode::UNAUTHORIZED),
            GatewayError::Unauthorized
        ));
        assert!(matches!(
            RestGateway::map_status(reqwest::StatusCode::FORBIDDEN),
            GatewayError::Unauthorized
        ));
        assert!(matches!(
            RestGateway::map_status(reqwest::StatusCode::INTERNAL_SERVER_ERROR),
            GatewayError::Status(500)
        ));
    }
}
