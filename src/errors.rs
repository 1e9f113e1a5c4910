use thiserror::Error;

use crate::external::dashboard_api::GatewayError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),
    #[error("session vault error: {0}")]
    Vault(#[from] sled::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("no active session")]
    NoSession,
}

impl From<String> for AppError {
    fn from(value: String) -> Self {
        AppError::Config(value)
    }
}
