use serde::{Deserialize, Serialize};

// Account classification the backend attaches to every account. Family Group
// accounts aggregate several linked entities and get a different allocation
// endpoint and screen stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountType {
    Individual,
    Entity,
    #[serde(rename = "Family Group")]
    FamilyGroup,
}

impl AccountType {
    pub fn is_family_group(&self) -> bool {
        matches!(self, AccountType::FamilyGroup)
    }
}

/// The authenticated identity plus the currently selected account context.
/// Exactly one session is active at a time; it lives in the `SessionStore`
/// and stays in the vault until logout wipes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub auth_token: String,
    pub account_id: String,
    pub account_type: AccountType,
}

/// What a successful login returns.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginOutcome {
    pub auth_token: String,
    pub account_id: String,
    pub account_type: AccountType,
}

/// An entity account reachable from the current session without
/// re-authenticating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedAccount {
    pub account_id: String,
    pub account_name: String,
    pub account_type: AccountType,
}

/// One entry in the account-switch list: the active account first, then the
/// linked entity accounts.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountOption {
    pub key: String,
    pub label: String,
    pub account_type: AccountType,
}
