use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Headline account figures shown at the top of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountOverview {
    pub account_id: String,
    pub total_market_value: f64,
    pub total_book_value: f64,
    pub cash_balance: f64,
    #[serde(default)]
    pub as_of_date: Option<NaiveDate>,
}

/// A single account activity row for the recent-transactions screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub transaction_date: NaiveDate,
    pub description: String,
    pub transaction_type: String,
    pub amount: f64,
}
