use serde::{Deserialize, Serialize};

/// One holding class inside a category (e.g. "Term Deposit" under "Cash").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetClass {
    pub asset_class: String,
    pub market_value: f64,
    pub percentage: f64,
}

/// Two-level allocation node: a category with its per-class breakdown.
/// `market_value` and `percentage` are the sums over `asset_classes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetCategory {
    pub asset_category: String,
    pub market_value: f64,
    pub percentage: f64,
    pub asset_classes: Vec<AssetClass>,
}

/// The allocation payload a dashboard screen renders. Either decoded
/// directly from the backend (individual/entity accounts) or synthesized
/// client-side from flat records (family-group accounts).
///
/// `total_percentage` is carried through from the source percentages without
/// re-normalization; if upstream does not sum to 100, neither does this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioData {
    pub asset_categories: Vec<AssetCategory>,
    pub total_market_value: f64,
    pub total_percentage: f64,
}

/// One flat row from the family-group allocation endpoint, grouped
/// client-side into `PortfolioData`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRecord {
    pub asset_category: String,
    pub asset_class: String,
    pub market_value: f64,
    pub market_percentage: f64,
}
