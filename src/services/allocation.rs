use std::collections::HashMap;

use crate::models::{AllocationRecord, AssetCategory, AssetClass, PortfolioData};

/// Group flat family-group allocation records into the category → class
/// hierarchy the dashboard renders.
///
/// Categories keep the order of first appearance and classes keep input
/// order. Percentages are summed as delivered; nothing is re-normalized, so
/// a source that does not add up to 100 stays that way.
pub fn aggregate_family(records: &[AllocationRecord]) -> PortfolioData {
    let mut categories: Vec<AssetCategory> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    let mut total_market_value = 0.0;

    for record in records {
        let slot = *index.entry(record.asset_category.clone()).or_insert_with(|| {
            categories.push(AssetCategory {
                asset_category: record.asset_category.clone(),
                market_value: 0.0,
                percentage: 0.0,
                asset_classes: Vec::new(),
            });
            categories.len() - 1
        });

        let category = &mut categories[slot];
        category.market_value += record.market_value;
        category.percentage += record.market_percentage;
        category.asset_classes.push(AssetClass {
            asset_class: record.asset_class.clone(),
            market_value: record.market_value,
            percentage: record.market_percentage,
        });

        total_market_value += record.market_value;
    }

    let total_percentage = categories.iter().map(|c| c.percentage).sum();

    PortfolioData {
        asset_categories: categories,
        total_market_value,
        total_percentage,
    }
}
