use std::cmp::Ordering;

use crate::external::dashboard_api::DashboardApi;

/// Per-segment numeric version comparison. Missing trailing segments count
/// as 0, so "1.2" equals "1.2.0". Non-numeric segments also count as 0.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let parse = |v: &str| -> Vec<u64> {
        v.split('.')
            .map(|seg| seg.trim().parse::<u64>().unwrap_or(0))
            .collect()
    };
    let a = parse(a);
    let b = parse(b);
    let len = a.len().max(b.len());

    for i in 0..len {
        let left = a.get(i).copied().unwrap_or(0);
        let right = b.get(i).copied().unwrap_or(0);
        match left.cmp(&right) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allowed,
    /// Installed build is below the minimum; block the UI and point at the
    /// store listing.
    Blocked {
        update_url: String,
    },
}

/// Startup version gate over the remote manifest. A manifest that cannot be
/// fetched fails open; an outdated client is better than a bricked one when
/// the static host is down.
pub async fn check(api: &dyn DashboardApi, installed_version: &str) -> GateDecision {
    let manifest = match api.version_manifest().await {
        Ok(manifest) => manifest,
        Err(e) => {
            tracing::warn!("version manifest fetch failed, allowing startup: {}", e);
            return GateDecision::Allowed;
        }
    };

    if compare_versions(installed_version, &manifest.minimum_supported_version)
        == Ordering::Less
    {
        tracing::warn!(
            "installed version {} is below minimum supported {}",
            installed_version,
            manifest.minimum_supported_version
        );
        GateDecision::Blocked {
            update_url: manifest.update_url,
        }
    } else {
        GateDecision::Allowed
    }
}
