use serde::{Deserialize, Serialize};

/// Static manifest the app fetches at startup to decide whether the
/// installed build is still supported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionManifest {
    pub minimum_supported_version: String,
    pub update_url: String,
}
