/// Environment-supplied configuration, read once at startup and immutable
/// afterwards.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub document_base_url: String,
    pub version_manifest_url: String,
    pub app_version: String,
    pub session_db_path: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let config = Self {
            api_base_url: std::env::var("API_BASE_URL")
                .map_err(|_| "API_BASE_URL is not set".to_string())?,
            document_base_url: std::env::var("DOCUMENT_BASE_URL").unwrap_or_default(),
            version_manifest_url: std::env::var("VERSION_MANIFEST_URL")
                .map_err(|_| "VERSION_MANIFEST_URL is not set".to_string())?,
            app_version: std::env::var("APP_VERSION")
                .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string()),
            session_db_path: std::env::var("SESSION_DB_PATH")
                .unwrap_or_else(|_| "session_db".to_string()),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        url::Url::parse(&self.api_base_url)
            .map_err(|e| format!("API_BASE_URL is not a valid URL: {}", e))?;
        url::Url::parse(&self.version_manifest_url)
            .map_err(|e| format!("VERSION_MANIFEST_URL is not a valid URL: {}", e))?;
        if !self.document_base_url.is_empty() {
            url::Url::parse(&self.document_base_url)
                .map_err(|e| format!("DOCUMENT_BASE_URL is not a valid URL: {}", e))?;
        }
        Ok(())
    }
}
