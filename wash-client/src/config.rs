//! Client configuration

use std::path::PathBuf;
use std::time::Duration;

use crate::http::NetworkHttpClient;
use crate::token_store::FileTokenStore;
use crate::ClientResult;

/// Default backend address of a local deployment
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Token file name inside the storage directory
pub const TOKEN_FILE: &str = "tokens.json";

/// Client configuration for connecting to the wash backend
///
/// # 环境变量
///
/// | 变量 | 默认值 |
/// |------|--------|
/// | WASH_API_URL | http://localhost:8080 |
/// | WASH_API_TIMEOUT | 30 |
/// | WASH_STORAGE_DIR | .wash |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8080")
    pub base_url: String,

    /// Bearer token injected on every request
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Directory holding the persisted tokens
    pub storage_dir: PathBuf,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: DEFAULT_TIMEOUT_SECS,
            storage_dir: PathBuf::from(".wash"),
        }
    }

    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let mut config = Self::new(
            std::env::var("WASH_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
        );
        config.timeout = std::env::var("WASH_API_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        if let Ok(dir) = std::env::var("WASH_STORAGE_DIR") {
            config.storage_dir = PathBuf::from(dir);
        }
        config
    }

    /// Set the JWT token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = dir.into();
        self
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> ClientResult<NetworkHttpClient> {
        NetworkHttpClient::from_config(self)
    }

    /// File-backed token store under `storage_dir`
    pub fn token_store(&self) -> FileTokenStore {
        FileTokenStore::new(&self.storage_dir, TOKEN_FILE)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
