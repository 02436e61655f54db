use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-wide configuration, resolved once at startup from env vars.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// URL of the remote CSV feed describing per-store DSP health.
    pub feed_url: String,
    /// Seconds a successfully fetched feed stays fresh before a reload.
    pub feed_ttl_secs: u64,
    pub feed_request_timeout_secs: u64,
    pub feed_user_agent: String,
    /// Path of the JSON document holding operator status annotations.
    pub annotations_path: PathBuf,
    /// Base URL used to build per-store deep links (`<base>/stores/<id>`).
    pub store_manager_base_url: String,
}
