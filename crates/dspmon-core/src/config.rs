use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let feed_url = require("DSPMON_FEED_URL")?;

    let env = parse_environment(&or_default("DSPMON_ENV", "development"));
    let bind_addr = parse_addr("DSPMON_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("DSPMON_LOG_LEVEL", "info");

    let feed_ttl_secs = parse_u64("DSPMON_FEED_TTL_SECS", "600")?;
    let feed_request_timeout_secs = parse_u64("DSPMON_FEED_REQUEST_TIMEOUT_SECS", "30")?;
    let feed_user_agent = or_default(
        "DSPMON_FEED_USER_AGENT",
        "dspmon/0.1 (store-status-dashboard)",
    );

    let annotations_path = PathBuf::from(or_default(
        "DSPMON_ANNOTATIONS_PATH",
        "./status_persistence.json",
    ));
    let store_manager_base_url = or_default(
        "DSPMON_STORE_MANAGER_BASE_URL",
        "https://www.lulastoremanager.com",
    );

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        feed_url,
        feed_ttl_secs,
        feed_request_timeout_secs,
        feed_user_agent,
        annotations_path,
        store_manager_base_url,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
