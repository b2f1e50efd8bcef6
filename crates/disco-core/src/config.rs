use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub(crate) const DEFAULT_API_URL: &str = "https://disco-backend.vercel.app/codes-detailed-chatgpt";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every Disco setting has a default, so only malformed values fail.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("DISCO_ENV", "development"))?;
    let log_level = or_default("DISCO_LOG_LEVEL", "info");

    let api_url = or_default("DISCO_API_URL", DEFAULT_API_URL);
    if api_url.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "DISCO_API_URL".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    let request_timeout_secs = parse_u64("DISCO_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("DISCO_USER_AGENT", "disco/0.1 (discount-codes)");

    let min_loading_ms = parse_u64("DISCO_MIN_LOADING_MS", "1500")?;
    let settle_delay_ms = parse_u64("DISCO_SETTLE_DELAY_MS", "500")?;
    let ad_delay_ms = parse_u64("DISCO_AD_DELAY_MS", "300")?;
    let copy_toast_ms = parse_u64("DISCO_COPY_TOAST_MS", "2000")?;

    let prefs_path = PathBuf::from(or_default("DISCO_PREFS_PATH", "./disco-prefs.json"));

    Ok(AppConfig {
        env,
        log_level,
        api_url,
        request_timeout_secs,
        user_agent,
        min_loading_ms,
        settle_delay_ms,
        ad_delay_ms,
        copy_toast_ms,
        prefs_path,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "DISCO_ENV".to_string(),
            reason: format!("expected development, test, or production; got \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
