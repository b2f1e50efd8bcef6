//! Shared domain types, configuration, and local preference flags for Disco.

pub mod app_config;
pub mod codes;
pub mod config;
pub mod domain;
pub mod error;
pub mod preferences;

pub use app_config::{AppConfig, Environment, LoadingTimings};
pub use codes::{CodeRecord, FetchResult, FALLBACK_DESCRIPTION};
pub use config::{load_app_config, load_app_config_from_env};
pub use domain::{extract_main_domain, DomainQuery};
pub use error::{ConfigError, PreferencesError};
pub use preferences::{Preferences, PreferencesStore};
