use std::path::PathBuf;
use std::time::Duration;

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

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub api_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub min_loading_ms: u64,
    pub settle_delay_ms: u64,
    pub ad_delay_ms: u64,
    pub copy_toast_ms: u64,
    pub prefs_path: PathBuf,
}

impl AppConfig {
    /// Timer durations used by the loading coordinator.
    #[must_use]
    pub fn loading_timings(&self) -> LoadingTimings {
        LoadingTimings {
            min_display: Duration::from_millis(self.min_loading_ms),
            settle_delay: Duration::from_millis(self.settle_delay_ms),
            ad_delay: Duration::from_millis(self.ad_delay_ms),
            copy_toast: Duration::from_millis(self.copy_toast_ms),
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("api_url", &self.api_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("min_loading_ms", &self.min_loading_ms)
            .field("settle_delay_ms", &self.settle_delay_ms)
            .field("ad_delay_ms", &self.ad_delay_ms)
            .field("copy_toast_ms", &self.copy_toast_ms)
            .field("prefs_path", &self.prefs_path)
            .finish()
    }
}

/// Durations that shape one loading session.
///
/// `min_display` is the perceptible minimum a non-premium user sees the
/// loading indicator for; `settle_delay` runs after both the fetch and the
/// timer have finished; `ad_delay` separates the timer from the ad trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadingTimings {
    pub min_display: Duration,
    pub settle_delay: Duration,
    pub ad_delay: Duration,
    pub copy_toast: Duration,
}

impl LoadingTimings {
    /// How long the session timer runs before it reports elapsed.
    ///
    /// Premium sessions skip both the minimum display time and the ad, so
    /// their timer fires immediately. Non-premium sessions also wait out
    /// `ad_delay` so the ad is triggered before the session can complete.
    #[must_use]
    pub fn timer_delay(&self, premium: bool) -> Duration {
        if premium {
            Duration::ZERO
        } else {
            self.min_display + self.ad_delay
        }
    }
}

impl Default for LoadingTimings {
    fn default() -> Self {
        Self {
            min_display: Duration::from_millis(1_500),
            settle_delay: Duration::from_millis(500),
            ad_delay: Duration::from_millis(300),
            copy_toast: Duration::from_millis(2_000),
        }
    }
}
