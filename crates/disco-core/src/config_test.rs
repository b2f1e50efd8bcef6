use std::collections::HashMap;
use std::env::VarError;
use std::time::Duration;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "DISCO_ENV"));
}

#[test]
fn build_app_config_uses_defaults_for_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.api_url, DEFAULT_API_URL);
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "disco/0.1 (discount-codes)");
    assert_eq!(cfg.min_loading_ms, 1500);
    assert_eq!(cfg.settle_delay_ms, 500);
    assert_eq!(cfg.ad_delay_ms, 300);
    assert_eq!(cfg.copy_toast_ms, 2000);
    assert_eq!(cfg.prefs_path.to_str(), Some("./disco-prefs.json"));
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("DISCO_ENV", "test");
    map.insert("DISCO_API_URL", "http://127.0.0.1:9999/codes");
    map.insert("DISCO_MIN_LOADING_MS", "250");
    map.insert("DISCO_SETTLE_DELAY_MS", "0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Test);
    assert_eq!(cfg.api_url, "http://127.0.0.1:9999/codes");
    assert_eq!(cfg.min_loading_ms, 250);
    assert_eq!(cfg.settle_delay_ms, 0);
}

#[test]
fn build_app_config_rejects_non_numeric_timer() {
    let mut map = HashMap::new();
    map.insert("DISCO_MIN_LOADING_MS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "DISCO_MIN_LOADING_MS"),
        "expected InvalidEnvVar(DISCO_MIN_LOADING_MS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_empty_api_url() {
    let mut map = HashMap::new();
    map.insert("DISCO_API_URL", "  ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "DISCO_API_URL"),
        "expected InvalidEnvVar(DISCO_API_URL), got: {result:?}"
    );
}

#[test]
fn loading_timings_follow_config() {
    let mut map = HashMap::new();
    map.insert("DISCO_MIN_LOADING_MS", "1000");
    map.insert("DISCO_AD_DELAY_MS", "100");
    let timings = build_app_config(lookup_from_map(&map))
        .unwrap()
        .loading_timings();
    assert_eq!(timings.min_display, Duration::from_secs(1));
    assert_eq!(timings.timer_delay(false), Duration::from_millis(1_100));
    assert_eq!(timings.settle_delay, Duration::from_millis(500));
}

#[test]
fn debug_output_lists_api_url() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(rendered.contains("disco-backend.vercel.app"));
}
