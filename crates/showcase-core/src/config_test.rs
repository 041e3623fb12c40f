use std::collections::HashMap;
use std::env::VarError;

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

fn ids(cfg: &AppConfig) -> Vec<&str> {
    cfg.item_ids.iter().map(crate::ItemId::as_str).collect()
}

fn assert_invalid_var(result: &Result<AppConfig, ConfigError>, expected: &str) {
    match result {
        Err(ConfigError::InvalidEnvVar { var, .. }) => assert_eq!(var, expected),
        other => panic!("expected InvalidEnvVar({expected}), got: {other:?}"),
    }
}

#[test]
fn parse_source_kind_live() {
    assert_eq!(parse_source_kind("live").unwrap(), SourceKind::Live);
}

#[test]
fn parse_source_kind_snapshot_is_case_insensitive() {
    assert_eq!(parse_source_kind("Snapshot").unwrap(), SourceKind::Snapshot);
}

#[test]
fn parse_source_kind_unknown_fails() {
    let err = parse_source_kind("carrier-pigeon").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "SHOWCASE_SOURCE"));
}

#[test]
fn build_app_config_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert!(cfg.item_ids.is_empty());
    assert_eq!(cfg.source, SourceKind::Live);
    assert!(cfg.snapshot_url.is_none());
    assert!(cfg.proxy_prefix.is_none());
    assert_eq!(cfg.games_api_base, "https://games.roblox.com");
    assert_eq!(cfg.thumbnails_api_base, "https://thumbnails.roblox.com");
    assert!(cfg.fetch_votes);
    assert!(cfg.fallback_icons);
    assert_eq!(cfg.thumbnail_batch_size, 50);
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "showcase/0.1 (stats-aggregator)");
    assert_eq!(cfg.rate_limit_max_retries, 3);
    assert_eq!(cfg.rate_limit_delay_ms, 500);
    assert_eq!(cfg.snapshot_max_attempts, 3);
    assert_eq!(cfg.snapshot_backoff_ms, 250);
    assert_eq!(cfg.log_level, "info");
}

#[test]
fn build_app_config_parses_item_ids() {
    let mut map = HashMap::new();
    map.insert("SHOWCASE_ITEM_IDS", " 111, 222,,333 ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(ids(&cfg), vec!["111", "222", "333"]);
}

#[test]
fn build_app_config_snapshot_requires_url() {
    let mut map = HashMap::new();
    map.insert("SHOWCASE_SOURCE", "snapshot");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "SHOWCASE_SNAPSHOT_URL"),
        "expected MissingEnvVar(SHOWCASE_SNAPSHOT_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_snapshot_with_url() {
    let mut map = HashMap::new();
    map.insert("SHOWCASE_SOURCE", "snapshot");
    map.insert("SHOWCASE_SNAPSHOT_URL", "https://example.com/games.json");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.source, SourceKind::Snapshot);
    assert_eq!(
        cfg.snapshot_url.as_deref(),
        Some("https://example.com/games.json")
    );
}

#[test]
fn build_app_config_blank_proxy_prefix_is_none() {
    let mut map = HashMap::new();
    map.insert("SHOWCASE_PROXY_PREFIX", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.proxy_prefix.is_none());
}

#[test]
fn build_app_config_proxy_prefix_override() {
    let mut map = HashMap::new();
    map.insert("SHOWCASE_PROXY_PREFIX", "https://proxy.example.com/?url=");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.proxy_prefix.as_deref(),
        Some("https://proxy.example.com/?url=")
    );
}

#[test]
fn build_app_config_fetch_votes_override() {
    let mut map = HashMap::new();
    map.insert("SHOWCASE_FETCH_VOTES", "false");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(!cfg.fetch_votes);
}

#[test]
fn build_app_config_fetch_votes_invalid() {
    let mut map = HashMap::new();
    map.insert("SHOWCASE_FETCH_VOTES", "maybe");
    let result = build_app_config(lookup_from_map(&map));
    assert_invalid_var(&result, "SHOWCASE_FETCH_VOTES");
}

#[test]
fn build_app_config_thumbnail_batch_size_override() {
    let mut map = HashMap::new();
    map.insert("SHOWCASE_THUMBNAIL_BATCH_SIZE", "20");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.thumbnail_batch_size, 20);
}

#[test]
fn build_app_config_thumbnail_batch_size_zero_rejected() {
    let mut map = HashMap::new();
    map.insert("SHOWCASE_THUMBNAIL_BATCH_SIZE", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert_invalid_var(&result, "SHOWCASE_THUMBNAIL_BATCH_SIZE");
}

#[test]
fn build_app_config_request_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("SHOWCASE_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert_invalid_var(&result, "SHOWCASE_REQUEST_TIMEOUT_SECS");
}

#[test]
fn build_app_config_rate_limit_overrides() {
    let mut map = HashMap::new();
    map.insert("SHOWCASE_RATE_LIMIT_MAX_RETRIES", "5");
    map.insert("SHOWCASE_RATE_LIMIT_DELAY_MS", "1000");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.rate_limit_max_retries, 5);
    assert_eq!(cfg.rate_limit_delay_ms, 1000);
}

#[test]
fn build_app_config_snapshot_attempts_zero_rejected() {
    let mut map = HashMap::new();
    map.insert("SHOWCASE_SNAPSHOT_MAX_ATTEMPTS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert_invalid_var(&result, "SHOWCASE_SNAPSHOT_MAX_ATTEMPTS");
}

#[test]
fn parse_bool_accepts_common_spellings() {
    assert_eq!(parse_bool("YES"), Some(true));
    assert_eq!(parse_bool("0"), Some(false));
    assert_eq!(parse_bool("nah"), None);
}
