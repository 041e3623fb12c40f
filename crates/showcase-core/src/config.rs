use crate::app_config::{AppConfig, SourceKind};
use crate::ids::parse_id_list;
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
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can feed a `HashMap`.
///
/// # Errors
///
/// Same as [`load_app_config_from_env`].
pub fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Blank values count as unset so `.env` templates can leave keys empty.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .trim()
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .trim()
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .trim()
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_flag = |var: &str, default: bool| -> Result<bool, ConfigError> {
        match optional(var) {
            None => Ok(default),
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                invalid(var, format!("expected true/false, got \"{raw}\""))
            }),
        }
    };

    let item_ids = optional("SHOWCASE_ITEM_IDS")
        .map(|raw| parse_id_list(&raw))
        .unwrap_or_default();

    let source = parse_source_kind(&or_default("SHOWCASE_SOURCE", "live"))?;
    let snapshot_url = optional("SHOWCASE_SNAPSHOT_URL");
    if source == SourceKind::Snapshot && snapshot_url.is_none() {
        return Err(ConfigError::MissingEnvVar(
            "SHOWCASE_SNAPSHOT_URL".to_string(),
        ));
    }

    let proxy_prefix = optional("SHOWCASE_PROXY_PREFIX");
    let games_api_base = or_default("SHOWCASE_GAMES_API_BASE", "https://games.roblox.com");
    let thumbnails_api_base = or_default(
        "SHOWCASE_THUMBNAILS_API_BASE",
        "https://thumbnails.roblox.com",
    );
    let fetch_votes = parse_flag("SHOWCASE_FETCH_VOTES", true)?;
    let fallback_icons = parse_flag("SHOWCASE_FALLBACK_ICONS", true)?;

    let thumbnail_batch_size = parse_usize("SHOWCASE_THUMBNAIL_BATCH_SIZE", "50")?;
    if thumbnail_batch_size == 0 {
        return Err(invalid(
            "SHOWCASE_THUMBNAIL_BATCH_SIZE",
            "must be at least 1".to_string(),
        ));
    }

    let request_timeout_secs = parse_u64("SHOWCASE_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("SHOWCASE_USER_AGENT", "showcase/0.1 (stats-aggregator)");
    let rate_limit_max_retries = parse_u32("SHOWCASE_RATE_LIMIT_MAX_RETRIES", "3")?;
    let rate_limit_delay_ms = parse_u64("SHOWCASE_RATE_LIMIT_DELAY_MS", "500")?;

    let snapshot_max_attempts = parse_u32("SHOWCASE_SNAPSHOT_MAX_ATTEMPTS", "3")?;
    if snapshot_max_attempts == 0 {
        return Err(invalid(
            "SHOWCASE_SNAPSHOT_MAX_ATTEMPTS",
            "must be at least 1".to_string(),
        ));
    }
    let snapshot_backoff_ms = parse_u64("SHOWCASE_SNAPSHOT_BACKOFF_MS", "250")?;
    let log_level = or_default("SHOWCASE_LOG_LEVEL", "info");

    Ok(AppConfig {
        item_ids,
        source,
        snapshot_url,
        proxy_prefix,
        games_api_base,
        thumbnails_api_base,
        fetch_votes,
        fallback_icons,
        thumbnail_batch_size,
        request_timeout_secs,
        user_agent,
        rate_limit_max_retries,
        rate_limit_delay_ms,
        snapshot_max_attempts,
        snapshot_backoff_ms,
        log_level,
    })
}

/// Parse a string into a `SourceKind` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than `live` or
/// `snapshot` (case-insensitive).
fn parse_source_kind(s: &str) -> Result<SourceKind, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "live" => Ok(SourceKind::Live),
        "snapshot" => Ok(SourceKind::Snapshot),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SHOWCASE_SOURCE".to_string(),
            reason: format!("unknown source \"{other}\"; expected live or snapshot"),
        }),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
