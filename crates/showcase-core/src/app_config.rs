use crate::ids::ItemId;

/// Which acquisition strategy a deployment uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Per-item calls against the live stats and thumbnail APIs.
    Live,
    /// One pre-aggregated JSON document.
    Snapshot,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Live => write!(f, "live"),
            SourceKind::Snapshot => write!(f, "snapshot"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub item_ids: Vec<ItemId>,
    pub source: SourceKind,
    pub snapshot_url: Option<String>,
    pub proxy_prefix: Option<String>,
    pub games_api_base: String,
    pub thumbnails_api_base: String,
    pub fetch_votes: bool,
    pub fallback_icons: bool,
    pub thumbnail_batch_size: usize,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub rate_limit_max_retries: u32,
    pub rate_limit_delay_ms: u64,
    pub snapshot_max_attempts: u32,
    pub snapshot_backoff_ms: u64,
    pub log_level: String,
}
