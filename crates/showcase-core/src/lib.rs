//! Domain types and configuration shared by the showcase crates.
//!
//! Holds the normalized item model, the aggregate handed to presentation
//! consumers, and environment-driven configuration.

pub mod aggregate;
pub mod app_config;
pub mod config;
pub mod ids;
pub mod item;

use thiserror::Error;

pub use aggregate::{AggregateResult, FEATURED_COUNT};
pub use app_config::{AppConfig, SourceKind};
pub use config::{build_app_config, load_app_config, load_app_config_from_env};
pub use ids::{ItemId, PlaceId};
pub use item::{filter_items, like_ratio, NormalizedItem, DEFAULT_ITEM_NAME};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
