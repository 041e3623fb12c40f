//! Acquisition strategies feeding the [`Aggregator`](crate::Aggregator).

mod live;
mod snapshot;

use std::future::Future;

use showcase_core::{AppConfig, ItemId, NormalizedItem, SourceKind};

use crate::client::JsonFetcher;
use crate::error::FetchError;

pub use live::{fallback_icon_url, LiveSource};
pub use snapshot::SnapshotSource;

/// Produces normalized items for a list of identifiers.
///
/// Items may come back in any order and may contain duplicates; ranking and
/// deduplication happen in the aggregate.
pub trait ItemDataSource {
    /// # Errors
    ///
    /// Implementations return `Err` only when the whole pass failed; per-item
    /// problems are handled inside the source.
    fn fetch_all(
        &self,
        ids: &[ItemId],
    ) -> impl Future<Output = Result<Vec<NormalizedItem>, FetchError>> + Send;
}

/// The strategy selected by configuration.
#[derive(Debug, Clone)]
pub enum DataSource {
    Live(LiveSource),
    Snapshot(SnapshotSource),
}

impl DataSource {
    /// Builds the strategy named by `config.source`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Client`] if the HTTP client cannot be built, or
    /// [`FetchError::InvalidUrl`] when snapshot mode has no snapshot URL.
    pub fn from_config(config: &AppConfig) -> Result<Self, FetchError> {
        let fetcher = JsonFetcher::from_config(config)?;
        match config.source {
            SourceKind::Live => Ok(Self::Live(LiveSource::from_config(fetcher, config))),
            SourceKind::Snapshot => {
                SnapshotSource::from_config(fetcher, config).map(Self::Snapshot)
            }
        }
    }

    #[must_use]
    pub fn kind(&self) -> SourceKind {
        match self {
            Self::Live(_) => SourceKind::Live,
            Self::Snapshot(_) => SourceKind::Snapshot,
        }
    }
}

impl ItemDataSource for DataSource {
    fn fetch_all(
        &self,
        ids: &[ItemId],
    ) -> impl Future<Output = Result<Vec<NormalizedItem>, FetchError>> + Send {
        async move {
            match self {
                Self::Live(source) => source.fetch_all(ids).await,
                Self::Snapshot(source) => source.fetch_all(ids).await,
            }
        }
    }
}
