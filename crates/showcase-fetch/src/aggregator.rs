//! One aggregation pass: source → dedupe → rank → totals.

use showcase_core::{AggregateResult, ItemId};

use crate::error::FetchError;
use crate::source::ItemDataSource;

/// Runs aggregation passes against a single acquisition strategy.
#[derive(Debug, Clone)]
pub struct Aggregator<S> {
    source: S,
}

impl<S: ItemDataSource> Aggregator<S> {
    #[must_use]
    pub fn new(source: S) -> Self {
        Self { source }
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetches items for `ids` and builds the ranked aggregate.
    ///
    /// # Errors
    ///
    /// Propagates a pass-level failure from the source (for the snapshot
    /// strategy, the last error after retries are exhausted).
    pub async fn try_aggregate(&self, ids: &[ItemId]) -> Result<AggregateResult, FetchError> {
        let items = self.source.fetch_all(ids).await?;
        let result = AggregateResult::from_items(items);
        tracing::debug!(
            item_count = result.item_count(),
            total_playing = result.total_playing(),
            total_visits = result.total_visits(),
            "aggregation pass complete"
        );
        Ok(result)
    }

    /// Like [`Aggregator::try_aggregate`], but a failed pass is logged and
    /// yields an empty aggregate.
    pub async fn aggregate(&self, ids: &[ItemId]) -> AggregateResult {
        match self.try_aggregate(ids).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(error = %e, "aggregation pass failed; using empty result");
                AggregateResult::empty()
            }
        }
    }
}
