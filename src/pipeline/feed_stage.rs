//! Feed loading stage.

use super::PipelineError;
use crate::config::FeedConfig;
use crate::feed::{self, FeedSource};
use crate::model::{DriverIndex, NormalizedDriver};

/// Fetch and normalize the feed configured in `config`.
pub fn load_drivers(config: &FeedConfig) -> Result<Vec<NormalizedDriver>, PipelineError> {
    let source = config.source();
    feed::fetch_and_normalize(source.as_ref()).map_err(|e| feed_failed(source.as_ref(), e))
}

/// Fetch the feed configured in `config` and build the lookup table.
pub fn load_index(config: &FeedConfig) -> Result<DriverIndex, PipelineError> {
    let source = config.source();
    feed::load_index(source.as_ref()).map_err(|e| feed_failed(source.as_ref(), e))
}

fn feed_failed(source: &dyn FeedSource, error: crate::error::ScanError) -> PipelineError {
    PipelineError::FeedFailed {
        source_name: source.describe(),
        source: error,
    }
}
