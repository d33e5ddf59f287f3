//! Default values for loldrivers-scan configuration.

use crate::feed::FeedClientConfig;

/// Default feed request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default feed URL, shared with the HTTP client.
pub(super) fn default_feed_url() -> String {
    FeedClientConfig::default().url
}

/// Default User-Agent, shared with the HTTP client.
pub(super) fn default_user_agent() -> String {
    FeedClientConfig::default().user_agent
}
