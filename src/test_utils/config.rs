//! Configuration builders for testing.

use crate::config::{RetryConfig, SourceConfig};

/// Source configuration pointing at `base_url` with two sources, which is
/// what most scenarios use.
pub fn test_source_config(base_url: impl Into<String>) -> SourceConfig {
    SourceConfig {
        base_url: base_url.into(),
        count: 2,
    }
}

/// Retry policy for tests: 2 total attempts, no delay.
pub fn test_retry_config() -> RetryConfig {
    RetryConfig {
        max_attempts: 2,
        delay_seconds: 0,
    }
}
