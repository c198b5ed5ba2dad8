//! Configuration for the condo resources module.

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CondoResourcesConfig {
    /// Upper bound for a single store round trip.
    pub store_timeout_ms: u64,

    /// Backoff applied by the client when `list` fails transiently.
    pub list_retry: RetryConfig,

    /// Age thresholds for incident priority.
    pub priority: PriorityThresholds,

    /// Buffered mutation events per subscriber before it is told to fully re-sync.
    pub resync_capacity: usize,
}

impl Default for CondoResourcesConfig {
    fn default() -> Self {
        Self {
            store_timeout_ms: 5_000,
            list_retry: RetryConfig::default(),
            priority: PriorityThresholds::default(),
            resync_capacity: 64,
        }
    }
}

impl CondoResourcesConfig {
    #[must_use]
    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetryConfig {
    /// Retries after the first attempt. Zero disables retrying.
    pub max_times: usize,
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_times: 3,
            min_delay_ms: 50,
            max_delay_ms: 1_000,
        }
    }
}

/// An incident older than `high_after_days` whole days is high priority,
/// older than `medium_after_days` is medium, otherwise low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PriorityThresholds {
    pub medium_after_days: i64,
    pub high_after_days: i64,
}

impl Default for PriorityThresholds {
    fn default() -> Self {
        Self {
            medium_after_days: 3,
            high_after_days: 7,
        }
    }
}
