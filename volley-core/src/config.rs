use std::num::{NonZeroU64, NonZeroUsize};
use thiserror::Error;

/// Parameters for a single measured batch.
///
/// Built once, validated once, and passed by value into every component
/// that needs it. Nothing mutates a config after construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunConfig {
    /// Maximum number of concurrently active callers.
    pub workers: NonZeroUsize,
    /// Total number of round-trips in the batch.
    pub requests: NonZeroU64,
}

impl RunConfig {
    pub fn new(workers: usize, requests: u64) -> Result<Self, ConfigError> {
        let workers = NonZeroUsize::new(workers).ok_or(ConfigError::ZeroWorkers)?;
        let requests = NonZeroU64::new(requests).ok_or(ConfigError::ZeroRequests)?;
        Ok(Self { workers, requests })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("worker count must be greater than zero")]
    ZeroWorkers,

    #[error("request count must be greater than zero")]
    ZeroRequests,
}
