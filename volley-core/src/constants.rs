use std::time::Duration;

/// Number of untimed calls issued before the measured batch starts.
pub const WARMUP_CALLS: usize = 10;

/// Floor for the measured wall-clock time of a batch, so the throughput
/// figure stays finite for degenerate sub-millisecond runs.
pub const MIN_WALL_ELAPSED: Duration = Duration::from_millis(1);

/// The percentile reported on the high-percentile line of a run report.
pub const HIGH_PERCENTILE: f64 = 90.0;
