use std::fmt;
use std::time::Duration;

/// Latency distribution of a completed batch.
///
/// The high-percentile figure is the 90th percentile. Percentiles are
/// rank-based with linear interpolation between the two nearest ranks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LatencySummary {
    pub mean: Duration,
    pub min: Duration,
    pub max: Duration,
    pub median: Duration,
    pub p90: Duration,
}

/// Final outcome of a batch. Produced exactly once, after every request has
/// completed.
#[derive(Clone, Copy, Debug)]
pub struct RunReport {
    /// Requests submitted to the worker pool.
    pub sent: u64,
    /// Requests that came back, successfully or not.
    pub received: u64,
    /// Requests whose reply carried the success marker.
    pub succeeded: u64,
    /// Measured wall-clock time of the batch, clamped to at least
    /// [`MIN_WALL_ELAPSED`](crate::MIN_WALL_ELAPSED).
    pub elapsed: Duration,
    pub latency: LatencySummary,
}

impl RunReport {
    /// Completed requests per second over the measured wall-clock time.
    pub fn tps(&self) -> f64 {
        self.sent as f64 * 1_000.0 / millis(self.elapsed)
    }
}

fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1_000.0
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "sent     requests    : {}", self.sent)?;
        writeln!(f, "received requests    : {}", self.received)?;
        writeln!(f, "received requests_OK : {}", self.succeeded)?;
        writeln!(
            f,
            "elapsed              : {}",
            humantime::format_duration(self.elapsed)
        )?;
        writeln!(f, "throughput  (TPS)    : {:.0}", self.tps())?;
        writeln!(f, "mean:   {:.3}ms", millis(self.latency.mean))?;
        writeln!(f, "median: {:.3}ms", millis(self.latency.median))?;
        writeln!(f, "max:    {:.3}ms", millis(self.latency.max))?;
        writeln!(f, "min:    {:.3}ms", millis(self.latency.min))?;
        write!(f, "90P:    {:.3}ms", millis(self.latency.p90))
    }
}
