use metrics_util::AtomicBucket;
use statistical::mean;
use std::time::Duration;
use thiserror::Error;
use volley_core::{LatencySummary, HIGH_PERCENTILE};

/// Thread-safe accumulator of per-call latencies.
///
/// Workers push samples concurrently and lock-free; the distribution is
/// summarized once, after the completion barrier has released the
/// coordinator. Summarizing drains the accumulator.
pub struct LatencyRecorder {
    samples: AtomicBucket<Duration>,
}

impl LatencyRecorder {
    pub fn new() -> Self {
        Self {
            samples: AtomicBucket::new(),
        }
    }

    pub fn record(&self, elapsed: Duration) {
        self.samples.push(elapsed);
    }

    /// Drain every recorded sample and compute the distribution summary.
    ///
    /// Only meaningful once all insertions have finished; no
    /// query-during-insert ordering is guaranteed.
    pub fn summarize(&self) -> Result<LatencySummary, StatsError> {
        let mut millis = Vec::new();
        self.samples.clear_with(|chunk| {
            millis.extend(chunk.iter().map(|d| d.as_secs_f64() * 1_000.0));
        });

        if millis.is_empty() {
            return Err(StatsError::NoSamples);
        }
        millis.sort_by(|a, b| a.total_cmp(b));

        Ok(LatencySummary {
            mean: from_millis(mean(&millis)),
            min: from_millis(millis[0]),
            max: from_millis(millis[millis.len() - 1]),
            median: from_millis(percentile(&millis, 50.0)),
            p90: from_millis(percentile(&millis, HIGH_PERCENTILE)),
        })
    }
}

impl Default for LatencyRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatsError {
    #[error("no latency samples were recorded")]
    NoSamples,
}

/// Rank-based percentile with linear interpolation between the two nearest
/// ranks. `sorted` must be ascending and non-empty; `0 <= p <= 100`. With a
/// single sample every percentile is that sample.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let rank = (p / 100.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

fn from_millis(ms: f64) -> Duration {
    Duration::from_secs_f64(ms / 1_000.0)
}
