#[allow(unused)]
use utils::*;

use rand_distr::{Distribution, Normal};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::info;
use volley::prelude::*;

/// Cycles through a fixed latency ladder, one step per call.
struct SteppedDelay {
    next: AtomicUsize,
    steps: Vec<Duration>,
}

impl SteppedDelay {
    fn ten_to_hundred_ms() -> Self {
        Self {
            next: AtomicUsize::new(0),
            steps: (1..=10).map(|n| Duration::from_millis(n * 10)).collect(),
        }
    }
}

impl RemoteCall for SteppedDelay {
    async fn call(&self, _request: &[u8]) -> Result<Vec<u8>, CallError> {
        let idx = self.next.fetch_add(1, Ordering::Relaxed);
        tokio::time::sleep(self.steps[idx % self.steps.len()]).await;
        Ok(serde_json::json!({ "status": "ok" }).to_string().into_bytes())
    }
}

/// Normally distributed latency around 5ms, like a fast unloaded endpoint.
struct JitteredDelay;

impl RemoteCall for JitteredDelay {
    async fn call(&self, _request: &[u8]) -> Result<Vec<u8>, CallError> {
        let normal = Normal::new(5.0_f64, 2.0).unwrap();
        let ms = normal.sample(&mut rand::thread_rng()).max(0.0);
        tokio::time::sleep(Duration::from_secs_f64(ms / 1_000.0)).await;
        Ok(br#"{"status":"ok"}"#.to_vec())
    }
}

struct AlwaysFail;

impl RemoteCall for AlwaysFail {
    async fn call(&self, _request: &[u8]) -> Result<Vec<u8>, CallError> {
        Err(CallError::Status(500))
    }
}

#[tokio::test]
#[ntest::timeout(30_000)]
async fn fixed_ladder_run_reports_exact_counts() {
    let config = RunConfig::new(2, 10).unwrap();
    let report = Runner::new(config, SteppedDelay::ten_to_hundred_ms())
        .run(&schema())
        .await
        .unwrap();
    info!("{report}");

    assert_eq!(report.sent, 10);
    assert_eq!(report.received, 10);
    assert_eq!(report.succeeded, 10);
    assert!(report.tps() > 0.0);

    // Sleeps guarantee at-least timing, so only lower bounds and orderings
    // are stable enough to assert on.
    assert!(report.latency.min >= Duration::from_millis(10));
    assert!(report.latency.mean >= Duration::from_millis(55));
    assert!(report.latency.min <= report.latency.mean);
    assert!(report.latency.mean <= report.latency.max);
    assert!(report.latency.median <= report.latency.p90);
    assert!(report.latency.p90 <= report.latency.max);
}

#[tracing_test::traced_test]
#[tokio::test]
#[ntest::timeout(60_000)]
async fn jittered_run_holds_distribution_orderings() {
    let config = RunConfig::new(8, 100).unwrap();
    let report = Runner::new(config, JitteredDelay)
        .run(&schema())
        .await
        .unwrap();

    assert_eq!(report.received, 100);
    assert_eq!(report.succeeded, 100);
    assert!(report.latency.min <= report.latency.median);
    assert!(report.latency.median <= report.latency.p90);
    assert!(report.latency.p90 <= report.latency.max);
}

#[tokio::test]
#[ntest::timeout(30_000)]
async fn total_failure_still_terminates() {
    let config = RunConfig::new(4, 50).unwrap();
    let report = Runner::new(config, AlwaysFail).run(&schema()).await.unwrap();

    assert_eq!(report.sent, 50);
    assert_eq!(report.received, 50);
    assert_eq!(report.succeeded, 0);
    assert!(report.tps() > 0.0);
}

#[tokio::test]
#[ntest::timeout(60_000)]
async fn counts_hold_for_odd_pool_shapes() {
    for (workers, requests) in [(1, 7), (7, 53), (64, 9)] {
        let config = RunConfig::new(workers, requests).unwrap();
        let report = Runner::new(config, JitteredDelay)
            .run(&schema())
            .await
            .unwrap();

        assert_eq!(report.sent, requests);
        assert_eq!(report.received, requests);
        assert!(report.succeeded <= report.received);
    }
}
