use crate::client::RemoteCall;
use crate::dispatcher;
use crate::recorder::{LatencyRecorder, StatsError};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use volley_core::{
    FieldSchema, Reply, RequestPayload, RunConfig, RunReport, MIN_WALL_ELAPSED, WARMUP_CALLS,
};

/// Drives one measured batch against a [`RemoteCall`] endpoint.
///
/// A runner executes exactly one batch per [`run`](Runner::run) call: build
/// the request once, prime the endpoint with a few untimed calls, fire
/// `config.requests` measured calls through the worker pool, and assemble
/// the report once the last call has completed. Per-call failures never
/// abort the batch; only setup can.
pub struct Runner<C> {
    config: RunConfig,
    client: Arc<C>,
}

impl<C> Runner<C>
where
    C: RemoteCall + Sync + 'static,
{
    pub fn new(config: RunConfig, client: C) -> Self {
        Self {
            config,
            client: Arc::new(client),
        }
    }

    #[instrument(name = "run", skip_all, fields(
        workers = self.config.workers.get(),
        requests = self.config.requests.get(),
    ))]
    pub async fn run(&self, schema: &FieldSchema) -> Result<RunReport, RunError> {
        let request: Arc<[u8]> = RequestPayload::build(schema)
            .to_bytes()
            .map_err(SetupError::Serialize)?
            .into();

        self.warm_up(&request).await;

        let recorder = Arc::new(LatencyRecorder::new());
        let counters = Arc::new(RunCounters::default());

        debug!("starting measured batch");
        let start = Instant::now();
        dispatcher::run_units(self.config, {
            let client = self.client.clone();
            let recorder = recorder.clone();
            let counters = counters.clone();
            move |_id| {
                measured_call(
                    client.clone(),
                    request.clone(),
                    recorder.clone(),
                    counters.clone(),
                )
            }
        })
        .await;
        let elapsed = start.elapsed().max(MIN_WALL_ELAPSED);
        debug!(?elapsed, "batch complete");

        let report = RunReport {
            sent: self.config.requests.get(),
            received: counters.received.load(Ordering::Acquire),
            succeeded: counters.succeeded.load(Ordering::Acquire),
            elapsed,
            latency: recorder.summarize()?,
        };
        info!(tps = report.tps(), "run complete");
        Ok(report)
    }

    /// Untimed calls to prime connections and caches. Outcomes are discarded
    /// entirely: not recorded, not counted, failures only logged.
    async fn warm_up(&self, request: &[u8]) {
        debug!(calls = WARMUP_CALLS, "warming up");
        for _ in 0..WARMUP_CALLS {
            if let Err(err) = self.client.call(request).await {
                warn!(%err, "warmup call failed");
            }
        }
    }
}

/// One unit of work: time a single call, record its latency regardless of
/// outcome, and bump the counters.
async fn measured_call<C>(
    client: Arc<C>,
    request: Arc<[u8]>,
    recorder: Arc<LatencyRecorder>,
    counters: Arc<RunCounters>,
) where
    C: RemoteCall + Sync,
{
    let start = Instant::now();
    let outcome = client.call(&request).await;
    let elapsed = start.elapsed();

    recorder.record(elapsed);
    counters.received.fetch_add(1, Ordering::Relaxed);
    #[cfg(feature = "metrics")]
    metrics::histogram!("volley_call_latency").record(elapsed.as_nanos() as f64);

    match outcome {
        Ok(reply) if reply_ok(&reply) => {
            counters.succeeded.fetch_add(1, Ordering::Relaxed);
            #[cfg(feature = "metrics")]
            metrics::counter!("volley_call_success").increment(1);
        }
        Ok(_) => {
            debug!("reply did not carry the success marker");
            #[cfg(feature = "metrics")]
            metrics::counter!("volley_call_error").increment(1);
        }
        Err(err) => {
            debug!(%err, "call failed");
            #[cfg(feature = "metrics")]
            metrics::counter!("volley_call_error").increment(1);
        }
    }
}

#[derive(Default)]
struct RunCounters {
    received: AtomicU64,
    succeeded: AtomicU64,
}

fn reply_ok(reply: &[u8]) -> bool {
    match Reply::from_bytes(reply) {
        Ok(reply) => reply.is_ok(),
        Err(err) => {
            debug!(%err, "malformed reply");
            false
        }
    }
}

/// The run could not start. Fatal: no timed work has happened yet.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("failed to serialize the request payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error(transparent)]
    Stats(#[from] StatsError),
}
