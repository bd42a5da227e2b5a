use axum::{extract::Path, http::StatusCode, routing::post, Json, Router};
use serde::Serialize;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::debug;

pub async fn run(addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router()).await?;
    Ok(())
}

pub fn router() -> Router {
    Router::new()
        .route("/say", post(say))
        .route("/say/delay/ms/:delay_ms", post(say_delayed))
        .route("/say/fail/:percent", post(say_flaky))
}

/// Reply shape the harness probes: only `status` matters to callers.
#[derive(Serialize)]
struct SayReply {
    status: &'static str,
    fields: usize,
}

async fn say(Json(request): Json<Value>) -> Json<SayReply> {
    TPS_MEASURE.fetch_add(1, Ordering::Relaxed);
    debug!("MOCK SERVER ___ SAY");
    Json(reply(&request))
}

async fn say_delayed(Path(delay_ms): Path<u64>, Json(request): Json<Value>) -> Json<SayReply> {
    TPS_MEASURE.fetch_add(1, Ordering::Relaxed);
    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    Json(reply(&request))
}

async fn say_flaky(
    Path(percent): Path<u8>,
    Json(request): Json<Value>,
) -> Result<Json<SayReply>, StatusCode> {
    TPS_MEASURE.fetch_add(1, Ordering::Relaxed);
    if rand::random::<u8>() % 100 < percent {
        debug!("MOCK SERVER ___ ERR");
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    Ok(Json(reply(&request)))
}

fn reply(request: &Value) -> SayReply {
    SayReply {
        status: "ok",
        fields: request.as_object().map(|map| map.len()).unwrap_or(0),
    }
}

/** TPS Printer **/

static TPS_MEASURE: AtomicU64 = AtomicU64::new(0);

pub async fn tps_measure_task() {
    loop {
        tokio::time::sleep(Duration::from_millis(1000)).await;
        let transactions = TPS_MEASURE.fetch_min(0, Ordering::Relaxed);
        println!("{transactions} TPS");
    }
}
