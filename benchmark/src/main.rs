use anyhow::Result;
use clap::Parser;
use tracing_subscriber::FmtSubscriber;
use url::Url;
use volley::http::HttpRemoteCall;
use volley::Runner;
use volley_core::{FieldSchema, FieldValue, RunConfig};

/// Fire a fixed batch of round-trips at an endpoint and print the report.
#[derive(Parser)]
struct Args {
    /// Endpoint to benchmark.
    #[arg(long, default_value = "http://127.0.0.1:3002/say")]
    url: Url,

    /// Number of concurrently active callers.
    #[arg(long, default_value_t = 100)]
    workers: usize,

    /// Total number of round-trips to measure.
    #[arg(long, default_value_t = 1_000_000)]
    requests: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    FmtSubscriber::builder()
        .with_env_filter("volley=debug")
        .init();

    let args = Args::parse();
    let config = RunConfig::new(args.workers, args.requests)?;
    let runner = Runner::new(config, HttpRemoteCall::new(args.url));

    let report = runner.run(&benchmark_schema()).await?;
    println!("{report}");

    Ok(())
}

/// One fixed value per field kind the echo endpoint accepts.
fn benchmark_schema() -> FieldSchema {
    FieldSchema::new()
        .field(
            "field1",
            FieldValue::String("the quick brown fox jumps over the lazy dog".to_string()),
        )
        .field("field2", FieldValue::Integer(100_000))
        .field("field3", FieldValue::Boolean(true))
}
