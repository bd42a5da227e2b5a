#![cfg_attr(docsrs, feature(doc_cfg))]
//! A fixed-concurrency load harness for request/response endpoints.
//!
//! `volley` drives a configured number of concurrent callers through a fixed
//! total number of round-trips against a [`RemoteCall`] endpoint, then
//! reports throughput and a latency distribution. It is a fire-and-collect
//! generator: no retries, no backoff, no rate limiting, no adaptive
//! concurrency.
//!
//! ```no_run
//! use volley::prelude::*;
//!
//! # async fn example(client: impl RemoteCall + Sync + 'static) {
//! let schema = FieldSchema::new()
//!     .field("field1", FieldValue::String("probe".into()))
//!     .field("field2", FieldValue::Integer(100_000))
//!     .field("field3", FieldValue::Boolean(true));
//!
//! let config = RunConfig::new(100, 1_000_000).unwrap();
//! let report = Runner::new(config, client).run(&schema).await.unwrap();
//! println!("{report}");
//! # }
//! ```

pub mod client;
pub mod recorder;
pub mod runner;

pub(crate) mod dispatcher;

#[cfg(feature = "http")]
#[cfg_attr(docsrs, doc(cfg(feature = "http")))]
pub mod http;

pub use client::{CallError, RemoteCall};
pub use recorder::{LatencyRecorder, StatsError};
pub use runner::{RunError, Runner, SetupError};

pub use volley_core as core;

pub mod prelude {
    pub use crate::client::{CallError, RemoteCall};
    pub use crate::runner::Runner;
    pub use volley_core::{
        FieldSchema, FieldValue, LatencySummary, RunConfig, RunReport,
    };

    #[cfg(feature = "http")]
    pub use crate::http::HttpRemoteCall;
}
