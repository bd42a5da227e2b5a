use thiserror::Error;

/// Boundary to the system under test.
///
/// One call sends a serialized request and resolves with the serialized
/// reply, or a [`CallError`] on any transport or remote-side failure. The
/// harness treats a call as a single opaque operation: no timeout, no retry,
/// no inspection beyond the reply's success marker.
#[trait_variant::make(RemoteCall: Send)]
pub trait LocalRemoteCall {
    async fn call(&self, request: &[u8]) -> Result<Vec<u8>, CallError>;
}

/// A single remote call failed.
#[derive(Debug, Error)]
pub enum CallError {
    #[error("transport failure: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("remote replied with status {0}")]
    Status(u16),
}
