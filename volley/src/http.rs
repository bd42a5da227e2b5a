use crate::client::{CallError, RemoteCall};
use url::Url;

/// [`RemoteCall`] over HTTP: each call POSTs the serialized request and
/// resolves with the reply body. Non-2xx statuses are call failures.
///
/// Connection pooling and keep-alive come from the shared [`reqwest`]
/// client, which is what the warmup calls prime.
#[derive(Clone)]
pub struct HttpRemoteCall {
    client: reqwest::Client,
    url: Url,
}

impl HttpRemoteCall {
    pub fn new(url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }
}

impl RemoteCall for HttpRemoteCall {
    async fn call(&self, request: &[u8]) -> Result<Vec<u8>, CallError> {
        let response = self
            .client
            .post(self.url.clone())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(request.to_vec())
            .send()
            .await
            .map_err(|err| CallError::Transport(err.into()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CallError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| CallError::Transport(err.into()))?;
        Ok(body.to_vec())
    }
}
