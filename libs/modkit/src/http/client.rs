//! Traced HTTP client
//!
//! Wraps `reqwest::Client`: every request runs inside an `outgoing_http` span
//! and carries a `traceparent` header. The JSON helpers turn non-2xx answers
//! into [`ClientError::Status`] so adapters only deal with one error type.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{field, Instrument, Level};

use crate::http::trace;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("{method} {url} failed: {source}")]
    Transport {
        method: reqwest::Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{method} {url} returned HTTP {status}")]
    Status {
        method: reqwest::Method,
        url: String,
        status: u16,
    },

    #[error("failed to decode response of {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl ClientError {
    /// HTTP status for [`ClientError::Status`], `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// A traced HTTP client that injects trace context into outgoing requests.
#[derive(Clone, Debug)]
pub struct TracedClient {
    inner: reqwest::Client,
}

impl TracedClient {
    /// Create a new TracedClient wrapping the provided reqwest::Client
    pub fn new(inner: reqwest::Client) -> Self {
        Self { inner }
    }

    /// Client with a per-request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, ClientError> {
        let inner = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::Build)?;
        Ok(Self::new(inner))
    }

    /// Execute a built request inside an `outgoing_http` span.
    pub async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        let span = tracing::span!(
            Level::INFO,
            "outgoing_http",
            http.method = %req.method(),
            http.url = %req.url(),
            http.status_code = field::Empty,
            trace_id = field::Empty,
            otel.kind = "client",
            error = field::Empty,
        );
        trace::inject_trace_context(req.headers_mut(), &span);

        let inner = self.inner.clone();
        async move {
            let response = inner.execute(req).await;
            let current = tracing::Span::current();
            match &response {
                Ok(resp) => {
                    current.record("http.status_code", resp.status().as_u16());
                    if resp.status().is_client_error() || resp.status().is_server_error() {
                        current.record("error", true);
                    }
                }
                Err(e) => {
                    current.record("error", true);
                    tracing::debug!(error = %e, "outgoing request failed");
                }
            }
            response
        }
        .instrument(span)
        .await
    }

    /// Convenience method for GET requests
    pub async fn get(&self, url: &str) -> reqwest::Result<reqwest::Response> {
        let req = self.inner.get(url).build()?;
        self.execute(req).await
    }

    /// Convenience method for POST requests without a body
    pub async fn post(&self, url: &str) -> reqwest::Result<reqwest::Response> {
        let req = self.inner.post(url).build()?;
        self.execute(req).await
    }

    /// GET `url` and decode a 2xx JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ClientError> {
        let method = reqwest::Method::GET;
        let response = self
            .get(url)
            .await
            .map_err(|source| ClientError::Transport {
                method: method.clone(),
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                method,
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.json::<T>().await.map_err(|source| ClientError::Decode {
            url: url.to_string(),
            source,
        })
    }

    /// POST `body` as JSON; any 2xx is success and the body is ignored.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<u16, ClientError> {
        let method = reqwest::Method::POST;
        let transport = |source| ClientError::Transport {
            method: method.clone(),
            url: url.to_string(),
            source,
        };

        let req = self.inner.post(url).json(body).build().map_err(transport)?;
        let response = self.execute(req).await.map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                method,
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(status.as_u16())
    }

    /// Get a reference to the underlying reqwest::Client for advanced usage
    pub fn inner(&self) -> &reqwest::Client {
        &self.inner
    }
}

impl From<reqwest::Client> for TracedClient {
    fn from(c: reqwest::Client) -> Self {
        Self::new(c)
    }
}

impl Default for TracedClient {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Ping {
        ok: bool,
    }

    #[tokio::test]
    async fn test_get_injects_trace_header() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(GET).path("/ping").header_exists("traceparent");
            then.status(200).body("ok");
        });

        let client = TracedClient::default();
        let resp = client.get(&server.url("/ping")).await.unwrap();

        assert!(resp.status().is_success());
        m.assert();
    }

    #[tokio::test]
    async fn test_get_json_decodes_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/ping");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"ok":true}"#);
        });

        let client = TracedClient::with_timeout(Duration::from_secs(5)).unwrap();
        let ping: Ping = client.get_json(&server.url("/ping")).await.unwrap();
        assert_eq!(ping, Ping { ok: true });
    }

    #[tokio::test]
    async fn test_get_json_maps_server_error_to_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/ping");
            then.status(503);
        });

        let client = TracedClient::default();
        let err = client
            .get_json::<Ping>(&server.url("/ping"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(503));
    }

    #[tokio::test]
    async fn test_get_json_maps_garbage_to_decode() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/ping");
            then.status(200).body("not json");
        });

        let client = TracedClient::default();
        let err = client
            .get_json::<Ping>(&server.url("/ping"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_post_json_sends_body() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(POST)
                .path("/posts")
                .header_exists("traceparent")
                .json_body(serde_json::json!({ "email": "a@b.in" }));
            then.status(201);
        });

        let client = TracedClient::default();
        let status = client
            .post_json(&server.url("/posts"), &serde_json::json!({ "email": "a@b.in" }))
            .await
            .unwrap();

        assert_eq!(status, 201);
        m.assert();
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let client = TracedClient::with_timeout(Duration::from_millis(500)).unwrap();
        let err = client
            .get_json::<Ping>("http://127.0.0.1:9/unreachable")
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Transport { .. }));
    }
}
