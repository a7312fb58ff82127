//! HTTP transport backed by reqwest.

use crate::error::{TransportError, TransportResult};
use crate::traits::{RemoteResponse, Transport};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::redirect::Policy;
use std::time::Duration;
use tracing::instrument;

/// Maximum redirect hops followed by [`Transport::download`].
const MAX_REDIRECTS: usize = 10;

/// HTTP transport.
///
/// Holds two clients that differ only in redirect policy, so the same
/// transport serves both redirect-following downloads and requests that must
/// observe the redirect themselves.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    following: reqwest::Client,
    direct: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport without a request timeout.
    pub fn new() -> TransportResult<Self> {
        Self::with_timeout(None)
    }

    /// Create a transport whose requests fail after `timeout`.
    pub fn with_timeout(timeout: Option<Duration>) -> TransportResult<Self> {
        let build = |policy: Policy| {
            let mut builder = reqwest::Client::builder().redirect(policy);
            if let Some(timeout) = timeout {
                builder = builder.timeout(timeout);
            }
            builder.build()
        };
        Ok(Self {
            following: build(Policy::limited(MAX_REDIRECTS))?,
            direct: build(Policy::none())?,
        })
    }

    fn client(&self, follow_redirects: bool) -> &reqwest::Client {
        if follow_redirects {
            &self.following
        } else {
            &self.direct
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self), fields(backend = "http"))]
    async fn download(&self, url: &str, follow_redirects: bool) -> TransportResult<Bytes> {
        let response = self.client(follow_redirects).get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.bytes().await?;
        tracing::debug!(size = body.len(), "downloaded");
        Ok(body)
    }

    #[instrument(skip(self), fields(backend = "http"))]
    async fn open_remote(&self, url: &str, expect: u16) -> TransportResult<RemoteResponse> {
        let response = self.direct.get(url).send().await?;
        let status = response.status().as_u16();
        if status != expect {
            return Err(TransportError::UnexpectedStatus {
                url: url.to_string(),
                expected: expect,
                actual: status,
            });
        }
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        Ok(RemoteResponse {
            url: url.to_string(),
            status,
            headers,
            body,
        })
    }
}
