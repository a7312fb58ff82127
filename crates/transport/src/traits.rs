//! Transport trait definitions.

use crate::error::TransportResult;
use async_trait::async_trait;
use bytes::Bytes;
use disco_core::StorageLocation;
use reqwest::header::HeaderMap;
use std::sync::Arc;

/// A fully buffered HTTP response.
#[derive(Clone, Debug)]
pub struct RemoteResponse {
    /// URL the request was sent to.
    pub url: String,
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RemoteResponse {
    /// Get a header value, if present and valid ASCII.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// Get the `Location` header of a redirect.
    pub fn location(&self) -> Option<&str> {
        self.header(reqwest::header::LOCATION.as_str())
    }
}

/// Blocking-read network access: every call returns only once the full body
/// has been received.
///
/// Timeouts belong to implementations of this trait; callers above it have
/// no cancellation of their own.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch the body at `url`, requiring a 2xx status.
    ///
    /// Redirects are followed only when `follow_redirects` is set; otherwise a
    /// redirect response is a non-2xx failure.
    async fn download(&self, url: &str, follow_redirects: bool) -> TransportResult<Bytes>;

    /// Send a GET to `url` without following redirects and require the
    /// response status to be `expect`.
    async fn open_remote(&self, url: &str, expect: u16) -> TransportResult<RemoteResponse>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn download(&self, url: &str, follow_redirects: bool) -> TransportResult<Bytes> {
        (**self).download(url, follow_redirects).await
    }

    async fn open_remote(&self, url: &str, expect: u16) -> TransportResult<RemoteResponse> {
        (**self).open_remote(url, expect).await
    }
}

/// Reads the data stored at a [`StorageLocation`].
///
/// One implementation reads the shared result filesystem, the other goes
/// over the network. Which one applies is decided per call from settings.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Read the full contents at `location`.
    async fn fetch(&self, location: &StorageLocation) -> TransportResult<Bytes>;

    /// Short backend name for logs.
    fn backend(&self) -> &'static str;
}
