//! Network backend, direct or through the proxy.

use crate::error::TransportResult;
use crate::traits::{Fetcher, Transport};
use async_trait::async_trait;
use bytes::Bytes;
use disco_core::{Settings, StorageLocation, proxy_url};
use std::sync::Arc;
use tracing::instrument;

/// Fetches node data over HTTP via [`proxy_url`].
pub struct RemoteFetcher {
    transport: Arc<dyn Transport>,
    settings: Settings,
}

impl RemoteFetcher {
    /// Create a fetcher bound to one settings snapshot.
    pub fn new(transport: Arc<dyn Transport>, settings: Settings) -> Self {
        Self {
            transport,
            settings,
        }
    }

    /// URL a location is fetched from.
    pub fn url_for(&self, location: &StorageLocation) -> String {
        proxy_url(&self.settings, &location.path, &location.node)
    }
}

#[async_trait]
impl Fetcher for RemoteFetcher {
    #[instrument(skip(self), fields(backend = "remote"))]
    async fn fetch(&self, location: &StorageLocation) -> TransportResult<Bytes> {
        let url = self.url_for(location);
        tracing::debug!(%url, proxied = self.settings.proxy().is_some(), "fetching");
        self.transport.download(&url, false).await
    }

    fn backend(&self) -> &'static str {
        "remote"
    }
}
