//! Out-of-band value retrieval.

use crate::DataClient;
use crate::error::Result;
use bytes::Bytes;
use disco_core::{OobQuery, StorageMode, redirect_location};
use disco_transport::{LocalFetcher, TransportError};
use tracing::instrument;

/// Status the control plane answers with when it names a storage location.
const REDIRECT_STATUS: u16 = 302;

impl DataClient {
    /// Fetch the out-of-band value stored under `key` for dataset `name`.
    ///
    /// On the shared result filesystem the control plane's redirect only
    /// names where the value lives, so it is resolved to a local path and
    /// read from disk. Otherwise the redirect is followed over the network.
    #[instrument(skip(self))]
    pub async fn load_oob(&self, host: &str, name: &str, key: &str) -> Result<Bytes> {
        let settings = self.settings()?;
        let url = OobQuery::new(host, name, key, &settings).url()?;

        match settings.storage_mode() {
            StorageMode::Local { data_dir } => {
                let response = self
                    .transport
                    .open_remote(url.as_str(), REDIRECT_STATUS)
                    .await?;
                let location = response.location().ok_or_else(|| TransportError::MissingHeader {
                    url: url.to_string(),
                    header: "Location",
                })?;
                let rel = redirect_location(location)?;
                tracing::debug!(%location, %rel, "reading out-of-band value locally");
                Ok(LocalFetcher::new(data_dir).read(&rel).await?)
            }
            StorageMode::Remote => Ok(self.transport.download(url.as_str(), true).await?),
        }
    }
}
