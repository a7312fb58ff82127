//! Directory index resolution.

use crate::DataClient;
use crate::error::Result;
use disco_core::{Address, DirectoryIndex, PartitionId, Scheme, Settings};
use disco_transport::fetcher_for;
use tracing::instrument;

impl DataClient {
    /// Resolve a `dir://` address into the URLs it indexes.
    ///
    /// With `partition` set only that partition's URLs are returned. Order is
    /// the index's own. Any transport or format failure fails the whole call.
    #[instrument(skip(self))]
    pub async fn resolve_directory(
        &self,
        address: &str,
        partition: Option<PartitionId>,
    ) -> Result<Vec<String>> {
        let settings = self.settings()?;
        self.resolve_with(&settings, address, partition).await
    }

    /// Expand an address into the URLs it stands for.
    ///
    /// A `dir://` address expands to every URL in its index; anything else is
    /// returned unchanged as the only element.
    #[instrument(skip(self))]
    pub async fn urllist(&self, address: &str) -> Result<Vec<String>> {
        let settings = self.settings()?;
        if Address::parse(address, &settings).scheme() == &Scheme::Dir {
            self.resolve_with(&settings, address, None).await
        } else {
            Ok(vec![address.to_string()])
        }
    }

    async fn resolve_with(
        &self,
        settings: &Settings,
        address: &str,
        partition: Option<PartitionId>,
    ) -> Result<Vec<String>> {
        let location = Address::parse(address, settings).storage_location();
        let fetcher = fetcher_for(settings, self.transport.clone());
        tracing::debug!(
            backend = fetcher.backend(),
            node = %location.node,
            path = %location.path,
            "reading directory index"
        );

        let body = fetcher.fetch(&location).await?;
        let index = DirectoryIndex::from_bytes(&body)?;
        Ok(index.urls(partition))
    }
}
