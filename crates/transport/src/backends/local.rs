//! Shared result filesystem backend.

use crate::error::{TransportError, TransportResult};
use crate::traits::Fetcher;
use async_trait::async_trait;
use bytes::Bytes;
use disco_core::StorageLocation;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::instrument;

/// Reads result data from `<root>/data` on a filesystem every node shares.
///
/// The node of a location is ignored: every node's data is visible locally.
#[derive(Clone, Debug)]
pub struct LocalFetcher {
    data_dir: PathBuf,
}

impl LocalFetcher {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    /// Local path of a storage-relative path.
    pub fn path_for(&self, rel: &str) -> PathBuf {
        self.data_dir.join(rel.trim_start_matches('/'))
    }

    /// Read a storage-relative path fully into memory.
    pub async fn read(&self, rel: &str) -> TransportResult<Bytes> {
        read_file(&self.path_for(rel)).await
    }
}

/// Read a whole file, attaching the path to any I/O failure.
pub async fn read_file(path: &Path) -> TransportResult<Bytes> {
    let data = fs::read(path).await.map_err(|source| TransportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Bytes::from(data))
}

#[async_trait]
impl Fetcher for LocalFetcher {
    #[instrument(skip(self), fields(backend = "local"))]
    async fn fetch(&self, location: &StorageLocation) -> TransportResult<Bytes> {
        self.read(&location.path).await
    }

    fn backend(&self) -> &'static str {
        "local"
    }
}
