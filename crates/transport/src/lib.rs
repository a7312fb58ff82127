//! Data transport for Disco.
//!
//! This crate provides:
//! - The [`Transport`] capability: whole-body HTTP downloads and
//!   status-checked requests that observe redirects
//! - [`HttpTransport`], its reqwest implementation
//! - [`Fetcher`] backends reading node data from the shared result
//!   filesystem or over the network

pub mod backends;
pub mod error;
pub mod http;
pub mod traits;

pub use backends::{local::LocalFetcher, remote::RemoteFetcher};
pub use error::{TransportError, TransportResult};
pub use http::HttpTransport;
pub use traits::{Fetcher, RemoteResponse, Transport};

/// Header types used by [`RemoteResponse`].
pub use reqwest::header;

use disco_core::{Settings, StorageMode};
use std::sync::Arc;

/// Select the fetcher for one operation from a settings snapshot.
pub fn fetcher_for(settings: &Settings, transport: Arc<dyn Transport>) -> Box<dyn Fetcher> {
    match settings.storage_mode() {
        StorageMode::Local { data_dir } => Box::new(LocalFetcher::new(data_dir)),
        StorageMode::Remote => Box::new(RemoteFetcher::new(transport, settings.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn fetcher_for_follows_resultfs_flag() {
        let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new().unwrap());

        let remote = Settings::default();
        assert_eq!(fetcher_for(&remote, transport.clone()).backend(), "remote");

        let local = Settings {
            root: PathBuf::from("/srv/disco"),
            flags: ["resultfs"].into_iter().collect(),
            ..Settings::default()
        };
        assert_eq!(fetcher_for(&local, transport).backend(), "local");
    }
}
