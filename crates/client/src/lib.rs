//! Resolution of Disco logical addresses into data.
//!
//! [`DataClient`] turns directory addresses into the URLs of their partitions
//! and fetches out-of-band values, reading either the shared result
//! filesystem or the network as the current settings dictate.

pub mod directory;
pub mod error;
pub mod escalation;
pub mod oob;

pub use error::{ClientError, Result};
pub use escalation::{Category, Escalate, data_fail, fail};

use disco_core::{Settings, SettingsProvider};
use disco_transport::Transport;
use std::sync::Arc;

/// Entry point for address resolution.
///
/// Settings are loaded once at the start of every operation and never kept
/// between operations, so concurrent callers share nothing mutable.
#[derive(Clone)]
pub struct DataClient {
    settings: Arc<dyn SettingsProvider>,
    transport: Arc<dyn Transport>,
}

impl DataClient {
    pub fn new(
        settings: impl SettingsProvider + 'static,
        transport: impl Transport + 'static,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            transport: Arc::new(transport),
        }
    }

    /// Load the current settings snapshot.
    pub fn settings(&self) -> Result<Settings> {
        Ok(self.settings.load()?)
    }

    /// Job name encoded in an output address.
    pub fn job_name(&self, address: &str) -> Result<String> {
        let settings = self.settings()?;
        Ok(disco_core::job_name(address, &settings)?)
    }

    /// URL serving `path` from `node` under the current proxy policy.
    pub fn proxy_url(&self, path: &str, node: &str) -> Result<String> {
        let settings = self.settings()?;
        Ok(disco_core::proxy_url(&settings, path, node))
    }
}
