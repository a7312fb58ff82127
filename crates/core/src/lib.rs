//! Core domain types for resolving Disco logical addresses.
//!
//! This crate defines the pieces every other crate builds on:
//! - The logical address grammar and its scheme mapping
//! - Job name extraction from output addresses
//! - Proxy-aware transport URLs for node-local data
//! - The partitioned directory index format
//! - Out-of-band control-plane queries
//! - Process settings, re-read on every load

pub mod address;
pub mod config;
pub mod error;
pub mod index;
pub mod job;
pub mod oob;
pub mod proxy;

pub use address::{Address, Scheme, StorageLocation};
pub use config::{EnvSettings, Flags, Settings, SettingsProvider, StorageMode};
pub use error::{Error, Result};
pub use index::{DirectoryIndex, IndexEntry, PartitionId};
pub use job::job_name;
pub use oob::{OobQuery, redirect_location};
pub use proxy::{DEFAULT_NODE, proxy_url};

/// Default service port used when settings do not name one.
pub const DEFAULT_PORT: u16 = 8989;

/// Feature flag that switches data access to the shared result filesystem.
pub const RESULTFS_FLAG: &str = "resultfs";
