//! Fetcher backends.

pub mod local;
pub mod remote;
