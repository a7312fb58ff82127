//! Job name extraction.

use crate::address::Address;
use crate::config::Settings;
use crate::error::{Error, Result};

/// Derive the job name from an output address.
///
/// Job outputs are laid out as `<scheme>://<node>/.../<job>/<file>`, so the
/// job name is the second-to-last path segment. Only `disco`, `dir` and
/// `http` addresses follow that layout.
pub fn job_name(address: &str, settings: &Settings) -> Result<String> {
    let parsed = Address::parse(address, settings);
    if !parsed.scheme().names_job() {
        return Err(Error::Address(format!(
            "cannot parse job name from {address}"
        )));
    }

    let segments: Vec<&str> = parsed.path().trim_matches('/').split('/').collect();
    match segments.len().checked_sub(2).map(|i| segments[i]) {
        Some(name) => Ok(name.to_string()),
        None => Err(Error::Address(format!(
            "cannot parse job name from {address}: path has no job segment"
        ))),
    }
}
