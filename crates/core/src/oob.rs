//! Out-of-band control-plane query and redirect handling.

use crate::config::Settings;
use crate::error::{Error, Result};
use url::Url;

/// Control-plane endpoint serving out-of-band lookups, relative to the host.
pub const OOB_GET_PATH: &str = "disco/ctrl/oob_get";

/// Path segments of a redirect `Location` that precede the storage-relative
/// location, after the authority.
const LOCATION_PREFIX_SEGMENTS: usize = 2;

/// A lookup of one out-of-band value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OobQuery {
    /// Control-plane base, e.g. `http://master:8989`.
    pub host: String,
    /// Dataset (job) the value was stored under.
    pub name: String,
    pub key: String,
    /// Whether this node reaches data through the proxy.
    pub proxy: bool,
}

impl OobQuery {
    pub fn new(host: &str, name: &str, key: &str, settings: &Settings) -> Self {
        Self {
            host: host.to_string(),
            name: name.to_string(),
            key: key.to_string(),
            proxy: settings.proxy().is_some(),
        }
    }

    /// `<host>/disco/ctrl/oob_get?name=<name>&key=<key>&proxy=<0|1>`.
    pub fn url(&self) -> Result<Url> {
        let base = format!("{}/{OOB_GET_PATH}", self.host.trim_end_matches('/'));
        let mut url = Url::parse(&base).map_err(|e| {
            Error::Address(format!("invalid control host {:?}: {e}", self.host))
        })?;
        url.query_pairs_mut()
            .append_pair("name", &self.name)
            .append_pair("key", &self.key)
            .append_pair("proxy", if self.proxy { "1" } else { "0" });
        Ok(url)
    }
}

/// Extract the storage-relative location from a control-plane redirect.
///
/// The control plane answers with `scheme://host/<a>/<b>/<relative path>`;
/// the relative path is what follows the first three segments after
/// `scheme://`, so `http://ctrl/x/y/rel/path` names `rel/path`. It is taken
/// from the header text as sent, without URL normalization. Any other shape,
/// including `.` or `..` segments, is a format error.
pub fn redirect_location(location: &str) -> Result<String> {
    let malformed = |why: &str| Error::Format(format!("redirect location {location:?} {why}"));

    let url = Url::parse(location).map_err(|e| malformed(&format!("is not a URL: {e}")))?;
    if url.host_str().is_none_or(str::is_empty) {
        return Err(malformed("has no host"));
    }
    let Some((_, after_scheme)) = location.split_once("://") else {
        return Err(malformed("is not an absolute URL"));
    };

    let parts: Vec<&str> = after_scheme.splitn(LOCATION_PREFIX_SEGMENTS + 2, '/').collect();
    let [_, prefix @ .., rel] = parts.as_slice() else {
        return Err(malformed("has too few path segments"));
    };
    if prefix.len() < LOCATION_PREFIX_SEGMENTS {
        return Err(malformed("has too few path segments"));
    }
    if rel.is_empty() {
        return Err(malformed("has an empty relative path"));
    }
    if prefix
        .iter()
        .copied()
        .chain(rel.split('/'))
        .any(|segment| segment == "." || segment == "..")
    {
        return Err(malformed("has a dot segment"));
    }
    Ok(rel.to_string())
}
