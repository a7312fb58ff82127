//! Logical address types and parsing.
//!
//! Addresses follow `[<scheme>://][<authority>][/<path>]`. A missing scheme
//! means `file`, and `disco://host/...` is sugar for `http://host:<port>/...`.

use crate::config::Settings;
use std::fmt;

/// Address scheme.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// Local file, also the default when no `://` is present.
    File,
    /// A directory index of partitioned outputs.
    Dir,
    /// Logical scheme for a node's own service port.
    Disco,
    Http,
    /// Any other transport scheme, kept verbatim.
    Other(String),
}

impl Scheme {
    /// Parse a scheme name. Unknown names are preserved as [`Scheme::Other`].
    pub fn parse(name: &str) -> Self {
        match name {
            "file" => Self::File,
            "dir" => Self::Dir,
            "disco" => Self::Disco,
            "http" => Self::Http,
            other => Self::Other(other.to_string()),
        }
    }

    /// Get the scheme name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::File => "file",
            Self::Dir => "dir",
            Self::Disco => "disco",
            Self::Http => "http",
            Self::Other(name) => name,
        }
    }

    /// The scheme an address is actually transported over.
    pub fn transport(self) -> Self {
        match self {
            Self::Disco => Self::Http,
            other => other,
        }
    }

    /// Whether addresses of this scheme carry a job name in their path.
    pub fn names_job(&self) -> bool {
        matches!(self, Self::Disco | Self::Dir | Self::Http)
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed logical address.
///
/// After parsing the scheme is never [`Scheme::Disco`]: it has been mapped to
/// its transport scheme and the configured port folded into the authority.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Address {
    scheme: Scheme,
    authority: String,
    path: String,
}

impl Address {
    /// Parse an address, taking the `disco` port from settings.
    pub fn parse(address: &str, settings: &Settings) -> Self {
        Self::parse_with_port(address, settings.port)
    }

    /// Parse an address with an explicit port for the `disco` scheme.
    pub fn parse_with_port(address: &str, port: u16) -> Self {
        let (scheme, rest) = match address.split_once("://") {
            Some((scheme, rest)) => (Scheme::parse(scheme), rest),
            None => (Scheme::File, address),
        };
        let (authority, path) = rest.split_once('/').unwrap_or((rest, ""));

        let authority = match scheme {
            Scheme::Disco => format!("{authority}:{port}"),
            _ => authority.to_string(),
        };

        Self {
            scheme: scheme.transport(),
            authority,
            path: path.to_string(),
        }
    }

    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    /// Get the authority (host, optionally with port).
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Get the path, without its leading `/`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The `<scheme>://<authority>` base this address is served from.
    pub fn host(&self) -> String {
        format!("{}://{}", self.scheme, self.authority)
    }

    /// Where the data behind this address lives in node storage.
    pub fn storage_location(&self) -> StorageLocation {
        StorageLocation {
            node: self.authority.clone(),
            path: self.path.clone(),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}://{}", self.scheme, self.authority)
        } else {
            write!(f, "{}://{}/{}", self.scheme, self.authority, self.path)
        }
    }
}

/// A storage-relative path on a named node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StorageLocation {
    pub node: String,
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_without_separator_defaults_to_file() {
        let addr = Address::parse_with_port("/tmp/results/part-0", 8989);
        assert_eq!(addr.scheme(), &Scheme::File);
        assert_eq!(addr.authority(), "");
        assert_eq!(addr.path(), "tmp/results/part-0");

        let addr = Address::parse_with_port("localhost", 8989);
        assert_eq!(addr.scheme(), &Scheme::File);
        assert_eq!(addr.authority(), "localhost");
        assert_eq!(addr.path(), "");
    }

    #[test]
    fn test_parse_disco_rewrites_to_http_with_port() {
        let addr = Address::parse_with_port("disco://host/path", 4444);
        assert_eq!(addr.scheme(), &Scheme::Http);
        assert_eq!(addr.authority(), "host:4444");
        assert_eq!(addr.path(), "path");
    }

    #[test]
    fn test_parse_takes_port_from_settings() {
        let settings = Settings {
            port: 1234,
            ..Settings::default()
        };
        let addr = Address::parse("disco://node7/a/b", &settings);
        assert_eq!(addr.authority(), "node7:1234");
        assert_eq!(addr.path(), "a/b");
    }

    #[test]
    fn test_parse_splits_only_once() {
        let addr = Address::parse_with_port("http://host:80/a://b/c", 8989);
        assert_eq!(addr.scheme(), &Scheme::Http);
        assert_eq!(addr.authority(), "host:80");
        assert_eq!(addr.path(), "a://b/c");
    }

    #[test]
    fn test_parse_keeps_unknown_schemes() {
        let addr = Address::parse_with_port("ftp://host/x", 8989);
        assert_eq!(addr.scheme(), &Scheme::Other("ftp".to_string()));
        assert!(!addr.scheme().names_job());
    }

    #[test]
    fn test_parse_empty_components() {
        let addr = Address::parse_with_port("dir://", 8989);
        assert_eq!(addr.scheme(), &Scheme::Dir);
        assert_eq!(addr.authority(), "");
        assert_eq!(addr.path(), "");
    }

    #[test]
    fn test_host() {
        let addr = Address::parse_with_port("disco://master/disco/ctrl", 8989);
        assert_eq!(addr.host(), "http://master:8989");
    }

    #[test]
    fn test_display() {
        let addr = Address::parse_with_port("dir://node1/job/index", 8989);
        assert_eq!(addr.to_string(), "dir://node1/job/index");
        let addr = Address::parse_with_port("http://node1", 8989);
        assert_eq!(addr.to_string(), "http://node1");
    }

    #[test]
    fn test_storage_location() {
        let addr = Address::parse_with_port("dir://node1/job/index", 8989);
        let location = addr.storage_location();
        assert_eq!(location.node, "node1");
        assert_eq!(location.path, "job/index");
    }
}
