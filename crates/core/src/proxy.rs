//! Transport URLs for data held on a node.

use crate::address::Address;
use crate::config::Settings;

/// Node name used when the caller does not care which node serves a path.
pub const DEFAULT_NODE: &str = "x";

/// Compute the URL serving `path` from `node`.
///
/// With a proxy configured the proxy is always reached by its own scheme and
/// authority, and the node and path move into its `/disco/node/` namespace.
/// Otherwise the node is addressed directly on the service port.
pub fn proxy_url(settings: &Settings, path: &str, node: &str) -> String {
    match settings.proxy() {
        Some(proxy) => {
            let proxy = Address::parse(proxy, settings);
            format!(
                "{}://{}/disco/node/{node}/{path}",
                proxy.scheme(),
                proxy.authority()
            )
        }
        None => format!("http://{node}:{}/{path}", settings.port),
    }
}
