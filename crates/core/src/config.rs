//! Process settings shared across crates.
//!
//! Settings are never cached: a [`SettingsProvider`] builds a fresh
//! [`Settings`] on every `load`, so reconfiguration takes effect on the next
//! operation without a restart.

use figment::Figment;
use figment::providers::{Env, Format, Toml};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Prefix of environment variables read by [`EnvSettings`].
pub const ENV_PREFIX: &str = "DISCO_";

/// Settings consumed by address resolution and data access.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// Service port every node listens on (`DISCO_PORT`).
    #[serde(default = "default_port")]
    pub port: u16,
    /// Proxy base address; empty disables proxying (`DISCO_PROXY`).
    #[serde(default)]
    pub proxy: String,
    /// Storage root; result data lives under `<root>/data` (`DISCO_ROOT`).
    #[serde(default = "default_root")]
    pub root: PathBuf,
    /// Feature flags (`DISCO_FLAGS`).
    #[serde(default)]
    pub flags: Flags,
}

fn default_port() -> u16 {
    crate::DEFAULT_PORT
}

fn default_root() -> PathBuf {
    PathBuf::from("/srv/disco")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: default_port(),
            proxy: String::new(),
            root: default_root(),
            flags: Flags::default(),
        }
    }
}

impl Settings {
    /// Extract settings from an already assembled figment.
    pub fn from_figment(figment: &Figment) -> crate::Result<Self> {
        Ok(figment.extract()?)
    }

    /// The proxy base address, if proxying is enabled.
    pub fn proxy(&self) -> Option<&str> {
        Some(self.proxy.as_str()).filter(|proxy| !proxy.is_empty())
    }

    /// Directory holding result data: `<root>/data`.
    pub fn data_dir(&self) -> PathBuf {
        self.root.join("data")
    }

    /// Select how result data is reached on this node.
    pub fn storage_mode(&self) -> StorageMode {
        if self.flags.contains(crate::RESULTFS_FLAG) {
            StorageMode::Local {
                data_dir: self.data_dir(),
            }
        } else {
            StorageMode::Remote
        }
    }
}

/// Where result data is read from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageMode {
    /// Shared result filesystem mounted at `data_dir`.
    Local { data_dir: PathBuf },
    /// Over HTTP, directly or through the proxy.
    Remote,
}

impl StorageMode {
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local { .. })
    }
}

/// A set of feature flag names.
///
/// Deserializes from a list or from one string of names separated by
/// whitespace or commas, which is how it arrives from the environment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "FlagsRepr", into = "Vec<String>")]
pub struct Flags(BTreeSet<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum FlagsRepr {
    List(Vec<String>),
    Joined(String),
}

impl From<FlagsRepr> for Flags {
    fn from(repr: FlagsRepr) -> Self {
        match repr {
            FlagsRepr::List(flags) => flags.into_iter().collect(),
            FlagsRepr::Joined(joined) => joined
                .split(|c: char| c.is_whitespace() || c == ',')
                .collect(),
        }
    }
}

impl From<Flags> for Vec<String> {
    fn from(flags: Flags) -> Self {
        flags.0.into_iter().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for Flags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(Into::into)
                .filter(|flag: &String| !flag.is_empty())
                .collect(),
        )
    }
}

impl Flags {
    pub fn contains(&self, flag: &str) -> bool {
        self.0.contains(flag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Source of [`Settings`], consulted once at the start of each operation.
pub trait SettingsProvider: Send + Sync {
    fn load(&self) -> crate::Result<Settings>;
}

/// A fixed snapshot.
impl SettingsProvider for Settings {
    fn load(&self) -> crate::Result<Settings> {
        Ok(self.clone())
    }
}

impl<P: SettingsProvider + ?Sized> SettingsProvider for Arc<P> {
    fn load(&self) -> crate::Result<Settings> {
        (**self).load()
    }
}

/// Settings read from an optional TOML file and `DISCO_*` environment
/// variables, re-read on every load.
#[derive(Clone, Debug, Default)]
pub struct EnvSettings {
    file: Option<PathBuf>,
}

impl EnvSettings {
    /// Environment variables only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Layer a TOML file under the environment. A missing file is skipped.
    pub fn with_file(path: impl AsRef<Path>) -> Self {
        Self {
            file: Some(path.as_ref().to_path_buf()),
        }
    }

    /// The figment this provider extracts from.
    pub fn figment(&self) -> Figment {
        let mut figment = Figment::new();
        if let Some(file) = &self.file {
            figment = figment.merge(Toml::file(file));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }
}

impl SettingsProvider for EnvSettings {
    fn load(&self) -> crate::Result<Settings> {
        let settings = Settings::from_figment(&self.figment())?;
        tracing::trace!(?settings, "loaded settings");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.port, crate::DEFAULT_PORT);
        assert!(settings.proxy().is_none());
        assert!(settings.flags.is_empty());
        assert_eq!(settings.storage_mode(), StorageMode::Remote);
    }

    #[test]
    fn test_settings_from_empty_figment_uses_defaults() {
        let settings = Settings::from_figment(&Figment::new()).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_settings_from_toml() {
        let figment = Figment::new().merge(Toml::string(
            r#"
            port = 7000
            proxy = "http://proxyhost/"
            root = "/var/disco"
            flags = ["resultfs", "debug"]
            "#,
        ));
        let settings = Settings::from_figment(&figment).unwrap();
        assert_eq!(settings.port, 7000);
        assert_eq!(settings.proxy(), Some("http://proxyhost/"));
        assert_eq!(settings.root, PathBuf::from("/var/disco"));
        assert!(settings.flags.contains("resultfs"));
        assert!(settings.flags.contains("debug"));
    }

    #[test]
    fn test_flags_from_joined_string() {
        let figment = Figment::new().merge(Toml::string(r#"flags = "resultfs, debug  other""#));
        let settings = Settings::from_figment(&figment).unwrap();
        let flags: Vec<&str> = settings.flags.iter().collect();
        assert_eq!(flags, vec!["debug", "other", "resultfs"]);
    }

    #[test]
    fn test_flags_empty_string() {
        let figment = Figment::new().merge(Toml::string(r#"flags = """#));
        let settings = Settings::from_figment(&figment).unwrap();
        assert!(settings.flags.is_empty());
    }

    #[test]
    fn test_flags_serialize_as_list() {
        let flags: Flags = ["resultfs"].into_iter().collect();
        let json = serde_json::to_string(&flags).unwrap();
        assert_eq!(json, r#"["resultfs"]"#);
    }

    #[test]
    fn test_invalid_port_is_config_error() {
        let figment = Figment::new().merge(Toml::string(r#"port = "not-a-port""#));
        match Settings::from_figment(&figment) {
            Err(crate::Error::Config(_)) => {}
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_resultfs_flag_selects_local_storage() {
        let settings = Settings {
            root: PathBuf::from("/srv/disco"),
            flags: ["resultfs"].into_iter().collect(),
            ..Settings::default()
        };
        assert_eq!(
            settings.storage_mode(),
            StorageMode::Local {
                data_dir: PathBuf::from("/srv/disco/data")
            }
        );
        assert!(settings.storage_mode().is_local());
    }

    #[test]
    fn test_snapshot_provider_returns_clone() {
        let settings = Settings {
            port: 4321,
            ..Settings::default()
        };
        assert_eq!(settings.load().unwrap(), settings);
    }

    #[test]
    fn test_env_settings_missing_file_is_skipped() {
        let provider = EnvSettings::with_file("/nonexistent/disco-settings.toml");
        assert!(provider.load().is_ok());
    }
}
