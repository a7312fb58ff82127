#![allow(dead_code)]

pub mod mocks;

pub use mocks::{MockReply, MockTransport, SwitchableSettings};

use disco_core::Settings;
use std::path::Path;

/// Settings for reading from a shared result filesystem rooted at `root`.
pub fn local_settings(root: &Path) -> Settings {
    Settings {
        root: root.to_path_buf(),
        flags: ["resultfs"].into_iter().collect(),
        ..Settings::default()
    }
}

/// Write `contents` to `<root>/data/<rel>`, creating parents.
pub fn write_data(root: &Path, rel: &str, contents: &[u8]) {
    let path = root.join("data").join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}
