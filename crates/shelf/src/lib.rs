//! Facade crate for Shelf.
//! Re-exports the store, logging bootstrap and configuration crates and wires them together.
//! Keep this crate thin: it should compose other crates, not implement storage logic.
//!
//! ## Usage
//! - Load [`kernel::config::StoreSettings`] with [`kernel::config::load_config`].
//! - Call [`open`] to get a [`store::Driver`] that logs through `tracing`.

use shelf_kernel::config::StoreSettings;
use shelf_store::{Driver, LevelFilter, StoreError, TracingLogger};
use std::sync::Arc;

pub use shelf_kernel as kernel;
pub use shelf_logger as logger;
pub use shelf_store as store;

/// Codecs compiled into this build.
pub const CODECS: &[&str] = &[
    "json",
    #[cfg(feature = "toml")]
    "toml",
];

/// Opens (creating if needed) the store described by `settings`.
///
/// Store events are forwarded to `tracing` up to `level`.
///
/// # Errors
/// Returns an error if the root directory cannot be created or prepared.
pub fn open(settings: &StoreSettings, level: LevelFilter) -> Result<Driver, StoreError> {
    Driver::builder()
        .root(&settings.root)
        .create(true)
        .durable(settings.durable)
        .logger(Arc::new(TracingLogger::new(level)))
        .open()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn open_creates_root_from_settings() {
        let temp = TempDir::new().unwrap();
        let settings = StoreSettings {
            root: temp.path().join("nested/data"),
            durable: true,
            ..StoreSettings::default()
        };

        let db = open(&settings, LevelFilter::WARN).unwrap();
        assert!(settings.root.is_dir());

        db.write("users", "john", &42_u32).unwrap();
        assert_eq!(db.read::<u32>("users", "john").unwrap(), 42);
    }

    #[test]
    fn json_codec_is_always_available() {
        assert_eq!(CODECS.first(), Some(&"json"));
    }
}
