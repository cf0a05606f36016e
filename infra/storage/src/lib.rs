//! An embeddable, filesystem-backed document store.
//! Collections map to directories and resources map to individual files holding
//! one serialized record, giving applications durable, human-inspectable
//! persistence without a database server. All examples use temporary
//! directories to avoid writing to the real filesystem.
//!
//! # Core Features
//!
//! - **Atomic Writes**: Records are written to a sibling `.tmp` file and renamed into place, so a reader never sees a half-written record.
//! - **Per-Collection Locking**: Writes and deletes within one collection are serialized; different collections proceed in parallel.
//! - **Suffix-Optional Lookup**: `users/john` and `users/john.json` name the same record.
//! - **Pluggable Codecs**: JSON by default, TOML behind the `toml` feature, or any [`Codec`].
//! - **Injectable Logging**: Any [`Logger`]; the default forwards to `tracing` at `info`.
//! - **Self-Healing**: Stale temp files from interrupted writes are removed when the store opens.
//!
//! # Architectural Overview
//!
//! 1.  **[`resolver`]**: literal-then-suffixed path resolution.
//! 2.  **[`LockRegistry`]**: one lock per collection, created exactly once.
//! 3.  **[`Driver`]**: the `write` / `read` / `read_all` / `delete` surface.
//! 4.  **[`DriverBuilder`]**: a type-safe fluent builder for configuration.
//!
//! # Limitations
//!
//! Locking is in-process. Several processes writing to one root are not
//! coordinated and may corrupt data. There are no multi-record transactions.
//!
//! # Examples
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use shelf_store::{Driver, StoreError};
//!
//! #[derive(Debug, Serialize, Deserialize)]
//! struct Address {
//!     city: String,
//!     country: String,
//! }
//!
//! fn main() -> Result<(), StoreError> {
//!     # let tmp = tempfile::tempdir().unwrap();
//!     # let root = tmp.path().join("data");
//!     let db = Driver::builder().root(&root).durable(true).open()?;
//!
//!     db.write("addresses", "home", &Address { city: "tokyo".into(), country: "japan".into() })?;
//!     assert!(root.join("addresses/home.json").is_file());
//!
//!     let raw = db.read_all("addresses")?;
//!     let home: Address = serde_json::from_slice(&raw[0]).unwrap();
//!     assert_eq!(home.city, "tokyo");
//!     Ok(())
//! }
//! ```

mod builder;
mod codec;
mod driver;
mod error;
mod logger;
mod maintenance;
mod name;
mod registry;
pub mod resolver;

pub use builder::{DriverBuilder, Options};
#[cfg(feature = "toml")]
pub use codec::TomlCodec;
pub use codec::{Codec, JsonCodec};
pub use driver::Driver;
pub use error::{BoxError, StoreError, StoreErrorExt};
pub use logger::{Logger, TracingLogger};
pub use name::{CollectionName, ResourceName};
pub use registry::{CollectionLock, LockRegistry};
pub use tracing::level_filters::LevelFilter;
