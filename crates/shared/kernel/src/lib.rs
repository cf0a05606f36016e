//! Kernel utilities shared by Shelf binaries.
//! Keep this crate lightweight; today it only owns layered configuration loading.
//!
//! ## Config loading
//! ```rust,no_run
//! use shelf_kernel::config::{StoreSettings, load_config};
//!
//! let settings: StoreSettings = load_config(Some("shelf.toml")).unwrap();
//! println!("{}", settings.root.display());
//! ```
pub mod config;
