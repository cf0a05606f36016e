use config::{Config, Environment, File, Map};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Prefix of environment overrides, e.g. `SHELF__ROOT`.
pub const ENV_PREFIX: &str = "SHELF";
/// Base name of the configuration file looked up when no path is given (`shelf.toml`, `shelf.json`).
pub const DEFAULT_CONFIG_NAME: &str = "shelf";

/// Custom error type for config loading.
#[shelf_derive::shelf_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Settings consumed by the Shelf shell when opening a store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Root directory of the store.
    pub root: PathBuf,
    /// Textual log level (`trace`, `debug`, `info`, `warn`, `error`, `off`).
    pub log_level: String,
    /// Fsync records and their directories after every write.
    pub durable: bool,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self { root: PathBuf::from("./data"), log_level: "info".to_owned(), durable: false }
    }
}

/// A reusable configuration loader that combines file-based settings with environment overrides.
///
/// This function implements a layered configuration strategy:
/// 1. **Base File**: Loads settings from `path` when one is given (the file must exist; its format
///    is inferred from the extension). Without a path, an optional `shelf.toml` / `shelf.json`
///    in the working directory is used if present.
/// 2. **Environment Overrides**: Overlays values from environment variables prefixed with `SHELF__`.
///    Nested structures are accessed using double underscores (e.g., `SHELF__ROOT` maps to `root`).
///
/// # Errors
/// This function will return an error if:
/// * An explicitly given configuration file cannot be found or parsed.
/// * The merged values do not match the structure of type `T`.
///
/// # Example
/// ```rust
/// use shelf_kernel::config::{StoreSettings, load_config};
///
/// let cfg: StoreSettings = load_config(None::<&str>).unwrap_or_default();
/// assert!(!cfg.log_level.is_empty());
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    load_config_with_env(path, None)
}

/// Same as [`load_config`], but reads overrides from `env` instead of the process environment
/// when a map is supplied.
///
/// # Errors
/// See [`load_config`].
pub fn load_config_with_env<T>(
    path: Option<impl AsRef<Path>>,
    env: Option<Map<String, String>>,
) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let file = match path.as_ref() {
        Some(p) => {
            info!("Loading config from {}", p.as_ref().display());
            File::from(p.as_ref()).required(true)
        },
        None => {
            debug!("No config file given, looking for optional '{DEFAULT_CONFIG_NAME}.*'");
            File::with_name(DEFAULT_CONFIG_NAME).required(false)
        },
    };

    let config = Config::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix(ENV_PREFIX).separator("__").try_parsing(true).source(env),
        )
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
