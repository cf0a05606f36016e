use crate::codec::{Codec, JsonCodec};
use crate::driver::{self, Driver, DriverInner};
use crate::error::{StoreError, StoreErrorExt};
use crate::logger::{Logger, TracingLogger};
use crate::maintenance;
use crate::registry::LockRegistry;
use crate::resolver;
use private::Sealed;
use std::path::PathBuf;
use std::sync::Arc;

/// Construction options accepted by [`Driver::new`].
///
/// A missing logger means "use [`TracingLogger`] at `info`".
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub logger: Option<Arc<dyn Logger>>,
}

#[derive(Debug, Clone)]
struct DriverConfig {
    logger: Option<Arc<dyn Logger>>,
    durable: bool,
    create: bool,
    purge_tmp: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self { logger: None, durable: false, create: false, purge_tmp: true }
    }
}

#[derive(Debug, Default)]
pub struct NoRoot;
#[derive(Debug)]
pub struct WithRoot(PathBuf);

mod private {
    pub(super) trait Sealed {}
}
impl Sealed for NoRoot {}
impl Sealed for WithRoot {}

/// Fluent builder for a [`Driver`]; the root directory is mandatory.
#[allow(private_bounds)]
#[derive(Debug)]
pub struct DriverBuilder<S: Sealed = NoRoot, C: Codec = JsonCodec> {
    state: S,
    codec: C,
    config: DriverConfig,
}

impl Default for DriverBuilder {
    fn default() -> Self {
        Self { state: NoRoot, codec: JsonCodec, config: DriverConfig::default() }
    }
}

#[allow(private_bounds)]
impl<S: Sealed, C: Codec> DriverBuilder<S, C> {
    /// Injects the logging capability used for every driver message.
    #[must_use = "Sets the logger for the driver"]
    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.config.logger = Some(logger);
        self
    }

    /// Replaces the serialization format (and with it the storage suffix).
    #[must_use = "Sets the codec for the driver"]
    pub fn codec<N: Codec>(self, codec: N) -> DriverBuilder<S, N> {
        DriverBuilder { state: self.state, codec, config: self.config }
    }

    /// Forces temp files and their directory to stable storage around each rename.
    ///
    /// Off by default: a crash between write and rename may then lose the
    /// pending write, though never the previously committed content.
    #[must_use = "Sets whether writes are synced to disk"]
    pub const fn durable(mut self, enable: bool) -> Self {
        self.config.durable = enable;
        self
    }

    /// Creates the root directory eagerly instead of on the first write.
    #[must_use = "Sets whether the root directory is created on open"]
    pub const fn create(mut self, enable: bool) -> Self {
        self.config.create = enable;
        self
    }

    /// Removes stale `*.tmp` files below the root when the driver opens.
    #[must_use = "Sets whether orphaned temp files are purged on open"]
    pub const fn purge_tmp(mut self, enable: bool) -> Self {
        self.config.purge_tmp = enable;
        self
    }

    fn transition<N: Sealed>(self, state: N) -> DriverBuilder<N, C> {
        DriverBuilder { state, codec: self.codec, config: self.config }
    }
}

impl DriverBuilder<NoRoot> {
    #[must_use = "Creates a new driver builder with default configuration"]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Codec> DriverBuilder<NoRoot, C> {
    #[must_use = "Sets the root directory of the store"]
    pub fn root(self, path: impl Into<PathBuf>) -> DriverBuilder<WithRoot, C> {
        self.transition(WithRoot(path.into()))
    }
}

impl<C: Codec> DriverBuilder<WithRoot, C> {
    /// Consumes the configuration and opens the store.
    ///
    /// 1. The root path is cleaned lexically (no filesystem access).
    /// 2. An existing root is reused; a missing one is created now when
    ///    `create(true)` was set and otherwise on the first write.
    /// 3. Stale temp files are purged when `purge_tmp` is enabled.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if `create(true)` was set and the root
    /// directory cannot be created.
    pub fn open(self) -> Result<Driver<C>, StoreError> {
        let root = resolver::clean(&self.state.0);
        let log: Arc<dyn Logger> =
            self.config.logger.unwrap_or_else(|| Arc::new(TracingLogger::default()));

        if root.is_dir() {
            log.debug(format_args!("Using '{}' (database already exists)", root.display()));
        } else if self.config.create {
            driver::create_dir_all(&root)
                .context(format!("Failed to bootstrap store root: {}", root.display()))?;
            log.info(format_args!("Bootstrapped store root '{}'", root.display()));
        } else {
            log.debug(format_args!("Creating the database at '{}' ...", root.display()));
        }

        if self.config.purge_tmp && root.is_dir() {
            maintenance::purge_tmp(&root, log.as_ref());
        }

        Ok(Driver::from_inner(DriverInner {
            root,
            codec: self.codec,
            locks: LockRegistry::new(),
            log,
            durable: self.config.durable,
        }))
    }
}
