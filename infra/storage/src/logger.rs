//! Injectable leveled logging capability.
//!
//! The driver never talks to a global logger directly. It holds an
//! `Arc<dyn Logger>` supplied at construction; when nothing is supplied it
//! falls back to [`TracingLogger`] at `info` verbosity, which forwards every
//! message to [`tracing`]. Install a subscriber (see `shelf-logger`) to have
//! those events printed to the console.

use std::fmt;
use tracing::Level;
use tracing::level_filters::LevelFilter;

/// Six-level logging interface used by the store.
///
/// Implementations receive pre-formatted [`fmt::Arguments`]; use
/// `format_args!` at call sites.
pub trait Logger: fmt::Debug + Send + Sync {
    fn fatal(&self, args: fmt::Arguments<'_>);
    fn error(&self, args: fmt::Arguments<'_>);
    fn warn(&self, args: fmt::Arguments<'_>);
    fn info(&self, args: fmt::Arguments<'_>);
    fn debug(&self, args: fmt::Arguments<'_>);
    fn trace(&self, args: fmt::Arguments<'_>);
}

/// Default [`Logger`] that re-emits messages as `tracing` events.
///
/// Messages more verbose than `max_level` are dropped before they reach the
/// subscriber. `fatal` has no `tracing` counterpart and is emitted as an error
/// event carrying `fatal = true`.
#[derive(Debug, Clone, Copy)]
pub struct TracingLogger {
    max_level: LevelFilter,
}

impl TracingLogger {
    #[must_use]
    pub const fn new(max_level: LevelFilter) -> Self {
        Self { max_level }
    }

    #[must_use]
    pub const fn max_level(&self) -> LevelFilter {
        self.max_level
    }

    fn enabled(&self, level: Level) -> bool {
        self.max_level >= level
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new(LevelFilter::INFO)
    }
}

impl Logger for TracingLogger {
    fn fatal(&self, args: fmt::Arguments<'_>) {
        if self.enabled(Level::ERROR) {
            tracing::error!(target: "shelf_store", fatal = true, "{args}");
        }
    }

    fn error(&self, args: fmt::Arguments<'_>) {
        if self.enabled(Level::ERROR) {
            tracing::error!(target: "shelf_store", "{args}");
        }
    }

    fn warn(&self, args: fmt::Arguments<'_>) {
        if self.enabled(Level::WARN) {
            tracing::warn!(target: "shelf_store", "{args}");
        }
    }

    fn info(&self, args: fmt::Arguments<'_>) {
        if self.enabled(Level::INFO) {
            tracing::info!(target: "shelf_store", "{args}");
        }
    }

    fn debug(&self, args: fmt::Arguments<'_>) {
        if self.enabled(Level::DEBUG) {
            tracing::debug!(target: "shelf_store", "{args}");
        }
    }

    fn trace(&self, args: fmt::Arguments<'_>) {
        if self.enabled(Level::TRACE) {
            tracing::trace!(target: "shelf_store", "{args}");
        }
    }
}
