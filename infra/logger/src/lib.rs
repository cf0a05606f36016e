//! # Logger
//!
//! Installs the process-wide `tracing` subscriber for Shelf binaries.
//!
//! The store only emits `tracing` events (through its default `TracingLogger`);
//! this crate decides where they end up:
//!
//! * a compact console layer on stderr, so command output on stdout stays clean;
//! * an optional rotated log file ([`FileOutput`]), plain text or JSON lines,
//!   drained by a non-blocking background worker;
//! * an [`EnvFilter`] whose default directive is [`TelemetryBuilder::level`].
//!   `RUST_LOG` is honoured unless [`TelemetryBuilder::env_filter`] is given.
//!
//! ## Example
//!
//! ```rust
//! # use shelf_logger::{LevelFilter, Telemetry};
//! let _telemetry = Telemetry::builder()
//!     .name("shelf-docs")
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//!
//! tracing::debug!(collection = "users", "ready");
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use std::borrow::Cow;
use std::path::PathBuf;
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

/// Parses a textual level such as `"info"` or `"TRACE"`.
///
/// # Errors
/// Returns [`LoggerError::InvalidConfiguration`] for unknown level names.
pub fn parse_level(raw: &str) -> Result<LevelFilter, LoggerError> {
    raw.trim().parse::<LevelFilter>().map_err(|e| invalid(format!("Unknown log level '{raw}': {e}")))
}

fn invalid(message: impl Into<Cow<'static, str>>) -> LoggerError {
    LoggerError::InvalidConfiguration { message: message.into(), context: None }
}

/// Encoding of lines written to the log file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FileFormat {
    #[default]
    Plain,
    /// One JSON object per event, fields nested under `"fields"`.
    Json,
}

/// Where and how rotated log files are kept.
#[derive(Debug, Clone)]
pub struct FileOutput {
    dir: PathBuf,
    rotation: Rotation,
    keep: usize,
    format: FileFormat,
}

impl FileOutput {
    /// Daily files in `dir`, the last ten kept, plain text.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), rotation: Rotation::DAILY, keep: 10, format: FileFormat::Plain }
    }

    #[must_use]
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Number of rotated files retained; older ones are deleted by the appender.
    #[must_use]
    pub const fn keep(mut self, files: usize) -> Self {
        self.keep = files;
        self
    }

    #[must_use]
    pub const fn format(mut self, format: FileFormat) -> Self {
        self.format = format;
        self
    }

    fn layer<S>(&self, prefix: &str) -> Result<(BoxedLayer<S>, WorkerGuard), LoggerError>
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
    {
        if self.keep == 0 {
            return Err(invalid("at least one log file must be kept"));
        }

        std::fs::create_dir_all(&self.dir)
            .context(format!("Failed to create log directory: {}", self.dir.display()))?;

        let appender = RollingFileAppender::builder()
            .rotation(self.rotation.clone())
            .filename_prefix(prefix)
            .filename_suffix("log")
            .max_log_files(self.keep)
            .build(&self.dir)?;

        let (writer, guard) = tracing_appender::non_blocking(appender);
        let base = fmt::layer().with_writer(writer).with_ansi(false);
        let layer = match self.format {
            FileFormat::Plain => base.boxed(),
            FileFormat::Json => base.json().boxed(),
        };

        Ok((layer, guard))
    }
}

#[derive(Debug)]
pub struct Unnamed;
#[derive(Debug)]
pub struct Named(String);

mod private {
    pub trait Sealed {}
}
impl private::Sealed for Unnamed {}
impl private::Sealed for Named {}

/// Configures the global subscriber; [`TelemetryBuilder::name`] must be set before `init`.
#[derive(Debug)]
pub struct TelemetryBuilder<N: private::Sealed = Unnamed> {
    name: N,
    level: LevelFilter,
    directives: Option<String>,
    console: bool,
    file: Option<FileOutput>,
}

impl TelemetryBuilder<Unnamed> {
    /// Names the application; the name prefixes rotated log files.
    pub fn name(self, name: impl Into<String>) -> TelemetryBuilder<Named> {
        TelemetryBuilder {
            name: Named(name.into()),
            level: self.level,
            directives: self.directives,
            console: self.console,
            file: self.file,
        }
    }
}

impl<N: private::Sealed> TelemetryBuilder<N> {
    /// Default level for every target not mentioned by an explicit filter.
    #[must_use]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Explicit directives such as `shelf_store=trace,warn`; replaces `RUST_LOG`.
    #[must_use]
    pub fn env_filter(mut self, directives: impl Into<String>) -> Self {
        self.directives = Some(directives.into());
        self
    }

    #[must_use]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    #[must_use]
    pub fn file(mut self, output: FileOutput) -> Self {
        self.file = Some(output);
        self
    }

    fn filter(&self) -> Result<EnvFilter, LoggerError> {
        let builder = EnvFilter::builder().with_default_directive(self.level.into());
        match &self.directives {
            Some(directives) => builder
                .parse(directives)
                .map_err(|e| invalid(format!("Invalid env filter '{directives}': {e}"))),
            None => Ok(builder.from_env_lossy()),
        }
    }
}

impl TelemetryBuilder<Named> {
    /// Installs the global subscriber.
    ///
    /// Keep the returned [`Telemetry`] alive until shutdown: it owns the
    /// worker that flushes the log file.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for an empty name, a bad filter,
    ///   no enabled output, or a file output keeping zero files.
    /// * [`LoggerError::Io`] / [`LoggerError::Appender`] if the log directory is unusable.
    /// * [`LoggerError::Subscriber`] if a global subscriber is already installed.
    pub fn init(self) -> Result<Telemetry, LoggerError> {
        let prefix = self.name.0.trim();
        if prefix.is_empty() {
            return Err(invalid("application name cannot be empty"));
        }
        if !self.console && self.file.is_none() {
            return Err(invalid("no output enabled; turn on the console or add a file"));
        }

        let filter = self.filter()?;
        let mut layers: Vec<BoxedLayer<_>> = Vec::with_capacity(2);

        if self.console {
            layers.push(fmt::layer().compact().with_writer(std::io::stderr).boxed());
        }

        let guard = match &self.file {
            Some(output) => {
                let (layer, guard) = output.layer(prefix)?;
                layers.push(layer);
                Some(guard)
            },
            None => None,
        };

        tracing_subscriber::registry().with(filter).with(layers).try_init()?;

        Ok(Telemetry { guard })
    }
}

/// Handle to the installed subscriber.
#[must_use = "Dropping this handle stops the background log writer."]
#[derive(Debug)]
pub struct Telemetry {
    guard: Option<WorkerGuard>,
}

impl Telemetry {
    /// Console output at `info`, no file.
    #[must_use]
    pub const fn builder() -> TelemetryBuilder {
        TelemetryBuilder {
            name: Unnamed,
            level: LevelFilter::INFO,
            directives: None,
            console: true,
            file: None,
        }
    }

    /// Whether events are also written to a log file.
    #[must_use]
    pub const fn has_file_output(&self) -> bool {
        self.guard.is_some()
    }
}

impl Drop for Telemetry {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::debug!("Flushing log file before shutdown");
        }
    }
}
