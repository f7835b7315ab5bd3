use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::panic::Location;
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;

use crate::config::{Level, LogConfig, Output};
use crate::error::{LogError, Result};
use crate::logger::{Caller, Logger};
use crate::record::{encode_line, short_caller, Tag};

/// A configured JSON logger.
///
/// Cloning is cheap; clones write to the same sink. The handle is
/// `Send + Sync` and may be shared across threads freely. Each record is
/// written with one `write_all` on a writer taken from the sink, then
/// flushed, so concurrent records never interleave.
#[derive(Clone)]
pub struct LogHandle {
    inner: Arc<Inner>,
}

struct Inner {
    config: LogConfig,
    sink: BoxMakeWriter,
}

impl fmt::Debug for LogHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogHandle")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl LogHandle {
    /// Open the configured output and build a handle over it.
    pub fn open(config: LogConfig) -> Result<Self> {
        let sink = match &config.output {
            Output::Stdout => BoxMakeWriter::new(std::io::stdout),
            Output::Stderr => BoxMakeWriter::new(std::io::stderr),
            Output::File(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|source| LogError::OpenOutput {
                        path: path.clone(),
                        source,
                    })?;
                BoxMakeWriter::new(Mutex::new(file))
            }
        };
        Ok(Self::from_parts(config, sink))
    }

    /// Build a handle over an arbitrary writer factory, ignoring
    /// `config.output`. Each record takes one writer from `make_writer`.
    pub fn with_writer<M>(config: LogConfig, make_writer: M) -> Self
    where
        M: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        Self::from_parts(config, BoxMakeWriter::new(make_writer))
    }

    fn from_parts(config: LogConfig, sink: BoxMakeWriter) -> Self {
        Self {
            inner: Arc::new(Inner { config, sink }),
        }
    }

    pub fn config(&self) -> &LogConfig {
        &self.inner.config
    }

    /// Whether a record at `level` would be written.
    pub fn enabled(&self, level: Level) -> bool {
        self.inner.config.level.enables(level)
    }

    /// True when both handles share one underlying logger.
    pub fn ptr_eq(a: &LogHandle, b: &LogHandle) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    #[track_caller]
    pub fn debug(&self, message: &str, tags: &[Tag]) {
        let caller = Location::caller();
        self.emit(
            Level::Debug,
            Level::Debug.as_str(),
            message,
            Some((caller.file(), caller.line())),
            tags,
        );
    }

    /// Gate, encode and write one record. Write and flush errors are dropped.
    pub(crate) fn emit(
        &self,
        level: Level,
        level_name: &str,
        message: &str,
        caller: Option<(&str, u32)>,
        tags: &[Tag],
    ) {
        if !self.enabled(level) {
            return;
        }
        let caller = caller.map(|(file, line)| short_caller(file, line));
        let line = encode_line(level_name, message, caller.as_deref(), tags);

        let mut writer = self.inner.sink.make_writer();
        let _ = writer.write_all(&line);
        let _ = writer.flush();
    }

    fn emit_at(&self, level: Level, message: &str, caller: &Location<'_>, tags: &[Tag]) {
        self.emit(
            level,
            level.as_str(),
            message,
            Some((caller.file(), caller.line())),
            tags,
        );
    }
}

impl Logger for LogHandle {
    fn info_at(&self, message: &str, tags: &[Tag], caller: Caller) {
        self.emit_at(Level::Info, message, caller, tags);
    }

    fn error_at(
        &self,
        message: &str,
        err: &dyn std::error::Error,
        tags: &[Tag],
        caller: Caller,
    ) {
        let mut tags = tags.to_vec();
        tags.push(Tag::error(err));
        let level = self.inner.config.error_severity.level();
        self.emit_at(level, message, caller, &tags);
    }
}
