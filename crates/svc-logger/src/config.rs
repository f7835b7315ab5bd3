use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Environment variable selecting the minimum emitted severity.
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
/// Environment variable selecting the sink.
pub const ENV_LOG_OUTPUT: &str = "LOG_OUTPUT";

const STDOUT: &str = "stdout";
const STDERR: &str = "stderr";

// ---------------------------------------------------------------------------
// Level
// ---------------------------------------------------------------------------

/// Record severity, ordered `Debug < Info < Error`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    #[default]
    Info,
    Error,
}

impl Level {
    /// Map a raw setting to a level. Trimmed and case-insensitive; anything
    /// unrecognised (including blank) is `Info`.
    pub fn resolve(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "debug" => Level::Debug,
            "info" => Level::Info,
            "error" => Level::Error,
            _ => Level::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Error => "error",
        }
    }

    /// Whether a record at `level` passes a minimum of `self`.
    pub fn enables(&self, level: Level) -> bool {
        level >= *self
    }

    /// Collapse a `tracing` level onto the three facade levels.
    pub fn from_tracing(level: &tracing::Level) -> Self {
        match *level {
            tracing::Level::ERROR => Level::Error,
            tracing::Level::WARN | tracing::Level::INFO => Level::Info,
            _ => Level::Debug,
        }
    }

    pub fn to_tracing(self) -> tracing::Level {
        match self {
            Level::Debug => tracing::Level::DEBUG,
            Level::Info => tracing::Level::INFO,
            Level::Error => tracing::Level::ERROR,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Where JSON lines are written.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Output {
    #[default]
    Stdout,
    Stderr,
    File(PathBuf),
}

impl Output {
    /// Map a raw setting to a destination. Blank means stdout; `stdout` and
    /// `stderr` name the standard streams; anything else is a file path,
    /// with an optional `file://` prefix.
    pub fn resolve(raw: &str) -> Self {
        match raw.trim() {
            "" | STDOUT => Output::Stdout,
            STDERR => Output::Stderr,
            other => {
                let path = other.strip_prefix("file://").unwrap_or(other);
                Output::File(PathBuf::from(path))
            }
        }
    }

    /// The destination identifier, as it would be written in `LOG_OUTPUT`.
    pub fn identifier(&self) -> String {
        match self {
            Output::Stdout => STDOUT.to_string(),
            Output::Stderr => STDERR.to_string(),
            Output::File(path) => path.display().to_string(),
        }
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identifier())
    }
}

// ---------------------------------------------------------------------------
// ErrorSeverity
// ---------------------------------------------------------------------------

/// How `Logger::error` records are reported.
///
/// `Compat` writes error records at info severity, as existing consumers of
/// these logs expect. `Error` reports them at error severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorSeverity {
    #[default]
    Compat,
    Error,
}

impl ErrorSeverity {
    pub fn level(&self) -> Level {
        match self {
            ErrorSeverity::Compat => Level::Info,
            ErrorSeverity::Error => Level::Error,
        }
    }
}

// ---------------------------------------------------------------------------
// LogConfig
// ---------------------------------------------------------------------------

/// Logger settings, resolved once and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogConfig {
    pub level: Level,
    pub output: Output,
    pub error_severity: ErrorSeverity,
}

impl LogConfig {
    /// Read `LOG_LEVEL` and `LOG_OUTPUT`.
    pub fn from_env() -> Self {
        Self {
            level: get_level(),
            output: Output::resolve(&get_output()),
            error_severity: ErrorSeverity::default(),
        }
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn with_output(mut self, output: Output) -> Self {
        self.output = output;
        self
    }

    pub fn with_error_severity(mut self, severity: ErrorSeverity) -> Self {
        self.error_severity = severity;
        self
    }
}

/// Current `LOG_LEVEL`, resolved. Unset behaves like blank.
pub fn get_level() -> Level {
    Level::resolve(&std::env::var(ENV_LOG_LEVEL).unwrap_or_default())
}

/// Current `LOG_OUTPUT`, trimmed, or `"stdout"` when blank or unset.
pub fn get_output() -> String {
    resolve_output(&std::env::var(ENV_LOG_OUTPUT).unwrap_or_default())
}

/// Trimmed destination identifier, `"stdout"` when blank.
pub fn resolve_output(raw: &str) -> String {
    match raw.trim() {
        "" => STDOUT.to_string(),
        trimmed => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_resolve() {
        assert_eq!(Level::resolve("debug"), Level::Debug);
        assert_eq!(Level::resolve("DEBUG"), Level::Debug);
        assert_eq!(Level::resolve(" debug "), Level::Debug);
        assert_eq!(Level::resolve("info"), Level::Info);
        assert_eq!(Level::resolve("error"), Level::Error);
        assert_eq!(Level::resolve("Error\n"), Level::Error);
    }

    #[test]
    fn test_level_resolve_falls_back_to_info() {
        for raw in ["", "   ", "warn", "trace", "verbose"] {
            assert_eq!(Level::resolve(raw), Level::Info, "input {raw:?}");
        }
    }

    #[test]
    fn test_level_ordering_and_gating() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Error);

        assert!(Level::Info.enables(Level::Info));
        assert!(Level::Info.enables(Level::Error));
        assert!(!Level::Info.enables(Level::Debug));
        assert!(!Level::Error.enables(Level::Info));
        assert!(Level::Debug.enables(Level::Debug));
    }

    #[test]
    fn test_level_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Level::Error).unwrap(), "\"error\"");
        assert_eq!(Level::Debug.to_string(), "debug");
    }

    #[test]
    fn test_level_tracing_mapping() {
        assert_eq!(Level::from_tracing(&tracing::Level::TRACE), Level::Debug);
        assert_eq!(Level::from_tracing(&tracing::Level::WARN), Level::Info);
        assert_eq!(Level::from_tracing(&tracing::Level::ERROR), Level::Error);
        assert_eq!(Level::Info.to_tracing(), tracing::Level::INFO);
    }

    #[test]
    fn test_resolve_output() {
        assert_eq!(resolve_output(""), "stdout");
        assert_eq!(resolve_output("   "), "stdout");
        assert_eq!(resolve_output(" /tmp/app.log "), "/tmp/app.log");
        assert_eq!(resolve_output("stderr"), "stderr");
    }

    #[test]
    fn test_output_resolve() {
        assert_eq!(Output::resolve(""), Output::Stdout);
        assert_eq!(Output::resolve("stdout"), Output::Stdout);
        assert_eq!(Output::resolve(" stderr "), Output::Stderr);
        assert_eq!(
            Output::resolve("/var/log/app.log"),
            Output::File(PathBuf::from("/var/log/app.log"))
        );
        assert_eq!(
            Output::resolve("file:///var/log/app.log"),
            Output::File(PathBuf::from("/var/log/app.log"))
        );
    }

    #[test]
    fn test_output_identifier() {
        assert_eq!(Output::Stdout.identifier(), "stdout");
        assert_eq!(Output::resolve("logs/app.log").to_string(), "logs/app.log");
    }

    #[test]
    fn test_error_severity_levels() {
        assert_eq!(ErrorSeverity::default(), ErrorSeverity::Compat);
        assert_eq!(ErrorSeverity::Compat.level(), Level::Info);
        assert_eq!(ErrorSeverity::Error.level(), Level::Error);
    }

    #[test]
    fn test_config_builder() {
        let cfg = LogConfig::default()
            .with_level(Level::Debug)
            .with_output(Output::Stderr)
            .with_error_severity(ErrorSeverity::Error);
        assert_eq!(cfg.level, Level::Debug);
        assert_eq!(cfg.output, Output::Stderr);
        assert_eq!(cfg.error_severity, ErrorSeverity::Error);

        let cfg = LogConfig::default();
        assert_eq!(cfg.level, Level::Info);
        assert_eq!(cfg.output, Output::Stdout);
    }
}
