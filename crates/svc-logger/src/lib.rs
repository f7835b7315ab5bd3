//! Structured JSON logging facade for bookstore services.
//!
//! Configuration comes from two environment variables read once at start:
//! `LOG_LEVEL` (`debug`, `info` or `error`, default `info`) and `LOG_OUTPUT`
//! (`stdout`, `stderr` or a file path, default `stdout`). Every record is one
//! JSON object per line carrying `level`, `time`, `message`, `caller` and any
//! structured tags.
//!
//! Key components:
//! - **Logger**: the narrow `printf` / `print` / `info` / `error` surface call
//!   sites depend on
//! - **LogHandle**: the concrete JSON logger, cheap to clone and share
//! - **Logging**: explicit initialisation and the optional process-wide handle
//! - **Bridge**: a `tracing_subscriber` layer so `tracing` events reach the
//!   same sink
//! - **Testing**: `Capture`, a public in-memory test double for services
//!   asserting on their own log output
//!
//! ```no_run
//! use svc_logger::{Logger, Tag};
//!
//! let log = match svc_logger::init_from_env() {
//!     Ok(log) => log,
//!     Err(e) => {
//!         eprintln!("{e}");
//!         std::process::exit(1);
//!     }
//! };
//! log.info("server started", &[Tag::new("port", 8080)]);
//! log.printf("loaded %d books", &[&1200]);
//! ```

pub mod bridge;
pub mod config;
pub mod error;
pub mod format;
pub mod handle;
pub mod logger;
pub mod logging;
pub mod record;
pub mod testing;

pub use bridge::LogLayer;
pub use config::{ErrorSeverity, Level, LogConfig, Output};
pub use error::LogError;
pub use handle::LogHandle;
pub use logger::Logger;
pub use logging::{global, init, init_from_env, init_global};
pub use record::Tag;
