use std::sync::OnceLock;

use crate::config::LogConfig;
use crate::error::{LogError, Result};
use crate::handle::LogHandle;
use crate::record::Tag;

static GLOBAL: OnceLock<LogHandle> = OnceLock::new();

/// Build a logger from `config`.
///
/// The only failure is an output that cannot be opened. What to do about it
/// (abort or carry on without logs) is up to the caller.
pub fn init(config: LogConfig) -> Result<LogHandle> {
    let handle = LogHandle::open(config)?;
    announce(&handle);
    Ok(handle)
}

/// Build a logger from `config` and install it as the process-wide handle
/// returned by [`global`].
///
/// Returns [`LogError::AlreadyInitialized`] if a global handle exists. Only
/// the call that installs the handle writes the initialisation record.
pub fn init_global(config: LogConfig) -> Result<&'static LogHandle> {
    if GLOBAL.get().is_some() {
        return Err(LogError::AlreadyInitialized);
    }
    let handle = LogHandle::open(config)?;
    GLOBAL
        .set(handle)
        .map_err(|_| LogError::AlreadyInitialized)?;
    let installed = GLOBAL.get().ok_or(LogError::AlreadyInitialized)?;
    announce(installed);
    Ok(installed)
}

fn announce(handle: &LogHandle) {
    handle.debug(
        "logger initialised",
        &[
            Tag::new("min_level", handle.config().level.as_str()),
            Tag::new("output", handle.config().output.identifier()),
        ],
    );
}

/// [`init_global`] with settings read from `LOG_LEVEL` and `LOG_OUTPUT`.
pub fn init_from_env() -> Result<&'static LogHandle> {
    init_global(LogConfig::from_env())
}

/// The process-wide handle, if [`init_global`] has run.
pub fn global() -> Option<&'static LogHandle> {
    GLOBAL.get()
}
