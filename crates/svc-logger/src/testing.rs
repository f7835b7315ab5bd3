//! Public test double: an in-memory sink for asserting on emitted records.
//!
//! Services that take a [`LogHandle`] or `&dyn Logger` can pass
//! [`Capture::handle`] in their own tests instead of a real output. It is not
//! meant as a production sink: the buffer grows without bound.
//!
//! ```
//! use svc_logger::testing::Capture;
//! use svc_logger::LogConfig;
//! use svc_logger::Logger as _;
//!
//! let capture = Capture::new();
//! let log = capture.handle(LogConfig::default());
//! log.printf("count=%d", &[&3]);
//! assert_eq!(capture.records().unwrap()[0]["message"], "count=3");
//! ```

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;

use crate::config::LogConfig;
use crate::handle::LogHandle;

/// Shared byte buffer. Clones append to the same buffer.
#[derive(Debug, Clone, Default)]
pub struct Capture {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl Capture {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle writing into this capture.
    pub fn handle(&self, config: LogConfig) -> LogHandle {
        let sink = self.clone();
        LogHandle::with_writer(config, move || sink.clone())
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    /// Every captured line parsed as JSON.
    pub fn records(&self) -> serde_json::Result<Vec<Value>> {
        self.lines().iter().map(|l| serde_json::from_str(l)).collect()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        self.buf.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.lock().extend_from_slice(buf);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
