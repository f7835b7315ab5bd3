use serde_json::{Map, Value};
use std::borrow::Cow;

/// Key under which [`Logger::error`](crate::Logger::error) stores the error
/// description. The trailing colon and space are part of the key.
pub const ERROR_KEY: &str = "error: ";

pub const LEVEL_KEY: &str = "level";
pub const TIME_KEY: &str = "time";
pub const MESSAGE_KEY: &str = "message";
pub const CALLER_KEY: &str = "caller";

const RESERVED_KEYS: [&str; 4] = [LEVEL_KEY, TIME_KEY, MESSAGE_KEY, CALLER_KEY];

/// ISO-8601 with millisecond precision and numeric offset.
const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

// ---------------------------------------------------------------------------
// Tag
// ---------------------------------------------------------------------------

/// A structured field attached to a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub key: Cow<'static, str>,
    pub value: Value,
}

impl Tag {
    pub fn new(key: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Tag carrying an error's `Display` description under [`ERROR_KEY`].
    pub fn error(err: &dyn std::error::Error) -> Self {
        Self::new(ERROR_KEY, err.to_string())
    }
}

impl<K, V> From<(K, V)> for Tag
where
    K: Into<Cow<'static, str>>,
    V: Into<Value>,
{
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

// ---------------------------------------------------------------------------
// Caller
// ---------------------------------------------------------------------------

/// Trim a source path to its last directory and file name, e.g.
/// `crates/api/src/books.rs:42` becomes `src/books.rs:42`.
pub fn short_caller(file: &str, line: u32) -> String {
    let normalized = file.replace('\\', "/");
    let short = match normalized.rmatch_indices('/').nth(1) {
        Some((idx, _)) => &normalized[idx + 1..],
        None => normalized.as_str(),
    };
    format!("{short}:{line}")
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Encode one record as a newline-terminated JSON object.
///
/// Core fields come first in the order `level`, `time`, `message`,
/// `caller`; tags follow in the order given. A tag whose key equals a core
/// field name is dropped.
pub fn encode_line(level: &str, message: &str, caller: Option<&str>, tags: &[Tag]) -> Vec<u8> {
    let mut obj = Map::new();
    obj.insert(LEVEL_KEY.to_string(), Value::from(level));
    obj.insert(TIME_KEY.to_string(), Value::from(timestamp()));
    obj.insert(MESSAGE_KEY.to_string(), Value::from(message));
    if let Some(caller) = caller {
        obj.insert(CALLER_KEY.to_string(), Value::from(caller));
    }
    for tag in tags {
        if RESERVED_KEYS.contains(&&*tag.key) {
            continue;
        }
        obj.insert(tag.key.to_string(), tag.value.clone());
    }

    // Serialising a Map of Values cannot fail.
    let mut line = serde_json::to_vec(&Value::Object(obj)).unwrap_or_default();
    line.push(b'\n');
    line
}

fn timestamp() -> String {
    chrono::Local::now().format(TIME_FORMAT).to_string()
}
