//! Option schema (layer 0).
//!
//! The complete, closed set of recognized option names and their defaults.
//! The set is compile-time data: nothing can add or remove keys at runtime,
//! and the declaration order is load-bearing — positional construction maps
//! values to keys in this order.

use serde_json::{Map, Value};

use crate::error::ConfigError;

/// Default connect/read timeout in seconds.
pub const DEFAULT_TIMEOUT: u64 = 60;

/// Default maximum number of pooled connections.
pub const DEFAULT_MAX_POOL_CONNECTIONS: u64 = 10;

/// Default connection pool size.
pub const DEFAULT_POOLSIZE: u64 = 10;

/// Default retry count.
pub const DEFAULT_RETRIES: u64 = 0;

/// Default log filter level.
pub const DEFAULT_LOG_LEVEL: &str = "ERROR";

/// Default timestamp format for log records.
pub const DEFAULT_LOG_DATEFMT: &str = "%Y-%m-%d %H:%M:%S";

/// Default event format (`full`, `compact`, or `pretty`).
pub const DEFAULT_LOG_FORMAT: &str = "full";

/// Default open mode for log files (`a+` appends, `w` truncates).
pub const DEFAULT_LOG_FILEMODE: &str = "a+";

/// Default ANSI styling mode (`auto`, `always`, or `never`).
pub const DEFAULT_LOG_STYLE: &str = "auto";

/// Application identity string, used as the `user_agent` default.
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Recognized option names, in schema order.
static KEYS: [&str; 18] = [
    "client_cert",
    "connect_timeout",
    "log_datefmt",
    "log_format",
    "log_file",
    "log_filemode",
    "log_level",
    "log_style",
    "max_pool_connections",
    "poolblock",
    "poolsize",
    "pool_timeout",
    "proxies",
    "proxies_config",
    "read_timeout",
    "retries",
    "user_agent",
    "verify",
];

/// The fixed option schema.
pub struct OptionSchema;

impl OptionSchema {
    /// Recognized option names in declaration order.
    pub fn keys() -> &'static [&'static str] {
        &KEYS
    }

    /// Whether `key` is a recognized option.
    pub fn contains(key: &str) -> bool {
        lookup(key).is_some()
    }

    /// Default value for `key`, or [`ConfigError::InvalidKey`] when the key
    /// is not part of the schema.
    pub fn default(key: &str) -> Result<Value, ConfigError> {
        lookup(key).ok_or_else(|| ConfigError::invalid_key(key))
    }

    /// All defaults as an effective-value map, in schema order.
    pub fn defaults() -> Map<String, Value> {
        KEYS.iter()
            .filter_map(|key| lookup(key).map(|value| (key.to_string(), value)))
            .collect()
    }
}

fn lookup(key: &str) -> Option<Value> {
    let value = match key {
        "client_cert" => Value::Null,
        "connect_timeout" => DEFAULT_TIMEOUT.into(),
        "log_datefmt" => DEFAULT_LOG_DATEFMT.into(),
        "log_format" => DEFAULT_LOG_FORMAT.into(),
        "log_file" => Value::Null,
        "log_filemode" => DEFAULT_LOG_FILEMODE.into(),
        "log_level" => DEFAULT_LOG_LEVEL.into(),
        "log_style" => DEFAULT_LOG_STYLE.into(),
        "max_pool_connections" => DEFAULT_MAX_POOL_CONNECTIONS.into(),
        "poolblock" => false.into(),
        "poolsize" => DEFAULT_POOLSIZE.into(),
        "pool_timeout" => Value::Null,
        "proxies" => Value::Null,
        "proxies_config" => Value::Null,
        "read_timeout" => DEFAULT_TIMEOUT.into(),
        "retries" => DEFAULT_RETRIES.into(),
        "user_agent" => USER_AGENT.into(),
        "verify" => false.into(),
        _ => return None,
    };
    Some(value)
}
