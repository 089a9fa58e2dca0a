//! Logging helpers.
//!
//! Installs a global `tracing` subscriber driven by the `log_*` schema
//! options. Must be called at most once per process, before any tracing
//! macros fire; `RUST_LOG` overrides the configured level when set.

use std::fs::OpenOptions;
use std::io::{self, IsTerminal as _};
use std::sync::Arc;

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

use crate::config::Configuration;
use crate::error::ConfigError;
use crate::schema::{DEFAULT_LOG_FILEMODE, DEFAULT_LOG_LEVEL, DEFAULT_LOG_STYLE};

/// Initialise the global tracing subscriber from `config`.
///
/// Consumes `log_level` (filter), `log_file`/`log_filemode` (stderr vs.
/// appended or truncated file), `log_format` (`full`, `compact`, `pretty`),
/// and `log_style` (`auto`, `always`, `never` ANSI). Fails with
/// [`ConfigError::Logging`] when a subscriber is already installed and
/// [`ConfigError::Io`] when the log file cannot be opened.
pub fn init_logging(config: &Configuration) -> Result<(), ConfigError> {
    let level = filter_level(config.get_str("log_level").unwrap_or(DEFAULT_LOG_LEVEL));
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let log_file = config.get_str("log_file").filter(|path| !path.is_empty());
    let writer = match log_file {
        Some(path) => {
            let filemode = config
                .get_str("log_filemode")
                .unwrap_or(DEFAULT_LOG_FILEMODE);
            let mut options = OpenOptions::new();
            options.create(true);
            if filemode.starts_with('w') {
                options.write(true).truncate(true);
            } else {
                options.append(true);
            }
            let file = options.open(path).map_err(|source| ConfigError::Io {
                path: path.to_string(),
                source,
            })?;
            BoxMakeWriter::new(Arc::new(file))
        }
        None => BoxMakeWriter::new(io::stderr),
    };

    let ansi = match config.get_str("log_style").unwrap_or(DEFAULT_LOG_STYLE) {
        "always" => true,
        "never" => false,
        _ => log_file.is_none() && io::stderr().is_terminal(),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi);

    let installed = match config.get_str("log_format") {
        Some("compact") => builder.compact().try_init(),
        Some("pretty") => builder.pretty().try_init(),
        _ => builder.try_init(),
    };
    installed.map_err(|e| ConfigError::Logging(e.to_string()))
}

/// Translate a schema-style level name to a tracing filter directive.
fn filter_level(level: &str) -> &'static str {
    match level.to_ascii_uppercase().as_str() {
        "CRITICAL" | "FATAL" | "ERROR" => "error",
        "WARN" | "WARNING" => "warn",
        "INFO" => "info",
        "DEBUG" => "debug",
        "TRACE" | "NOTSET" => "trace",
        _ => "error",
    }
}
