//! Configuration error taxonomy.
//!
//! Every failure is a synchronous, caller-catchable [`ConfigError`]; nothing
//! is swallowed or converted to a sentinel value inside the library.

use std::io;

/// Errors raised by configuration construction, validation, and I/O.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A key was referenced that is not part of the option schema.
    #[error("invalid configuration option: {key}")]
    InvalidKey { key: String },

    /// More positional values were supplied than the schema has keys.
    #[error("takes at most {max} positional values ({given} given)")]
    TooManyValues { given: usize, max: usize },

    /// The same option was supplied both positionally and by keyword.
    #[error("multiple values for option: {key}")]
    DuplicateValue { key: String },

    /// No options provider is registered under the attempted name.
    #[error("no options provider registered under \"{name}\"")]
    UnknownProvider { name: String },

    /// A JSON or TOML document could not be decoded.
    #[error("parse error in {context}: {detail}")]
    Parse { context: String, detail: String },

    /// A configuration file could not be read.
    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The effective map could not be encoded or written out.
    #[error("serialization failed: {0}")]
    Serialize(String),

    /// The tracing subscriber could not be installed.
    #[error("logging initialisation failed: {0}")]
    Logging(String),
}

impl ConfigError {
    pub(crate) fn invalid_key(key: impl Into<String>) -> Self {
        ConfigError::InvalidKey { key: key.into() }
    }

    pub(crate) fn parse(context: impl Into<String>, detail: impl ToString) -> Self {
        ConfigError::Parse {
            context: context.into(),
            detail: detail.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_key_names_the_offender() {
        let err = ConfigError::invalid_key("no_such_option");
        assert_eq!(
            err.to_string(),
            "invalid configuration option: no_such_option"
        );
    }

    #[test]
    fn unknown_provider_carries_the_attempted_name() {
        let err = ConfigError::UnknownProvider {
            name: "site_defaults".to_string(),
        };
        assert!(err.to_string().contains("site_defaults"));
    }

    #[test]
    fn io_error_preserves_the_source() {
        use std::error::Error as _;

        let err = ConfigError::Io {
            path: "/etc/optlayer.json".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.source().is_some());
    }
}
