//! Serialization of the effective map.

use std::fmt;
use std::io;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use super::Configuration;
use crate::error::ConfigError;

impl Configuration {
    /// The effective key/value pairs (defaults plus overrides) as a plain
    /// map, in schema order.
    pub fn as_dict(&self) -> Map<String, Value> {
        self.values.clone()
    }

    /// The effective key/value pairs as an ordered list.
    pub fn as_pairs(&self) -> Vec<(String, Value)> {
        self.values
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Compact JSON encoding of the effective map.
    pub fn as_string(&self) -> Result<String, ConfigError> {
        serde_json::to_string(&self.values).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Indented JSON encoding of the effective map.
    pub fn as_string_pretty(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(&self.values)
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// UTF-8 bytes of [`Configuration::as_string`].
    pub fn as_bytes(&self) -> Result<Vec<u8>, ConfigError> {
        self.as_string().map(String::into_bytes)
    }

    /// Write the JSON encoding to `writer`, followed by the optional `end`
    /// terminator.
    pub fn dump<W: io::Write>(&self, writer: &mut W, end: Option<&str>) -> Result<(), ConfigError> {
        serde_json::to_writer(&mut *writer, &self.values)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;
        if let Some(end) = end {
            writer
                .write_all(end.as_bytes())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?;
        }
        Ok(())
    }
}

/// Serializes as the effective map, so a `Configuration` embeds in larger
/// serde structures the same way [`Configuration::as_string`] renders it.
impl Serialize for Configuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self.as_string().map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}
