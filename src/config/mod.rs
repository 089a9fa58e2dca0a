//! Layered configuration object.
//!
//! A [`Configuration`] is the option schema's defaults overlaid with
//! explicitly supplied overrides:
//! 1. Built-in schema defaults (always present)
//! 2. Constructor-supplied overrides (positional or keyword, file, env,
//!    provider object)
//!
//! Overrides are retained separately from the effective values so that
//! merging combines what callers actually chose, never re-applies another
//! instance's defaults.

mod merge;
mod serialize;

pub use merge::{merge_override_layers, merge_overrides};

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde_json::{Map, Value};

use crate::env::read_env;
use crate::error::ConfigError;
use crate::registry::{OptionsProvider, ProviderRegistry};
use crate::schema::OptionSchema;

/// A validated view of configuration options with clear precedence.
///
/// Every schema key is always present in the effective map; unset options
/// sit at their schema default. All operations are plain in-memory map
/// operations except [`Configuration::from_file`],
/// [`Configuration::from_env`], and [`Configuration::dump`], which perform
/// blocking I/O. Concurrent reads are safe; concurrent mutation of one
/// instance is not coordinated.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    /// Effective values: defaults overlaid with overrides.
    values: Map<String, Value>,
    /// The overrides explicitly supplied at construction time.
    overrides: Map<String, Value>,
}

impl Configuration {
    /// An all-defaults configuration.
    pub fn new() -> Self {
        Self::assemble(Map::new())
    }

    /// Build from positional and keyword overrides.
    ///
    /// Positional values map to schema keys in schema order. Fails with
    /// [`ConfigError::TooManyValues`] when more positional values are given
    /// than the schema has keys, [`ConfigError::DuplicateValue`] when a key
    /// is supplied both positionally and by keyword, and
    /// [`ConfigError::InvalidKey`] for unrecognized keyword keys.
    pub fn from_args<I>(positional: I, keyword: Map<String, Value>) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = Value>,
    {
        Ok(Self::assemble(make_overrides(positional, keyword)?))
    }

    /// Build from a mapping, one override per entry.
    pub fn from_dict(keyword: Map<String, Value>) -> Result<Self, ConfigError> {
        Self::from_args(std::iter::empty(), keyword)
    }

    /// Build from a JSON-object string.
    pub fn from_json(document: &str) -> Result<Self, ConfigError> {
        Self::from_dict(parse_json_object(document, "json string")?)
    }

    /// Build from a configuration file.
    ///
    /// Files ending in `.toml` are parsed as TOML and converted to JSON
    /// values; everything else is parsed as a flat JSON object. Read
    /// failures carry the path; parse failures name the file that failed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        let keyword = if is_toml {
            parse_toml_table(&contents, &path.display().to_string())?
        } else {
            parse_json_object(&contents, &path.display().to_string())?
        };

        tracing::debug!(path = %path.display(), "loaded configuration file");
        Self::from_dict(keyword)
    }

    /// Build from the process environment over the full schema key list,
    /// dropping absent and empty variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(None, true)
    }

    /// Build from the process environment with explicit `default` and
    /// `drop_null` handling (see [`read_env`]).
    pub fn from_env_with(default: Option<&str>, drop_null: bool) -> Result<Self, ConfigError> {
        Self::from_dict(read_env(
            OptionSchema::keys().iter().copied(),
            default,
            drop_null,
        ))
    }

    /// Build from a provider object, copying every ALL-UPPERCASE entry and
    /// lower-casing its name. Unrecognized names fail with
    /// [`ConfigError::InvalidKey`].
    pub fn from_object(provider: &dyn OptionsProvider) -> Result<Self, ConfigError> {
        let mut keyword = Map::new();
        for (name, value) in provider.options() {
            if is_constant_name(&name) {
                keyword.insert(name.to_ascii_lowercase(), value);
            }
        }
        Self::from_dict(keyword)
    }

    /// Build from a provider registered under `name`.
    pub fn from_registered(name: &str, registry: &ProviderRegistry) -> Result<Self, ConfigError> {
        tracing::debug!(name = %name, "resolving options provider");
        Self::from_object(registry.resolve(name)?)
    }

    /// Candidate configuration-file locations: the per-user config
    /// directory, then the working directory.
    pub fn search_paths() -> Vec<PathBuf> {
        let filename = concat!(env!("CARGO_PKG_NAME"), ".json");
        let mut paths = Vec::new();
        if let Some(dirs) = ProjectDirs::from("", "", env!("CARGO_PKG_NAME")) {
            paths.push(dirs.config_dir().join(filename));
        }
        paths.push(PathBuf::from(filename));
        paths
    }

    /// Load the first configuration file found on [`Self::search_paths`],
    /// or `None` when no candidate exists.
    pub fn from_search() -> Result<Option<Self>, ConfigError> {
        for path in Self::search_paths() {
            if path.is_file() {
                return Self::from_file(&path).map(Some);
            }
        }
        Ok(None)
    }

    /// Overlay the schema defaults with `overrides`. Callers must have
    /// validated the override keys.
    fn assemble(overrides: Map<String, Value>) -> Self {
        let mut values = OptionSchema::defaults();
        for (key, value) in &overrides {
            values.insert(key.clone(), value.clone());
        }
        Self { values, overrides }
    }

    /// Set an option's effective value.
    ///
    /// Fails with [`ConfigError::InvalidKey`] for unrecognized keys. The
    /// value is stored as-is; no type coercion or re-validation. Values set
    /// here do not become overrides and therefore do not participate in
    /// [`Configuration::merge`].
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<(), ConfigError> {
        Self::validate_key(key)?;
        self.values.insert(key.to_string(), value.into());
        Ok(())
    }

    /// Effective value for `key`, or `None` for unrecognized keys.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Effective value for `key`, falling back to `default` for
    /// unrecognized keys.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a Value) -> &'a Value {
        self.get(key).unwrap_or(default)
    }

    /// Effective value for `key`; unrecognized keys raise
    /// [`ConfigError::InvalidKey`] instead of falling back.
    pub fn get_strict(&self, key: &str) -> Result<&Value, ConfigError> {
        self.values
            .get(key)
            .ok_or_else(|| ConfigError::invalid_key(key))
    }

    /// Effective values for each of `keys`, in order.
    pub fn get_all<'a, I>(&self, keys: I) -> Vec<Option<&Value>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        keys.into_iter().map(|key| self.get(key)).collect()
    }

    /// Effective value as a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Effective value as a bool.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// Effective value as a u64.
    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(Value::as_u64)
    }

    /// Update effective values from the process environment in place.
    /// Like [`Configuration::set`], this does not create overrides.
    pub fn update_from_env(&mut self, default: Option<&str>, drop_null: bool) {
        for (key, value) in read_env(OptionSchema::keys().iter().copied(), default, drop_null) {
            self.values.insert(key, value);
        }
    }

    /// Whether `key` is a recognized option.
    pub fn is_valid_key(key: &str) -> bool {
        OptionSchema::contains(key)
    }

    /// Validate that `key` is a recognized option.
    pub fn validate_key(key: &str) -> Result<(), ConfigError> {
        if OptionSchema::contains(key) {
            Ok(())
        } else {
            Err(ConfigError::invalid_key(key))
        }
    }

    /// The recognized option names, in schema order.
    pub fn keys() -> &'static [&'static str] {
        OptionSchema::keys()
    }

    /// The overrides explicitly supplied at construction time.
    pub fn overrides(&self) -> &Map<String, Value> {
        &self.overrides
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<&str> for Configuration {
    type Output = Value;

    /// Validated indexing; panics on unrecognized keys. Use
    /// [`Configuration::get`] or [`Configuration::get_strict`] to handle
    /// unknown keys without panicking.
    fn index(&self, key: &str) -> &Value {
        match self.values.get(key) {
            Some(value) => value,
            None => panic!("invalid configuration option: {key}"),
        }
    }
}

/// Validate keyword keys and map positional values onto schema keys.
fn make_overrides<I>(
    positional: I,
    keyword: Map<String, Value>,
) -> Result<Map<String, Value>, ConfigError>
where
    I: IntoIterator<Item = Value>,
{
    for key in keyword.keys() {
        Configuration::validate_key(key)?;
    }

    let keys = OptionSchema::keys();
    let positional: Vec<Value> = positional.into_iter().collect();
    if positional.len() > keys.len() {
        return Err(ConfigError::TooManyValues {
            given: positional.len(),
            max: keys.len(),
        });
    }

    let mut overrides = keyword;
    for (index, value) in positional.into_iter().enumerate() {
        let key = keys[index];
        if overrides.contains_key(key) {
            return Err(ConfigError::DuplicateValue {
                key: key.to_string(),
            });
        }
        overrides.insert(key.to_string(), value);
    }
    Ok(overrides)
}

/// ALL-UPPERCASE with at least one cased character.
fn is_constant_name(name: &str) -> bool {
    name.chars().any(char::is_alphabetic) && !name.chars().any(char::is_lowercase)
}

fn parse_json_object(document: &str, context: &str) -> Result<Map<String, Value>, ConfigError> {
    let value: Value = serde_json::from_str(document).map_err(|e| ConfigError::parse(context, e))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ConfigError::parse(
            context,
            "expected a JSON object at the top level",
        )),
    }
}

fn parse_toml_table(document: &str, context: &str) -> Result<Map<String, Value>, ConfigError> {
    let value: toml::Value = toml::from_str(document).map_err(|e| ConfigError::parse(context, e))?;
    match toml_to_json(value) {
        Value::Object(map) => Ok(map),
        _ => Err(ConfigError::parse(
            context,
            "expected a TOML table at the top level",
        )),
    }
}

fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, item)| (key, toml_to_json(item)))
                .collect(),
        ),
    }
}
