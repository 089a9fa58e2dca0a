//! Options provider registry.
//!
//! `from_object`-style construction copies configuration out of an object
//! that exposes constant-style (ALL-UPPERCASE) entries. Providers are looked
//! up by an explicit string identifier through [`ProviderRegistry`] — a
//! narrow "resolve by name" seam with a single documented error, rather than
//! runtime reflection.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::error::ConfigError;

/// A source of constant-style configuration entries.
///
/// Entry names are expected in SCREAMING_CASE; only ALL-UPPERCASE names are
/// copied into a configuration (lower-cased), matching the convention of a
/// settings object whose constants are configuration values.
pub trait OptionsProvider: std::fmt::Debug {
    /// The provider's entries, keyed by constant-style name.
    fn options(&self) -> Map<String, Value>;
}

impl OptionsProvider for Map<String, Value> {
    fn options(&self) -> Map<String, Value> {
        self.clone()
    }
}

/// Name → provider table backing resolve-by-name construction.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, Box<dyn OptionsProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `provider` under `name`, replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, provider: Box<dyn OptionsProvider>) {
        let name = name.into();
        tracing::debug!(name = %name, "registering options provider");
        self.providers.insert(name, provider);
    }

    /// Resolve a provider by name.
    ///
    /// Fails with [`ConfigError::UnknownProvider`] carrying the attempted
    /// name when nothing is registered under it.
    pub fn resolve(&self, name: &str) -> Result<&dyn OptionsProvider, ConfigError> {
        self.providers
            .get(name)
            .map(|provider| &**provider)
            .ok_or_else(|| ConfigError::UnknownProvider {
                name: name.to_string(),
            })
    }

    /// Whether a provider is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("names", &self.providers.keys().collect::<Vec<_>>())
            .finish()
    }
}
