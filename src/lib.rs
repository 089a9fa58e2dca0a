//! optlayer - layered configuration over a fixed option schema
//!
//! A [`Configuration`] combines built-in schema defaults, environment
//! variables, and explicit overrides into one validated, dictionary-backed
//! settings object. The recognized key space is closed: every operation that
//! names an option checks it against the schema.
//!
//! ```
//! use optlayer::Configuration;
//! use serde_json::{json, Map};
//!
//! let mut overrides = Map::new();
//! overrides.insert("proxies".to_string(), json!("http://proxy:3128"));
//!
//! let config = Configuration::from_dict(overrides)?;
//! assert_eq!(config.get_str("proxies"), Some("http://proxy:3128"));
//! assert_eq!(config.get_u64("connect_timeout"), Some(60));
//! # Ok::<(), optlayer::ConfigError>(())
//! ```

pub mod config;
pub mod env;
pub mod error;
pub mod logging;
pub mod registry;
pub mod schema;
pub mod util;

pub use config::{merge_override_layers, merge_overrides, Configuration};
pub use env::read_env;
pub use error::ConfigError;
pub use logging::init_logging;
pub use registry::{OptionsProvider, ProviderRegistry};
pub use schema::OptionSchema;
