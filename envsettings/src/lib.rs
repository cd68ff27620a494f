//! Typed settings records populated from environment variables
//!
//! `envsettings` binds a settings struct to values read from the process
//! environment (optionally pre-loaded from a `.env` file), converting raw
//! strings into typed fields with clamping and default fallback. Settings
//! can nest other settings and hold homogeneous lists.
//!
//! # Features
//!
//! - **Declarative**: Schema generated with `#[derive(EnvSettings)]`, or built by hand with [`Schema`]
//! - **Typed casts**: bool, int, float, decimal, JSON, and comma-separated lists
//! - **Clamping**: Optional `min`/`max` on numeric fields, plus a parse fallback
//! - **Nested settings**: Sub-records populated from the same flat environment
//! - **Env files**: Upward search for `.env` from a start directory
//! - **Listing**: [`show`] prints every variable with its default
//!
//! # Value Parsing
//!
//! - Strings: taken verbatim
//! - Booleans: `1`, `t`, `y`, `true`, `yes` (any case) are true, anything else is false
//! - Numbers: trimmed; floats and decimals accept `3,14` when there is no `.`
//! - Lists: `a, b,,c` becomes `["a", "b", "c"]`
//! - JSON: decoded with `serde_json`
//!
//! # Example
//!
//! ```rust
//! use envsettings::EnvSettings;
//! use serde::Deserialize;
//! use std::collections::HashMap;
//!
//! #[derive(Debug, Deserialize, EnvSettings)]
//! struct Database {
//!     #[env(string, var = "DATABASE_URL")]
//!     pub url: String,
//!
//!     #[env(integer, var = "DATABASE_POOL", min = 1, max = 64, default = 8)]
//!     pub pool: i64,
//! }
//!
//! #[derive(Debug, Deserialize, EnvSettings)]
//! struct Config {
//!     #[env(boolean, default = false)]
//!     pub debug: bool,
//!
//!     #[env(string_list, default = vec!["localhost"])]
//!     pub allowed_hosts: Vec<String>,
//!
//!     #[env(nested)]
//!     pub database: Database,
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! let env = HashMap::from([
//!     ("DATABASE_URL".to_string(), "postgres://localhost/db".to_string()),
//!     ("DATABASE_POOL".to_string(), "500".to_string()),
//!     ("DEBUG".to_string(), "yes".to_string()),
//! ]);
//!
//! let config: Config = envsettings::populate(&env)?;
//! assert!(config.debug);
//! assert_eq!(config.allowed_hosts, vec!["localhost"]);
//! assert_eq!(config.database.pool, 64);
//! # Ok(())
//! # }
//! ```
//!
//! # Attributes
//!
//! ## `#[env(<kind>, ...)]`
//!
//! `<kind>` is one of `string`, `integer`, `float`, `number`, `decimal`,
//! `boolean`, `json`, their `_list` variants, or `nested`. Options:
//!
//! - `var = "NAME"`: variable name (default: the upper-cased field name)
//! - `min = expr`, `max = expr`: clamping range for numeric kinds
//! - `default = expr`: value used when the variable is unset (and the parse
//!   fallback for numeric scalars)
//! - `element_default = expr`: parse fallback for elements of numeric lists
//! - `default_factory = path`: function producing a fresh default
//!
//! ## `#[env(prefix = "APP_")]`
//!
//! On the struct: prefixes every variable name of its fields.
//!
//! Fields without `#[env]` are not read from the environment and need
//! `#[serde(default)]`.

pub mod cast;
pub mod envfile;
mod error;
mod field;
mod populate;
mod schema;
mod show;
mod store;
mod value;

pub use cast::{Bounds, Cast};
pub use envfile::{load_env_file, load_env_file_from, parse_env_str, read_env_file};
pub use envsettings_derive::EnvSettings;
pub use error::{CastError, SettingsError};
pub use field::Field;
pub use populate::{from_env, populate, populate_record};
pub use schema::{FieldDef, FieldType, Schema, Settings};
pub use show::{describe, show, show_to};
pub use store::{EnvStore, EnvStoreMut, ProcessEnv};
pub use value::{Record, Value};

/// Version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-export for macro-generated code
#[doc(hidden)]
pub use anyhow;
