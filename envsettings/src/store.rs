//! Key/value stores that settings are read from.

use std::collections::{BTreeMap, HashMap};
use std::env;

/// A string-keyed, string-valued source of raw settings.
///
/// Lookups use the key exactly as given; there is no case folding.
pub trait EnvStore {
    fn get(&self, key: &str) -> Option<String>;
}

/// A store that env files can be loaded into.
pub trait EnvStoreMut: EnvStore {
    fn set(&mut self, key: &str, value: &str);
}

/// The environment of the current process.
///
/// Variables whose value is not valid unicode are treated as unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvStore for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

impl EnvStoreMut for ProcessEnv {
    /// Keys that are empty or contain `=` or NUL, and values containing NUL,
    /// cannot be stored in the process environment and are skipped.
    fn set(&mut self, key: &str, value: &str) {
        if key.is_empty() || key.contains(['=', '\0']) || value.contains('\0') {
            tracing::warn!(key, "skipping variable that cannot be set in the process environment");
            return;
        }
        env::set_var(key, value);
    }
}

impl EnvStore for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl EnvStoreMut for HashMap<String, String> {
    fn set(&mut self, key: &str, value: &str) {
        self.insert(key.to_string(), value.to_string());
    }
}

impl EnvStore for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key).cloned()
    }
}

impl EnvStoreMut for BTreeMap<String, String> {
    fn set(&mut self, key: &str, value: &str) {
        self.insert(key.to_string(), value.to_string());
    }
}
