//! Locating and loading `.env` files
//!
//! An env file is plain text with one `KEY=VALUE` pair per line. The line is
//! split on the first `=`; lines without one are skipped. Keys are trimmed
//! and upper-cased, values are kept verbatim apart from the trailing `\n`;
//! a `\r` before it stays part of the value.
//! There is no quoting, escaping, or comment syntax.
//!
//! When the file at the requested path cannot be read, the same file name is
//! tried in each parent directory in turn. Reaching the filesystem root
//! without finding one is not an error.

use crate::store::EnvStoreMut;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// File name looked for when only a directory is given.
pub const ENV_FILE_NAME: &str = ".env";

/// Load `start_dir/.env`, or the nearest `.env` above `start_dir`, into `env`.
///
/// Returns the path of the file that was loaded.
pub fn load_env_file_from<S>(start_dir: impl AsRef<Path>, env: &mut S) -> Option<PathBuf>
where
    S: EnvStoreMut + ?Sized,
{
    load_env_file(start_dir.as_ref().join(ENV_FILE_NAME), env)
}

/// Load the env file at `path` into `env`, walking up parent directories
/// with the same file name until one can be read.
///
/// Existing keys are overwritten. Returns the path of the file that was
/// loaded, or `None` when the walk reached the root.
pub fn load_env_file<S>(path: impl AsRef<Path>, env: &mut S) -> Option<PathBuf>
where
    S: EnvStoreMut + ?Sized,
{
    let mut candidate = match std::path::absolute(path.as_ref()) {
        Ok(absolute) => normalize(&absolute),
        Err(e) => {
            tracing::debug!(path = %path.as_ref().display(), error = %e, "cannot resolve env file path");
            return None;
        }
    };

    loop {
        match read_env_file(&candidate, env) {
            Ok(count) => {
                tracing::debug!(path = %candidate.display(), count, "loaded env file");
                return Some(candidate);
            }
            Err(e) => {
                tracing::trace!(path = %candidate.display(), error = %e, "env file not readable");
                let Some(parent) = parent_candidate(&candidate) else {
                    tracing::debug!("no env file found");
                    return None;
                };
                candidate = parent;
            }
        }
    }
}

/// Load exactly one env file into `env`, without walking.
///
/// Returns the number of pairs stored.
///
/// # Errors
///
/// Returns the I/O error when the file cannot be opened or is not UTF-8.
pub fn read_env_file<S>(path: impl AsRef<Path>, env: &mut S) -> io::Result<usize>
where
    S: EnvStoreMut + ?Sized,
{
    let content = fs::read_to_string(path)?;
    let pairs = parse_env_str(&content);
    for (key, value) in &pairs {
        env.set(key, value);
    }
    Ok(pairs.len())
}

/// Parse env file content into `(KEY, value)` pairs in file order.
pub fn parse_env_str(content: &str) -> Vec<(String, String)> {
    content
        .split('\n')
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim().to_uppercase(), value.to_string()))
        .filter(|(key, _)| !key.is_empty())
        .collect()
}

/// The same file name one directory up, or `None` at the root.
fn parent_candidate(path: &Path) -> Option<PathBuf> {
    let file_name = path.file_name()?;
    let dir = path.parent()?.parent()?;
    Some(dir.join(file_name))
}

/// Fold `.` and `..` components out of an absolute path.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

/// Load the nearest `.env` starting from the invoking crate's manifest
/// directory, or walking up from an explicit path.
///
/// ```rust,no_run
/// use std::collections::HashMap;
///
/// let mut env: HashMap<String, String> = HashMap::new();
/// envsettings::load_env_file!(&mut env);
/// envsettings::load_env_file!("config/.env", &mut env);
/// ```
#[macro_export]
macro_rules! load_env_file {
    ($env:expr) => {
        $crate::envfile::load_env_file_from(env!("CARGO_MANIFEST_DIR"), $env)
    };
    ($path:expr, $env:expr) => {
        $crate::envfile::load_env_file($path, $env)
    };
}
