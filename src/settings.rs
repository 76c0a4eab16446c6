//! Persisted user settings.
//!
//! Settings are read and written through the narrow [`SettingsStore`]
//! capability so components never touch the filesystem directly and tests can
//! substitute an in-memory store. The file format is a flat
//! `key = "value"` list with `#` comments, stored under the user config
//! directory.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Errors from reading or writing the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Filesystem failure while reading or writing the settings file.
    #[error("failed to access settings file '{path}': {source}")]
    Io {
        /// The settings file path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A line in the settings file is not `key = "value"`.
    #[error("invalid settings syntax in '{path}' on line {line}: expected key = \"value\"")]
    Syntax {
        /// The settings file path.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
    },
}

/// Narrow read/write capability over persisted settings.
pub trait SettingsStore {
    /// Returns the stored value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, overwriting any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when the backing storage cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError>;
}

/// Resolves the default settings file path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/snaplink/settings.conf`
/// 2. `$HOME/.config/snaplink/settings.conf`
#[must_use]
pub fn resolve_default_settings_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(
            PathBuf::from(xdg_config_home)
                .join("snaplink")
                .join("settings.conf"),
        );
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("snaplink")
            .join("settings.conf"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// File-backed settings store.
///
/// A missing file is an empty store; the file and its parent directory are
/// created on first write. Unknown keys are preserved across writes.
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    /// Creates a store over an explicit file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at the default settings path, when one can be
    /// resolved (requires `XDG_CONFIG_HOME` or `HOME`).
    #[must_use]
    pub fn at_default_path() -> Option<Self> {
        resolve_default_settings_path().map(Self::new)
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<Vec<(String, String)>, SettingsError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(SettingsError::Io {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };
        parse_entries(&raw, &self.path)
    }

    fn write_entries(&self, entries: &[(String, String)]) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| SettingsError::Io {
                path: self.path.clone(),
                source: e,
            })?;
        }
        let mut rendered = String::new();
        for (key, value) in entries {
            rendered.push_str(key);
            rendered.push_str(" = \"");
            rendered.push_str(value);
            rendered.push_str("\"\n");
        }
        fs::write(&self.path, rendered).map_err(|e| SettingsError::Io {
            path: self.path.clone(),
            source: e,
        })
    }
}

impl SettingsStore for FileSettingsStore {
    fn get(&self, key: &str) -> Option<String> {
        let entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(error) => {
                // An unreadable settings file behaves like an empty one.
                debug!(error = %error, "settings file unreadable, treating as empty");
                return None;
            }
        };
        entries
            .into_iter()
            .find(|(stored, _)| stored == key)
            .map(|(_, value)| value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        let mut entries = self.read_entries()?;
        match entries.iter_mut().find(|(stored, _)| stored == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => entries.push((key.to_string(), value.to_string())),
        }
        self.write_entries(&entries)
    }
}

fn parse_entries(raw: &str, path: &Path) -> Result<Vec<(String, String)>, SettingsError> {
    let mut entries = Vec::new();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            return Err(SettingsError::Syntax {
                path: path.to_path_buf(),
                line: line_index + 1,
            });
        };

        let key = raw_key.trim();
        let value = parse_string_literal(raw_value.trim()).ok_or(SettingsError::Syntax {
            path: path.to_path_buf(),
            line: line_index + 1,
        })?;
        entries.push((key.to_string(), value));
    }
    Ok(entries)
}

fn strip_inline_comment(line: &str) -> &str {
    match line.find('#') {
        Some(index) => &line[..index],
        None => line,
    }
}

/// Accepts `"value"` or a bare unquoted word.
fn parse_string_literal(value: &str) -> Option<String> {
    if let Some(stripped) = value.strip_prefix('"') {
        let inner = stripped.strip_suffix('"')?;
        return Some(inner.to_string());
    }
    if value.is_empty() || value.contains(char::is_whitespace) {
        return None;
    }
    Some(value.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FileSettingsStore {
        FileSettingsStore::new(dir.path().join("settings.conf"))
    }

    #[test]
    fn test_file_store_missing_file_reads_none() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.get("theme"), None);
    }

    #[test]
    fn test_file_store_set_then_get_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme"), Some("dark".to_string()));
    }

    #[test]
    fn test_file_store_overwrite_replaces_value() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.set("theme", "dark").unwrap();
        store.set("theme", "light").unwrap();
        assert_eq!(store.get("theme"), Some("light".to_string()));
    }

    #[test]
    fn test_file_store_preserves_other_keys() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.set("theme", "dark").unwrap();
        store.set("other", "value").unwrap();
        store.set("theme", "light").unwrap();
        assert_eq!(store.get("other"), Some("value".to_string()));
    }

    #[test]
    fn test_file_store_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let mut store = FileSettingsStore::new(dir.path().join("nested").join("settings.conf"));
        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme"), Some("dark".to_string()));
    }

    #[test]
    fn test_parse_entries_accepts_comments_and_bare_values() {
        let path = PathBuf::from("settings.conf");
        let entries = parse_entries("# header\ntheme = dark # trailing\n\n", &path).unwrap();
        assert_eq!(entries, vec![("theme".to_string(), "dark".to_string())]);
    }

    #[test]
    fn test_parse_entries_rejects_missing_equals() {
        let path = PathBuf::from("settings.conf");
        let err = parse_entries("theme dark", &path).unwrap_err();
        assert!(matches!(err, SettingsError::Syntax { line: 1, .. }), "{err}");
    }

    #[test]
    fn test_parse_string_literal_quoted_and_bare() {
        assert_eq!(parse_string_literal("\"dark\""), Some("dark".to_string()));
        assert_eq!(parse_string_literal("dark"), Some("dark".to_string()));
        assert_eq!(parse_string_literal("\"unterminated"), None);
        assert_eq!(parse_string_literal(""), None);
    }
}
