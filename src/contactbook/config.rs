use crate::error::{ContactError, Result};
use crate::store::fs::DEFAULT_DATA_FILE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = ".contactbook.json";
const DEFAULT_LOG_LEVEL: &str = "warn";

pub const KEY_DATA_FILE: &str = "data-file";
pub const KEY_LOG_LEVEL: &str = "log-level";

/// Configuration for the contact book, stored in `.contactbook.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookConfig {
    /// Contact file, relative to the config directory unless absolute
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// Default tracing filter (e.g. "warn", "debug", "contactbook=info")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_data_file() -> String {
    DEFAULT_DATA_FILE.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            log_level: default_log_level(),
        }
    }
}

impl BookConfig {
    /// Config stored in `dir`. No file means defaults; a broken one is an error.
    pub fn load(dir: &Path) -> Result<Self> {
        match fs::read_to_string(dir.join(CONFIG_FILENAME)) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Write every key to `dir`, creating it when needed.
    pub fn save(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)?;
        let mut raw = serde_json::to_string_pretty(self)?;
        raw.push('\n');
        fs::write(dir.join(CONFIG_FILENAME), raw)?;
        Ok(())
    }

    /// The contact file this config points at, resolved against `base_dir`.
    pub fn data_path(&self, base_dir: &Path) -> PathBuf {
        let path = PathBuf::from(&self.data_file);
        if path.is_absolute() {
            path
        } else {
            base_dir.join(path)
        }
    }

    pub fn get(&self, key: &str) -> Result<&str> {
        match key {
            KEY_DATA_FILE => Ok(&self.data_file),
            KEY_LOG_LEVEL => Ok(&self.log_level),
            other => Err(unknown_key(other)),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ContactError::Config(format!("{} cannot be empty", key)));
        }
        match key {
            KEY_DATA_FILE => self.data_file = value.to_string(),
            KEY_LOG_LEVEL => self.log_level = value.to_string(),
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }

    /// (key, value) pairs in display order.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        vec![
            (KEY_DATA_FILE, self.data_file.as_str()),
            (KEY_LOG_LEVEL, self.log_level.as_str()),
        ]
    }
}

fn unknown_key(key: &str) -> ContactError {
    ContactError::Config(format!(
        "Unknown config key: {} (expected {} or {})",
        key, KEY_DATA_FILE, KEY_LOG_LEVEL
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BookConfig::default();
        assert_eq!(config.data_file, "contacts.json");
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = BookConfig::load(dir.path()).unwrap();
        assert_eq!(config, BookConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();

        let mut config = BookConfig::default();
        config.set(KEY_DATA_FILE, "people.json").unwrap();
        config.save(dir.path()).unwrap();

        let loaded = BookConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.data_file, "people.json");
        assert_eq!(loaded.log_level, "warn");
    }

    #[test]
    fn test_broken_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "{ data_file").unwrap();

        let err = BookConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, ContactError::Serialization(_)));
    }

    #[test]
    fn test_save_creates_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");

        BookConfig::default().save(&nested).unwrap();
        let raw = fs::read_to_string(nested.join(CONFIG_FILENAME)).unwrap();
        assert!(raw.ends_with('\n'));
        assert_eq!(BookConfig::load(&nested).unwrap(), BookConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"log_level": "debug"}"#).unwrap();

        let loaded = BookConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.data_file, "contacts.json");
        assert_eq!(loaded.log_level, "debug");
    }

    #[test]
    fn test_data_path_resolution() {
        let base = Path::new("/work");
        let config = BookConfig::default();
        assert_eq!(config.data_path(base), PathBuf::from("/work/contacts.json"));

        let absolute = BookConfig {
            data_file: "/srv/book.json".into(),
            ..BookConfig::default()
        };
        assert_eq!(absolute.data_path(base), PathBuf::from("/srv/book.json"));
    }

    #[test]
    fn test_unknown_and_empty_keys() {
        let mut config = BookConfig::default();
        assert!(matches!(config.get("color"), Err(ContactError::Config(_))));
        assert!(matches!(
            config.set("color", "red"),
            Err(ContactError::Config(_))
        ));
        assert!(matches!(
            config.set(KEY_LOG_LEVEL, "  "),
            Err(ContactError::Config(_))
        ));
    }
}
