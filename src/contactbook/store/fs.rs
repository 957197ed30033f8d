use super::StorageBackend;
use crate::error::{ContactError, Result};
use crate::model::Contact;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

pub const DEFAULT_DATA_FILE: &str = "contacts.json";

pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backend for the default file inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(DEFAULT_DATA_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(ContactError::Io)?;
            }
        }
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_DATA_FILE.to_string());
        self.path
            .with_file_name(format!(".{}-{}.tmp", file_name, Uuid::new_v4()))
    }
}

impl StorageBackend for JsonFileBackend {
    fn load(&self) -> Result<Option<Vec<Contact>>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path).map_err(ContactError::Io)?;
        let records: Vec<serde_json::Value> =
            serde_json::from_str(&content).map_err(ContactError::Serialization)?;

        // One bad record must not cost the rest of the book.
        let mut contacts = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            match serde_json::from_value::<Contact>(record) {
                Ok(contact) => contacts.push(contact),
                Err(e) => warn!(
                    path = %self.path.display(),
                    index,
                    error = %e,
                    "skipping unreadable contact record"
                ),
            }
        }
        debug!(path = %self.path.display(), count = contacts.len(), "loaded contacts");
        Ok(Some(contacts))
    }

    fn save(&self, contacts: &[Contact]) -> Result<()> {
        self.ensure_parent()?;
        let content =
            serde_json::to_string_pretty(contacts).map_err(ContactError::Serialization)?;

        let tmp_file = self.tmp_path();
        fs::write(&tmp_file, content).map_err(ContactError::Io)?;
        if let Err(e) = fs::rename(&tmp_file, &self.path) {
            let _ = fs::remove_file(&tmp_file);
            return Err(ContactError::Io(e));
        }

        debug!(path = %self.path.display(), count = contacts.len(), "saved contacts");
        Ok(())
    }

    fn location(&self) -> PathBuf {
        self.path.clone()
    }
}
