//! # Storage Layer
//!
//! Storage is split in two:
//!
//! - [`StorageBackend`]: raw I/O for the whole contact collection. It knows how
//!   to read and write bytes, nothing about contacts beyond their serialized form.
//! - [`ContactStore`]: the in-memory collection and every rule about it
//!   (required fields, unique phone numbers, search, ordering). It persists the
//!   full collection through its backend after each mutation.
//!
//! ## Implementations
//!
//! - [`fs::JsonFileBackend`]: production storage, a single JSON array file
//!   - Whole-file overwrite on every save, written to a temp sibling then renamed
//!   - A missing file reads as "nothing stored yet"
//!
//! - [`memory::MemBackend`]: in-memory storage for testing
//!   - No persistence
//!   - Can simulate write failures
//!
//! ## Failure Model
//!
//! Loading never fails the store: a missing or unreadable file yields an empty
//! collection and the next save recreates it. Saving does fail, and when it does
//! the in-memory collection keeps the change that triggered the save.

use crate::error::Result;
use crate::model::Contact;
use std::path::PathBuf;

pub mod contact_store;
pub mod fs;
pub mod memory;

pub use contact_store::{ContactStats, ContactStore};

/// Abstract interface for raw contact persistence.
pub trait StorageBackend {
    /// Read the stored collection.
    /// Returns Ok(None) when nothing has been stored yet.
    /// Returns Err for unreadable or malformed data.
    fn load(&self) -> Result<Option<Vec<Contact>>>;

    /// Replace the stored collection with `contacts`.
    /// MUST NOT leave a partially written collection behind.
    fn save(&self, contacts: &[Contact]) -> Result<()>;

    /// Where the collection lives. For MemBackend, a virtual path.
    fn location(&self) -> PathBuf;
}
