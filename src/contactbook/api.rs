//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every contactbook client (the one-shot CLI and the
//! interactive console both go through it).
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns** the [`ContactStore`] for the lifetime of the process
//! - **Dispatches** to the matching command function
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no printing and holds no business rules. Clients construct one
//! `ContactApi` at startup and pass `&mut` to whatever needs it.
//!
//! ## Generic Over StorageBackend
//!
//! - Production: `ContactApi<JsonFileBackend>`
//! - Testing: `ContactApi<MemBackend>`

use crate::commands;
use crate::error::Result;
use crate::model::{ContactUpdate, NewContact};
use crate::store::{ContactStore, StorageBackend};
use std::path::{Path, PathBuf};

pub struct ContactApi<B: StorageBackend> {
    store: ContactStore<B>,
    config_dir: PathBuf,
}

impl<B: StorageBackend> ContactApi<B> {
    pub fn new(store: ContactStore<B>, config_dir: PathBuf) -> Self {
        Self { store, config_dir }
    }

    pub fn add_contact(&mut self, input: NewContact) -> Result<CmdResult> {
        commands::add::run(&mut self.store, input)
    }

    pub fn edit_contact(&mut self, phone: &str, update: ContactUpdate) -> Result<CmdResult> {
        commands::edit::run(&mut self.store, phone, update)
    }

    pub fn delete_contact(&mut self, phone: &str) -> Result<CmdResult> {
        commands::delete::run(&mut self.store, phone)
    }

    pub fn show_contact(&self, phone: &str) -> Result<CmdResult> {
        commands::show::run(&self.store, phone)
    }

    pub fn search_contacts(&self, query: &str, sorted: bool) -> Result<CmdResult> {
        commands::search::run(&self.store, query, sorted)
    }

    pub fn list_contacts(&self) -> Result<CmdResult> {
        commands::list::run(&self.store)
    }

    pub fn stats(&self) -> Result<CmdResult> {
        commands::stats::run(&self.store)
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.config_dir, action)
    }

    pub fn store(&self) -> &ContactStore<B> {
        &self.store
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }
}

pub use commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, MessageLevel};
