//! # Contactbook Architecture
//!
//! Contactbook is a **UI-agnostic contact library** with a terminal client on top.
//! Everything that decides what a valid contact is, how phone numbers stay unique,
//! and how the book is persisted lives here; the `contacts` binary only parses
//! input and prints results.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - One-shot commands and the interactive console menu       │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, owns the store                │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One module per user operation                            │
//! │  - Turns store results into CmdResult + messages            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - ContactStore: validation, uniqueness, search, ordering   │
//! │  - StorageBackend: JsonFileBackend (production),            │
//! │    MemBackend (testing)                                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes regular Rust arguments, returns
//! `Result<CmdResult>`, and never writes to stdout/stderr. Diagnostics go
//! through `tracing`; the binary decides where they end up.
//!
//! ## Persistence Model
//!
//! The whole book is one JSON array. It is read once when the store opens and
//! rewritten in full after every add, edit, or delete. A missing or corrupt file
//! opens as an empty book. A failed write is returned to the caller while the
//! change stays in memory.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: One module per operation
//! - [`store`]: `ContactStore` and the storage backends
//! - [`model`]: `Contact`, `NewContact`, `ContactUpdate`
//! - [`config`]: `.contactbook.json` settings
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod store;
