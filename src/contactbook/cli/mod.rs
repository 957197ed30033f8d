//! # CLI Behavior
//!
//! This is **one possible UI client** for contactbook, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and output
//! formatting. For the overall architecture, see the library docs.
//!
//! ## Two Ways In
//!
//! - **One-shot commands**: `contacts add "Alice" 555-0100 --email a@example.com`,
//!   `contacts search alice`, `contacts edit 555-0100 --notes ""`. Each run opens
//!   the book, performs one operation, and exits.
//! - **Interactive console**: `contacts interactive` runs a numbered menu loop
//!   against the same API until the user exits or input ends.
//!
//! Running `contacts` with no arguments lists the book.
//!
//! ## Which File
//!
//! `--file <path>` (or `CONTACTBOOK_FILE`) picks the contact file. Without it,
//! the `data-file` key from `.contactbook.json` in the working directory is used,
//! defaulting to `contacts.json`.
//!
//! ## Module Structure
//!
//! - `commands`: Context setup, logging, and per-command handlers
//! - `interactive`: The console menu loop
//! - `render`: Output formatting (lists, details, stats, messages)
//! - `setup`: Argument parsing via clap

mod commands;
mod interactive;
mod render;
pub mod setup;

pub use commands::run;
