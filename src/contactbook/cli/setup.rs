use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

/// "0.1.0" for tagged release builds, "0.1.0@abc1234 2024-01-15 14:30" otherwise.
fn version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("CONTACTBOOK_GIT_HASH");
    const COMMIT_DATE: &str = env!("CONTACTBOOK_COMMIT_DATE");
    const RELEASE: &str = env!("CONTACTBOOK_RELEASE");

    static VERSION_STRING: OnceLock<String> = OnceLock::new();
    VERSION_STRING.get_or_init(|| {
        if RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "contacts",
    bin_name = "contacts",
    version = version(),
    disable_help_subcommand = true
)]
#[command(about = "A contact book kept in a plain JSON file", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Contact file to use (default: contacts.json in the current directory)
    #[arg(
        short,
        long,
        global = true,
        env = "CONTACTBOOK_FILE",
        value_name = "PATH",
        help_heading = "Options"
    )]
    pub file: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new contact
    #[command(alias = "a")]
    Add {
        /// Full name
        name: String,

        /// Phone number (must be unique)
        phone: String,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        address: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Show every field of one contact
    #[command(alias = "v")]
    Show {
        /// Phone number of the contact
        phone: String,
    },

    /// Change fields of a contact (pass "" to clear email, address or notes)
    #[command(alias = "e")]
    Edit {
        /// Current phone number of the contact
        phone: String,

        #[arg(long)]
        name: Option<String>,

        /// New phone number
        #[arg(long = "phone", value_name = "PHONE")]
        new_phone: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        address: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete a contact
    #[command(alias = "rm")]
    Delete {
        /// Phone number of the contact
        phone: String,
    },

    /// Search name, phone, email and address (case-insensitive)
    #[command(alias = "s")]
    Search {
        /// Search term (multiple words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Order results by name instead of insertion order
        #[arg(long)]
        sort: bool,
    },

    /// List all contacts by name
    #[command(alias = "ls")]
    List,

    /// Show contact book statistics
    Stats,

    /// Get or set configuration
    Config {
        /// Configuration key (data-file, log-level)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Start the interactive console menu
    #[command(alias = "i")]
    Interactive,
}
