use crate::config::BookConfig;
use crate::model::Contact;
use crate::store::ContactStats;

pub mod add;
pub mod config;
pub mod delete;
pub mod edit;
pub mod list;
pub mod search;
pub mod show;
pub mod stats;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_contacts: Vec<Contact>,
    pub listed_contacts: Vec<Contact>,
    pub stats: Option<ContactStats>,
    pub config: Option<BookConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_contacts(mut self, contacts: Vec<Contact>) -> Self {
        self.affected_contacts = contacts;
        self
    }

    pub fn with_listed_contacts(mut self, contacts: Vec<Contact>) -> Self {
        self.listed_contacts = contacts;
        self
    }

    pub fn with_stats(mut self, stats: ContactStats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_config(mut self, config: BookConfig) -> Self {
        self.config = Some(config);
        self
    }
}
