use thiserror::Error;

/// Rejected input. These are expected outcomes, shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name is required")]
    EmptyName,

    #[error("Phone number is required")]
    EmptyPhone,

    #[error("A contact with phone number {0} already exists")]
    DuplicatePhone(String),
}

#[derive(Error, Debug)]
pub enum ContactError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Contact not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl ContactError {
    /// True for failures reading or writing the backing storage.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            ContactError::Io(_) | ContactError::Serialization(_) | ContactError::Store(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ContactError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_io_kind() {
        let io = ContactError::Io(std::io::Error::other("disk full"));
        assert!(io.is_io());
        assert!(ContactError::Store("boom".into()).is_io());
        assert!(!ContactError::NotFound("555".into()).is_io());
        assert!(!ContactError::from(ValidationError::EmptyName).is_io());
    }

    #[test]
    fn validation_message_passes_through() {
        let err = ContactError::from(ValidationError::DuplicatePhone("555-0100".into()));
        assert_eq!(
            err.to_string(),
            "A contact with phone number 555-0100 already exists"
        );
    }
}
