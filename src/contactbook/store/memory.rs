use super::StorageBackend;
use crate::error::{ContactError, Result};
use crate::model::Contact;
use std::cell::{Cell, RefCell};
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the store is single-threaded.
#[derive(Default)]
pub struct MemBackend {
    contacts: RefCell<Option<Vec<Contact>>>,
    simulate_write_error: Cell<bool>,
    saves: Cell<usize>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend that already holds `contacts`, as if loaded from a file.
    pub fn with_contacts(contacts: Vec<Contact>) -> Self {
        Self {
            contacts: RefCell::new(Some(contacts)),
            ..Self::default()
        }
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    /// What was last persisted, bypassing the store.
    pub fn persisted(&self) -> Option<Vec<Contact>> {
        self.contacts.borrow().clone()
    }
}

impl StorageBackend for MemBackend {
    fn load(&self) -> Result<Option<Vec<Contact>>> {
        Ok(self.contacts.borrow().clone())
    }

    fn save(&self, contacts: &[Contact]) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(ContactError::Store("Simulated write error".to_string()));
        }
        *self.contacts.borrow_mut() = Some(contacts.to_vec());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }

    fn location(&self) -> PathBuf {
        PathBuf::from("memory://contacts.json")
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::NewContact;
    use crate::store::ContactStore;

    /// A store over `MemBackend` seeded with the given (name, phone) pairs,
    /// added in order.
    pub fn store_with(people: &[(&str, &str)]) -> ContactStore<MemBackend> {
        let mut store = ContactStore::open(MemBackend::new());
        for (name, phone) in people {
            store
                .add(NewContact::new(*name, *phone))
                .expect("fixture contact should be valid");
        }
        store
    }

    /// The three contacts used across the command tests.
    pub fn sample_store() -> ContactStore<MemBackend> {
        let mut store = ContactStore::open(MemBackend::new());
        let people = [
            NewContact::new("John Doe", "111-111-1111")
                .with_email("john@test.com")
                .with_address("123 Main St"),
            NewContact::new("jane Smith", "222-222-2222")
                .with_email("jane@test.com")
                .with_address("456 Oak Ave"),
            NewContact::new("Bob Johnson", "333-333-3333").with_notes("met at work"),
        ];
        for person in people {
            store.add(person).expect("fixture contact should be valid");
        }
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty_and_remembers_saves() {
        let backend = MemBackend::new();
        assert!(backend.load().unwrap().is_none());

        backend.save(&[]).unwrap();
        assert_eq!(backend.load().unwrap(), Some(Vec::new()));
        assert_eq!(backend.save_count(), 1);
    }

    #[test]
    fn simulated_write_error_keeps_previous_data() {
        let backend = MemBackend::with_contacts(Vec::new());
        backend.set_simulate_write_error(true);

        let err = backend.save(&[]).unwrap_err();
        assert!(err.is_io());
        assert_eq!(backend.save_count(), 0);
        assert_eq!(backend.persisted(), Some(Vec::new()));
    }
}
