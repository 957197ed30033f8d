use super::StorageBackend;
use crate::error::{ContactError, Result, ValidationError};
use crate::model::{
    now, optional_text, required_name, required_phone, Contact, ContactUpdate, NewContact,
};
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Counts shown by the `stats` command. Display only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ContactStats {
    pub total: usize,
    pub with_email: usize,
    pub with_address: usize,
    pub with_notes: usize,
}

/// The authoritative contact collection.
///
/// Contacts are kept in insertion order. Every mutation writes the full
/// collection through the backend; if that write fails the mutation stays in
/// memory and the error is returned.
pub struct ContactStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    contacts: Vec<Contact>,
}

impl<B: StorageBackend> ContactStore<B> {
    /// Build a store and load whatever the backend holds.
    pub fn open(backend: B) -> Self {
        let mut store = Self {
            backend,
            contacts: Vec::new(),
        };
        store.load();
        store
    }

    /// Replace the in-memory collection with the backend's contents.
    /// Never fails: unreadable data leaves the store empty.
    pub fn load(&mut self) {
        self.contacts = match self.backend.load() {
            Ok(Some(contacts)) => repair(contacts),
            Ok(None) => {
                debug!(location = %self.backend.location().display(), "no contact file yet, starting empty");
                Vec::new()
            }
            Err(e) => {
                warn!(
                    location = %self.backend.location().display(),
                    error = %e,
                    "could not read contacts, starting with an empty book"
                );
                Vec::new()
            }
        };
    }

    /// Write the full collection to the backend.
    pub fn save(&self) -> Result<()> {
        self.backend.save(&self.contacts)
    }

    fn persist(&self, change: &str) -> Result<()> {
        self.save().inspect_err(|e| {
            warn!(
                change,
                location = %self.backend.location().display(),
                error = %e,
                "contact change applied in memory but not saved"
            )
        })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn location(&self) -> PathBuf {
        self.backend.location()
    }

    /// All contacts in insertion order.
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    fn position(&self, phone: &str) -> Option<usize> {
        let phone = phone.trim();
        self.contacts.iter().position(|c| c.phone == phone)
    }

    pub fn get(&self, phone: &str) -> Result<&Contact> {
        self.position(phone)
            .map(|idx| &self.contacts[idx])
            .ok_or_else(|| ContactError::NotFound(phone.trim().to_string()))
    }

    pub fn add(&mut self, input: NewContact) -> Result<Contact> {
        let contact = Contact::from_new(input, now())?;
        if self.position(&contact.phone).is_some() {
            return Err(ValidationError::DuplicatePhone(contact.phone).into());
        }

        self.contacts.push(contact.clone());
        self.persist("add")?;
        Ok(contact)
    }

    /// Apply `update` to the contact currently holding `phone`.
    ///
    /// Everything is validated before the contact is touched, so a rejected
    /// edit leaves the collection as it was.
    pub fn edit(&mut self, phone: &str, update: ContactUpdate) -> Result<Contact> {
        let idx = self
            .position(phone)
            .ok_or_else(|| ContactError::NotFound(phone.trim().to_string()))?;

        let name = update.name.as_deref().map(required_name).transpose()?;
        let new_phone = update.phone.as_deref().map(required_phone).transpose()?;
        if let Some(candidate) = &new_phone {
            let taken = self
                .contacts
                .iter()
                .enumerate()
                .any(|(i, c)| i != idx && &c.phone == candidate);
            if taken {
                return Err(ValidationError::DuplicatePhone(candidate.clone()).into());
            }
        }

        let contact = &mut self.contacts[idx];
        if let Some(name) = name {
            contact.name = name;
        }
        if let Some(phone) = new_phone {
            contact.phone = phone;
        }
        if let Some(email) = update.email.as_deref() {
            contact.email = optional_text(Some(email));
        }
        if let Some(address) = update.address.as_deref() {
            contact.address = optional_text(Some(address));
        }
        if let Some(notes) = update.notes.as_deref() {
            contact.notes = optional_text(Some(notes));
        }
        contact.modified_at = now().max(contact.created_at);
        let updated = contact.clone();

        self.persist("edit")?;
        Ok(updated)
    }

    pub fn delete(&mut self, phone: &str) -> Result<Contact> {
        let idx = self
            .position(phone)
            .ok_or_else(|| ContactError::NotFound(phone.trim().to_string()))?;
        let removed = self.contacts.remove(idx);
        self.persist("delete")?;
        Ok(removed)
    }

    /// Contacts whose name, phone, email or address contains `query`,
    /// ignoring case. Keeps insertion order. A blank query matches everything.
    pub fn search(&self, query: &str) -> Vec<&Contact> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.contacts.iter().collect();
        }
        self.contacts.iter().filter(|c| c.matches(&needle)).collect()
    }

    /// All contacts ordered by name, ignoring case.
    pub fn list_all(&self) -> Vec<&Contact> {
        let mut all: Vec<&Contact> = self.contacts.iter().collect();
        sort_by_name(&mut all);
        all
    }

    pub fn stats(&self) -> ContactStats {
        ContactStats {
            total: self.contacts.len(),
            with_email: self.contacts.iter().filter(|c| c.email.is_some()).count(),
            with_address: self.contacts.iter().filter(|c| c.address.is_some()).count(),
            with_notes: self.contacts.iter().filter(|c| c.notes.is_some()).count(),
        }
    }
}

/// Stable, case-insensitive name ordering.
pub fn sort_by_name(contacts: &mut [&Contact]) {
    contacts.sort_by_cached_key(|c| c.name.to_lowercase());
}

/// Drop records that break the store's invariants: blank name or phone, or a
/// phone already taken by an earlier record.
fn repair(contacts: Vec<Contact>) -> Vec<Contact> {
    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(contacts.len());

    for mut contact in contacts {
        contact.name = contact.name.trim().to_string();
        contact.phone = contact.phone.trim().to_string();

        if contact.name.is_empty() || contact.phone.is_empty() {
            warn!(name = %contact.name, phone = %contact.phone, "skipping stored contact without name or phone");
            continue;
        }
        if !seen.insert(contact.phone.clone()) {
            warn!(name = %contact.name, phone = %contact.phone, "skipping stored contact with duplicate phone");
            continue;
        }
        kept.push(contact);
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::{sample_store, store_with};
    use crate::store::memory::MemBackend;

    fn phones(contacts: &[&Contact]) -> Vec<String> {
        contacts.iter().map(|c| c.phone.clone()).collect()
    }

    #[test]
    fn add_stamps_and_persists() {
        let mut store = ContactStore::open(MemBackend::new());
        let contact = store
            .add(NewContact::new("Alice", "555-0100").with_email("a@example.com"))
            .unwrap();

        assert_eq!(contact.created_at, contact.modified_at);
        assert_eq!(store.len(), 1);
        assert_eq!(store.backend().save_count(), 1);
        assert_eq!(store.backend().persisted().unwrap(), vec![contact]);
    }

    #[test]
    fn add_rejects_duplicate_phone_and_leaves_collection_alone() {
        let mut store = store_with(&[("Alice", "555-0100")]);
        let before = store.contacts().to_vec();

        let err = store.add(NewContact::new("Bob", "555-0100")).unwrap_err();
        assert!(matches!(
            err,
            ContactError::Validation(ValidationError::DuplicatePhone(_))
        ));
        assert_eq!(store.contacts(), before.as_slice());
    }

    #[test]
    fn add_compares_trimmed_phone_exactly() {
        let mut store = store_with(&[("Alice", "555-0100")]);

        let err = store.add(NewContact::new("Bob", " 555-0100 ")).unwrap_err();
        assert!(matches!(err, ContactError::Validation(_)));

        // Different formatting is a different number.
        store.add(NewContact::new("Bob", "5550100")).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn add_rejects_empty_required_fields() {
        let mut store = ContactStore::open(MemBackend::new());

        let err = store.add(NewContact::new("", "555")).unwrap_err();
        assert!(matches!(
            err,
            ContactError::Validation(ValidationError::EmptyName)
        ));
        let err = store.add(NewContact::new("Bob", "   ")).unwrap_err();
        assert!(matches!(
            err,
            ContactError::Validation(ValidationError::EmptyPhone)
        ));
        assert!(store.is_empty());
        assert_eq!(store.backend().save_count(), 0);
    }

    #[test]
    fn search_finds_by_name_and_phone() {
        let store = store_with(&[("Alice", "555-0100"), ("Bob", "444-0200")]);

        assert_eq!(phones(&store.search("alice")), vec!["555-0100"]);
        assert_eq!(phones(&store.search("555")), vec!["555-0100"]);
        assert_eq!(phones(&store.search("0")).len(), 2);
    }

    #[test]
    fn search_covers_email_and_address_but_not_notes() {
        let store = sample_store();

        assert_eq!(phones(&store.search("JANE@TEST")), vec!["222-222-2222"]);
        assert_eq!(phones(&store.search("main st")), vec!["111-111-1111"]);
        assert!(store.search("met at work").is_empty());
    }

    #[test]
    fn search_keeps_insertion_order() {
        let store = store_with(&[("Zed", "1"), ("Amy", "2"), ("Mo", "3")]);
        assert_eq!(phones(&store.search("")), vec!["1", "2", "3"]);
        assert_eq!(phones(&store.search("  ")), vec!["1", "2", "3"]);
    }

    #[test]
    fn list_all_sorts_by_name_ignoring_case() {
        let store = sample_store();
        let names: Vec<_> = store.list_all().iter().map(|c| c.name.clone()).collect();
        assert_eq!(names, vec!["Bob Johnson", "jane Smith", "John Doe"]);
    }

    #[test]
    fn edit_updates_fields_and_modified_time() {
        let mut store = sample_store();
        let before = store.get("111-111-1111").unwrap().clone();

        let updated = store
            .edit(
                "111-111-1111",
                ContactUpdate::new().email("john.new@test.com").address(""),
            )
            .unwrap();

        assert_eq!(updated.email.as_deref(), Some("john.new@test.com"));
        assert_eq!(updated.address, None);
        assert_eq!(updated.name, before.name);
        assert_eq!(updated.created_at, before.created_at);
        assert!(updated.modified_at >= before.modified_at);
        assert_eq!(store.get("111-111-1111").unwrap(), &updated);
    }

    #[test]
    fn edit_missing_phone_is_not_found() {
        let mut store = sample_store();
        let before = store.contacts().to_vec();

        let err = store
            .edit("999-999-9999", ContactUpdate::new().name("Test"))
            .unwrap_err();
        assert!(matches!(err, ContactError::NotFound(p) if p == "999-999-9999"));
        assert_eq!(store.contacts(), before.as_slice());
    }

    #[test]
    fn edit_rejects_phone_taken_by_another_contact() {
        let mut store = sample_store();
        let before = store.contacts().to_vec();

        let err = store
            .edit(
                "111-111-1111",
                ContactUpdate::new().name("Renamed").phone("222-222-2222"),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            ContactError::Validation(ValidationError::DuplicatePhone(_))
        ));
        assert_eq!(store.contacts(), before.as_slice());
    }

    #[test]
    fn edit_may_keep_its_own_phone() {
        let mut store = sample_store();
        let updated = store
            .edit("111-111-1111", ContactUpdate::new().phone("111-111-1111"))
            .unwrap();
        assert_eq!(updated.phone, "111-111-1111");
    }

    #[test]
    fn edit_moves_contact_to_new_phone() {
        let mut store = sample_store();
        store
            .edit("111-111-1111", ContactUpdate::new().phone("999"))
            .unwrap();

        assert!(store.get("111-111-1111").is_err());
        assert_eq!(store.get("999").unwrap().name, "John Doe");
    }

    #[test]
    fn edit_rejects_blank_name() {
        let mut store = sample_store();
        let err = store
            .edit("111-111-1111", ContactUpdate::new().name("  "))
            .unwrap_err();
        assert!(matches!(
            err,
            ContactError::Validation(ValidationError::EmptyName)
        ));
        assert_eq!(store.get("111-111-1111").unwrap().name, "John Doe");
    }

    #[test]
    fn delete_then_search_finds_nothing() {
        let mut store = sample_store();
        let removed = store.delete("222-222-2222").unwrap();

        assert_eq!(removed.name, "jane Smith");
        assert!(store.search("222-222-2222").is_empty());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn delete_missing_phone_is_not_found() {
        let mut store = sample_store();
        let err = store.delete("999-999-9999").unwrap_err();
        assert!(matches!(err, ContactError::NotFound(_)));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn stats_count_matches_list_all() {
        let mut store = sample_store();
        let stats = store.stats();
        assert_eq!(
            stats,
            ContactStats {
                total: 3,
                with_email: 2,
                with_address: 2,
                with_notes: 1,
            }
        );
        assert_eq!(stats.total, store.list_all().len());

        store.delete("333-333-3333").unwrap();
        assert_eq!(store.stats().total, store.list_all().len());
    }

    #[test]
    fn failed_save_keeps_change_in_memory() {
        let mut store = sample_store();
        let saved_before = store.backend().persisted().unwrap();
        store.backend().set_simulate_write_error(true);

        let err = store.add(NewContact::new("Dana", "444")).unwrap_err();
        assert!(err.is_io());
        assert_eq!(store.len(), 4);
        assert!(store.get("444").is_ok());
        assert_eq!(store.backend().persisted().unwrap(), saved_before);

        let err = store.delete("111-111-1111").unwrap_err();
        assert!(err.is_io());
        assert!(store.get("111-111-1111").is_err());
    }

    #[test]
    fn reopening_reproduces_contacts() {
        let store = sample_store();
        let persisted = store.backend().persisted().unwrap();

        let reopened = ContactStore::open(MemBackend::with_contacts(persisted));
        assert_eq!(reopened.contacts(), store.contacts());
    }

    #[test]
    fn load_repairs_invalid_records() {
        let stamp = now();
        let make = |name: &str, phone: &str| Contact {
            name: name.to_string(),
            phone: phone.to_string(),
            email: None,
            address: None,
            notes: None,
            created_at: stamp,
            modified_at: stamp,
        };
        let backend = MemBackend::with_contacts(vec![
            make("Alice", "1"),
            make("  ", "2"),
            make("Bob", "1"),
            make(" Carol ", " 3 "),
        ]);

        let store = ContactStore::open(backend);
        let names: Vec<_> = store.contacts().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Carol"]);
        assert!(store.get("3").is_ok());
    }
}
