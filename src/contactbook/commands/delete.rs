use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{ContactStore, StorageBackend};

pub fn run<B: StorageBackend>(store: &mut ContactStore<B>, phone: &str) -> Result<CmdResult> {
    let removed = store.delete(phone)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Contact deleted: {}", removed)));
    Ok(result.with_affected_contacts(vec![removed]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::search;
    use crate::error::ContactError;
    use crate::store::memory::fixtures::sample_store;

    #[test]
    fn deletes_contact() {
        let mut store = sample_store();
        let result = run(&mut store, "111-111-1111").unwrap();
        assert_eq!(result.affected_contacts[0].name, "John Doe");

        let found = search::run(&store, "111-111-1111", false).unwrap();
        assert!(found.listed_contacts.is_empty());
    }

    #[test]
    fn unknown_phone_is_not_found() {
        let mut store = sample_store();
        let err = run(&mut store, "999-999-9999").unwrap_err();
        assert!(matches!(err, ContactError::NotFound(_)));
        assert_eq!(store.len(), 3);
    }
}
