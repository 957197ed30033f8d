use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::contact_store::sort_by_name;
use crate::store::{ContactStore, StorageBackend};

/// Search contacts. Results keep insertion order unless `sorted` is set.
pub fn run<B: StorageBackend>(
    store: &ContactStore<B>,
    query: &str,
    sorted: bool,
) -> Result<CmdResult> {
    let mut matches = store.search(query);
    if sorted {
        sort_by_name(&mut matches);
    }

    let listed: Vec<_> = matches.into_iter().cloned().collect();
    let mut result = CmdResult::default();
    if listed.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No contacts match \"{}\"",
            query.trim()
        )));
    } else if !query.trim().is_empty() {
        result.add_message(CmdMessage::info(format!(
            "Found {} contact(s)",
            listed.len()
        )));
    }
    Ok(result.with_listed_contacts(listed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::{sample_store, store_with};

    fn names(result: &CmdResult) -> Vec<&str> {
        result
            .listed_contacts
            .iter()
            .map(|c| c.name.as_str())
            .collect()
    }

    #[test]
    fn finds_by_name_phone_and_email() {
        let store = sample_store();

        let by_name = run(&store, "john", false).unwrap();
        assert_eq!(names(&by_name), vec!["John Doe", "Bob Johnson"]);

        let by_phone = run(&store, "222", false).unwrap();
        assert_eq!(names(&by_phone), vec!["jane Smith"]);

        let by_email = run(&store, "bob", false).unwrap();
        assert_eq!(names(&by_email), vec!["Bob Johnson"]);
    }

    #[test]
    fn sorts_when_asked() {
        let store = sample_store();
        let sorted = run(&store, "john", true).unwrap();
        assert_eq!(names(&sorted), vec!["Bob Johnson", "John Doe"]);
    }

    #[test]
    fn alice_is_found_by_name_and_phone_prefix() {
        let store = store_with(&[("Alice", "555-0100")]);
        assert_eq!(names(&run(&store, "alice", false).unwrap()), vec!["Alice"]);
        assert_eq!(names(&run(&store, "555", false).unwrap()), vec!["Alice"]);
    }

    #[test]
    fn reports_no_matches() {
        let store = sample_store();
        let result = run(&store, "nobody", false).unwrap();
        assert!(result.listed_contacts.is_empty());
        assert_eq!(result.messages[0].content, "No contacts match \"nobody\"");
    }

    #[test]
    fn empty_query_lists_everything_without_a_count() {
        let store = sample_store();
        let result = run(&store, "", false).unwrap();
        assert_eq!(result.listed_contacts.len(), 3);
        assert!(result.messages.is_empty());
    }
}
