use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{ContactStore, StorageBackend};

pub fn run<B: StorageBackend>(store: &ContactStore<B>) -> Result<CmdResult> {
    let listed: Vec<_> = store.list_all().into_iter().cloned().collect();

    let mut result = CmdResult::default();
    if listed.is_empty() {
        result.add_message(CmdMessage::info("No contacts yet."));
    }
    Ok(result.with_listed_contacts(listed))
}
