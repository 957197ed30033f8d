use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::NewContact;
use crate::store::{ContactStore, StorageBackend};

pub fn run<B: StorageBackend>(store: &mut ContactStore<B>, input: NewContact) -> Result<CmdResult> {
    let contact = store.add(input)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Contact added: {}", contact)));
    Ok(result.with_affected_contacts(vec![contact]))
}
