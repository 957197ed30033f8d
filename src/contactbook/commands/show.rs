use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::{ContactStore, StorageBackend};

pub fn run<B: StorageBackend>(store: &ContactStore<B>, phone: &str) -> Result<CmdResult> {
    let contact = store.get(phone)?.clone();
    Ok(CmdResult::default().with_listed_contacts(vec![contact]))
}
