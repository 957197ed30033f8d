use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::{ContactStore, StorageBackend};

pub fn run<B: StorageBackend>(store: &ContactStore<B>) -> Result<CmdResult> {
    Ok(CmdResult::default().with_stats(store.stats()))
}
