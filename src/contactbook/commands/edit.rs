use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::ContactUpdate;
use crate::store::{ContactStore, StorageBackend};

pub fn run<B: StorageBackend>(
    store: &mut ContactStore<B>,
    phone: &str,
    update: ContactUpdate,
) -> Result<CmdResult> {
    if update.is_empty() {
        // Still resolve the phone so a typo is reported as such.
        let contact = store.get(phone)?.clone();
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::warning(format!(
            "Nothing to update for {}",
            contact
        )));
        return Ok(result);
    }

    let contact = store.edit(phone, update)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Contact updated: {}", contact)));
    Ok(result.with_affected_contacts(vec![contact]))
}
