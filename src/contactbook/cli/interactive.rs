//! Interactive console menu.
//!
//! A numbered menu loop over the same [`ContactApi`] the one-shot commands use.
//! Rejected input (validation, unknown phone, failed save) is printed and the
//! loop carries on; only a broken terminal ends the session early. On a
//! terminal the session ends through menu choice 7 (or Ctrl-C). Piped input
//! ends it quietly once the pipe is drained.

use super::render::{render_contact_details, render_contact_list, render_messages, render_stats};
use console::{style, Term};
use contactbook::api::{CmdMessage, CmdResult, ContactApi};
use contactbook::error::Result;
use contactbook::model::{Contact, ContactUpdate, NewContact};
use contactbook::store::StorageBackend;
use std::io::{BufRead, Write};

/// Answer meaning "clear this optional field" when editing.
const CLEAR_MARKER: &str = "-";

/// Where answers come from.
pub trait LineSource {
    /// Show `prompt` and read one line. `None` means input is exhausted.
    fn read_answer(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// A real terminal. `Term::read_line` only returns on Enter, so this source
/// never reports exhaustion.
pub struct TermInput {
    term: Term,
}

impl TermInput {
    pub fn new(term: Term) -> Self {
        Self { term }
    }
}

impl LineSource for TermInput {
    fn read_answer(&mut self, prompt: &str) -> Result<Option<String>> {
        self.term.write_str(prompt)?;
        let line = self.term.read_line()?;
        Ok(Some(line))
    }
}

/// Piped or redirected stdin.
pub struct PipedInput<R: BufRead> {
    reader: R,
}

impl<R: BufRead> PipedInput<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for PipedInput<R> {
    fn read_answer(&mut self, _prompt: &str) -> Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

enum Flow {
    Continue,
    Exhausted,
}

macro_rules! answer {
    ($input:expr, $prompt:expr) => {
        match $input.read_answer($prompt)? {
            Some(line) => line.trim().to_string(),
            None => return Ok(Flow::Exhausted),
        }
    };
}

pub fn run<B: StorageBackend>(
    api: &mut ContactApi<B>,
    input: &mut dyn LineSource,
    out: &mut dyn Write,
) -> Result<()> {
    writeln!(
        out,
        "{} ({})",
        style("Contact Book").bold(),
        api.store().location().display()
    )?;

    loop {
        print_menu(out)?;
        let Some(choice) = input.read_answer("Enter your choice (1-7): ")? else {
            break;
        };

        let flow = match choice.trim() {
            "1" => add(api, input, out)?,
            "2" => view_all(api, out)?,
            "3" => search(api, input, out)?,
            "4" => edit(api, input, out)?,
            "5" => delete(api, input, out)?,
            "6" => stats(api, out)?,
            "7" => {
                writeln!(out, "Goodbye!")?;
                break;
            }
            _ => {
                writeln!(out, "{}", style("Invalid choice. Please try again.").yellow())?;
                Flow::Continue
            }
        };

        if let Flow::Exhausted = flow {
            break;
        }
    }

    Ok(())
}

fn print_menu(out: &mut dyn Write) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "=".repeat(40))?;
    for item in [
        "1. Add Contact",
        "2. View All Contacts",
        "3. Search Contacts",
        "4. Edit Contact",
        "5. Delete Contact",
        "6. View Statistics",
        "7. Exit",
    ] {
        writeln!(out, "{}", item)?;
    }
    writeln!(out, "{}", "=".repeat(40))?;
    Ok(())
}

/// Print the outcome of an API call. Errors are shown, not propagated.
fn report(out: &mut dyn Write, outcome: Result<CmdResult>) -> Result<Option<CmdResult>> {
    match outcome {
        Ok(result) => {
            write!(out, "{}", render_messages(&result.messages))?;
            Ok(Some(result))
        }
        Err(e) => {
            let message = CmdMessage::error(format!("Error: {}", e));
            write!(out, "{}", render_messages(&[message]))?;
            Ok(None)
        }
    }
}

fn write_full(out: &mut dyn Write, contacts: &[Contact]) -> Result<()> {
    for contact in contacts {
        writeln!(out)?;
        write!(out, "{}", render_contact_details(contact))?;
    }
    Ok(())
}

fn add<B: StorageBackend>(
    api: &mut ContactApi<B>,
    input: &mut dyn LineSource,
    out: &mut dyn Write,
) -> Result<Flow> {
    writeln!(out, "\n--- ADD NEW CONTACT ---")?;
    let name = answer!(input, "Enter name: ");
    let phone = answer!(input, "Enter phone number: ");
    let email = answer!(input, "Enter email (optional): ");
    let address = answer!(input, "Enter address (optional): ");
    let notes = answer!(input, "Enter notes (optional): ");

    let draft = NewContact::new(name, phone)
        .with_email(email)
        .with_address(address)
        .with_notes(notes);
    report(out, api.add_contact(draft))?;
    Ok(Flow::Continue)
}

fn view_all<B: StorageBackend>(api: &ContactApi<B>, out: &mut dyn Write) -> Result<Flow> {
    writeln!(out, "\n--- ALL CONTACTS ---")?;
    if let Some(result) = report(out, api.list_contacts())? {
        write_full(out, &result.listed_contacts)?;
    }
    Ok(Flow::Continue)
}

fn search<B: StorageBackend>(
    api: &ContactApi<B>,
    input: &mut dyn LineSource,
    out: &mut dyn Write,
) -> Result<Flow> {
    writeln!(out, "\n--- SEARCH CONTACTS ---")?;
    let query = answer!(input, "Enter search term: ");
    if query.is_empty() {
        writeln!(out, "Please enter a search term.")?;
        return Ok(Flow::Continue);
    }

    if let Some(result) = report(out, api.search_contacts(&query, false))? {
        write!(out, "{}", render_contact_list(&result.listed_contacts))?;
    }
    Ok(Flow::Continue)
}

/// Blank keeps the current value; for optional fields `-` clears it.
fn edit<B: StorageBackend>(
    api: &mut ContactApi<B>,
    input: &mut dyn LineSource,
    out: &mut dyn Write,
) -> Result<Flow> {
    writeln!(out, "\n--- EDIT CONTACT ---")?;
    let phone = answer!(input, "Enter phone number of contact to edit: ");
    let current = match report(out, api.show_contact(&phone))? {
        Some(result) => match result.listed_contacts.into_iter().next() {
            Some(contact) => contact,
            None => return Ok(Flow::Continue),
        },
        None => return Ok(Flow::Continue),
    };

    writeln!(
        out,
        "Editing {} (blank keeps the current value, '{}' clears an optional field)",
        current, CLEAR_MARKER
    )?;
    let name = answer!(input, &format!("Name [{}]: ", current.name));
    let new_phone = answer!(input, &format!("Phone [{}]: ", current.phone));
    let email = answer!(input, &optional_prompt("Email", &current.email));
    let address = answer!(input, &optional_prompt("Address", &current.address));
    let notes = answer!(input, &optional_prompt("Notes", &current.notes));

    let mut update = ContactUpdate::new();
    if !name.is_empty() {
        update = update.name(name);
    }
    if !new_phone.is_empty() {
        update = update.phone(new_phone);
    }
    update.email = optional_answer(email);
    update.address = optional_answer(address);
    update.notes = optional_answer(notes);

    report(out, api.edit_contact(&current.phone, update))?;
    Ok(Flow::Continue)
}

fn optional_prompt(label: &str, current: &Option<String>) -> String {
    format!("{} [{}]: ", label, current.as_deref().unwrap_or(""))
}

fn optional_answer(answer: String) -> Option<String> {
    match answer.as_str() {
        "" => None,
        CLEAR_MARKER => Some(String::new()),
        _ => Some(answer),
    }
}

fn delete<B: StorageBackend>(
    api: &mut ContactApi<B>,
    input: &mut dyn LineSource,
    out: &mut dyn Write,
) -> Result<Flow> {
    writeln!(out, "\n--- DELETE CONTACT ---")?;
    let phone = answer!(input, "Enter phone number of contact to delete: ");
    let target = match report(out, api.show_contact(&phone))? {
        Some(result) => match result.listed_contacts.into_iter().next() {
            Some(contact) => contact,
            None => return Ok(Flow::Continue),
        },
        None => return Ok(Flow::Continue),
    };

    let confirm = answer!(input, &format!("Delete {}? [y/N]: ", target));
    if !confirm.eq_ignore_ascii_case("y") && !confirm.eq_ignore_ascii_case("yes") {
        writeln!(out, "Nothing deleted.")?;
        return Ok(Flow::Continue);
    }

    report(out, api.delete_contact(&target.phone))?;
    Ok(Flow::Continue)
}

fn stats<B: StorageBackend>(api: &ContactApi<B>, out: &mut dyn Write) -> Result<Flow> {
    writeln!(out, "\n--- STATISTICS ---")?;
    if let Some(result) = report(out, api.stats())? {
        if let Some(stats) = result.stats {
            write!(out, "{}", render_stats(&stats))?;
        }
    }
    Ok(Flow::Continue)
}
