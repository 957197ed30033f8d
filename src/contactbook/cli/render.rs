use chrono::NaiveDateTime;
use colored::*;
use contactbook::api::{CmdMessage, MessageLevel};
use contactbook::config::BookConfig;
use contactbook::model::{format_timestamp, now, Contact};
use contactbook::store::ContactStats;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const NAME_WIDTH: usize = 24;
const PHONE_WIDTH: usize = 18;
const EMAIL_WIDTH: usize = 30;
const TIME_WIDTH: usize = 16;
const NOT_SET: &str = "N/A";

pub fn render_messages(messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        let line = match message.level {
            MessageLevel::Info => message.content.dimmed(),
            MessageLevel::Success => message.content.green(),
            MessageLevel::Warning => message.content.yellow(),
            MessageLevel::Error => message.content.red(),
        };
        out.push_str(&format!("{}\n", line));
    }
    out
}

pub fn print_messages(messages: &[CmdMessage]) {
    print!("{}", render_messages(messages));
}

/// One line per contact: name, phone, email, and how long since the last edit.
pub fn render_contact_list(contacts: &[Contact]) -> String {
    let mut out = String::new();
    for contact in contacts {
        let email = contact.email.as_deref().unwrap_or("");
        out.push_str(&format!(
            "  {}  {}  {}  {}\n",
            fit(&contact.name, NAME_WIDTH).bold(),
            fit(&contact.phone, PHONE_WIDTH).yellow(),
            fit(email, EMAIL_WIDTH),
            format_time_ago(contact.modified_at).dimmed()
        ));
    }
    out
}

pub fn print_contact_list(contacts: &[Contact]) {
    print!("{}", render_contact_list(contacts));
}

pub fn render_contact_details(contact: &Contact) -> String {
    let field = |value: &Option<String>| value.clone().unwrap_or_else(|| NOT_SET.to_string());
    let rows = [
        ("Name", contact.name.clone()),
        ("Phone", contact.phone.clone()),
        ("Email", field(&contact.email)),
        ("Address", field(&contact.address)),
        ("Notes", field(&contact.notes)),
        ("Created", format_timestamp(&contact.created_at)),
        ("Modified", format_timestamp(&contact.modified_at)),
    ];

    let mut out = String::new();
    for (label, value) in rows {
        let label = format!("{:<9}", format!("{}:", label));
        out.push_str(&format!("{} {}\n", label.dimmed(), value));
    }
    out
}

pub fn print_full_contacts(contacts: &[Contact]) {
    for (i, contact) in contacts.iter().enumerate() {
        if i > 0 {
            println!("{}", "-".repeat(30));
        }
        print!("{}", render_contact_details(contact));
    }
}

pub fn render_stats(stats: &ContactStats) -> String {
    format!(
        "Total contacts:         {}\nContacts with email:    {}\nContacts with address:  {}\nContacts with notes:    {}\n",
        stats.total.to_string().bold(),
        stats.with_email,
        stats.with_address,
        stats.with_notes
    )
}

pub fn print_stats(stats: &ContactStats) {
    print!("{}", render_stats(stats));
}

pub fn render_config(config: &BookConfig) -> String {
    config
        .entries()
        .into_iter()
        .map(|(key, value)| format!("{} = {}\n", key, value))
        .collect()
}

pub fn print_config(config: &BookConfig) {
    print!("{}", render_config(config));
}

/// Truncate to `width` display columns (ending with `…` when cut), then pad
/// with spaces to exactly `width`.
fn fit(s: &str, width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    if s.width() > width {
        for c in s.chars() {
            let char_width = c.width().unwrap_or(0);
            if current_width + char_width > width.saturating_sub(1) {
                break;
            }
            result.push(c);
            current_width += char_width;
        }
        result.push('…');
        current_width += 1;
    } else {
        result.push_str(s);
        current_width = s.width();
    }

    result.push_str(&" ".repeat(width.saturating_sub(current_width)));
    result
}

fn format_time_ago(timestamp: NaiveDateTime) -> String {
    let duration = now().signed_duration_since(timestamp);

    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
