//! # Domain Model: Contacts and Their On-Disk Shape
//!
//! This module defines [`Contact`] plus the two input types the store accepts:
//! [`NewContact`] for `add` and [`ContactUpdate`] for `edit`.
//!
//! ## Field Normalization
//!
//! All text input is trimmed. `name` and `phone` are required and must be
//! non-empty after trimming; the optional fields (`email`, `address`, `notes`)
//! collapse to `None` when blank. The store is the only place that turns input
//! into a `Contact`, so every stored contact has already been normalized.
//!
//! ## File Format
//!
//! The contact file is a JSON array of flat objects:
//!
//! ```text
//! {
//!   "name": "Alice",
//!   "phone": "555-0100",
//!   "email": "",                          <-- absent optional fields are ""
//!   "address": "",
//!   "notes": "",
//!   "created_date": "2024-01-15 14:30:00",
//!   "last_modified": "2024-01-15 14:30:00"
//! }
//! ```
//!
//! Timestamps are local wall-clock times with second precision.
//!
//! ## Legacy Records
//!
//! Older files may miss the optional keys or carry empty / unparseable
//! timestamps. Those load anyway: missing text is `None`, a missing or null
//! `name`/`phone` reads as blank (the store drops such records), a missing
//! `created_date` falls back to `last_modified` (then to load time), and
//! `last_modified` is never earlier than `created_date`.

use chrono::{Local, NaiveDateTime, SubsecRound};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::ValidationError;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time truncated to whole seconds, matching what the file can hold.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

fn parse_timestamp(raw: Option<&str>) -> Option<NaiveDateTime> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).ok()
}

/// Trims optional text; blank becomes `None`.
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub(crate) fn required_name(value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(trimmed.to_string())
}

pub(crate) fn required_phone(value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyPhone);
    }
    Ok(trimmed.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub modified_at: NaiveDateTime,
}

impl Contact {
    pub(crate) fn from_new(input: NewContact, stamp: NaiveDateTime) -> Result<Self, ValidationError> {
        let name = required_name(&input.name)?;
        let phone = required_phone(&input.phone)?;
        Ok(Self {
            name,
            phone,
            email: optional_text(input.email.as_deref()),
            address: optional_text(input.address.as_deref()),
            notes: optional_text(input.notes.as_deref()),
            created_at: stamp,
            modified_at: stamp,
        })
    }

    /// Case-insensitive substring match over name, phone, email and address.
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        let hit = |field: &str| field.to_lowercase().contains(needle);
        hit(&self.name)
            || hit(&self.phone)
            || self.email.as_deref().is_some_and(hit)
            || self.address.as_deref().is_some_and(hit)
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.phone)
    }
}

impl Serialize for Contact {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut record = serializer.serialize_struct("Contact", 7)?;
        record.serialize_field("name", &self.name)?;
        record.serialize_field("phone", &self.phone)?;
        record.serialize_field("email", self.email.as_deref().unwrap_or(""))?;
        record.serialize_field("address", self.address.as_deref().unwrap_or(""))?;
        record.serialize_field("notes", self.notes.as_deref().unwrap_or(""))?;
        record.serialize_field("created_date", &format_timestamp(&self.created_at))?;
        record.serialize_field("last_modified", &format_timestamp(&self.modified_at))?;
        record.end()
    }
}

#[derive(Deserialize)]
struct ContactRecord {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    created_date: Option<String>,
    #[serde(default)]
    last_modified: Option<String>,
}

impl<'de> Deserialize<'de> for Contact {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let record = ContactRecord::deserialize(deserializer)?;

        let created = parse_timestamp(record.created_date.as_deref());
        let modified = parse_timestamp(record.last_modified.as_deref());
        let created_at = created.or(modified).unwrap_or_else(now);
        let modified_at = modified.unwrap_or(created_at).max(created_at);

        Ok(Contact {
            name: record.name.unwrap_or_default(),
            phone: record.phone.unwrap_or_default(),
            email: optional_text(record.email.as_deref()),
            address: optional_text(record.address.as_deref()),
            notes: optional_text(record.notes.as_deref()),
            created_at,
            modified_at,
        })
    }
}

/// Input for creating a contact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewContact {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

impl NewContact {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            ..Default::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Fields to change on an existing contact.
///
/// `None` leaves a field alone. For the optional fields, `Some("")` clears
/// the value; for `name` and `phone` a blank value is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

impl ContactUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.address.is_none()
            && self.notes.is_none()
    }
}
