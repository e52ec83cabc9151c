//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings and ids as hyphenated lowercase
//! UUIDs, so lexical `ORDER BY id` matches [`uuid::Uuid`] ordering.

use chrono::{DateTime, Utc};
use rolo_core::contact::{Contact, Identity};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Record size ─────────────────────────────────────────────────────────────

/// Size of the record as the JSON document a client would see.
pub fn encoded_len(contact: &Contact) -> Result<usize> {
  Ok(serde_json::to_vec(contact)?.len())
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list shared by every `SELECT` so [`RawContact::from_row`] can index
/// positionally.
pub const CONTACT_COLUMNS: &str = "id, name, phone_number, email, category, \
                                   address, owner, created_at, updated_at";

/// Raw strings read directly from a `contacts` row.
pub struct RawContact {
  pub id:           String,
  pub name:         String,
  pub phone_number: String,
  pub email:        String,
  pub category:     String,
  pub address:      String,
  pub owner:        String,
  pub created_at:   String,
  pub updated_at:   Option<String>,
}

impl RawContact {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(0)?,
      name:         row.get(1)?,
      phone_number: row.get(2)?,
      email:        row.get(3)?,
      category:     row.get(4)?,
      address:      row.get(5)?,
      owner:        row.get(6)?,
      created_at:   row.get(7)?,
      updated_at:   row.get(8)?,
    })
  }

  pub fn from_contact(contact: &Contact) -> Self {
    Self {
      id:           encode_uuid(contact.id),
      name:         contact.name.clone(),
      phone_number: contact.phone_number.clone(),
      email:        contact.email.clone(),
      category:     contact.category.clone(),
      address:      contact.address.clone(),
      owner:        contact.owner.as_str().to_owned(),
      created_at:   encode_dt(contact.created_at),
      updated_at:   contact.updated_at.map(encode_dt),
    }
  }

  pub fn into_contact(self) -> Result<Contact> {
    Ok(Contact {
      id:           decode_uuid(&self.id)?,
      name:         self.name,
      phone_number: self.phone_number,
      email:        self.email,
      category:     self.category,
      address:      self.address,
      owner:        Identity::new(self.owner),
      created_at:   decode_dt(&self.created_at)?,
      updated_at:   self.updated_at.as_deref().map(decode_dt).transpose()?,
    })
  }
}
