//! Contact types: the single record kind held by the store.
//!
//! Wire and JSON field names are camelCase (`phoneNumber`, `createdAt`, ...).

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use uuid::Uuid;

/// Primary key of a contact. Always a random (v4) UUID.
pub type ContactId = Uuid;

// ─── Identity ────────────────────────────────────────────────────────────────

/// An opaque caller identity token.
///
/// The core only ever compares identities for equality; it never interprets
/// their contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
  pub fn new(token: impl Into<String>) -> Self { Self(token.into()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for Identity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for Identity {
  fn from(s: &str) -> Self { Self(s.to_owned()) }
}

impl From<String> for Identity {
  fn from(s: String) -> Self { Self(s) }
}

// ─── Fields ──────────────────────────────────────────────────────────────────

/// One of the five mutable text fields of a contact.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ContactField {
  Name,
  PhoneNumber,
  Email,
  Category,
  Address,
}

// ─── Contact ─────────────────────────────────────────────────────────────────

/// A persisted contact record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
  /// Assigned at creation; never changes and is never reused.
  pub id:           ContactId,
  pub name:         String,
  pub phone_number: String,
  pub email:        String,
  pub category:     String,
  pub address:      String,
  /// The identity that created the record; never changes.
  pub owner:        Identity,
  pub created_at:   DateTime<Utc>,
  /// `None` until the first mutation, then refreshed on every mutation.
  pub updated_at:   Option<DateTime<Utc>>,
}

impl Contact {
  /// Overwrite a single text field.
  pub fn set_field(&mut self, field: ContactField, value: String) {
    let slot = match field {
      ContactField::Name => &mut self.name,
      ContactField::PhoneNumber => &mut self.phone_number,
      ContactField::Email => &mut self.email,
      ContactField::Category => &mut self.category,
      ContactField::Address => &mut self.address,
    };
    *slot = value;
  }

  /// Replace all five text fields from `payload`.
  pub fn apply(&mut self, payload: ContactPayload) {
    self.name = payload.name;
    self.phone_number = payload.phone_number;
    self.email = payload.email;
    self.category = payload.category;
    self.address = payload.address;
  }
}

// ─── ContactPayload ──────────────────────────────────────────────────────────

/// Input to [`crate::ContactService::create`] and
/// [`crate::ContactService::update`].
///
/// Missing JSON fields deserialise as empty strings so that they are reported
/// as validation failures rather than decode errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactPayload {
  pub name:         String,
  pub phone_number: String,
  pub email:        String,
  pub category:     String,
  pub address:      String,
}

impl ContactPayload {
  /// Borrow the value of a single text field.
  pub fn field(&self, field: ContactField) -> &str {
    match field {
      ContactField::Name => &self.name,
      ContactField::PhoneNumber => &self.phone_number,
      ContactField::Email => &self.email,
      ContactField::Category => &self.category,
      ContactField::Address => &self.address,
    }
  }

  /// The fields that are empty, in declaration order.
  pub fn missing_fields(&self) -> Vec<ContactField> {
    use strum::IntoEnumIterator as _;
    ContactField::iter()
      .filter(|f| self.field(*f).is_empty())
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use std::str::FromStr as _;

  use super::*;

  #[test]
  fn field_names_are_camel_case() {
    assert_eq!(ContactField::PhoneNumber.to_string(), "phoneNumber");
    assert_eq!(
      ContactField::from_str("phoneNumber").unwrap(),
      ContactField::PhoneNumber
    );
    let json = serde_json::to_string(&ContactField::PhoneNumber).unwrap();
    assert_eq!(json, "\"phoneNumber\"");
  }

  #[test]
  fn payload_missing_fields_default_to_empty() {
    let payload: ContactPayload =
      serde_json::from_str(r#"{"name":"Ann","email":"a@x.com"}"#).unwrap();
    assert_eq!(payload.missing_fields(), vec![
      ContactField::PhoneNumber,
      ContactField::Category,
      ContactField::Address,
    ]);
  }
}
