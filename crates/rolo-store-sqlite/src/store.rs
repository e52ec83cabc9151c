//! [`SqliteStore`]: the SQLite implementation of [`RecordStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use tracing::warn;

use rolo_core::{
  contact::{Contact, ContactId},
  store::{CapacityExceeded, RecordStore},
};

use crate::{
  Error, Result,
  encode::{CONTACT_COLUMNS, RawContact, encode_uuid, encoded_len},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Rolo record store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted. Every call
/// runs on the connection's own thread, so each individual operation sees and
/// leaves a consistent table.
#[derive(Clone)]
pub struct SqliteStore {
  conn:             tokio_rusqlite::Connection,
  max_record_bytes: Option<usize>,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn, max_record_bytes: None };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn, max_record_bytes: None };
    store.init_schema().await?;
    Ok(store)
  }

  /// Refuse writes whose JSON-encoded record is larger than `limit` bytes.
  pub fn with_max_record_bytes(mut self, limit: usize) -> Self {
    self.max_record_bytes = Some(limit);
    self
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  fn check_capacity(&self, contact: &Contact) -> Result<()> {
    let Some(limit) = self.max_record_bytes else {
      return Ok(());
    };
    let size = encoded_len(contact)?;
    if size > limit {
      warn!(id = %contact.id, size, limit, "record exceeds size limit");
      return Err(CapacityExceeded { size, limit }.into());
    }
    Ok(())
  }
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = Error;

  async fn get(&self, id: ContactId) -> Result<Option<Contact>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = ?1"),
            rusqlite::params![id_str],
            RawContact::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }

  async fn put(&self, contact: Contact) -> Result<()> {
    self.check_capacity(&contact)?;
    let raw = RawContact::from_contact(&contact);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO contacts (
             id, name, phone_number, email, category,
             address, owner, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
           ON CONFLICT(id) DO UPDATE SET
             name         = excluded.name,
             phone_number = excluded.phone_number,
             email        = excluded.email,
             category     = excluded.category,
             address      = excluded.address,
             owner        = excluded.owner,
             created_at   = excluded.created_at,
             updated_at   = excluded.updated_at",
          rusqlite::params![
            raw.id,
            raw.name,
            raw.phone_number,
            raw.email,
            raw.category,
            raw.address,
            raw.owner,
            raw.created_at,
            raw.updated_at,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn remove(&self, id: ContactId) -> Result<Option<Contact>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let raw = tx
          .query_row(
            &format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = ?1"),
            rusqlite::params![id_str],
            RawContact::from_row,
          )
          .optional()?;
        if raw.is_some() {
          tx.execute(
            "DELETE FROM contacts WHERE id = ?1",
            rusqlite::params![id_str],
          )?;
        }
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }

  async fn values(&self) -> Result<Vec<Contact>> {
    let raws: Vec<RawContact> = self
      .conn
      .call(|conn| {
        let mut stmt = conn
          .prepare(&format!("SELECT {CONTACT_COLUMNS} FROM contacts ORDER BY id"))?;
        let rows = stmt
          .query_map([], RawContact::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContact::into_contact).collect()
  }
}
