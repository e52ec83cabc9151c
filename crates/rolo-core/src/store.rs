//! The `RecordStore` trait: the ordered map every contact lives in.
//!
//! The trait is implemented by storage backends (e.g. `rolo-store-sqlite`,
//! or [`MemoryStore`](crate::memory::MemoryStore)). The service layer depends
//! on this abstraction, not on any concrete backend.

use std::future::Future;

use thiserror::Error;

use crate::contact::{Contact, ContactId};

/// A write refused because the encoded record is larger than the store
/// accepts.
///
/// Backends with a per-record size bound report this as (or as the source of)
/// their error so callers can tell it apart from an internal failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("capacity exceeded: record is {size} bytes, limit is {limit}")]
pub struct CapacityExceeded {
  pub size:  usize,
  pub limit: usize,
}

/// Abstraction over a durable, key-ordered `id → Contact` map.
///
/// There are no secondary indexes: every filter query in the service is a
/// linear scan over [`RecordStore::values`]. That is the scaling limit of this
/// design and the point at which per-category or per-owner indexes would be
/// introduced.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Point lookup. Returns `None` if no record has this id.
  fn get(
    &self,
    id: ContactId,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Insert or replace the record stored at `contact.id`.
  fn put(
    &self,
    contact: Contact,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Delete the record with this id, returning its prior value if present.
  fn remove(
    &self,
    id: ContactId,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Every record in ascending id order, read as one consistent snapshot.
  fn values(
    &self,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;
}
