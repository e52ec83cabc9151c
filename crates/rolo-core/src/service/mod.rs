//! [`ContactService`]: the mutation and query layers over a [`RecordStore`].
//!
//! Mutations live in [`mutation`], read-only views in [`query`].

mod mutation;
mod query;


use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
  Error, Result,
  access::Policy,
  clock::{Clock, SystemClock},
  contact::{Contact, ContactId},
  id::{IdGenerator, RandomIds},
  store::RecordStore,
};

/// Validated, ownership-aware access to a contact store.
///
/// Every mutation runs its read-check-write sequence under a single
/// service-wide write lock, so two mutations never interleave. Queries take no
/// lock and see whatever one [`RecordStore::values`] snapshot returns.
pub struct ContactService<S> {
  store:  S,
  clock:  Arc<dyn Clock>,
  ids:    Arc<dyn IdGenerator>,
  policy: Policy,
  writes: Mutex<()>,
}

impl<S: RecordStore> ContactService<S> {
  /// A service over `store` using the system clock, random v4 ids, and the
  /// default [`Policy`].
  pub fn new(store: S) -> Self {
    Self {
      store,
      clock: Arc::new(SystemClock),
      ids: Arc::new(RandomIds),
      policy: Policy::default(),
      writes: Mutex::new(()),
    }
  }

  pub fn with_shared_clock(mut self, clock: Arc<dyn Clock>) -> Self {
    self.clock = clock;
    self
  }

  pub fn with_ids(mut self, ids: impl IdGenerator + 'static) -> Self {
    self.ids = Arc::new(ids);
    self
  }

  pub fn with_policy(mut self, policy: Policy) -> Self {
    self.policy = policy;
    self
  }

  pub fn store(&self) -> &S { &self.store }

  // ── Store access ──────────────────────────────────────────────────────────

  async fn load(&self, id: ContactId) -> Result<Contact> {
    self
      .store
      .get(id)
      .await
      .map_err(Error::storage)?
      .ok_or_else(|| Error::NotFound(format!("contact with id={id} not found")))
  }

  async fn scan(&self) -> Result<Vec<Contact>> {
    self.store.values().await.map_err(Error::storage)
  }
}
