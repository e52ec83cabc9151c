//! [`MemoryStore`]: a non-durable [`RecordStore`] over a `BTreeMap`.

use std::{collections::BTreeMap, convert::Infallible, sync::Arc};

use tokio::sync::RwLock;

use crate::{
  contact::{Contact, ContactId},
  store::RecordStore,
};

/// An in-process ordered store. Contents are lost when the last clone drops.
///
/// Cloning is cheap; clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  map: Arc<RwLock<BTreeMap<ContactId, Contact>>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }
}

impl RecordStore for MemoryStore {
  type Error = Infallible;

  async fn get(&self, id: ContactId) -> Result<Option<Contact>, Infallible> {
    Ok(self.map.read().await.get(&id).cloned())
  }

  async fn put(&self, contact: Contact) -> Result<(), Infallible> {
    self.map.write().await.insert(contact.id, contact);
    Ok(())
  }

  async fn remove(&self, id: ContactId) -> Result<Option<Contact>, Infallible> {
    Ok(self.map.write().await.remove(&id))
  }

  async fn values(&self) -> Result<Vec<Contact>, Infallible> {
    Ok(self.map.read().await.values().cloned().collect())
  }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;
  use uuid::Uuid;

  use super::*;
  use crate::contact::Identity;

  fn contact(id: u128, name: &str) -> Contact {
    Contact {
      id:           Uuid::from_u128(id),
      name:         name.into(),
      phone_number: "555".into(),
      email:        "a@x.com".into(),
      category:     "Work".into(),
      address:      "1 St".into(),
      owner:        Identity::from("alice"),
      created_at:   Utc::now(),
      updated_at:   None,
    }
  }

  #[tokio::test]
  async fn values_are_in_key_order() {
    let store = MemoryStore::new();
    store.put(contact(3, "c")).await.unwrap();
    store.put(contact(1, "a")).await.unwrap();
    store.put(contact(2, "b")).await.unwrap();

    let names: Vec<_> = store
      .values()
      .await
      .unwrap()
      .into_iter()
      .map(|c| c.name)
      .collect();
    assert_eq!(names, ["a", "b", "c"]);
  }

  #[tokio::test]
  async fn put_replaces_and_remove_returns_prior() {
    let store = MemoryStore::new();
    store.put(contact(1, "first")).await.unwrap();
    store.put(contact(1, "second")).await.unwrap();

    let removed = store.remove(Uuid::from_u128(1)).await.unwrap().unwrap();
    assert_eq!(removed.name, "second");
    assert!(store.get(Uuid::from_u128(1)).await.unwrap().is_none());
    assert!(store.remove(Uuid::from_u128(1)).await.unwrap().is_none());
  }
}
