//! Read-only views. Every filter is a linear scan in key order.

use chrono::{DateTime, Utc};

use crate::{
  Error, Result,
  access::in_scope,
  contact::{Contact, ContactId, Identity},
  store::RecordStore,
};

use super::ContactService;

/// Turn an empty filter result into [`Error::NotFound`].
fn non_empty(contacts: Vec<Contact>, what: impl FnOnce() -> String) -> Result<Vec<Contact>> {
  if contacts.is_empty() {
    Err(Error::NotFound(what()))
  } else {
    Ok(contacts)
  }
}

impl<S: RecordStore> ContactService<S> {
  pub async fn get(&self, id: ContactId) -> Result<Contact> { self.load(id).await }

  /// The first contact, in id order, whose name equals `name` ignoring case.
  ///
  /// Names are not unique; later matches are ignored.
  pub async fn get_by_name(&self, name: &str) -> Result<Contact> {
    let wanted = name.to_lowercase();
    self
      .scan()
      .await?
      .into_iter()
      .find(|c| c.name.to_lowercase() == wanted)
      .ok_or_else(|| Error::NotFound(format!("contact with name={name:?} not found")))
  }

  /// Contacts whose category equals `category` ignoring case. An empty result
  /// is [`Error::NotFound`].
  pub async fn list_by_category(&self, category: &str) -> Result<Vec<Contact>> {
    let wanted = category.to_lowercase();
    let found = self
      .scan()
      .await?
      .into_iter()
      .filter(|c| c.category.to_lowercase() == wanted)
      .collect();
    non_empty(found, || format!("no contacts found in category={category:?}"))
  }

  /// Contacts created by `owner`. An empty result is [`Error::NotFound`].
  pub async fn list_by_owner(&self, owner: &Identity) -> Result<Vec<Contact>> {
    let found = self
      .scan()
      .await?
      .into_iter()
      .filter(|c| c.owner == *owner)
      .collect();
    non_empty(found, || format!("no contacts found for owner={owner}"))
  }

  /// Every contact visible to `caller` under the configured
  /// [`ListScope`](crate::access::ListScope). May be empty.
  pub async fn list_all(&self, caller: &Identity) -> Result<Vec<Contact>> {
    let scope = self.policy.list_scope;
    let mut contacts = self.scan().await?;
    contacts.retain(|c| in_scope(scope, caller, c));
    Ok(contacts)
  }

  pub async fn created_at(&self, id: ContactId) -> Result<DateTime<Utc>> {
    Ok(self.load(id).await?.created_at)
  }

  pub async fn updated_at(&self, id: ContactId) -> Result<Option<DateTime<Utc>>> {
    Ok(self.load(id).await?.updated_at)
  }
}
