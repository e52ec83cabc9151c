//! Create, replace, single-field update, and delete.

use tracing::{debug, info, warn};

use crate::{
  Error, Result,
  access::authorize_owner,
  contact::{Contact, ContactField, ContactId, ContactPayload, Identity},
  store::RecordStore,
};

use super::ContactService;

fn validate(payload: &ContactPayload) -> Result<()> {
  let missing = payload.missing_fields();
  if missing.is_empty() {
    return Ok(());
  }
  let names: Vec<String> = missing.iter().map(ToString::to_string).collect();
  Err(Error::Validation(format!(
    "missing required fields in payload: {}",
    names.join(", ")
  )))
}

impl<S: RecordStore> ContactService<S> {
  /// Create a contact owned by `caller`.
  ///
  /// All five text fields must be non-empty. The new record gets a fresh id,
  /// `created_at = now`, and no `updated_at`.
  pub async fn create(
    &self,
    caller: &Identity,
    payload: ContactPayload,
  ) -> Result<Contact> {
    validate(&payload)?;

    let _guard = self.writes.lock().await;
    let contact = Contact {
      id:           self.ids.next_id(),
      name:         payload.name,
      phone_number: payload.phone_number,
      email:        payload.email,
      category:     payload.category,
      address:      payload.address,
      owner:        caller.clone(),
      created_at:   self.clock.now(),
      updated_at:   None,
    };

    self.store.put(contact.clone()).await.map_err(Error::storage)?;
    info!(id = %contact.id, owner = %caller, "contact created");
    Ok(contact)
  }

  /// Replace all five text fields of a contact owned by `caller`.
  ///
  /// Checks run in order: payload validation, existence, ownership.
  pub async fn update(
    &self,
    caller: &Identity,
    id: ContactId,
    payload: ContactPayload,
  ) -> Result<Contact> {
    validate(&payload)?;

    let _guard = self.writes.lock().await;
    let mut contact = self.load(id).await?;
    if let Err(e) = authorize_owner(caller, &contact) {
      warn!(%id, %caller, "update denied");
      return Err(e);
    }

    contact.apply(payload);
    self.touch(&mut contact);
    self.store.put(contact.clone()).await.map_err(Error::storage)?;
    debug!(%id, "contact updated");
    Ok(contact)
  }

  /// Overwrite a single text field.
  ///
  /// Neither ownership nor the other four fields are checked. The value
  /// itself is only required to be non-empty when
  /// [`Policy::strict_field_updates`](crate::access::Policy) is set.
  pub async fn update_field(
    &self,
    id: ContactId,
    field: ContactField,
    value: String,
  ) -> Result<Contact> {
    if self.policy.strict_field_updates && value.is_empty() {
      return Err(Error::Validation(format!("{field} must not be empty")));
    }

    let _guard = self.writes.lock().await;
    let mut contact = self.load(id).await?;
    contact.set_field(field, value);
    self.touch(&mut contact);
    self.store.put(contact.clone()).await.map_err(Error::storage)?;
    debug!(%id, %field, "contact field updated");
    Ok(contact)
  }

  /// Delete a contact owned by `caller`, returning its last stored value.
  pub async fn delete(&self, caller: &Identity, id: ContactId) -> Result<Contact> {
    let _guard = self.writes.lock().await;
    let contact = self.load(id).await?;
    if let Err(e) = authorize_owner(caller, &contact) {
      warn!(%id, %caller, "delete denied");
      return Err(e);
    }

    let removed = self
      .store
      .remove(id)
      .await
      .map_err(Error::storage)?
      .unwrap_or(contact);
    info!(%id, "contact deleted");
    Ok(removed)
  }

  /// Stamp `updated_at`, never earlier than `created_at`.
  fn touch(&self, contact: &mut Contact) {
    contact.updated_at = Some(self.clock.now().max(contact.created_at));
  }
}
