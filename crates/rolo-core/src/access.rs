//! Ownership checks and deployment policy.
//!
//! Resolving *who* the caller is happens outside this crate (see the server's
//! authentication middleware). This module only decides what a resolved
//! [`Identity`] may do.

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  contact::{Contact, Identity},
};

/// Which records [`crate::ContactService::list_all`] returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListScope {
  /// Every record in the store.
  #[default]
  All,
  /// Only records owned by the caller.
  Owner,
}

/// Knobs for the authorization and validation rules that vary by deployment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
  #[serde(default)]
  pub list_scope:           ListScope,
  /// Reject empty values in single-field updates, as full updates do.
  #[serde(default)]
  pub strict_field_updates: bool,
}

/// Fail with [`Error::Unauthorized`] unless `caller` owns `contact`.
pub fn authorize_owner(caller: &Identity, contact: &Contact) -> Result<()> {
  if contact.owner != *caller {
    return Err(Error::Unauthorized(format!(
      "{caller} does not own contact {}",
      contact.id
    )));
  }
  Ok(())
}

/// Whether `contact` is visible to `caller` under `scope`.
pub fn in_scope(scope: ListScope, caller: &Identity, contact: &Contact) -> bool {
  match scope {
    ListScope::All => true,
    ListScope::Owner => contact.owner == *caller,
  }
}
