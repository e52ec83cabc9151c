//! JSON REST API for Rolo.
//!
//! Exposes an axum [`Router`] backed by a [`ContactService`] over any
//! [`RecordStore`]. Authentication, TLS, and transport concerns are the
//! caller's responsibility: handlers that need the requester's identity read a
//! [`Caller`] from the request extensions.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", rolo_api::api_router(service.clone()))
//! ```

pub mod caller;
pub mod contacts;
pub mod error;
pub mod extract;
pub mod lookup;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, patch},
};
use rolo_core::{ContactService, store::RecordStore};

pub use caller::Caller;
pub use error::ApiError;

/// Build a fully-materialised API router for `service`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(service: Arc<ContactService<S>>) -> Router<()>
where
  S: RecordStore + 'static,
{
  Router::new()
    // Contacts
    .route("/contacts", get(contacts::list::<S>).post(contacts::create::<S>))
    .route(
      "/contacts/{id}",
      get(contacts::get_one::<S>)
        .put(contacts::replace::<S>)
        .delete(contacts::delete_one::<S>),
    )
    .route("/contacts/{id}/fields/{field}", patch(contacts::update_field::<S>))
    .route("/contacts/{id}/created-at", get(contacts::created_at::<S>))
    .route("/contacts/{id}/updated-at", get(contacts::updated_at::<S>))
    // Lookups
    .route("/lookup/name/{name}", get(lookup::by_name::<S>))
    .route("/lookup/category/{category}", get(lookup::by_category::<S>))
    .route("/lookup/owner/{owner}", get(lookup::by_owner::<S>))
    .with_state(service)
}
