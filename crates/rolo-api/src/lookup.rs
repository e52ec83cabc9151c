//! Handlers for `/lookup` endpoints.
//!
//! Each one is a full scan of the store. Empty results are 404, not `[]`.

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
};
use rolo_core::{
  ContactService,
  contact::{Contact, Identity},
  store::RecordStore,
};

use crate::{error::ApiError, extract::PathParams};

/// `GET /lookup/name/{name}`: first case-insensitive match.
pub async fn by_name<S: RecordStore>(
  State(service): State<Arc<ContactService<S>>>,
  PathParams(name): PathParams<String>,
) -> Result<Json<Contact>, ApiError> {
  Ok(Json(service.get_by_name(&name).await?))
}

/// `GET /lookup/category/{category}`: case-insensitive.
pub async fn by_category<S: RecordStore>(
  State(service): State<Arc<ContactService<S>>>,
  PathParams(category): PathParams<String>,
) -> Result<Json<Vec<Contact>>, ApiError> {
  Ok(Json(service.list_by_category(&category).await?))
}

/// `GET /lookup/owner/{owner}`: exact identity match.
pub async fn by_owner<S: RecordStore>(
  State(service): State<Arc<ContactService<S>>>,
  PathParams(owner): PathParams<String>,
) -> Result<Json<Vec<Contact>>, ApiError> {
  Ok(Json(service.list_by_owner(&Identity::new(owner)).await?))
}
