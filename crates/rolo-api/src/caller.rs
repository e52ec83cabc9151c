//! The [`Caller`] extractor: the resolved identity of the requester.
//!
//! This crate never authenticates anyone. An outer layer (e.g. the server's
//! auth middleware) resolves the identity and inserts a `Caller` into the
//! request extensions; handlers that need it fail with an authentication
//! error when it is missing.

use axum::{extract::FromRequestParts, http::request::Parts};
use rolo_core::contact::Identity;

use crate::error::ApiError;

/// The identity on whose behalf a request runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller(pub Identity);

impl<S: Send + Sync> FromRequestParts<S> for Caller {
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    _state: &S,
  ) -> Result<Self, Self::Rejection> {
    parts.extensions.get::<Caller>().cloned().ok_or_else(|| {
      ApiError(rolo_core::Error::Authentication(
        "caller identity could not be resolved".to_string(),
      ))
    })
  }
}
