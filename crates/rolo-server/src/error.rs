//! Authentication failures and their mapping onto the API error taxonomy.

use axum::response::{IntoResponse, Response};
use rolo_api::ApiError;
use thiserror::Error;

/// Why a request's credentials were not accepted.
///
/// The distinction is only logged; every variant reaches the client as the
/// same 401.
#[derive(Debug, Error)]
pub enum AuthError {
  #[error("missing Authorization header")]
  MissingHeader,
  #[error("unsupported authorization scheme")]
  UnsupportedScheme,
  #[error("malformed credentials")]
  Malformed,
  #[error("unknown user {0:?}")]
  UnknownUser(String),
  #[error("invalid password for {0:?}")]
  InvalidPassword(String),
  #[error("stored password hash for {0:?} is not a valid PHC string")]
  BadHash(String),
}

impl IntoResponse for AuthError {
  fn into_response(self) -> Response {
    tracing::debug!(reason = %self, "authentication rejected");
    ApiError(rolo_core::Error::Authentication(
      "valid credentials are required".to_string(),
    ))
    .into_response()
  }
}
