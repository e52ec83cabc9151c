//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection},
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler. Wraps the service's error taxonomy.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub rolo_core::Error);

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    Self(rolo_core::Error::Validation(rejection.body_text()))
  }
}

impl From<PathRejection> for ApiError {
  fn from(rejection: PathRejection) -> Self {
    Self(rolo_core::Error::Validation(rejection.body_text()))
  }
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    use rolo_core::Error as E;
    match &self.0 {
      E::Validation(_) => StatusCode::BAD_REQUEST,
      E::Authentication(_) => StatusCode::UNAUTHORIZED,
      E::Unauthorized(_) => StatusCode::FORBIDDEN,
      E::NotFound(_) => StatusCode::NOT_FOUND,
      E::Storage(_) if self.0.capacity_exceeded().is_some() => {
        StatusCode::PAYLOAD_TOO_LARGE
      }
      E::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  /// The message put in the response body. Backend failures are reported
  /// generically; their detail only goes to the log.
  fn public_message(&self) -> String {
    match self.0.capacity_exceeded() {
      Some(over) => over.to_string(),
      None if matches!(self.0, rolo_core::Error::Storage(_)) => {
        "internal storage error".to_string()
      }
      None => self.0.to_string(),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      tracing::error!(error = %self.0, "request failed");
    } else if status == StatusCode::PAYLOAD_TOO_LARGE {
      tracing::warn!(error = %self.0, "record rejected");
    }

    let mut res =
      (status, Json(json!({ "error": self.public_message() }))).into_response();
    if status == StatusCode::UNAUTHORIZED {
      res.headers_mut().insert(
        header::WWW_AUTHENTICATE,
        HeaderValue::from_static("Basic realm=\"rolo\""),
      );
    }
    res
  }
}

#[cfg(test)]
mod tests {
  use rolo_core::store::CapacityExceeded;
  use serde_json::Value;

  use super::*;

  async fn body(resp: Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  #[tokio::test]
  async fn oversized_record_is_413_with_its_sizes() {
    let err = ApiError(rolo_core::Error::Storage(Box::new(CapacityExceeded {
      size:  2048,
      limit: 1024,
    })));
    assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let resp = err.into_response();
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let msg = body(resp).await["error"].as_str().unwrap().to_string();
    assert!(msg.contains("2048") && msg.contains("1024"), "{msg}");
  }

  #[tokio::test]
  async fn backend_failure_hides_its_detail() {
    let err = ApiError(rolo_core::Error::Storage(Box::new(std::io::Error::other(
      "disk I/O error at /var/lib/rolo/contacts.db",
    ))));

    let resp = err.into_response();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body(resp).await["error"], "internal storage error");
  }
}
