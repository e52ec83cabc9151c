//! Request extractors whose rejections are [`ApiError`]s.
//!
//! axum's own `Json` and `Path` reject with plain-text bodies and, for
//! mistyped JSON, a 422. These wrappers report every malformed input as a
//! validation error with the usual `{"error": ...}` body.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::ApiError;

/// A JSON request body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// Typed path parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct PathParams<T>(pub T);
