//! Handlers for `/contacts` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/contacts` | All contacts visible to the caller |
//! | `POST`   | `/contacts` | Body: [`ContactPayload`]; returns 201 + stored contact |
//! | `GET`    | `/contacts/{id}` | 404 if not found |
//! | `PUT`    | `/contacts/{id}` | Body: [`ContactPayload`]; owner only |
//! | `DELETE` | `/contacts/{id}` | Owner only; returns the deleted contact |
//! | `PATCH`  | `/contacts/{id}/fields/{field}` | Body: `{"value":"..."}` |
//! | `GET`    | `/contacts/{id}/created-at` | `{"createdAt": ...}` |
//! | `GET`    | `/contacts/{id}/updated-at` | `{"updatedAt": ...}` or `null` |

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{DateTime, Utc};
use rolo_core::{
  ContactService,
  contact::{Contact, ContactField, ContactPayload},
  store::RecordStore,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  caller::Caller,
  error::ApiError,
  extract::{JsonBody, PathParams},
};

type Service<S> = State<Arc<ContactService<S>>>;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /contacts`
pub async fn list<S: RecordStore>(
  State(service): Service<S>,
  Caller(caller): Caller,
) -> Result<Json<Vec<Contact>>, ApiError> {
  Ok(Json(service.list_all(&caller).await?))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /contacts`: returns 201 + the stored [`Contact`].
pub async fn create<S: RecordStore>(
  State(service): Service<S>,
  Caller(caller): Caller,
  JsonBody(payload): JsonBody<ContactPayload>,
) -> Result<impl IntoResponse, ApiError> {
  let contact = service.create(&caller, payload).await?;
  Ok((StatusCode::CREATED, Json(contact)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /contacts/{id}`
pub async fn get_one<S: RecordStore>(
  State(service): Service<S>,
  PathParams(id): PathParams<Uuid>,
) -> Result<Json<Contact>, ApiError> {
  Ok(Json(service.get(id).await?))
}

// ─── Replace ──────────────────────────────────────────────────────────────────

/// `PUT /contacts/{id}`: replaces all five text fields.
pub async fn replace<S: RecordStore>(
  State(service): Service<S>,
  Caller(caller): Caller,
  PathParams(id): PathParams<Uuid>,
  JsonBody(payload): JsonBody<ContactPayload>,
) -> Result<Json<Contact>, ApiError> {
  Ok(Json(service.update(&caller, id, payload).await?))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /contacts/{id}`: returns the deleted contact.
pub async fn delete_one<S: RecordStore>(
  State(service): Service<S>,
  Caller(caller): Caller,
  PathParams(id): PathParams<Uuid>,
) -> Result<Json<Contact>, ApiError> {
  Ok(Json(service.delete(&caller, id).await?))
}

// ─── Single field ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct FieldBody {
  pub value: String,
}

/// `PATCH /contacts/{id}/fields/{field}`: `field` is one of `name`,
/// `phoneNumber`, `email`, `category`, `address`.
pub async fn update_field<S: RecordStore>(
  State(service): Service<S>,
  PathParams((id, field)): PathParams<(Uuid, ContactField)>,
  JsonBody(body): JsonBody<FieldBody>,
) -> Result<Json<Contact>, ApiError> {
  Ok(Json(service.update_field(id, field, body.value).await?))
}

// ─── Timestamps ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedAt {
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedAt {
  pub updated_at: Option<DateTime<Utc>>,
}

/// `GET /contacts/{id}/created-at`
pub async fn created_at<S: RecordStore>(
  State(service): Service<S>,
  PathParams(id): PathParams<Uuid>,
) -> Result<Json<CreatedAt>, ApiError> {
  let created_at = service.created_at(id).await?;
  Ok(Json(CreatedAt { created_at }))
}

/// `GET /contacts/{id}/updated-at`
pub async fn updated_at<S: RecordStore>(
  State(service): Service<S>,
  PathParams(id): PathParams<Uuid>,
) -> Result<Json<UpdatedAt>, ApiError> {
  let updated_at = service.updated_at(id).await?;
  Ok(Json(UpdatedAt { updated_at }))
}
