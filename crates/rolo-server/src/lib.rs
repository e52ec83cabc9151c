//! HTTP server assembly for Rolo.
//!
//! Wires the JSON API from `rolo-api` behind Basic authentication and request
//! tracing, over any [`RecordStore`].

pub mod auth;
pub mod error;

use std::{path::PathBuf, sync::Arc};

use axum::{Router, middleware};
use rolo_core::{
  ContactService,
  access::{ListScope, Policy},
  store::RecordStore,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use auth::{AuthConfig, UserCredential, require_caller};

// ─── Configuration ────────────────────────────────────────────────────────────

fn default_max_record_bytes() -> usize { 1024 }

/// Runtime server configuration, deserialised from `config.toml` and `ROLO_*`
/// environment variables.
#[derive(Deserialize, Clone, Debug)]
pub struct ServerConfig {
  pub host:                 String,
  pub port:                 u16,
  pub store_path:           PathBuf,
  /// Whether `GET /api/contacts` returns every record or only the caller's.
  #[serde(default)]
  pub list_scope:           ListScope,
  /// Reject empty values in single-field updates.
  #[serde(default)]
  pub strict_field_updates: bool,
  /// Upper bound on a record's JSON size; `0` disables the check.
  #[serde(default = "default_max_record_bytes")]
  pub max_record_bytes:     usize,
  #[serde(default)]
  pub users:                Vec<UserCredential>,
}

impl ServerConfig {
  pub fn policy(&self) -> Policy {
    Policy {
      list_scope:           self.list_scope,
      strict_field_updates: self.strict_field_updates,
    }
  }

  pub fn max_record_bytes(&self) -> Option<usize> {
    (self.max_record_bytes > 0).then_some(self.max_record_bytes)
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Everything the router needs.
#[derive(Clone)]
pub struct AppState<S> {
  pub service: Arc<ContactService<S>>,
  pub auth:    Arc<AuthConfig>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router: `/api/*`, authenticated and traced.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: RecordStore + 'static,
{
  Router::new()
    .nest("/api", rolo_api::api_router(state.service))
    .layer(middleware::from_fn_with_state(state.auth, require_caller))
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use rolo_core::contact::Contact;
  use rolo_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  use crate::auth::tests::{basic, hash};

  async fn make_state(policy: Policy) -> AppState<SqliteStore> {
    let store = SqliteStore::open_in_memory()
      .await
      .unwrap()
      .with_max_record_bytes(default_max_record_bytes());
    let users = ["alice", "bob"].map(|name| UserCredential {
      username:      name.to_string(),
      password_hash: hash(&format!("{name}-pw")),
    });

    AppState {
      service: Arc::new(ContactService::new(store).with_policy(policy)),
      auth:    Arc::new(AuthConfig::new(users)),
    }
  }

  fn auth_header(user: &str) -> String { basic(user, &format!("{user}-pw")) }

  async fn oneshot_raw(
    state:  AppState<SqliteStore>,
    method: &str,
    uri:    &str,
    user:   Option<&str>,
    body:   Option<Value>,
  ) -> axum::response::Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
      builder = builder.header(header::AUTHORIZATION, auth_header(user));
    }
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    router(state).oneshot(builder.body(body).unwrap()).await.unwrap()
  }

  async fn read_json<T: serde::de::DeserializeOwned>(
    resp: axum::response::Response,
  ) -> T {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  fn ann() -> Value {
    json!({
      "name": "Ann",
      "phoneNumber": "555",
      "email": "a@x.com",
      "category": "Work",
      "address": "1 St",
    })
  }

  // ── Auth ─────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn unauthenticated_requests_return_401() {
    let state = make_state(Policy::default()).await;
    let resp = oneshot_raw(state, "GET", "/api/contacts", None, None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().contains_key(header::WWW_AUTHENTICATE));
  }

  #[tokio::test]
  async fn wrong_password_returns_401() {
    let state = make_state(Policy::default()).await;
    let req = Request::builder()
      .method("GET")
      .uri("/api/contacts")
      .header(header::AUTHORIZATION, basic("alice", "bob-pw"))
      .body(Body::empty())
      .unwrap();
    let resp = router(state).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  }

  #[tokio::test]
  async fn owner_is_the_authenticated_user() {
    let state = make_state(Policy::default()).await;
    let resp =
      oneshot_raw(state, "POST", "/api/contacts", Some("alice"), Some(ann())).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Contact = read_json(resp).await;
    assert_eq!(created.owner.as_str(), "alice");
  }

  // ── Ownership ────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn only_owner_may_update_or_delete() {
    let state = make_state(Policy::default()).await;
    let created: Contact = read_json(
      oneshot_raw(state.clone(), "POST", "/api/contacts", Some("alice"), Some(ann()))
        .await,
    )
    .await;
    let uri = format!("/api/contacts/{}", created.id);

    let resp =
      oneshot_raw(state.clone(), "PUT", &uri, Some("bob"), Some(ann())).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = oneshot_raw(state.clone(), "DELETE", &uri, Some("bob"), None).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let unchanged: Contact =
      read_json(oneshot_raw(state.clone(), "GET", &uri, Some("bob"), None).await).await;
    assert_eq!(unchanged, created);

    let resp = oneshot_raw(state, "DELETE", &uri, Some("alice"), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
  }

  #[tokio::test]
  async fn owner_scope_limits_listing() {
    let state = make_state(Policy {
      list_scope: ListScope::Owner,
      ..Policy::default()
    })
    .await;
    oneshot_raw(state.clone(), "POST", "/api/contacts", Some("alice"), Some(ann())).await;

    let mine: Vec<Contact> = read_json(
      oneshot_raw(state.clone(), "GET", "/api/contacts", Some("alice"), None).await,
    )
    .await;
    assert_eq!(mine.len(), 1);

    let theirs: Vec<Contact> =
      read_json(oneshot_raw(state, "GET", "/api/contacts", Some("bob"), None).await)
        .await;
    assert!(theirs.is_empty());
  }

  // ── Storage limits ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn oversized_record_returns_413() {
    let state = make_state(Policy::default()).await;
    let mut body = ann();
    body["address"] = json!("x".repeat(4096));
    let resp =
      oneshot_raw(state, "POST", "/api/contacts", Some("alice"), Some(body)).await;
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let err: Value = read_json(resp).await;
    assert!(err["error"].as_str().unwrap().contains("capacity"));
  }

  // ── Full lifecycle ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_recategorise_delete() {
    let state = make_state(Policy::default()).await;

    let created: Contact = read_json(
      oneshot_raw(state.clone(), "POST", "/api/contacts", Some("alice"), Some(ann()))
        .await,
    )
    .await;
    assert!(created.updated_at.is_none());

    let resp = oneshot_raw(
      state.clone(),
      "PATCH",
      &format!("/api/contacts/{}/fields/category", created.id),
      Some("alice"),
      Some(json!({ "value": "Personal" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let moved: Contact = read_json(resp).await;
    assert_eq!(moved.category, "Personal");
    assert_eq!(moved.name, created.name);
    assert!(moved.updated_at.unwrap() >= moved.created_at);

    let uri = format!("/api/contacts/{}", created.id);
    let deleted: Contact =
      read_json(oneshot_raw(state.clone(), "DELETE", &uri, Some("alice"), None).await)
        .await;
    assert_eq!(deleted, moved);

    let resp = oneshot_raw(state, "GET", &uri, Some("alice"), None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }
}
