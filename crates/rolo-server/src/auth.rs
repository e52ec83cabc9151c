//! HTTP Basic authentication: resolves the caller identity for the API.
//!
//! A successful check inserts a [`Caller`] into the request extensions, where
//! `rolo-api` handlers pick it up. The identity is the username.

use std::{collections::HashMap, sync::Arc};

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::{
  extract::{Request, State},
  http::HeaderMap,
  middleware::Next,
  response::{IntoResponse, Response},
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use rolo_api::Caller;
use rolo_core::contact::Identity;
use serde::Deserialize;

use crate::error::AuthError;

/// One configured account.
#[derive(Clone, Debug, Deserialize)]
pub struct UserCredential {
  pub username:      String,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
}

/// Credentials accepted as valid for this server instance.
#[derive(Clone, Debug, Default)]
pub struct AuthConfig {
  users: HashMap<String, String>,
}

impl AuthConfig {
  pub fn new(users: impl IntoIterator<Item = UserCredential>) -> Self {
    Self {
      users: users
        .into_iter()
        .map(|u| (u.username, u.password_hash))
        .collect(),
    }
  }

  pub fn user_count(&self) -> usize { self.users.len() }
}

/// Verify Basic credentials from `headers` and return the caller identity.
pub fn verify_auth(
  headers: &HeaderMap,
  config: &AuthConfig,
) -> Result<Identity, AuthError> {
  let header_val = headers
    .get(axum::http::header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or(AuthError::MissingHeader)?;

  let encoded = header_val
    .strip_prefix("Basic ")
    .ok_or(AuthError::UnsupportedScheme)?;

  let decoded = B64.decode(encoded).map_err(|_| AuthError::Malformed)?;
  let creds   = std::str::from_utf8(&decoded).map_err(|_| AuthError::Malformed)?;

  let (username, password) = creds.split_once(':').ok_or(AuthError::Malformed)?;

  let stored = config
    .users
    .get(username)
    .ok_or_else(|| AuthError::UnknownUser(username.to_string()))?;

  let parsed_hash = PasswordHash::new(stored)
    .map_err(|_| AuthError::BadHash(username.to_string()))?;

  Argon2::default()
    .verify_password(password.as_bytes(), &parsed_hash)
    .map_err(|_| AuthError::InvalidPassword(username.to_string()))?;

  Ok(Identity::new(username))
}

/// Middleware: reject unauthenticated requests, tag the rest with a
/// [`Caller`].
pub async fn require_caller(
  State(auth): State<Arc<AuthConfig>>,
  mut req: Request,
  next: Next,
) -> Response {
  match verify_auth(req.headers(), &auth) {
    Ok(identity) => {
      req.extensions_mut().insert(Caller(identity));
      next.run(req).await
    }
    Err(e) => e.into_response(),
  }
}

#[cfg(test)]
pub(crate) mod tests {
  use super::*;
  use argon2::{PasswordHasher, password_hash::SaltString};
  use axum::http::{HeaderValue, header};
  use rand_core::OsRng;

  pub(crate) fn hash(password: &str) -> String {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
      .hash_password(password.as_bytes(), &salt)
      .unwrap()
      .to_string()
  }

  pub(crate) fn basic(user: &str, pass: &str) -> String {
    let encoded = B64.encode(format!("{user}:{pass}"));
    format!("Basic {encoded}")
  }

  fn config() -> AuthConfig {
    AuthConfig::new([UserCredential {
      username:      "alice".to_string(),
      password_hash: hash("secret"),
    }])
  }

  fn headers(value: &str) -> HeaderMap {
    let mut h = HeaderMap::new();
    h.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
    h
  }

  #[test]
  fn duplicate_usernames_keep_the_last_entry() {
    let config = AuthConfig::new([
      UserCredential {
        username:      "alice".to_string(),
        password_hash: hash("old"),
      },
      UserCredential {
        username:      "alice".to_string(),
        password_hash: hash("secret"),
      },
    ]);
    assert_eq!(config.user_count(), 1);
    assert!(verify_auth(&headers(&basic("alice", "secret")), &config).is_ok());
  }

  #[test]
  fn correct_credentials_resolve_identity() {
    let identity = verify_auth(&headers(&basic("alice", "secret")), &config()).unwrap();
    assert_eq!(identity, Identity::from("alice"));
  }

  #[test]
  fn wrong_password() {
    let err = verify_auth(&headers(&basic("alice", "wrong")), &config()).unwrap_err();
    assert!(matches!(err, AuthError::InvalidPassword(_)));
  }

  #[test]
  fn unknown_user() {
    let err = verify_auth(&headers(&basic("bob", "secret")), &config()).unwrap_err();
    assert!(matches!(err, AuthError::UnknownUser(_)));
  }

  #[test]
  fn missing_header() {
    let err = verify_auth(&HeaderMap::new(), &config()).unwrap_err();
    assert!(matches!(err, AuthError::MissingHeader));
  }

  #[test]
  fn bearer_scheme_is_unsupported() {
    let err = verify_auth(&headers("Bearer abc"), &config()).unwrap_err();
    assert!(matches!(err, AuthError::UnsupportedScheme));
  }

  #[test]
  fn invalid_base64() {
    let err = verify_auth(&headers("Basic !!!not-base64!!!"), &config()).unwrap_err();
    assert!(matches!(err, AuthError::Malformed));
  }

  #[test]
  fn garbage_stored_hash() {
    let config = AuthConfig::new([UserCredential {
      username:      "alice".to_string(),
      password_hash: "plaintext".to_string(),
    }]);
    let err = verify_auth(&headers(&basic("alice", "secret")), &config).unwrap_err();
    assert!(matches!(err, AuthError::BadHash(_)));
  }
}
