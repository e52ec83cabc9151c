//! Error type for `rolo-store-sqlite`.

use rolo_core::store::CapacityExceeded;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A write was refused because the encoded record exceeds the configured
  /// per-record limit.
  #[error("{0}")]
  CapacityExceeded(#[from] CapacityExceeded),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
