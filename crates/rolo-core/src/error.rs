//! Error types for `rolo-core`.

use thiserror::Error;

use crate::store::CapacityExceeded;

/// Every failure an operation on the contact service can report.
///
/// All variants are recoverable; none is fatal to the process.
#[derive(Debug, Error)]
pub enum Error {
  /// Malformed or missing input.
  #[error("validation failed: {0}")]
  Validation(String),

  /// The referenced id, or a filter, yielded no record.
  #[error("not found: {0}")]
  NotFound(String),

  /// The caller is not allowed to act on the record.
  #[error("unauthorized: {0}")]
  Unauthorized(String),

  /// The caller's identity could not be resolved.
  #[error("authentication failed: {0}")]
  Authentication(String),

  /// The underlying record store failed or rejected a write.
  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn storage<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Storage(Box::new(err))
  }

  /// The size violation behind a `Storage` error, if that is what it was.
  pub fn capacity_exceeded(&self) -> Option<&CapacityExceeded> {
    let Self::Storage(err) = self else {
      return None;
    };
    let mut cause: Option<&(dyn std::error::Error + 'static)> = Some(&**err);
    while let Some(e) = cause {
      if let Some(found) = e.downcast_ref::<CapacityExceeded>() {
        return Some(found);
      }
      cause = e.source();
    }
    None
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Debug, Error)]
  #[error("write failed")]
  struct Wrapped(#[source] CapacityExceeded);

  #[test]
  fn capacity_is_found_through_the_source_chain() {
    let over = CapacityExceeded { size: 2048, limit: 1024 };

    let direct = Error::storage(over);
    assert_eq!(direct.capacity_exceeded(), Some(&over));

    let nested = Error::storage(Wrapped(over));
    assert_eq!(nested.capacity_exceeded(), Some(&over));
  }

  #[test]
  fn other_errors_are_not_capacity() {
    let io = Error::storage(std::io::Error::other("disk I/O error"));
    assert!(io.capacity_exceeded().is_none());
    assert!(Error::NotFound("x".into()).capacity_exceeded().is_none());
  }
}
