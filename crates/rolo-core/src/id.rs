//! Contact identifier generation.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use crate::contact::ContactId;

/// Issues fresh contact ids. Implementations keep no persisted state.
pub trait IdGenerator: Send + Sync {
  fn next_id(&self) -> ContactId;
}

/// 128-bit random (v4) UUIDs. Collisions with any live or deleted id are
/// negligible.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
  fn next_id(&self) -> ContactId { Uuid::new_v4() }
}

/// Ascending ids `…0001`, `…0002`, … for deterministic ordering in tests.
#[derive(Debug, Default)]
pub struct SequentialIds {
  next: AtomicU64,
}

impl SequentialIds {
  pub fn new() -> Self { Self::default() }
}

impl IdGenerator for SequentialIds {
  fn next_id(&self) -> ContactId {
    let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
    Uuid::from_u128(u128::from(n))
  }
}
