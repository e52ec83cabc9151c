//! Core types and services for the Rolo contact store.
//!
//! This crate is deliberately free of HTTP and database dependencies. It owns
//! the contact data model, the [`RecordStore`](store::RecordStore) abstraction
//! that storage backends implement, and the [`ContactService`] that layers
//! validation, ownership checks, and timestamping on top of a store.

pub mod access;
pub mod clock;
pub mod contact;
pub mod error;
pub mod id;
pub mod memory;
pub mod service;
pub mod store;

pub use error::{Error, Result};
pub use service::ContactService;
