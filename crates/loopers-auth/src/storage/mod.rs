//! Storage traits for identity records.
//!
//! # Implementations
//!
//! - `loopers-db-memory` - in-process store backed by a concurrent map

pub mod identity;

pub use identity::IdentityStorage;
