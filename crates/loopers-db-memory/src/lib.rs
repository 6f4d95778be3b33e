//! # loopers-db-memory
//!
//! In-process [`IdentityStorage`] backed by a concurrent map. Records live for
//! the lifetime of the process.
//!
//! # Example
//!
//! ```ignore
//! use loopers_db_memory::create_identity_storage;
//!
//! let storage = create_identity_storage();
//! let saved = storage.save(record).await?;
//! assert_eq!(saved.id(), Some(1));
//! ```

mod storage;

pub use loopers_auth::storage::IdentityStorage;
pub use storage::InMemoryIdentityStorage;

/// Type alias for a shareable IdentityStorage instance.
pub type DynIdentityStorage = std::sync::Arc<dyn IdentityStorage>;

/// Creates a new in-memory IdentityStorage instance.
pub fn create_identity_storage() -> DynIdentityStorage {
    std::sync::Arc::new(InMemoryIdentityStorage::new())
}
