//! DashMap-backed identity store.
//!
//! Records are keyed by login id, so uniqueness is enforced by the map's entry
//! API without a separate lock. Ids come from a monotonically increasing
//! sequence starting at 1.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use loopers_auth::storage::IdentityStorage;
use loopers_auth::{AuthError, AuthResult, IdentityRecord, LoginId};

/// In-memory identity store.
///
/// Thread-safe and cheap to share behind an `Arc`.
#[derive(Debug)]
pub struct InMemoryIdentityStorage {
    records: DashMap<String, IdentityRecord>,
    next_id: AtomicI64,
}

impl InMemoryIdentityStorage {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn insert(&self, record: IdentityRecord) -> AuthResult<IdentityRecord> {
        match self.records.entry(record.login_id().as_str().to_owned()) {
            Entry::Occupied(_) => Err(AuthError::validation("loginId", "login id already exists")),
            Entry::Vacant(slot) => {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                let record = record.with_id(id);
                slot.insert(record.clone());
                tracing::debug!(login_id = %record.login_id(), id, "identity record inserted");
                Ok(record)
            }
        }
    }

    fn replace(&self, id: i64, record: IdentityRecord) -> AuthResult<IdentityRecord> {
        let Some(mut stored) = self.records.get_mut(record.login_id().as_str()) else {
            return Err(AuthError::not_found(format!("identity record {id} not found")));
        };
        if stored.id() != Some(id) {
            return Err(AuthError::validation("loginId", "login id already exists"));
        }
        *stored = record.clone();
        tracing::debug!(login_id = %record.login_id(), id, "identity record replaced");
        Ok(record)
    }
}

impl Default for InMemoryIdentityStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityStorage for InMemoryIdentityStorage {
    async fn save(&self, record: IdentityRecord) -> AuthResult<IdentityRecord> {
        match record.id() {
            None => self.insert(record),
            Some(id) => self.replace(id, record),
        }
    }

    async fn find_by_login_id(&self, login_id: &LoginId) -> AuthResult<Option<IdentityRecord>> {
        Ok(self
            .records
            .get(login_id.as_str())
            .map(|entry| entry.value().clone()))
    }
}
