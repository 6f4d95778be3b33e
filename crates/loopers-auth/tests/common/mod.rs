//! Deterministic doubles shared by the integration suites.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

use async_trait::async_trait;
use loopers_auth::prelude::*;

/// Reversible encoder: `enc:<raw>`.
#[derive(Default)]
pub struct FakeEncoder {
    pub encode_calls: AtomicUsize,
}

impl CredentialEncoder for FakeEncoder {
    fn encode(&self, raw: &RawSecret) -> AuthResult<EncodedCredential> {
        self.encode_calls.fetch_add(1, Ordering::Relaxed);
        Ok(EncodedCredential::from_encoded(format!("enc:{}", raw.expose())))
    }

    fn matches(&self, raw: &RawSecret, encoded: &EncodedCredential) -> AuthResult<bool> {
        match encoded.as_str().strip_prefix("enc:") {
            Some(stored) => Ok(stored == raw.expose()),
            None => Err(AuthError::credential_format("unrecognised encoding")),
        }
    }
}

/// Map-backed store that counts lookups.
#[derive(Default)]
pub struct FakeStorage {
    records: Mutex<HashMap<String, IdentityRecord>>,
    next_id: AtomicI64,
    pub lookups: AtomicUsize,
}

impl FakeStorage {
    /// Inserts a record verbatim, bypassing the policy. Used to plant corrupt data.
    pub fn plant(&self, record: IdentityRecord) {
        self.records
            .lock()
            .unwrap()
            .insert(record.login_id().as_str().to_owned(), record);
    }
}

#[async_trait]
impl IdentityStorage for FakeStorage {
    async fn save(&self, record: IdentityRecord) -> AuthResult<IdentityRecord> {
        let record = match record.id() {
            Some(_) => record,
            None => record.with_id(self.next_id.fetch_add(1, Ordering::Relaxed) + 1),
        };
        self.records
            .lock()
            .unwrap()
            .insert(record.login_id().as_str().to_owned(), record.clone());
        Ok(record)
    }

    async fn find_by_login_id(&self, login_id: &LoginId) -> AuthResult<Option<IdentityRecord>> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        Ok(self.records.lock().unwrap().get(login_id.as_str()).cloned())
    }
}

pub fn signup_command() -> SignupCommand {
    SignupCommand {
        login_id: "testuser1".to_string(),
        password: RawSecret::new("Test1234!@#"),
        name: "Hong".to_string(),
        birth_date: "19900115".to_string(),
        email: "test@example.com".to_string(),
    }
}
