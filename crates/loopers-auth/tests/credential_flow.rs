mod common;

use std::sync::Arc;
use std::sync::atomic::Ordering;

use loopers_auth::prelude::*;

use common::{FakeEncoder, FakeStorage, signup_command};

struct Fixture {
    storage: Arc<FakeStorage>,
    encoder: Arc<FakeEncoder>,
    identities: IdentityService,
    authenticator: AuthenticationService,
}

fn fixture() -> Fixture {
    let storage = Arc::new(FakeStorage::default());
    let encoder = Arc::new(FakeEncoder::default());
    Fixture {
        identities: IdentityService::new(storage.clone(), encoder.clone()),
        authenticator: AuthenticationService::new(storage.clone(), encoder.clone()),
        storage,
        encoder,
    }
}

fn login_id() -> LoginId {
    LoginId::new("testuser1").unwrap()
}

#[tokio::test]
async fn signup_authenticate_and_change_credential() {
    let fx = fixture();

    let profile = fx.identities.signup(signup_command()).await.unwrap();
    assert_eq!(profile.id, 1);
    assert_eq!(profile.login_id, "testuser1");
    assert_eq!(profile.name, "Hon*");
    assert_eq!(profile.birth_date, "19900115");
    assert_eq!(profile.email, "test@example.com");

    let identity = fx
        .authenticator
        .authenticate("testuser1", &RawSecret::new("Test1234!@#"))
        .await
        .unwrap();
    assert_eq!(identity.id, 1);
    assert_eq!(identity.login_id.as_str(), "testuser1");
    assert_eq!(identity.name.as_str(), "Hong");

    let err = fx
        .authenticator
        .authenticate("testuser1", &RawSecret::new("Wrong1234!@#"))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Unauthenticated));

    fx.identities
        .change_credential(
            &login_id(),
            RawSecret::new("Test1234!@#"),
            RawSecret::new("NewPass123!@"),
        )
        .await
        .unwrap();

    let err = fx
        .authenticator
        .authenticate("testuser1", &RawSecret::new("Test1234!@#"))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Unauthenticated));

    fx.authenticator
        .authenticate("testuser1", &RawSecret::new("NewPass123!@"))
        .await
        .unwrap();
}

#[tokio::test]
async fn unknown_id_and_wrong_password_are_indistinguishable() {
    let fx = fixture();
    fx.identities.signup(signup_command()).await.unwrap();

    let unknown = fx
        .authenticator
        .authenticate("nobody99", &RawSecret::new("Test1234!@#"))
        .await
        .unwrap_err();
    let wrong = fx
        .authenticator
        .authenticate("testuser1", &RawSecret::new("Wrong1234!@#"))
        .await
        .unwrap_err();
    let malformed = fx
        .authenticator
        .authenticate("no", &RawSecret::new("Test1234!@#"))
        .await
        .unwrap_err();

    assert_eq!(unknown.to_string(), wrong.to_string());
    assert_eq!(malformed.to_string(), wrong.to_string());

    let unknown = loopers_api::ApiError::from(unknown).to_envelope();
    let wrong = loopers_api::ApiError::from(wrong).to_envelope();
    assert_eq!(unknown, wrong);
}

#[tokio::test]
async fn malformed_login_id_never_reaches_storage() {
    let fx = fixture();
    let _ = fx
        .authenticator
        .authenticate("bad id!", &RawSecret::new("Test1234!@#"))
        .await;
    assert_eq!(fx.storage.lookups.load(Ordering::Relaxed), 0);
}

#[tokio::test]
async fn duplicate_signup_rejected_before_encoding() {
    let fx = fixture();
    fx.identities.signup(signup_command()).await.unwrap();
    let encodes = fx.encoder.encode_calls.load(Ordering::Relaxed);

    let err = fx.identities.signup(signup_command()).await.unwrap_err();
    assert!(matches!(err, AuthError::Validation { field: "loginId", .. }));
    assert_eq!(fx.encoder.encode_calls.load(Ordering::Relaxed), encodes);
}

#[tokio::test]
async fn signup_validation_names_the_field() {
    let fx = fixture();

    let mut command = signup_command();
    command.birth_date = "1990-01-15".to_string();
    let err = fx.identities.signup(command).await.unwrap_err();
    assert!(matches!(err, AuthError::Validation { field: "birthDate", .. }));

    let mut command = signup_command();
    command.password = RawSecret::new("Test19900115!");
    let err = fx.identities.signup(command).await.unwrap_err();
    assert!(matches!(err, AuthError::Validation { field: "password", .. }));

    let mut command = signup_command();
    command.email = "not-an-email".to_string();
    let err = fx.identities.signup(command).await.unwrap_err();
    assert!(matches!(err, AuthError::Validation { field: "email", .. }));

    assert_eq!(fx.encoder.encode_calls.load(Ordering::Relaxed), 0);
}

#[tokio::test]
async fn change_credential_rules() {
    let fx = fixture();
    fx.identities.signup(signup_command()).await.unwrap();

    let err = fx
        .identities
        .change_credential(
            &login_id(),
            RawSecret::new("Test1234!@#"),
            RawSecret::new("Test1234!@#"),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Validation { .. }));

    let err = fx
        .identities
        .change_credential(
            &login_id(),
            RawSecret::new("Wrong1234!@#"),
            RawSecret::new("NewPass123!@"),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Authorization { .. }));

    let err = fx
        .identities
        .change_credential(
            &login_id(),
            RawSecret::new("Test1234!@#"),
            RawSecret::new("Pw!19900115a"),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Validation { field: "password", .. }));

    let err = fx
        .identities
        .change_credential(
            &LoginId::new("ghost01").unwrap(),
            RawSecret::new("Test1234!@#"),
            RawSecret::new("NewPass123!@"),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::NotFound { .. }));

    // Every rejected change left the original credential in place.
    fx.authenticator
        .authenticate("testuser1", &RawSecret::new("Test1234!@#"))
        .await
        .unwrap();
}

#[tokio::test]
async fn profile_masks_name_and_hides_credential() {
    let fx = fixture();
    fx.identities.signup(signup_command()).await.unwrap();

    let profile = fx.identities.profile(&login_id()).await.unwrap();
    let json = serde_json::to_value(&profile).unwrap();
    assert_eq!(json["loginId"], "testuser1");
    assert_eq!(json["name"], "Hon*");
    assert_eq!(json["birthDate"], "19900115");
    assert!(!json.to_string().contains("enc:"));

    let err = fx
        .identities
        .profile(&LoginId::new("ghost01").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::NotFound { .. }));
}

#[tokio::test]
async fn corrupt_stored_credential_is_a_format_error() {
    let fx = fixture();
    fx.storage.plant(IdentityRecord::restore(
        42,
        login_id(),
        EncodedCredential::from_encoded("$2a$10$legacy-bcrypt"),
        DisplayName::new("Hong").unwrap(),
        BirthDate::parse("19900115").unwrap(),
        Email::new("test@example.com").unwrap(),
    ));

    let err = fx
        .authenticator
        .authenticate("testuser1", &RawSecret::new("Test1234!@#"))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::CredentialFormat { .. }));
}

#[tokio::test]
async fn argon2_round_trip_through_services() {
    let storage = Arc::new(FakeStorage::default());
    let encoder = Arc::new(
        Argon2CredentialEncoder::with_params(&HashingConfig {
            memory_kib: 64,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap(),
    );
    let identities = IdentityService::new(storage.clone(), encoder.clone());
    let authenticator = AuthenticationService::new(storage.clone(), encoder);

    identities.signup(signup_command()).await.unwrap();
    let stored = storage
        .find_by_login_id(&login_id())
        .await
        .unwrap()
        .unwrap();
    assert!(stored.credential().as_str().starts_with("$argon2id$"));

    authenticator
        .authenticate("testuser1", &RawSecret::new("Test1234!@#"))
        .await
        .unwrap();
    assert!(matches!(
        authenticator
            .authenticate("testuser1", &RawSecret::new("Wrong1234!@#"))
            .await,
        Err(AuthError::Unauthenticated)
    ));
}
