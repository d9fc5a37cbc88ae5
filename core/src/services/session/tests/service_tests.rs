//! Tests for token issuance, validation and revocation

use std::sync::Arc;

use crate::domain::entities::token::TOKEN_VALIDITY_MS;
use crate::domain::entities::user::User;
use crate::errors::TokenError;
use crate::repositories::{MockRevocationStore, MockUserRepository, UserRepository};
use crate::services::clock::ManualClock;
use crate::services::session::SessionAuthority;
use crate::services::token::tests::fixtures::codec_with_clock;

const T0: i64 = 1_700_000_000_000;

struct Harness {
    clock: Arc<ManualClock>,
    users: Arc<MockUserRepository>,
    revocations: Arc<MockRevocationStore>,
    authority: SessionAuthority<MockUserRepository, MockRevocationStore>,
}

fn harness() -> Harness {
    let clock = Arc::new(ManualClock::new(T0));
    let users = Arc::new(MockUserRepository::new());
    let revocations = Arc::new(MockRevocationStore::new());
    let codec = Arc::new(codec_with_clock(clock.clone()));
    let authority = SessionAuthority::new(users.clone(), revocations.clone(), codec, clock.clone());
    Harness {
        clock,
        users,
        revocations,
        authority,
    }
}

async fn add_user(users: &MockUserRepository, uid: &str, pwd_update_time: i64) {
    users
        .create(User {
            uid: uid.to_string(),
            password_hash: "hash".to_string(),
            display_name: uid.to_string(),
            phone: None,
            email: None,
            pwd_update_time,
            is_superuser: false,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_issue_then_validate() {
    let h = harness();
    add_user(&h.users, "u1", T0).await;
    h.clock.advance(1);

    let token = h.authority.issue("u1").unwrap();
    let claims = h.authority.validate(&token).await.unwrap();
    assert_eq!(claims.uid, "u1");
    assert_eq!(claims.issued_at, T0 + 1);
}

#[tokio::test]
async fn test_token_issued_at_password_change_is_stale() {
    let h = harness();
    add_user(&h.users, "u1", T0).await;

    // same millisecond as the credential change
    let token = h.authority.issue("u1").unwrap();
    assert_eq!(h.authority.check(&token).await, Err(TokenError::Stale));
    assert!(h.authority.validate(&token).await.is_none());
}

#[tokio::test]
async fn test_expiry_is_inclusive() {
    let h = harness();
    add_user(&h.users, "u1", T0 - 1).await;
    let token = h.authority.issue("u1").unwrap();

    h.clock.set(T0 + TOKEN_VALIDITY_MS - 1);
    assert!(h.authority.validate(&token).await.is_some());

    h.clock.set(T0 + TOKEN_VALIDITY_MS);
    assert_eq!(h.authority.check(&token).await, Err(TokenError::Expired));

    h.clock.set(T0 + TOKEN_VALIDITY_MS + 1);
    assert!(h.authority.validate(&token).await.is_none());
}

#[tokio::test]
async fn test_revoke_invalidates_before_expiry() {
    let h = harness();
    add_user(&h.users, "u1", T0 - 1).await;
    let token = h.authority.issue("u1").unwrap();

    h.clock.advance(1_000);
    h.authority.revoke(&token).await.unwrap();

    assert_eq!(h.authority.check(&token).await, Err(TokenError::Revoked));
    assert!(h.authority.validate(&token).await.is_none());
}

#[tokio::test]
async fn test_revocation_ttl_rounds_up() {
    let h = harness();
    add_user(&h.users, "u1", T0 - 1).await;
    let token = h.authority.issue("u1").unwrap();

    // 1.5 seconds of life left
    h.clock.set(T0 + TOKEN_VALIDITY_MS - 1_500);
    h.authority.revoke(&token).await.unwrap();
    assert_eq!(h.revocations.ttl_of(&token).await, Some(2));
}

#[tokio::test]
async fn test_revocation_ttl_exact_seconds() {
    let h = harness();
    let token = h.authority.issue("u1").unwrap();

    h.authority.revoke(&token).await.unwrap();
    assert_eq!(
        h.revocations.ttl_of(&token).await,
        Some(TOKEN_VALIDITY_MS / 1000)
    );
}

#[tokio::test]
async fn test_revoke_expired_token_is_noop() {
    let h = harness();
    let token = h.authority.issue("u1").unwrap();

    h.clock.set(T0 + TOKEN_VALIDITY_MS);
    h.authority.revoke(&token).await.unwrap();
    assert!(h.revocations.is_empty().await);
}

#[tokio::test]
async fn test_revoke_malformed_token_is_noop() {
    let h = harness();
    h.authority.revoke("not-a-token").await.unwrap();
    h.authority.revoke("").await.unwrap();
    assert!(h.revocations.is_empty().await);
}

#[tokio::test]
async fn test_revoke_surfaces_store_failure() {
    let h = harness();
    let token = h.authority.issue("u1").unwrap();
    h.revocations.set_unavailable(true);

    let err = h.authority.revoke(&token).await.unwrap_err();
    assert!(err.is_store_unavailable());
}

#[tokio::test]
async fn test_unknown_user_never_validates() {
    let h = harness();
    let token = h.authority.issue("ghost").unwrap();
    h.clock.advance(1);

    assert_eq!(h.authority.check(&token).await, Err(TokenError::UnknownUser));
    assert!(!h.authority.validate_for("ghost", &token).await);
}

#[tokio::test]
async fn test_malformed_token_rejected() {
    let h = harness();
    assert_eq!(
        h.authority.check("abc.def.ghi").await,
        Err(TokenError::MalformedToken)
    );
}

#[tokio::test]
async fn test_fails_closed_when_revocation_store_down() {
    let h = harness();
    add_user(&h.users, "u1", T0 - 1).await;
    let token = h.authority.issue("u1").unwrap();
    h.revocations.set_unavailable(true);

    assert_eq!(h.authority.check(&token).await, Err(TokenError::StoreUnavailable));
    assert!(h.authority.validate(&token).await.is_none());
}

#[tokio::test]
async fn test_fails_closed_when_user_store_down() {
    let h = harness();
    add_user(&h.users, "u1", T0 - 1).await;
    let token = h.authority.issue("u1").unwrap();
    h.users.set_unavailable(true);

    assert_eq!(h.authority.check(&token).await, Err(TokenError::StoreUnavailable));
    assert!(!h.authority.validate_for("u1", &token).await);
}

#[tokio::test]
async fn test_validate_for_checks_owner() {
    let h = harness();
    add_user(&h.users, "u1", T0 - 1).await;
    add_user(&h.users, "u2", T0 - 1).await;
    let token = h.authority.issue("u1").unwrap();

    assert!(h.authority.validate_for("u1", &token).await);
    assert!(!h.authority.validate_for("u2", &token).await);
    assert!(!h.authority.validate_for("", &token).await);
    assert!(!h.authority.validate_for("u1", "").await);
}

#[tokio::test]
async fn test_password_change_scenario() {
    let h = harness();
    add_user(&h.users, "u1", T0).await;

    h.clock.set(T0 + 1);
    let token_a = h.authority.issue("u1").unwrap();
    assert!(h.authority.validate(&token_a).await.is_some());

    h.clock.set(T0 + 10);
    h.users.set_password_update_time("u1", T0 + 10).await;

    h.clock.set(T0 + 11);
    assert_eq!(h.authority.check(&token_a).await, Err(TokenError::Stale));

    let token_b = h.authority.issue("u1").unwrap();
    h.clock.set(T0 + 12);
    assert!(h.authority.validate(&token_b).await.is_some());
    assert!(h.authority.validate(&token_a).await.is_none());
}

#[tokio::test]
async fn test_seven_day_window_scenario() {
    let h = harness();
    add_user(&h.users, "u1", T0 - 1).await;
    let token = h.authority.issue("u1").unwrap();

    h.clock.set(T0 + TOKEN_VALIDITY_MS - 1);
    assert!(h.authority.validate(&token).await.is_some());

    h.clock.set(T0 + TOKEN_VALIDITY_MS + 1);
    assert!(h.authority.validate(&token).await.is_none());
}
