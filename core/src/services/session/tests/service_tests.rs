//! Unit tests for sign-up, sign-in, logout and access-token verification

use chrono::Duration;

use crate::errors::DomainError;
use crate::repositories::{TokenRepository, UserRepository};

use super::fixtures::{harness, harness_with_secret};

#[tokio::test]
async fn test_sign_up_sign_in_verify_refresh_flow() {
    let h = harness();

    let user_id = h.service.sign_up("alice", "a@x.com", "secure123").await.unwrap();
    let pair = h.service.sign_in("a@x.com", "secure123").await.unwrap();

    assert_eq!(h.service.verify_access_token(&pair.access_token).unwrap(), user_id);
    assert_eq!(pair.access_expires_in, 15 * 60);
    assert_eq!(pair.refresh_expires_in, 30 * 24 * 60 * 60);

    let rotated = h.service.refresh(&pair.refresh_token).await.unwrap();
    assert_ne!(rotated.refresh_token, pair.refresh_token);
    assert_eq!(h.service.verify_access_token(&rotated.access_token).unwrap(), user_id);

    assert!(matches!(
        h.service.refresh(&pair.refresh_token).await,
        Err(DomainError::Authentication)
    ));
}

#[tokio::test]
async fn test_sign_up_stores_salted_hash() {
    let h = harness();

    let user_id = h.service.sign_up("alice", "a@x.com", "secure123").await.unwrap();

    let user = h.users.find_by_id(user_id).await.unwrap().unwrap();
    assert_eq!(user.username, "alice");
    assert_ne!(user.password_hash, "secure123");
    assert!(user.password_hash.starts_with("$2b$04$"));
}

#[tokio::test]
async fn test_sign_up_rejects_empty_fields_before_storage() {
    let h = harness();

    for (username, email, password) in [
        ("", "a@x.com", "secure123"),
        ("alice", "", "secure123"),
        ("alice", "a@x.com", ""),
    ] {
        let result = h.service.sign_up(username, email, password).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    assert_eq!(h.users.len().await, 0);
}

#[tokio::test]
async fn test_duplicate_sign_up_is_storage_failure() {
    let h = harness();
    h.service.sign_up("alice", "a@x.com", "secure123").await.unwrap();

    let same_email = h.service.sign_up("alice2", "a@x.com", "other-pass").await;
    assert!(matches!(same_email, Err(DomainError::Storage { .. })));

    let same_username = h.service.sign_up("alice", "b@x.com", "other-pass").await;
    assert!(matches!(same_username, Err(DomainError::Storage { .. })));

    assert_eq!(h.users.len().await, 1);
}

#[tokio::test]
async fn test_sign_in_failures_are_indistinguishable() {
    let h = harness();
    h.service.sign_up("alice", "a@x.com", "secure123").await.unwrap();

    let wrong_password = h.service.sign_in("a@x.com", "secure124").await;
    let unknown_email = h.service.sign_in("b@x.com", "secure123").await;
    let empty_password = h.service.sign_in("a@x.com", "").await;

    for result in [wrong_password, unknown_email, empty_password] {
        let err = result.unwrap_err();
        assert!(matches!(err, DomainError::Authentication));
        assert_eq!(err.to_string(), "Authentication failed");
    }

    assert_eq!(h.tokens.len().await, 0);
}

#[tokio::test]
async fn test_unknown_email_still_runs_bcrypt() {
    let h = harness();
    assert!(h.service.password_hasher().dummy_hash().is_none());

    let result = h.service.sign_in("nobody@x.com", "secure123").await;
    assert!(matches!(result, Err(DomainError::Authentication)));

    let dummy = h.service.password_hasher().dummy_hash().unwrap();
    assert!(dummy.starts_with("$2b$04$"));
    assert_eq!(h.tokens.len().await, 0);
}

#[tokio::test]
async fn test_each_sign_in_opens_independent_session() {
    let h = harness();
    h.service.sign_up("alice", "a@x.com", "secure123").await.unwrap();

    let first = h.service.sign_in("a@x.com", "secure123").await.unwrap();
    let second = h.service.sign_in("a@x.com", "secure123").await.unwrap();
    assert_ne!(first.refresh_token, second.refresh_token);
    assert_eq!(h.tokens.len().await, 2);

    h.service.logout(&first.refresh_token).await.unwrap();
    assert!(h.service.refresh(&second.refresh_token).await.is_ok());
}

#[tokio::test]
async fn test_logout_invalidates_refresh_token() {
    let h = harness();
    let (_, pair) = h.alice_session().await;

    h.service.logout(&pair.refresh_token).await.unwrap();

    assert!(matches!(
        h.service.refresh(&pair.refresh_token).await,
        Err(DomainError::Authentication)
    ));
    assert!(h.tokens.get(&pair.refresh_token).await.unwrap().is_none());
}

#[tokio::test]
async fn test_logout_is_not_idempotent() {
    let h = harness();
    let (_, pair) = h.alice_session().await;

    h.service.logout(&pair.refresh_token).await.unwrap();

    let second = h.service.logout(&pair.refresh_token).await;
    assert!(matches!(second, Err(DomainError::NotFound { .. })));

    let unknown = h.service.logout("never-issued").await;
    assert!(matches!(unknown, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_access_token_expires_with_clock() {
    let h = harness();
    let (user_id, pair) = h.alice_session().await;

    h.clock.advance(Duration::minutes(15) - Duration::seconds(1));
    assert_eq!(h.service.verify_access_token(&pair.access_token).unwrap(), user_id);

    h.clock.advance(Duration::seconds(1));
    assert!(matches!(
        h.service.verify_access_token(&pair.access_token),
        Err(DomainError::Authentication)
    ));
}

#[tokio::test]
async fn test_access_token_rejections_are_opaque() {
    let h = harness();
    let (_, pair) = h.alice_session().await;

    let mut tampered = pair.access_token.clone();
    let last = tampered.pop().unwrap();
    tampered.push(if last == 'A' { 'B' } else { 'A' });

    for token in [tampered.as_str(), "", "garbage", pair.refresh_token.as_str()] {
        let err = h.service.verify_access_token(token).unwrap_err();
        assert!(matches!(err, DomainError::Authentication));
    }
}

#[tokio::test]
async fn test_access_token_from_other_secret_rejected() {
    let h = harness();
    let (_, pair) = h.alice_session().await;

    let other = harness_with_secret("different-secret");
    assert!(matches!(
        other.service.verify_access_token(&pair.access_token),
        Err(DomainError::Authentication)
    ));
}

#[tokio::test]
async fn test_purge_removes_only_expired_records() {
    let h = harness();
    let (_, old) = h.alice_session().await;

    h.clock.advance(Duration::days(20));
    let fresh = h.service.sign_in("a@x.com", "secure123").await.unwrap();

    assert_eq!(h.service.purge_expired_refresh_tokens().await.unwrap(), 0);

    h.clock.advance(Duration::days(10));
    assert_eq!(h.service.purge_expired_refresh_tokens().await.unwrap(), 1);

    assert!(!h.tokens.contains(&old.refresh_token).await);
    assert!(h.tokens.contains(&fresh.refresh_token).await);
}
