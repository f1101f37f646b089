//! Token codec tests
//!
//! Issuance and validation round trips, expiry handling, and tamper
//! detection against the JWT service.

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use paper_store::auth::jwt::{Claims, TokenError};
use paper_store::models::user::Role;

mod common;
use common::{create_jwt_service, TEST_SECRET};

#[test]
fn test_round_trip_preserves_subject_and_role() {
    let service = create_jwt_service();

    let token = service.issue("alice", Role::User).expect("Issuing should succeed");
    let claims = service.decode(&token).expect("Decoding should succeed");

    assert_eq!(claims.sub, "alice");
    assert_eq!(claims.role, Role::User);
}

#[test]
fn test_custom_ttl_round_trip() {
    let service = create_jwt_service();

    let token = service
        .issue_with_ttl("bob", Role::Admin, Duration::hours(2))
        .expect("Issuing should succeed");
    let claims = service.decode(&token).expect("Decoding should succeed");

    assert_eq!(claims.sub, "bob");
    assert_eq!(claims.role, Role::Admin);

    let expected_exp = (Utc::now() + Duration::hours(2)).timestamp();
    assert!((claims.exp - expected_exp).abs() <= 5);
}

#[test]
fn test_expired_token_reports_expired_not_invalid() {
    let service = create_jwt_service();

    let claims = Claims {
        sub: "alice".to_string(),
        role: Role::User,
        exp: Utc::now().timestamp() - 60,
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap();

    assert_eq!(service.decode(&token), Err(TokenError::Expired));
}

#[test]
fn test_tampered_signature_reports_invalid() {
    let service = create_jwt_service();
    let token = service.issue("alice", Role::User).unwrap();

    let mut parts: Vec<&str> = token.split('.').collect();
    assert_eq!(parts.len(), 3);

    // Corrupt the signature segment
    let corrupted = if parts[2].ends_with('x') {
        format!("{}y", &parts[2][..parts[2].len() - 1])
    } else {
        format!("{}x", &parts[2][..parts[2].len() - 1])
    };
    parts[2] = &corrupted;
    let tampered = parts.join(".");

    assert_eq!(service.decode(&tampered), Err(TokenError::Invalid));
}

#[test]
fn test_tampered_payload_reports_invalid() {
    let service = create_jwt_service();
    let token = service.issue("alice", Role::User).unwrap();

    // Swap the payload for one from a differently-signed token
    let other = encode(
        &Header::new(Algorithm::HS256),
        &Claims {
            sub: "alice".to_string(),
            role: Role::Superadmin,
            exp: Utc::now().timestamp() + 300,
        },
        &EncodingKey::from_secret("a-completely-different-secret-32char!!".as_bytes()),
    )
    .unwrap();

    let sig = token.split('.').nth(2).unwrap();
    let other_parts: Vec<&str> = other.split('.').collect();
    let spliced = format!("{}.{}.{}", other_parts[0], other_parts[1], sig);

    assert_eq!(service.decode(&spliced), Err(TokenError::Invalid));
}

#[test]
fn test_garbage_reports_invalid() {
    let service = create_jwt_service();

    assert_eq!(service.decode("garbage"), Err(TokenError::Invalid));
    assert_eq!(service.decode("a.b.c"), Err(TokenError::Invalid));
}
