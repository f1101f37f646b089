//! Password hashing tests

use paper_store::auth::PasswordHasher;

mod common;

#[test]
fn test_password_hash_and_verify() {
    let hasher = PasswordHasher::new();
    let password = "TestPassword123!";

    let hash = hasher.hash(password).expect("Hashing should succeed");

    assert!(hash.contains("$argon2"));
    assert!(hasher.verify(password, &hash));
}

#[test]
fn test_password_verify_with_wrong_password() {
    let hasher = PasswordHasher::new();

    let hash = hasher.hash("TestPassword123!").expect("Hashing should succeed");
    assert!(!hasher.verify("WrongPassword123!", &hash));
}

#[test]
fn test_password_verify_with_malformed_hash() {
    let hasher = PasswordHasher::new();

    // Malformed input is a failed verification, not a panic or error
    assert!(!hasher.verify("TestPassword123!", "$argon2id$garbage"));
    assert!(!hasher.verify("TestPassword123!", "plainly not a hash"));
    assert!(!hasher.verify("TestPassword123!", ""));
}

#[test]
fn test_password_hash_different_each_time() {
    let hasher = PasswordHasher::new();
    let password = "TestPassword123!";

    let hash1 = hasher.hash(password).expect("First hash should succeed");
    let hash2 = hasher.hash(password).expect("Second hash should succeed");

    assert_ne!(hash1, hash2, "Hashes should differ due to random salt");
    assert!(hasher.verify(password, &hash1));
    assert!(hasher.verify(password, &hash2));
}

#[test]
fn test_password_policy() {
    let config = common::create_test_config();

    assert!(PasswordHasher::validate_password_policy("longenough", &config).is_ok());
    assert!(PasswordHasher::validate_password_policy("short", &config).is_err());
}
