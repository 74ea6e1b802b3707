//! Test configuration constants.
//!
//! Placeholder values used across all tests. None of these are real credentials.

/// Shared HS256 secret used to sign and verify identity tokens in tests.
pub static TEST_JWT_SECRET: &str = "lotus-test-identity-secret";

/// Identity provider user id used by default in tests.
pub static TEST_EXTERNAL_ID: &str = "user_2abcTestExternalId";

/// Email of the default test user.
pub static TEST_EMAIL: &str = "staff@golotus.test";
