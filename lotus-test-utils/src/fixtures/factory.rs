//! Factory functions for mock backend records and identity tokens.
//!
//! Records are returned in backend field naming (snake_case aliases such as `primary_phone`)
//! exactly as the backend collection API would send them.

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};

use crate::constant::TEST_JWT_SECRET;

fn sign(claims: Value) -> String {
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .expect("Failed to sign test identity token")
}

/// Create an HS256 identity token for `user_id`, valid for 15 minutes.
///
/// # Arguments
/// - `user_id` - Identity provider user id placed in the `sub` claim
/// - `email` - Optional `email` claim
pub fn identity_token(user_id: &str, email: Option<&str>) -> String {
    let mut claims = json!({
        "sub": user_id,
        "iat": Utc::now().timestamp(),
        "exp": (Utc::now() + Duration::minutes(15)).timestamp(),
        "azp": "http://localhost:8080",
    });
    if let Some(email) = email {
        claims["email"] = json!(email);
    }

    sign(claims)
}

/// Create an identity token that expired an hour ago.
pub fn expired_identity_token(user_id: &str) -> String {
    sign(json!({
        "sub": user_id,
        "iat": (Utc::now() - Duration::hours(2)).timestamp(),
        "exp": (Utc::now() - Duration::hours(1)).timestamp(),
    }))
}

/// Create a backend `Users` record.
pub fn backend_user(id: i64, external_id: &str, email: &str) -> Value {
    json!({
        "id": id,
        "externalId": external_id,
        "email": email,
        "firstName": "Ann",
        "lastName": "Lee",
        "role": "staff",
        "status": "active",
        "primary_phone": "555-0100",
        "date_of_birth": "1990-04-02",
        "image_url": null,
        "createdAt": "2024-01-10T09:00:00.000Z",
        "updatedAt": "2024-01-10T09:00:00.000Z",
    })
}

/// Create a backend `Clients` record.
pub fn backend_client(id: i64) -> Value {
    json!({
        "id": id,
        "firstName": "Sam",
        "lastName": "Rivera",
        "email": "sam@example.com",
        "date_of_birth": "1985-11-23",
        "social_security_number": "000-00-0000",
        "home_phone": "555-0142",
        "zip_code": "97201",
        "status": "active",
        "createdAt": "2024-02-01T12:00:00.000Z",
        "updatedAt": "2024-02-01T12:00:00.000Z",
    })
}

/// Create a backend `EmergencyContacts` record belonging to `client_id`.
pub fn backend_emergency_contact(id: i64, client_id: i64) -> Value {
    json!({
        "id": id,
        "clientId": client_id,
        "name": "Jo Rivera",
        "relationship": "Sibling",
        "primary_phone": "555-0199",
        "work_phone": null,
    })
}
