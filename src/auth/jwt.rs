use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifetime of an access token.
pub const TOKEN_TTL_MINUTES: i64 = 60;

/// Wire payload: `{"userId": "...", "exp": 1700000000}`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub exp: i64,
}

impl Claims {
    pub fn new(user_id: Uuid) -> Self {
        Self::expiring_at(user_id, Utc::now() + Duration::minutes(TOKEN_TTL_MINUTES))
    }

    pub fn expiring_at(user_id: Uuid, at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            exp: at.timestamp(),
        }
    }
}

fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation
}

pub fn encode_token(claims: &Claims, secret: &str) -> Result<String, String> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| format!("JWT encode failed: {e}"))
}

/// Sign a fresh one-hour token for `user_id`.
pub fn issue(user_id: Uuid, secret: &str) -> Result<String, String> {
    encode_token(&Claims::new(user_id), secret)
}

/// Fails on malformed input, a bad signature, or an elapsed `exp`.
pub fn decode_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation(),
    )
    .map(|data| data.claims)
    .map_err(|e| format!("JWT decode failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn issued_token_verifies_to_user() {
        let user_id = Uuid::now_v7();
        let token = issue(user_id, SECRET).unwrap();
        let claims = decode_token(&token, SECRET).unwrap();
        assert_eq!(claims.user_id, user_id);

        let remaining = claims.exp - Utc::now().timestamp();
        assert!(remaining > 55 * 60 && remaining <= 60 * 60);
    }

    #[test]
    fn payload_uses_user_id_key() {
        let claims = Claims::new(Uuid::nil());
        let value = serde_json::to_value(&claims).unwrap();
        assert!(value.get("userId").is_some());
        assert!(value.get("exp").is_some());
    }

    #[test]
    fn expired_token_rejected() {
        let claims = Claims::expiring_at(Uuid::now_v7(), Utc::now() - Duration::seconds(5));
        let token = encode_token(&claims, SECRET).unwrap();
        assert!(decode_token(&token, SECRET).is_err());
    }

    #[test]
    fn wrong_secret_rejected() {
        let token = issue(Uuid::now_v7(), SECRET).unwrap();
        assert!(decode_token(&token, "another-secret").is_err());
    }

    #[test]
    fn tampered_token_rejected() {
        let token = issue(Uuid::now_v7(), SECRET).unwrap();
        let mut parts: Vec<&str> = token.split('.').collect();
        let forged = encode_token(&Claims::new(Uuid::now_v7()), SECRET).unwrap();
        let forged_payload = forged.split('.').nth(1).unwrap().to_string();
        parts[1] = &forged_payload;
        let tampered = parts.join(".");
        assert!(decode_token(&tampered, SECRET).is_err());
    }

    #[test]
    fn garbage_rejected() {
        assert!(decode_token("not.a.jwt", SECRET).is_err());
        assert!(decode_token("", SECRET).is_err());
    }
}
