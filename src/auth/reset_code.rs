//! Numeric password reset codes delivered by email.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use subtle::ConstantTimeEq;

use crate::models::PasswordResetCode;

pub const CODE_TTL_MINUTES: i64 = 15;
/// Wrong guesses allowed against one code before it is burned.
pub const MAX_ATTEMPTS: i32 = 5;

const CODE_MIN: u32 = 100_000;
const CODE_MAX: u32 = 999_999;

/// A fresh six digit code.
pub fn generate() -> String {
    rand::rng().random_range(CODE_MIN..=CODE_MAX).to_string()
}

pub fn expiry_from(now: DateTime<Utc>) -> DateTime<Utc> {
    now + Duration::minutes(CODE_TTL_MINUTES)
}

fn codes_match(supplied: &str, stored: &str) -> bool {
    supplied.as_bytes().ct_eq(stored.as_bytes()).into()
}

/// Outcome of checking a supplied code against the stored record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CodeCheck {
    Valid,
    /// Nothing usable on file: no record, expired, or already burned.
    Unusable,
    /// Record is live but the code is wrong.
    Mismatch,
}

/// Check a guess against a record whose `attempts` already includes this guess.
pub fn check(record: Option<&PasswordResetCode>, supplied: &str, now: DateTime<Utc>) -> CodeCheck {
    let Some(record) = record else {
        return CodeCheck::Unusable;
    };

    if record.expires_at < now || record.attempts > MAX_ATTEMPTS {
        return CodeCheck::Unusable;
    }

    if codes_match(supplied, &record.code) {
        CodeCheck::Valid
    } else {
        CodeCheck::Mismatch
    }
}
