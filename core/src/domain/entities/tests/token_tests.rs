use chrono::{Duration, TimeZone, Utc};

use crate::domain::entities::token::{Claims, IssuedToken, TokenKind};
use crate::errors::TokenError;

fn fixed_now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

#[test]
fn test_claims_expiry_is_absolute() {
    let now = fixed_now();
    let claims = Claims::new("u1", TokenKind::Access, now, Duration::minutes(15), "iss", "aud").unwrap();

    assert_eq!(claims.iat, now.timestamp());
    assert_eq!(claims.exp, now.timestamp() + 900);
    assert_eq!(claims.expires_at(), now + Duration::minutes(15));
}

#[test]
fn test_claims_expired_at_boundary() {
    let now = fixed_now();
    let claims = Claims::new("u1", TokenKind::Refresh, now, Duration::seconds(60), "iss", "aud").unwrap();

    assert!(!claims.is_expired_at(now + Duration::seconds(59)));
    assert!(claims.is_expired_at(now + Duration::seconds(60)));
}

#[test]
fn test_claims_reject_expiry_past_calendar_range() {
    let result = Claims::new(
        "u1",
        TokenKind::Refresh,
        fixed_now(),
        Duration::seconds(1_000_000_000_000_000),
        "iss",
        "aud",
    );
    assert_eq!(result.unwrap_err(), TokenError::GenerationFailed);
}

#[test]
fn test_claims_get_distinct_session_ids() {
    let now = fixed_now();
    let a = Claims::new("u1", TokenKind::Access, now, Duration::minutes(1), "iss", "aud").unwrap();
    let b = Claims::new("u1", TokenKind::Access, now, Duration::minutes(1), "iss", "aud").unwrap();
    assert_ne!(a.sid, b.sid);
}

#[test]
fn test_kind_serializes_lowercase() {
    assert_eq!(serde_json::to_value(TokenKind::Access).unwrap(), "access");
    assert_eq!(serde_json::to_value(TokenKind::Refresh).unwrap(), "refresh");
}

#[test]
fn test_issued_token_remaining_lifetime() {
    let now = fixed_now();
    let token = IssuedToken {
        token: "t".to_string(),
        session_id: uuid::Uuid::new_v4(),
        expires_at: now + Duration::seconds(30),
    };

    assert_eq!(token.remaining_at(now), Some(std::time::Duration::from_secs(30)));
    assert_eq!(token.remaining_at(now + Duration::seconds(30)), None);
    assert_eq!(token.remaining_at(now + Duration::minutes(5)), None);
}
