use super::*;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};

const SECRET: &str = "segredo-de-teste";

fn token(sub: &str, secret: &str, exp_offset: Duration) -> String {
    let claims = Claims {
        sub: sub.into(),
        name: Some("Ana Souza".into()),
        email: Some("ana@empresa.com".into()),
        exp: (Utc::now() + exp_offset).timestamp() as usize,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
}

#[test]
fn valid_token_becomes_session() {
    let service = SessionService::new(SECRET);
    let session = service.validate_token(&token("u1", SECRET, Duration::hours(1))).unwrap();
    assert_eq!(session.user_id, "u1");
    assert_eq!(session.technician_name(), "Ana Souza");
}

#[test]
fn wrong_secret_is_rejected() {
    let service = SessionService::new(SECRET);
    let result = service.validate_token(&token("u1", "outro", Duration::hours(1)));
    assert!(matches!(result, Err(AppError::InvalidToken)));
}

#[test]
fn expired_token_is_rejected() {
    let service = SessionService::new(SECRET);
    let result = service.validate_token(&token("u1", SECRET, Duration::hours(-2)));
    assert!(matches!(result, Err(AppError::InvalidToken)));
}

#[test]
fn empty_subject_is_rejected() {
    let service = SessionService::new(SECRET);
    let result = service.validate_token(&token("", SECRET, Duration::hours(1)));
    assert!(matches!(result, Err(AppError::InvalidToken)));
}
