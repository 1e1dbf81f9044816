// src/services/auth.rs

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use crate::{
    common::error::AppError,
    models::auth::{Claims, SessionContext},
};

// Só valida tokens; quem emite é o provedor de login.
#[derive(Clone)]
pub struct SessionService {
    decoding_key: DecodingKey,
}

impl SessionService {
    pub fn new(jwt_secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<SessionContext, AppError> {
        let validation = Validation::new(Algorithm::HS256);
        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!("token recusado: {}", e);
            AppError::InvalidToken
        })?;

        if token_data.claims.sub.trim().is_empty() {
            return Err(AppError::InvalidToken);
        }
        Ok(token_data.claims.into())
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
