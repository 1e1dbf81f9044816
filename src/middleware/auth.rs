// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::i18n::Locale,
    models::auth::SessionContext,
};

// Guarda das rotas do painel: sem bearer válido, 401.
pub async fn auth_guard(
    State(app_state): State<AppState>,
    locale: Locale,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(TypedHeader(Authorization(bearer))) = bearer else {
        return AppError::InvalidToken.to_api_error(&locale).into_response();
    };

    match app_state.session_service.validate_token(bearer.token()) {
        Ok(session) => {
            // A sessão segue nos "extensions" da requisição até o handler
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        Err(e) => e.to_api_error(&locale).into_response(),
    }
}

// Extrator para obter a sessão diretamente nos handlers
pub struct Session(pub SessionContext);

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionContext>()
            .cloned()
            .map(Session)
            .ok_or(AppError::InvalidToken)
    }
}
