// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::{db::StoreError, middleware::i18n::Locale};

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// As mensagens do `#[error]` vão para o log; o texto mostrado ao usuário
// sai de `user_message`, já no idioma pedido.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Token inválido")]
    InvalidToken,

    #[error("Registro não encontrado: {0}")]
    NotFound(String),

    // Exclusão pedida sem o passo explícito de confirmação
    #[error("Confirmação de exclusão ausente")]
    ConfirmationRequired,

    // Um envio idêntico ainda não terminou (duplo clique)
    #[error("Envio já em andamento para {0}")]
    SubmitInFlight(String),

    // (a) Falha de leitura no store remoto
    #[error("Erro ao carregar dados: {0}")]
    LoadFailed(StoreError),

    // (b) Falhas de escrita (criar/atualizar/excluir)
    #[error("Erro ao salvar: {0}")]
    SaveFailed(StoreError),

    #[error("Erro ao excluir: {0}")]
    DeleteFailed(StoreError),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

// O corpo de erro que realmente sai para o cliente.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConfirmationRequired => StatusCode::PRECONDITION_REQUIRED,
            AppError::SubmitInFlight(_) => StatusCode::CONFLICT,
            AppError::LoadFailed(_) | AppError::SaveFailed(_) | AppError::DeleteFailed(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Texto para o usuário. Falhas de escrita incluem a mensagem do store,
    /// para que a pessoa saiba o que tentar de novo.
    pub fn user_message(&self, locale: &Locale) -> String {
        let en = locale.is_english();
        match self {
            AppError::ValidationError(_) if en => "One or more fields are invalid.".into(),
            AppError::ValidationError(_) => "Um ou mais campos são inválidos.".into(),
            AppError::InvalidToken if en => "Missing or invalid authentication token.".into(),
            AppError::InvalidToken => "Token de autenticação inválido ou ausente.".into(),
            AppError::NotFound(what) if en => format!("Record not found: {what}"),
            AppError::NotFound(what) => format!("Registro não encontrado: {what}"),
            AppError::ConfirmationRequired if en => {
                "Deletion must be confirmed (confirm=true).".into()
            }
            AppError::ConfirmationRequired => {
                "A exclusão precisa ser confirmada (confirm=true).".into()
            }
            AppError::SubmitInFlight(_) if en => {
                "This form is already being saved. Please wait.".into()
            }
            AppError::SubmitInFlight(_) => {
                "Este formulário já está sendo salvo. Aguarde.".into()
            }
            AppError::LoadFailed(e) if en => format!("Failed to load data: {e}"),
            AppError::LoadFailed(e) => format!("Erro ao carregar dados: {e}"),
            AppError::SaveFailed(e) if en => format!("Failed to save: {e}"),
            AppError::SaveFailed(e) => format!("Erro ao salvar: {e}"),
            AppError::DeleteFailed(e) if en => format!("Failed to delete: {e}"),
            AppError::DeleteFailed(e) => format!("Erro ao excluir: {e}"),
            AppError::InternalServerError(_) if en => "An unexpected error occurred.".into(),
            AppError::InternalServerError(_) => "Ocorreu um erro inesperado.".into(),
        }
    }

    pub fn to_api_error(&self, locale: &Locale) -> ApiError {
        match self {
            AppError::InternalServerError(e) => {
                tracing::error!("Erro Interno do Servidor: {:?}", e);
            }
            AppError::LoadFailed(_) | AppError::SaveFailed(_) | AppError::DeleteFailed(_) => {
                tracing::error!("{}", self);
            }
            _ => {}
        }

        let details = match self {
            AppError::ValidationError(errors) => Some(validation_details(errors)),
            _ => None,
        };

        ApiError {
            status: self.status(),
            error: self.user_message(locale),
            details,
        }
    }
}

// Campo -> lista de códigos/mensagens do validator
fn validation_details(errors: &validator::ValidationErrors) -> Value {
    let mut details = serde_json::Map::new();
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<Value> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .map(Value::String)
            .collect();
        details.insert(field.to_string(), Value::Array(messages));
    }
    Value::Object(details)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

// Sem extrator de idioma à mão (ex: rejeição de middleware), cai no padrão pt.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error(&Locale::default()).into_response()
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
