// src/models/auth.rs

use serde::{Deserialize, Serialize};

// Estrutura de dados ("claims") dentro do JWT emitido pelo provedor de login
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,          // Subject (ID do usuário)
    pub name: Option<String>, // Nome de exibição
    pub email: Option<String>,
    pub exp: usize,           // Expiration time
}

/// Quem está usando o painel. Passado explicitamente para quem precisa
/// (a atribuição do técnico nos relatórios), nunca buscado de forma global.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionContext {
    pub user_id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

impl SessionContext {
    /// Nome gravado no relatório: nome de exibição, senão o e-mail.
    pub fn technician_name(&self) -> String {
        self.display_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .or(self.email.as_deref())
            .unwrap_or_default()
            .to_string()
    }
}

impl From<Claims> for SessionContext {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            display_name: claims.name,
            email: claims.email,
        }
    }
}
