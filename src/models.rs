pub mod auth;
pub mod catalog;
pub mod customer;
pub mod dashboard;
pub mod machine;
pub mod service_report;

use serde::{Deserialize, Deserializer};
use validator::ValidationError;

// Campo obrigatório: vazio ou só espaços não passa
pub(crate) fn validate_non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some("required".into());
        return Err(err);
    }
    Ok(())
}

// Texto opcional do formulário: "" vira None
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

// Campo opcional que o formulário manda como "": chega como None
pub(crate) fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(non_empty(value))
}
