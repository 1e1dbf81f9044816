// src/models/catalog.rs

// Consumíveis: tintas e solventes. O código digitado É o ID do documento.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::validate_non_blank;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paint {
    pub code: String,
    pub description: String,
    pub manufacturer: String,
    // Cor de exibição, "#RRGGBB"
    pub color_hex: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Solvent {
    pub code: String,
    pub description: String,
    pub manufacturer: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaintForm {
    #[validate(custom(function = "validate_code"))]
    pub code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub manufacturer: String,
    #[validate(custom(function = "validate_color_hex"))]
    pub color_hex: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SolventForm {
    #[validate(custom(function = "validate_code"))]
    pub code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub manufacturer: String,
}

// O código vira segmento de caminho do documento: não pode ter "/"
fn validate_code(code: &str) -> Result<(), ValidationError> {
    validate_non_blank(code)?;
    if code.contains('/') {
        let mut err = ValidationError::new("invalid_code");
        err.message = Some("o código não pode conter '/'".into());
        return Err(err);
    }
    Ok(())
}

fn validate_color_hex(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }
    let valid = value.len() == 7
        && value.starts_with('#')
        && value.chars().skip(1).all(|c| c.is_ascii_hexdigit());
    if valid {
        return Ok(());
    }
    let mut err = ValidationError::new("invalid_color");
    err.message = Some("use o formato #RRGGBB".into());
    Err(err)
}
