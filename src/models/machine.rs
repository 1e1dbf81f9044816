// src/models/machine.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validate_non_blank;

// --- MÁQUINA (registro canônico) ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Machine {
    pub id: String,
    // Pode vir vazio: máquina "órfã", só sinalizada na listagem
    pub customer_id: String,
    pub manufacturer: String,
    pub model: String,
    pub serial_number: String,
    pub identification: Option<String>,
    pub configuration_code: Option<String>,
    pub manufacturing_year: Option<i32>,
    pub active: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl Machine {
    /// "Fabricante Modelo", como aparece nos relatórios.
    pub fn label(&self) -> String {
        format!("{} {}", self.manufacturer, self.model).trim().to_string()
    }
}

// --- FORMULÁRIO ---

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MachineForm {
    #[serde(default)]
    pub customer_id: String,

    #[validate(custom(function = "validate_non_blank"))]
    pub manufacturer: String,

    #[validate(custom(function = "validate_non_blank"))]
    pub model: String,

    #[validate(custom(function = "validate_non_blank"))]
    pub serial_number: String,

    pub identification: Option<String>,
    pub configuration_code: Option<String>,

    #[validate(range(min = 1900, max = 2100, message = "invalid_year"))]
    pub manufacturing_year: Option<i32>,

    #[serde(default = "default_active")]
    pub active: bool,
}

// --- LISTAGEM ---

// Linha da tabela: a máquina + o nome do cliente já resolvido
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineRow {
    #[serde(flatten)]
    pub machine: Machine,
    pub customer_label: String,
    // Destaque visual: sem cliente ou cliente inexistente
    pub orphan: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineListView {
    pub machines: Vec<MachineRow>,
    pub total: usize,
    // Contador do banner de aviso
    pub orphan_count: usize,
}
