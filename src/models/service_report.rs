// src/models/service_report.rs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::validate_non_blank;

// --- ENUMS ---

// Rótulos gravados no campo "status" do documento
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportStatus {
    #[default]
    #[serde(rename = "RASCUNHO")]
    Draft,
    #[serde(rename = "EM ANDAMENTO")]
    InProgress,
    #[serde(rename = "CONCLUIDO")]
    Completed,
    #[serde(rename = "CANCELADO")]
    Cancelled,
}

impl ReportStatus {
    pub fn as_label(&self) -> &'static str {
        match self {
            ReportStatus::Draft => "RASCUNHO",
            ReportStatus::InProgress => "EM ANDAMENTO",
            ReportStatus::Completed => "CONCLUIDO",
            ReportStatus::Cancelled => "CANCELADO",
        }
    }

    /// Aceita os rótulos do painel e os do app mobile (DRAFT, FINALIZED...).
    /// Rótulo desconhecido vira rascunho.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_uppercase().as_str() {
            "EM ANDAMENTO" | "IN_PROGRESS" | "PRE_SIGNATURE" | "SIGNATURE_PENDING" => {
                ReportStatus::InProgress
            }
            "CONCLUIDO" | "CONCLUÍDO" | "FINALIZED" => ReportStatus::Completed,
            "CANCELADO" | "CANCELLED" => ReportStatus::Cancelled,
            _ => ReportStatus::Draft,
        }
    }
}

// --- RELATÓRIO (registro canônico) ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceReport {
    pub id: String,
    pub customer_id: String,
    pub machine_id: Option<String>,
    pub title: String,
    pub description: String,
    pub contact: String,
    pub status: ReportStatus,

    // Sempre vêm da sessão no momento de salvar
    pub technician_id: String,
    pub technician_name: String,

    pub service_date: Option<DateTime<Utc>>,
    pub next_preventive_date: Option<NaiveDate>,
    pub hours_until_next_preventive: Option<u32>,
    pub hourly_rate: Option<Decimal>,
    // Ida e volta, já com a margem
    pub travel_km: Option<u32>,
    pub start_time: String,
    pub end_time: String,
    pub notes: String,

    pub created_at: Option<DateTime<Utc>>,
}

// --- FORMULÁRIO ---

// Técnico não entra aqui: quem salva é quem assina.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceReportForm {
    #[validate(custom(function = "validate_non_blank"))]
    pub customer_id: String,

    pub contact: String,
    pub machine_id: Option<String>,

    #[validate(custom(function = "validate_non_blank"))]
    pub title: String,

    #[validate(custom(function = "validate_non_blank"))]
    pub description: String,

    pub status: ReportStatus,
    pub service_date: Option<DateTime<Utc>>,
    pub next_preventive_date: Option<NaiveDate>,
    pub hours_until_next_preventive: Option<u32>,

    #[validate(custom(function = "validate_not_negative"))]
    pub hourly_rate: Option<Decimal>,

    pub travel_km: Option<u32>,

    #[validate(custom(function = "validate_time_of_day"))]
    pub start_time: Option<String>,
    #[validate(custom(function = "validate_time_of_day"))]
    pub end_time: Option<String>,

    pub notes: Option<String>,
}

fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

// "HH:MM"; vazio é aceito (campo opcional)
fn validate_time_of_day(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || NaiveTime::parse_from_str(value, "%H:%M").is_ok() {
        return Ok(());
    }
    let mut err = ValidationError::new("invalid_time");
    err.message = Some("use o formato HH:MM".into());
    Err(err)
}

// Troca de cliente no formulário aberto
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectCustomerRequest {
    pub customer_id: String,
    #[serde(default)]
    pub form: ServiceReportForm,
}

// --- LISTAGEM AGRUPADA ---

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    #[serde(flatten)]
    pub report: ServiceReport,
    pub customer_name: String,
    // "Fabricante Modelo", "-" ou "[ID: ...]"
    pub machine_label: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerGroup {
    // None no grupo "[Sem Cliente]"
    pub customer_id: Option<String>,
    pub customer_name: String,
    pub reports: Vec<ReportRow>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportsView {
    pub groups: Vec<CustomerGroup>,
    pub unassigned: Option<CustomerGroup>,
    pub report_count: usize,
    pub customer_count: usize,
    pub machine_count: usize,
}
