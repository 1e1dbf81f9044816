// src/models/customer.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::{blank_as_none, validate_non_blank};

// Par latitude/longitude. Ou existe inteiro, ou não existe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn from_pair(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => Some(Self { latitude, longitude }),
            _ => None,
        }
    }

    // Formato "lat,lng" usado nas URLs do Maps
    pub fn to_query(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

// --- CLIENTE (registro canônico) ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    // CPF/CNPJ
    pub tax_document: String,
    pub phone: String,
    pub mobile: String,
    pub email: String,

    // Endereço
    pub street_address: String,
    pub number: String,
    pub complement: String,
    pub city: String,
    pub state: String,
    pub coordinates: Option<Coordinates>,

    pub created_at: Option<DateTime<Utc>>,
}

impl Customer {
    /// Telefone para contato: fixo primeiro, celular depois.
    pub fn contact_phone(&self) -> Option<&str> {
        [self.phone.as_str(), self.mobile.as_str()]
            .into_iter()
            .find(|p| !p.trim().is_empty())
    }
}

// --- FORMULÁRIO ---

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_coordinate_pair"))]
pub struct CustomerForm {
    #[validate(custom(function = "validate_non_blank"))]
    pub name: String,

    #[serde(default)]
    pub tax_document: String,
    #[serde(default)]
    pub phone: String,

    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(email(message = "invalid_email"))]
    pub email: Option<String>,

    // Endereço livre: com ou sem autocomplete, o campo aceita digitação manual
    #[serde(default)]
    pub street_address: String,
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub complement: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,

    #[validate(range(min = -90.0, max = 90.0, message = "invalid_latitude"))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0, message = "invalid_longitude"))]
    pub longitude: Option<f64>,
}

fn validate_coordinate_pair(form: &CustomerForm) -> Result<(), ValidationError> {
    if form.latitude.is_some() != form.longitude.is_some() {
        let mut err = ValidationError::new("coordinates_pair");
        err.message = Some("latitude e longitude devem vir juntas".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
#[path = "customer_test.rs"]
mod tests;
