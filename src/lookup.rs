//! Consultas de endereço e distância.
//!
//! Os dois serviços são opcionais: sem chave do Maps o estado guarda `None` e
//! o formulário de cliente continua aceitando endereço digitado à mão.

pub mod google_maps;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::models::customer::Coordinates;

pub use google_maps::GoogleMapsClient;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("falha de transporte: {0}")]
    Transport(String),

    #[error("serviço respondeu {status}: {body}")]
    Status { status: u16, body: String },

    #[error("resposta inesperada: {0}")]
    Decode(String),

    #[error("nenhum resultado")]
    NoResult,
}

/// Uma sugestão do autocomplete.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressSuggestion {
    pub place_id: String,
    pub description: String,
}

/// Endereço escolhido, já quebrado nos campos do formulário de cliente.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredAddress {
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub coordinates: Option<Coordinates>,
}

#[async_trait]
pub trait AddressLookup: Send + Sync {
    async fn suggest(&self, input: &str) -> Result<Vec<AddressSuggestion>, LookupError>;

    async fn resolve(&self, place_id: &str) -> Result<StructuredAddress, LookupError>;
}

#[async_trait]
pub trait DistanceLookup: Send + Sync {
    /// Distância de carro em metros, só ida.
    async fn driving_distance(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<u64, LookupError>;
}

/// Ida e volta com 20% de margem, arredondado para km inteiros.
pub fn round_trip_km(one_way_meters: u64) -> u32 {
    let km = (one_way_meters as f64 * 2.0 / 1000.0) * 1.2;
    km.round() as u32
}

#[cfg(test)]
#[path = "lookup_test.rs"]
mod tests;
