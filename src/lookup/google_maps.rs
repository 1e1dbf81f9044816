// src/lookup/google_maps.rs

// Cliente das APIs web do Google Maps: Places (autocomplete + details) e
// Distance Matrix. Uma chave só serve para as três.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{AddressLookup, AddressSuggestion, DistanceLookup, LookupError, StructuredAddress};
use crate::models::customer::Coordinates;

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api";
const LANGUAGE: &str = "pt-BR";

pub struct GoogleMapsClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl GoogleMapsClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    // Sem timeout, como o store: uma consulta travada só trava o próprio campo
    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        Self {
            http: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get_text(&self, path: &str, query: &[(&str, &str)]) -> Result<String, LookupError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;
        if status != 200 {
            return Err(LookupError::Status { status, body });
        }
        Ok(body)
    }
}

#[async_trait]
impl AddressLookup for GoogleMapsClient {
    async fn suggest(&self, input: &str) -> Result<Vec<AddressSuggestion>, LookupError> {
        if input.trim().is_empty() {
            return Ok(Vec::new());
        }
        let body = self
            .get_text(
                "/place/autocomplete/json",
                &[
                    ("input", input),
                    ("types", "geocode"),
                    ("components", "country:br"),
                    ("language", LANGUAGE),
                ],
            )
            .await?;
        parse_autocomplete(&body)
    }

    async fn resolve(&self, place_id: &str) -> Result<StructuredAddress, LookupError> {
        let body = self
            .get_text(
                "/place/details/json",
                &[
                    ("place_id", place_id),
                    ("fields", "formatted_address,address_component,geometry"),
                    ("language", LANGUAGE),
                ],
            )
            .await?;
        parse_place_details(&body)
    }
}

#[async_trait]
impl DistanceLookup for GoogleMapsClient {
    async fn driving_distance(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<u64, LookupError> {
        let origins = origin.to_query();
        let destinations = destination.to_query();
        let body = self
            .get_text(
                "/distancematrix/json",
                &[
                    ("origins", origins.as_str()),
                    ("destinations", destinations.as_str()),
                    ("mode", "driving"),
                ],
            )
            .await?;
        parse_distance_matrix(&body)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Deserialize)]
struct AutocompleteResponse {
    status: String,
    #[serde(default)]
    predictions: Vec<Prediction>,
    error_message: Option<String>,
}

#[derive(Deserialize)]
struct Prediction {
    place_id: String,
    description: String,
}

#[derive(Deserialize)]
struct DetailsResponse {
    status: String,
    result: Option<PlaceResult>,
    error_message: Option<String>,
}

#[derive(Deserialize)]
struct PlaceResult {
    formatted_address: Option<String>,
    #[serde(default)]
    address_components: Vec<AddressComponent>,
    geometry: Option<Geometry>,
}

#[derive(Deserialize)]
struct AddressComponent {
    long_name: String,
    #[serde(default)]
    types: Vec<String>,
}

#[derive(Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Deserialize)]
struct DistanceMatrixResponse {
    status: String,
    #[serde(default)]
    rows: Vec<MatrixRow>,
    error_message: Option<String>,
}

#[derive(Deserialize)]
struct MatrixRow {
    #[serde(default)]
    elements: Vec<MatrixElement>,
}

#[derive(Deserialize)]
struct MatrixElement {
    distance: Option<MatrixDistance>,
}

#[derive(Deserialize)]
struct MatrixDistance {
    value: u64,
}

// =============================================================================
// PARSING
// =============================================================================

// A API responde 200 mesmo em erro; o status real vem no corpo.
fn check_api_status(status: &str, error_message: Option<String>) -> Result<(), LookupError> {
    match status {
        "OK" => Ok(()),
        "ZERO_RESULTS" | "NOT_FOUND" => Err(LookupError::NoResult),
        other => Err(LookupError::Decode(match error_message {
            Some(msg) => format!("{other}: {msg}"),
            None => other.to_string(),
        })),
    }
}

fn parse_autocomplete(body: &str) -> Result<Vec<AddressSuggestion>, LookupError> {
    let response: AutocompleteResponse =
        serde_json::from_str(body).map_err(|e| LookupError::Decode(e.to_string()))?;
    // Nenhuma sugestão não é erro para o autocomplete
    if response.status == "ZERO_RESULTS" {
        return Ok(Vec::new());
    }
    check_api_status(&response.status, response.error_message)?;
    Ok(response
        .predictions
        .into_iter()
        .map(|p| AddressSuggestion {
            place_id: p.place_id,
            description: p.description,
        })
        .collect())
}

fn parse_place_details(body: &str) -> Result<StructuredAddress, LookupError> {
    let response: DetailsResponse =
        serde_json::from_str(body).map_err(|e| LookupError::Decode(e.to_string()))?;
    check_api_status(&response.status, response.error_message)?;
    let place = response.result.ok_or(LookupError::NoResult)?;

    let component = |kind: &str| {
        place
            .address_components
            .iter()
            .find(|c| c.types.iter().any(|t| t == kind))
            .map(|c| c.long_name.clone())
            .unwrap_or_default()
    };
    // Município vem como nível 2; "locality" cobre os casos sem ele
    let mut city = component("administrative_area_level_2");
    if city.is_empty() {
        city = component("locality");
    }
    let state = component("administrative_area_level_1");

    Ok(StructuredAddress {
        street_address: place.formatted_address.clone().unwrap_or_default(),
        city,
        state,
        coordinates: place.geometry.as_ref().map(|g| Coordinates {
            latitude: g.location.lat,
            longitude: g.location.lng,
        }),
    })
}

fn parse_distance_matrix(body: &str) -> Result<u64, LookupError> {
    let response: DistanceMatrixResponse =
        serde_json::from_str(body).map_err(|e| LookupError::Decode(e.to_string()))?;
    check_api_status(&response.status, response.error_message)?;
    response
        .rows
        .first()
        .and_then(|row| row.elements.first())
        .and_then(|element| element.distance.as_ref())
        .map(|d| d.value)
        .ok_or(LookupError::NoResult)
}

#[cfg(test)]
#[path = "google_maps_test.rs"]
mod tests;
