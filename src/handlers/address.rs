// src/handlers/address.rs

// Autocomplete de endereço. Nunca devolve erro: sem chave ou com o serviço
// fora do ar, o formulário segue com digitação manual.

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::config::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SuggestQuery {
    #[serde(default)]
    pub input: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailsQuery {
    #[serde(default)]
    pub place_id: String,
}

// GET /api/address/suggestions?input=
pub async fn suggestions(
    State(app_state): State<AppState>,
    Query(query): Query<SuggestQuery>,
) -> impl IntoResponse {
    let Some(lookup) = &app_state.address_lookup else {
        return Json(json!({ "enabled": false, "suggestions": [] }));
    };

    let suggestions = match lookup.suggest(&query.input).await {
        Ok(list) => list,
        Err(e) => {
            tracing::warn!(error = %e, "autocomplete de endereço falhou");
            Vec::new()
        }
    };
    Json(json!({ "enabled": true, "suggestions": suggestions }))
}

// GET /api/address/details?placeId=
pub async fn details(
    State(app_state): State<AppState>,
    Query(query): Query<DetailsQuery>,
) -> impl IntoResponse {
    let Some(lookup) = &app_state.address_lookup else {
        return Json(json!({ "enabled": false, "address": null }));
    };
    if query.place_id.trim().is_empty() {
        return Json(json!({ "enabled": true, "address": null }));
    }

    match lookup.resolve(&query.place_id).await {
        Ok(address) => Json(json!({ "enabled": true, "address": address })),
        Err(e) => {
            tracing::warn!(place_id = %query.place_id, error = %e, "falha ao detalhar endereço");
            Json(json!({ "enabled": true, "address": null }))
        }
    }
}
