// src/handlers/customers.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;

use super::{acquire_ticket, create_entity, delete_entity, update_entity, DeleteQuery, SearchQuery};
use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{auth::Session, i18n::Locale},
    models::customer::CustomerForm,
    services::customers::{CustomerManager, CustomerSchema},
};

fn manager(app_state: &AppState) -> CustomerManager {
    CustomerManager::new(
        app_state.store.clone(),
        CustomerSchema::new(&app_state.collections().customers),
    )
}

// GET /api/customers?q=
pub async fn list_customers(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let mut manager = manager(&app_state);
    manager.load().await.map_err(|e| e.to_api_error(&locale))?;
    manager.set_search(&query.q);

    let customers = manager.visible();
    Ok(Json(json!({
        "customers": customers,
        "total": customers.len(),
        // O formulário sempre aceita endereço digitado; o autocomplete é extra
        "addressAutocomplete": app_state.address_lookup.is_some(),
    })))
}

// POST /api/customers
pub async fn create_customer(
    State(app_state): State<AppState>,
    locale: Locale,
    Session(session): Session,
    Json(payload): Json<CustomerForm>,
) -> Result<impl IntoResponse, ApiError> {
    let mut manager = manager(&app_state);
    let _ticket = acquire_ticket(&app_state, &session, &app_state.collections().customers, None)
        .map_err(|e| e.to_api_error(&locale))?;

    let customer = create_entity(&mut manager, payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(customer)))
}

// PUT /api/customers/{id}
pub async fn update_customer(
    State(app_state): State<AppState>,
    locale: Locale,
    Session(session): Session,
    Path(id): Path<String>,
    Json(payload): Json<CustomerForm>,
) -> Result<impl IntoResponse, ApiError> {
    let mut manager = manager(&app_state);
    let _ticket = acquire_ticket(&app_state, &session, &app_state.collections().customers, Some(&id))
        .map_err(|e| e.to_api_error(&locale))?;

    let customer = update_entity(&mut manager, &id, payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(customer))
}

// DELETE /api/customers/{id}?confirm=true
pub async fn delete_customer(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
    Query(query): Query<DeleteQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let mut manager = manager(&app_state);
    delete_entity(&mut manager, &id, query.confirm)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}
