// src/handlers/catalog.rs

// Tintas e solventes: mesma tela, coleções diferentes.

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
    models::catalog::{PaintForm, SolventForm},
    services::catalog::{PaintManager, PaintSchema, SolventManager, SolventSchema},
};

fn paints(app_state: &AppState) -> PaintManager {
    PaintManager::new(
        app_state.store.clone(),
        PaintSchema::new(&app_state.collections().paints),
    )
}

fn solvents(app_state: &AppState) -> SolventManager {
    SolventManager::new(
        app_state.store.clone(),
        SolventSchema::new(&app_state.collections().solvents),
    )
}

// =============================================================================
// TINTAS
// =============================================================================

pub async fn list_paints(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let mut manager = paints(&app_state);
    manager.load().await.map_err(|e| e.to_api_error(&locale))?;
    manager.set_search(&query.q);

    let items = manager.visible();
    Ok(Json(json!({ "paints": items, "total": items.len() })))
}

pub async fn create_paint(
    State(app_state): State<AppState>,
    locale: Locale,
    Session(session): Session,
    Json(payload): Json<PaintForm>,
) -> Result<impl IntoResponse, ApiError> {
    let mut manager = paints(&app_state);
    let _ticket = acquire_ticket(&app_state, &session, &app_state.collections().paints, None)
        .map_err(|e| e.to_api_error(&locale))?;

    let paint = create_entity(&mut manager, payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(paint)))
}

pub async fn update_paint(
    State(app_state): State<AppState>,
    locale: Locale,
    Session(session): Session,
    Path(id): Path<String>,
    Json(payload): Json<PaintForm>,
) -> Result<impl IntoResponse, ApiError> {
    let mut manager = paints(&app_state);
    let _ticket = acquire_ticket(&app_state, &session, &app_state.collections().paints, Some(&id))
        .map_err(|e| e.to_api_error(&locale))?;

    let paint = update_entity(&mut manager, &id, payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(paint))
}

pub async fn delete_paint(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
    Query(query): Query<DeleteQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let mut manager = paints(&app_state);
    delete_entity(&mut manager, &id, query.confirm)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// SOLVENTES
// =============================================================================

pub async fn list_solvents(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let mut manager = solvents(&app_state);
    manager.load().await.map_err(|e| e.to_api_error(&locale))?;
    manager.set_search(&query.q);

    let items = manager.visible();
    Ok(Json(json!({ "solvents": items, "total": items.len() })))
}

pub async fn create_solvent(
    State(app_state): State<AppState>,
    locale: Locale,
    Session(session): Session,
    Json(payload): Json<SolventForm>,
) -> Result<impl IntoResponse, ApiError> {
    let mut manager = solvents(&app_state);
    let _ticket = acquire_ticket(&app_state, &session, &app_state.collections().solvents, None)
        .map_err(|e| e.to_api_error(&locale))?;

    let solvent = create_entity(&mut manager, payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(solvent)))
}

pub async fn update_solvent(
    State(app_state): State<AppState>,
    locale: Locale,
    Session(session): Session,
    Path(id): Path<String>,
    Json(payload): Json<SolventForm>,
) -> Result<impl IntoResponse, ApiError> {
    let mut manager = solvents(&app_state);
    let _ticket = acquire_ticket(&app_state, &session, &app_state.collections().solvents, Some(&id))
        .map_err(|e| e.to_api_error(&locale))?;

    let solvent = update_entity(&mut manager, &id, payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(solvent))
}

pub async fn delete_solvent(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
    Query(query): Query<DeleteQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let mut manager = solvents(&app_state);
    delete_entity(&mut manager, &id, query.confirm)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}
