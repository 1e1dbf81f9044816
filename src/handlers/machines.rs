// src/handlers/machines.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use super::{acquire_ticket, create_entity, delete_entity, update_entity, DeleteQuery};
use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{auth::Session, i18n::Locale},
    models::machine::MachineForm,
    services::{
        customers::{CustomerManager, CustomerSchema},
        machines::{self, MachineManager, MachineSchema},
    },
};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineQuery {
    #[serde(default)]
    pub q: String,
    pub customer_id: Option<String>,
}

fn manager(app_state: &AppState) -> MachineManager {
    MachineManager::new(
        app_state.store.clone(),
        MachineSchema::new(&app_state.collections().machines),
    )
}

// GET /api/machines?q=&customerId=
pub async fn list_machines(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<MachineQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let mut machines = manager(&app_state);
    let mut customers = CustomerManager::new(
        app_state.store.clone(),
        CustomerSchema::new(&app_state.collections().customers),
    );

    machines.load().await.map_err(|e| e.to_api_error(&locale))?;
    // O nome do cliente é só rótulo; sem clientes a lista ainda aparece
    if let Err(e) = customers.load().await {
        tracing::warn!(error = %e, "falha ao carregar clientes para a lista de máquinas");
    }
    machines.set_search(&query.q);

    let mut visible = machines.visible();
    if let Some(customer_id) = query.customer_id.as_deref().filter(|id| !id.is_empty()) {
        visible.retain(|m| m.customer_id == customer_id);
    }

    Ok(Json(machines::list_view(
        &visible,
        machines.records(),
        customers.records(),
    )))
}

// POST /api/machines
pub async fn create_machine(
    State(app_state): State<AppState>,
    locale: Locale,
    Session(session): Session,
    Json(payload): Json<MachineForm>,
) -> Result<impl IntoResponse, ApiError> {
    let mut manager = manager(&app_state);
    let _ticket = acquire_ticket(&app_state, &session, &app_state.collections().machines, None)
        .map_err(|e| e.to_api_error(&locale))?;

    let machine = create_entity(&mut manager, payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(machine)))
}

// PUT /api/machines/{id}
pub async fn update_machine(
    State(app_state): State<AppState>,
    locale: Locale,
    Session(session): Session,
    Path(id): Path<String>,
    Json(payload): Json<MachineForm>,
) -> Result<impl IntoResponse, ApiError> {
    let mut manager = manager(&app_state);
    let _ticket = acquire_ticket(&app_state, &session, &app_state.collections().machines, Some(&id))
        .map_err(|e| e.to_api_error(&locale))?;

    let machine = update_entity(&mut manager, &id, payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(machine))
}

// DELETE /api/machines/{id}?confirm=true
pub async fn delete_machine(
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
