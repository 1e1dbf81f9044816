// src/handlers/service_reports.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use super::{acquire_ticket, DeleteQuery, SearchQuery};
use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::Session, i18n::Locale},
    models::{
        auth::SessionContext,
        machine::Machine,
        service_report::{SelectCustomerRequest, ServiceReportForm},
    },
    services::service_reports::ReportManager,
};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFormQuery {
    pub customer_id: Option<String>,
}

// Relatórios, clientes e máquinas carregados juntos
async fn loaded_manager(app_state: &AppState, session: SessionContext) -> Result<ReportManager, AppError> {
    let mut manager = ReportManager::new(
        app_state.store.clone(),
        app_state.collections(),
        session,
        app_state.distance_lookup.clone(),
        app_state.settings.home_base,
    );
    manager.load().await?;
    Ok(manager)
}

// GET /api/service-reports?q=
pub async fn list_reports(
    State(app_state): State<AppState>,
    locale: Locale,
    Session(session): Session,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let mut manager = loaded_manager(&app_state, session)
        .await
        .map_err(|e| e.to_api_error(&locale))?;
    manager.set_search(&query.q);

    Ok(Json(manager.view()))
}

// GET /api/service-reports/{id}
pub async fn get_report(
    State(app_state): State<AppState>,
    locale: Locale,
    Session(session): Session,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let manager = loaded_manager(&app_state, session)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    let row = manager.get(&id).map_err(|e| e.to_api_error(&locale))?;
    Ok(Json(row))
}

// GET /api/service-reports/form/new?customerId=
pub async fn new_report_form(
    State(app_state): State<AppState>,
    locale: Locale,
    Session(session): Session,
    Query(query): Query<NewFormQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let manager = loaded_manager(&app_state, session)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    let form = match query.customer_id.as_deref().filter(|id| !id.is_empty()) {
        Some(customer_id) => manager
            .new_for_customer(customer_id)
            .await
            .map_err(|e| e.to_api_error(&locale))?,
        None => ServiceReportForm::default(),
    };
    Ok(Json(form))
}

// POST /api/service-reports/form/select-customer
pub async fn select_customer(
    State(app_state): State<AppState>,
    locale: Locale,
    Session(session): Session,
    Json(payload): Json<SelectCustomerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let manager = loaded_manager(&app_state, session)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    let form = manager
        .select_customer(&payload.customer_id, payload.form)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    let machines = manager.machines_for(&form.customer_id);
    Ok(Json(json!({ "form": form, "machines": machines })))
}

// GET /api/service-reports/customers/{customer_id}/machines
pub async fn customer_machines(
    State(app_state): State<AppState>,
    locale: Locale,
    Session(session): Session,
    Path(customer_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let manager = loaded_manager(&app_state, session)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    let machines: Vec<Machine> = manager.machines_for(&customer_id).into_iter().cloned().collect();
    Ok(Json(machines))
}

// POST /api/service-reports
pub async fn create_report(
    State(app_state): State<AppState>,
    locale: Locale,
    Session(session): Session,
    Json(payload): Json<ServiceReportForm>,
) -> Result<impl IntoResponse, ApiError> {
    let _ticket = acquire_ticket(&app_state, &session, &app_state.collections().reports, None)
        .map_err(|e| e.to_api_error(&locale))?;

    let mut manager = loaded_manager(&app_state, session)
        .await
        .map_err(|e| e.to_api_error(&locale))?;
    manager.open_new();

    let report = manager.submit(payload).await.map_err(|e| e.to_api_error(&locale))?;
    Ok((StatusCode::CREATED, Json(report)))
}

// PUT /api/service-reports/{id}
pub async fn update_report(
    State(app_state): State<AppState>,
    locale: Locale,
    Session(session): Session,
    Path(id): Path<String>,
    Json(payload): Json<ServiceReportForm>,
) -> Result<impl IntoResponse, ApiError> {
    let _ticket = acquire_ticket(&app_state, &session, &app_state.collections().reports, Some(&id))
        .map_err(|e| e.to_api_error(&locale))?;

    let mut manager = loaded_manager(&app_state, session)
        .await
        .map_err(|e| e.to_api_error(&locale))?;
    manager.open_edit(&id).map_err(|e| e.to_api_error(&locale))?;

    let report = manager.submit(payload).await.map_err(|e| e.to_api_error(&locale))?;
    Ok(Json(report))
}

// DELETE /api/service-reports/{id}?confirm=true
pub async fn delete_report(
    State(app_state): State<AppState>,
    locale: Locale,
    Session(session): Session,
    Path(id): Path<String>,
    Query(query): Query<DeleteQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let mut manager = loaded_manager(&app_state, session)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    let deleted = manager
        .delete(&id, query.confirm.into())
        .await
        .map_err(|e| e.to_api_error(&locale))?;
    if !deleted {
        return Err(AppError::ConfirmationRequired.to_api_error(&locale));
    }

    Ok(StatusCode::NO_CONTENT)
}
