// src/handlers/dashboard.rs

use axum::{extract::State, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::Session, i18n::Locale},
    models::{
        auth::SessionContext,
        dashboard::{SelectTabPayload, Tab},
    },
    services::{
        catalog::{PaintManager, PaintSchema, SolventManager, SolventSchema},
        customers::{CustomerManager, CustomerSchema},
        machines::{self, MachineManager, MachineSchema},
        service_reports::ReportManager,
    },
};

// GET /api/dashboard
pub async fn get_dashboard(
    State(app_state): State<AppState>,
    Session(session): Session,
) -> impl IntoResponse {
    Json(app_state.dashboard.view(&session).await)
}

// PUT /api/dashboard/active-tab
pub async fn select_tab(
    State(app_state): State<AppState>,
    Session(session): Session,
    Json(payload): Json<SelectTabPayload>,
) -> impl IntoResponse {
    app_state.dashboard.select_tab(&session.user_id, payload.tab).await;
    Json(app_state.dashboard.view(&session).await)
}

// GET /api/dashboard/view
// Monta só a aba ativa; as outras não são carregadas.
pub async fn active_content(
    State(app_state): State<AppState>,
    locale: Locale,
    Session(session): Session,
) -> Result<impl IntoResponse, ApiError> {
    let tab = app_state.dashboard.active_tab(&session.user_id).await;
    let content = mount_tab(&app_state, tab, session)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(json!({ "tab": tab, "content": content })))
}

async fn mount_tab(app_state: &AppState, tab: Tab, session: SessionContext) -> Result<Value, AppError> {
    let store = app_state.store.clone();
    let collections = app_state.collections();

    let value = match tab {
        Tab::Clientes => {
            let mut manager = CustomerManager::new(store, CustomerSchema::new(&collections.customers));
            manager.load().await?;
            json!(manager.records())
        }
        Tab::Maquinas => {
            let mut manager = MachineManager::new(store.clone(), MachineSchema::new(&collections.machines));
            let mut customers = CustomerManager::new(store, CustomerSchema::new(&collections.customers));
            manager.load().await?;
            customers.load().await?;
            let visible = manager.visible();
            json!(machines::list_view(&visible, manager.records(), customers.records()))
        }
        Tab::Relatorios => {
            let mut manager = ReportManager::new(
                store,
                collections,
                session,
                app_state.distance_lookup.clone(),
                app_state.settings.home_base,
            );
            manager.load().await?;
            json!(manager.view())
        }
        Tab::Tintas => {
            let mut manager = PaintManager::new(store, PaintSchema::new(&collections.paints));
            manager.load().await?;
            json!(manager.records())
        }
        Tab::Solventes => {
            let mut manager = SolventManager::new(store, SolventSchema::new(&collections.solvents));
            manager.load().await?;
            json!(manager.records())
        }
    };
    Ok(value)
}
