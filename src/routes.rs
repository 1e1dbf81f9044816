// src/routes.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{config::AppState, handlers, middleware::auth::auth_guard};

pub fn build_router(app_state: AppState) -> Router {
    let customer_routes = Router::new()
        .route(
            "/",
            get(handlers::customers::list_customers).post(handlers::customers::create_customer),
        )
        .route(
            "/{id}",
            put(handlers::customers::update_customer).delete(handlers::customers::delete_customer),
        );

    let machine_routes = Router::new()
        .route(
            "/",
            get(handlers::machines::list_machines).post(handlers::machines::create_machine),
        )
        .route(
            "/{id}",
            put(handlers::machines::update_machine).delete(handlers::machines::delete_machine),
        );

    let report_routes = Router::new()
        .route(
            "/",
            get(handlers::service_reports::list_reports).post(handlers::service_reports::create_report),
        )
        .route(
            "/{id}",
            get(handlers::service_reports::get_report)
                .put(handlers::service_reports::update_report)
                .delete(handlers::service_reports::delete_report),
        )
        // Pré-preenchimento do formulário
        .route("/form/new", get(handlers::service_reports::new_report_form))
        .route(
            "/form/select-customer",
            post(handlers::service_reports::select_customer),
        )
        .route(
            "/customers/{customer_id}/machines",
            get(handlers::service_reports::customer_machines),
        );

    let catalog_routes = Router::new()
        .route(
            "/paints",
            get(handlers::catalog::list_paints).post(handlers::catalog::create_paint),
        )
        .route(
            "/paints/{id}",
            put(handlers::catalog::update_paint).delete(handlers::catalog::delete_paint),
        )
        .route(
            "/solvents",
            get(handlers::catalog::list_solvents).post(handlers::catalog::create_solvent),
        )
        .route(
            "/solvents/{id}",
            put(handlers::catalog::update_solvent).delete(handlers::catalog::delete_solvent),
        );

    let address_routes = Router::new()
        .route("/suggestions", get(handlers::address::suggestions))
        .route("/details", get(handlers::address::details));

    let dashboard_routes = Router::new()
        .route("/", get(handlers::dashboard::get_dashboard))
        .route("/active-tab", put(handlers::dashboard::select_tab))
        .route("/view", get(handlers::dashboard::active_content));

    // Tudo do painel exige sessão
    let protected = Router::new()
        .nest("/customers", customer_routes)
        .nest("/machines", machine_routes)
        .nest("/service-reports", report_routes)
        .nest("/catalog", catalog_routes)
        .nest("/address", address_routes)
        .nest("/dashboard", dashboard_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api", protected)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;
