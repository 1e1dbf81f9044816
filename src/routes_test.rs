use super::*;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::{config::Settings, db::MemoryStore, models::auth::Claims};

const SECRET: &str = "segredo-das-rotas";

fn app() -> Router {
    let settings = Settings::from_lookup(|key| match key {
        "JWT_SECRET" => Some(SECRET.to_string()),
        "DOCUMENT_STORE" => Some("memory".to_string()),
        _ => None,
    })
    .unwrap();
    let state = AppState::with_store(settings, Arc::new(MemoryStore::new())).unwrap();
    build_router(state)
}

fn token(sub: &str) -> String {
    let claims = Claims {
        sub: sub.into(),
        name: Some("Carlos Técnico".into()),
        email: None,
        exp: (Utc::now() + Duration::hours(1)).timestamp() as usize,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_bytes())).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>, auth: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(t) = auth {
        builder = builder.header("authorization", format!("Bearer {t}"));
    }
    let request = match body {
        Some(b) => builder
            .header("content-type", "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

#[tokio::test]
async fn health_is_public() {
    let app = app();
    let (status, _) = send(&app, "GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn panel_routes_need_a_token() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api/customers", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    let (status, _) = send(&app, "GET", "/api/customers", None, Some("lixo")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn report_is_grouped_under_its_customer() {
    let app = app();
    let t = token("tec-1");

    let (status, customer) = send(&app, "POST", "/api/customers", Some(json!({ "name": "Acme", "phone": "1133334444" })), Some(&t)).await;
    assert_eq!(status, StatusCode::CREATED);
    let customer_id = customer["id"].as_str().unwrap().to_string();

    let (status, machine) = send(
        &app,
        "POST",
        "/api/machines",
        Some(json!({
            "customerId": customer_id,
            "manufacturer": "Graco",
            "model": "GX21",
            "serialNumber": "SN-1",
        })),
        Some(&t),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let machine_id = machine["id"].as_str().unwrap().to_string();

    let (status, report) = send(
        &app,
        "POST",
        "/api/service-reports",
        Some(json!({
            "customerId": customer_id,
            "machineId": machine_id,
            "title": "Acme",
            "description": "Troca de bico",
        })),
        Some(&t),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(report["technicianId"], "tec-1");
    assert_eq!(report["technicianName"], "Carlos Técnico");
    assert_eq!(report["status"], "RASCUNHO");

    let (status, view) = send(&app, "GET", "/api/service-reports", None, Some(&t)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["reportCount"], 1);
    assert!(view["unassigned"].is_null());

    let group = &view["groups"][0];
    assert_eq!(group["customerName"], "Acme");
    assert_eq!(group["reports"][0]["machineLabel"], "Graco GX21");
    assert_eq!(group["reports"][0]["customerName"], "Acme");
}

#[tokio::test]
async fn report_with_foreign_machine_is_rejected() {
    let app = app();
    let t = token("tec-1");

    let (_, a) = send(&app, "POST", "/api/customers", Some(json!({ "name": "Acme" })), Some(&t)).await;
    let (_, b) = send(&app, "POST", "/api/customers", Some(json!({ "name": "Beta" })), Some(&t)).await;
    let (_, machine) = send(
        &app,
        "POST",
        "/api/machines",
        Some(json!({
            "customerId": b["id"],
            "manufacturer": "Wagner",
            "model": "W1",
            "serialNumber": "SN-9",
        })),
        Some(&t),
    )
    .await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/service-reports",
        Some(json!({
            "customerId": a["id"],
            "machineId": machine["id"],
            "title": "Visita",
            "description": "Revisão",
        })),
        Some(&t),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["machine_id"].is_array());
}

#[tokio::test]
async fn machine_without_customer_is_counted_as_orphan() {
    let app = app();
    let t = token("tec-1");

    let (status, _) = send(
        &app,
        "POST",
        "/api/machines",
        Some(json!({ "manufacturer": "Graco", "model": "GX21", "serialNumber": "SN-2" })),
        Some(&t),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, view) = send(&app, "GET", "/api/machines", None, Some(&t)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["orphanCount"], 1);
    assert_eq!(view["machines"][0]["customerLabel"], "[Sem Cliente]");
    assert_eq!(view["machines"][0]["orphan"], true);
}

#[tokio::test]
async fn delete_needs_confirmation() {
    let app = app();
    let t = token("tec-1");

    let (_, customer) = send(&app, "POST", "/api/customers", Some(json!({ "name": "Acme" })), Some(&t)).await;
    let id = customer["id"].as_str().unwrap().to_string();

    let (status, _) = send(&app, "DELETE", &format!("/api/customers/{id}"), None, Some(&t)).await;
    assert_eq!(status, StatusCode::PRECONDITION_REQUIRED);

    let (status, _) = send(&app, "DELETE", &format!("/api/customers/{id}?confirm=true"), None, Some(&t)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, list) = send(&app, "GET", "/api/customers", None, Some(&t)).await;
    assert_eq!(list["total"], 0);
}

#[tokio::test]
async fn invalid_form_is_a_bad_request() {
    let app = app();
    let t = token("tec-1");

    let (status, body) = send(&app, "POST", "/api/customers", Some(json!({ "name": "  " })), Some(&t)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["name"].is_array());
}

#[tokio::test]
async fn paint_code_becomes_the_document_id() {
    let app = app();
    let t = token("tec-1");

    let (status, _) = send(
        &app,
        "POST",
        "/api/catalog/paints",
        Some(json!({ "code": "P-100", "description": "Branco", "colorHex": "#ffffff" })),
        Some(&t),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, list) = send(&app, "GET", "/api/catalog/paints", None, Some(&t)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["paints"][0]["code"], "P-100");
    assert_eq!(list["paints"][0]["colorHex"], "#FFFFFF");
}

#[tokio::test]
async fn address_lookup_reports_disabled_without_key() {
    let app = app();
    let t = token("tec-1");

    let (status, body) = send(&app, "GET", "/api/address/suggestions?input=Rua", None, Some(&t)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["enabled"], false);
    assert_eq!(body["suggestions"], json!([]));
}

#[tokio::test]
async fn dashboard_mounts_the_selected_tab() {
    let app = app();
    let t = token("tec-1");

    let (status, view) = send(&app, "GET", "/api/dashboard", None, Some(&t)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["activeTab"], "clientes");

    let (status, view) = send(&app, "PUT", "/api/dashboard/active-tab", Some(json!({ "tab": "maquinas" })), Some(&t)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["activeTab"], "maquinas");

    let (status, content) = send(&app, "GET", "/api/dashboard/view", None, Some(&t)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content["tab"], "maquinas");
    assert_eq!(content["content"]["orphanCount"], 0);
}

#[tokio::test]
async fn customer_with_blank_email_is_created() {
    let app = app();
    let t = token("tec-1");

    let (status, customer) = send(&app, "POST", "/api/customers", Some(json!({ "name": "Acme", "email": "" })), Some(&t)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(customer["email"], "");
}

#[tokio::test]
async fn report_form_lists_only_the_customer_machines() {
    let app = app();
    let t = token("tec-1");

    let (_, acme) = send(&app, "POST", "/api/customers", Some(json!({ "name": "Acme" })), Some(&t)).await;
    let (_, beta) = send(&app, "POST", "/api/customers", Some(json!({ "name": "Beta" })), Some(&t)).await;
    for (customer, serial) in [(&acme, "SN-A"), (&beta, "SN-B")] {
        let (status, _) = send(
            &app,
            "POST",
            "/api/machines",
            Some(json!({
                "customerId": customer["id"],
                "manufacturer": "Graco",
                "model": "GX21",
                "serialNumber": serial,
            })),
            Some(&t),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let acme_id = acme["id"].as_str().unwrap();
    let (status, machines) = send(
        &app,
        "GET",
        &format!("/api/service-reports/customers/{acme_id}/machines"),
        None,
        Some(&t),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let machines = machines.as_array().unwrap();
    assert_eq!(machines.len(), 1);
    assert_eq!(machines[0]["serialNumber"], "SN-A");
    assert_eq!(machines[0]["customerId"], acme_id);
}
