use super::*;
use std::collections::HashMap;

fn settings(pairs: &[(&str, &str)]) -> anyhow::Result<Settings> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Settings::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn memory_store_with_defaults() {
    let s = settings(&[("JWT_SECRET", "x"), ("DOCUMENT_STORE", "memory")]).unwrap();
    assert_eq!(s.port, 3000);
    assert_eq!(s.backend, StoreBackend::Memory);
    assert_eq!(s.collections, Collections::default());
    assert!(s.google_maps_api_key.is_none());
    assert!(s.home_base.is_none());
}

#[test]
fn postgres_is_default_and_needs_url() {
    let err = settings(&[("JWT_SECRET", "x")]).unwrap_err();
    assert!(err.to_string().contains("DATABASE_URL"));

    let s = settings(&[("JWT_SECRET", "x"), ("DATABASE_URL", "postgres://localhost/painel")]).unwrap();
    assert!(matches!(s.backend, StoreBackend::Postgres { .. }));
}

#[test]
fn jwt_secret_is_required() {
    let err = settings(&[("DOCUMENT_STORE", "memory")]).unwrap_err();
    assert!(err.to_string().contains("JWT_SECRET"));
}

#[test]
fn home_base_needs_both_coordinates() {
    let s = settings(&[
        ("JWT_SECRET", "x"),
        ("DOCUMENT_STORE", "memory"),
        ("TECH_BASE_LAT", "-23.5"),
    ])
    .unwrap();
    assert!(s.home_base.is_none());

    let s = settings(&[
        ("JWT_SECRET", "x"),
        ("DOCUMENT_STORE", "memory"),
        ("TECH_BASE_LAT", "-23.5"),
        ("TECH_BASE_LNG", "-46.6"),
    ])
    .unwrap();
    assert_eq!(s.home_base, Some(Coordinates { latitude: -23.5, longitude: -46.6 }));
}

#[test]
fn invalid_coordinate_is_an_error() {
    let result = settings(&[
        ("JWT_SECRET", "x"),
        ("DOCUMENT_STORE", "memory"),
        ("TECH_BASE_LAT", "norte"),
    ]);
    assert!(result.is_err());
}

#[test]
fn collection_names_can_be_overridden() {
    let s = settings(&[
        ("JWT_SECRET", "x"),
        ("DOCUMENT_STORE", "memory"),
        ("COLLECTION_REPORTS", "relatorios_teste"),
        ("GOOGLE_MAPS_API_KEY", " "),
    ])
    .unwrap();
    assert_eq!(s.collections.reports, "relatorios_teste");
    assert_eq!(s.collections.customers, "clientes");
    assert!(s.google_maps_api_key.is_none());
}

#[test]
fn unknown_backend_is_rejected() {
    let err = settings(&[("JWT_SECRET", "x"), ("DOCUMENT_STORE", "mongo")]).unwrap_err();
    assert!(err.to_string().contains("mongo"));
}

#[test]
fn state_without_maps_key_has_no_lookups() {
    let s = settings(&[("JWT_SECRET", "x"), ("DOCUMENT_STORE", "memory")]).unwrap();
    let state = AppState::with_store(s, Arc::new(MemoryStore::new())).unwrap();
    assert!(state.address_lookup.is_none());
    assert!(state.distance_lookup.is_none());
}
