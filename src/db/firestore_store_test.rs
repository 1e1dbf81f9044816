use super::*;

#[test]
fn encodes_scalars_with_firestore_types() {
    let fields: Fields = json!({
        "nome": "Acme",
        "ano_fabricacao": 2019,
        "kmQuantidade": 12.5,
        "ativo": true,
        "identificacao": null
    })
    .as_object()
    .cloned()
    .unwrap();

    let encoded = encode_fields(&fields);
    assert_eq!(encoded["nome"], json!({ "stringValue": "Acme" }));
    assert_eq!(encoded["ano_fabricacao"], json!({ "integerValue": "2019" }));
    assert_eq!(encoded["kmQuantidade"], json!({ "doubleValue": 12.5 }));
    assert_eq!(encoded["ativo"], json!({ "booleanValue": true }));
    assert_eq!(encoded["identificacao"], json!({ "nullValue": null }));
}

#[test]
fn timestamp_marker_becomes_timestamp_value_and_back() {
    let fields: Fields = json!({ "created_at": { "_seconds": 1_700_000_000, "_nanoseconds": 0 } })
        .as_object()
        .cloned()
        .unwrap();
    let encoded = encode_fields(&fields);
    let ts = encoded["created_at"]["timestampValue"].as_str().unwrap();
    assert!(ts.starts_with("2023-11-14T22:13:20"));

    let decoded = decode_fields(encoded.as_object().cloned().unwrap());
    assert_eq!(decoded["created_at"]["_seconds"], 1_700_000_000);
}

#[test]
fn decodes_nested_maps_and_arrays() {
    let raw = json!({
        "equipamento": { "mapValue": { "fields": {
            "modelo": { "stringValue": "X1" },
            "fotos": { "arrayValue": { "values": [ { "stringValue": "a.jpg" } ] } }
        } } },
        "vazio": { "arrayValue": {} }
    });
    let decoded = decode_fields(raw.as_object().cloned().unwrap());
    assert_eq!(decoded["equipamento"]["modelo"], "X1");
    assert_eq!(decoded["equipamento"]["fotos"][0], "a.jpg");
    assert_eq!(decoded["vazio"], json!([]));
}

#[test]
fn document_name_splits_into_path_and_id() {
    let store = FirestoreStore::new("demo", None, None);
    let raw = RestDocument {
        name: "projects/demo/databases/(default)/documents/clientes/c1/relatorios/r9".into(),
        fields: Map::new(),
    };
    let doc = store.to_document(raw);
    assert_eq!(doc.id, "r9");
    assert_eq!(doc.path, "clientes/c1/relatorios");
}

#[test]
fn status_errors_carry_the_api_message() {
    let body = r#"{"error":{"code":403,"message":"Missing or insufficient permissions."}}"#;
    let err = map_status_error(StatusCode::FORBIDDEN, body);
    assert!(matches!(err, StoreError::Backend(ref m) if m.contains("insufficient permissions")));
}
