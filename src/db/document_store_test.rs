use super::*;
use serde_json::json;

fn doc(id: &str, fields: Value) -> Document {
    Document::new(id, "maquinas", fields.as_object().cloned().unwrap_or_default())
}

#[test]
fn sort_puts_missing_values_last() {
    let mut docs = vec![
        doc("a", json!({})),
        doc("b", json!({"modelo": "Zeta"})),
        doc("c", json!({"modelo": "Alfa"})),
        doc("d", json!({"modelo": null})),
    ];
    sort_documents(&mut docs, "modelo");
    let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, ["c", "b", "a", "d"]);
}

#[test]
fn sort_by_document_id() {
    let mut docs = vec![doc("T-200", json!({})), doc("T-100", json!({}))];
    sort_documents(&mut docs, DOCUMENT_ID_KEY);
    assert_eq!(docs[0].id, "T-100");
}

#[test]
fn sort_numbers_numerically() {
    let mut docs = vec![doc("x", json!({"n": 10})), doc("y", json!({"n": 9.5}))];
    sort_documents(&mut docs, "n");
    assert_eq!(docs[0].id, "y");
}

#[test]
fn collection_id_takes_last_segment() {
    assert_eq!(collection_id("clientes/abc/relatorios"), "relatorios");
    assert_eq!(collection_id("relatorios"), "relatorios");
}
