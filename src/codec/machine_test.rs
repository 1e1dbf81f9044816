use super::*;
use serde_json::json;

fn doc(fields: Value) -> Document {
    Document::new("m1", "maquinas", fields.as_object().cloned().unwrap())
}

#[test]
fn reads_camel_case_written_by_the_app() {
    let m = decode(&doc(json!({
        "clienteId": "c1",
        "fabricante": "Epson",
        "modelo": "S80600",
        "numeroSerie": "SN-9",
        "anoFabricacao": "2019",
        "ativo": "sim"
    })));
    assert_eq!(m.customer_id, "c1");
    assert_eq!(m.serial_number, "SN-9");
    assert_eq!(m.manufacturing_year, Some(2019));
    assert!(m.active);
    assert_eq!(m.label(), "Epson S80600");
}

#[test]
fn snake_case_wins_when_both_present() {
    let m = decode(&doc(json!({ "cliente_id": "painel", "clienteId": "app" })));
    assert_eq!(m.customer_id, "painel");
}

#[test]
fn inactive_flag_is_kept() {
    let m = decode(&doc(json!({ "modelo": "X", "ativo": false })));
    assert!(!m.active);
}

#[test]
fn encode_emits_both_conventions() {
    let m = decode(&doc(json!({
        "cliente_id": "c1",
        "modelo": "X",
        "numero_serie": "1",
        "ano_fabricacao": 2020
    })));
    let f = encode(&m);
    assert_eq!(f["cliente_id"], "c1");
    assert_eq!(f["clienteId"], "c1");
    assert_eq!(f["numeroSerie"], "1");
    assert_eq!(f["anoFabricacao"], 2020);
    assert_eq!(f["identificacao"], Value::Null);
    assert_eq!(f["ativo"], true);
}
