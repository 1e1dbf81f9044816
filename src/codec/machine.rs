// src/codec/machine.rs

use serde_json::Value;

use super::{opt_string_value, pick_bool, pick_i64, pick_opt_string, pick_string, pick_timestamp, timestamp_value};
use crate::{
    db::{Document, Fields},
    models::machine::Machine,
};

// Painel grava snake_case, app grava camelCase. Lê snake primeiro.
pub fn decode(doc: &Document) -> Machine {
    let f = &doc.fields;
    Machine {
        id: doc.id.clone(),
        customer_id: pick_string(f, &["cliente_id", "clienteId"]),
        manufacturer: pick_string(f, &["fabricante"]),
        model: pick_string(f, &["modelo"]),
        serial_number: pick_string(f, &["numero_serie", "numeroSerie"]),
        identification: pick_opt_string(f, &["identificacao", "identification"]),
        configuration_code: pick_opt_string(f, &["codigo_configuracao", "codigoConfiguracao"]),
        manufacturing_year: pick_i64(f, &["ano_fabricacao", "anoFabricacao"])
            .and_then(|y| i32::try_from(y).ok()),
        // Qualquer coisa que não seja booleano conta como ativa
        active: pick_bool(f, &["ativo"]).unwrap_or(true),
        created_at: pick_timestamp(f, &["created_at", "createdAt"]),
    }
}

pub fn encode(machine: &Machine) -> Fields {
    let mut f = Fields::new();
    let mut both = |snake: &str, camel: &str, value: Value| {
        f.insert(snake.to_string(), value.clone());
        f.insert(camel.to_string(), value);
    };

    both("cliente_id", "clienteId", Value::String(machine.customer_id.clone()));
    both("numero_serie", "numeroSerie", Value::String(machine.serial_number.clone()));
    both("identificacao", "identification", opt_string_value(machine.identification.as_deref()));
    both(
        "codigo_configuracao",
        "codigoConfiguracao",
        opt_string_value(machine.configuration_code.as_deref()),
    );
    both(
        "ano_fabricacao",
        "anoFabricacao",
        machine.manufacturing_year.map_or(Value::Null, Value::from),
    );

    f.insert("fabricante".into(), Value::String(machine.manufacturer.clone()));
    f.insert("modelo".into(), Value::String(machine.model.clone()));
    f.insert("ativo".into(), Value::Bool(machine.active));
    if let Some(created_at) = machine.created_at {
        f.insert("created_at".into(), timestamp_value(created_at));
    }
    f
}

#[cfg(test)]
#[path = "machine_test.rs"]
mod tests;
