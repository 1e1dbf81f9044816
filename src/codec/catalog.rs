// src/codec/catalog.rs

// O código é o ID do documento. Também gravamos "codigo" no corpo para quem
// lê o documento sem o caminho.

use serde_json::Value;

use super::{opt_string_value, pick_opt_string, pick_string};
use crate::{
    db::{Document, Fields},
    models::catalog::{Paint, Solvent},
};

pub fn decode_paint(doc: &Document) -> Paint {
    let f = &doc.fields;
    Paint {
        code: doc.id.clone(),
        description: pick_string(f, &["descricao"]),
        manufacturer: pick_string(f, &["fabricante"]),
        color_hex: pick_opt_string(f, &["cor_hex", "corHex"]),
    }
}

pub fn encode_paint(paint: &Paint) -> Fields {
    let mut f = common(&paint.code, &paint.description, &paint.manufacturer);
    f.insert("cor_hex".into(), opt_string_value(paint.color_hex.as_deref()));
    f
}

pub fn decode_solvent(doc: &Document) -> Solvent {
    let f = &doc.fields;
    Solvent {
        code: doc.id.clone(),
        description: pick_string(f, &["descricao"]),
        manufacturer: pick_string(f, &["fabricante"]),
    }
}

pub fn encode_solvent(solvent: &Solvent) -> Fields {
    common(&solvent.code, &solvent.description, &solvent.manufacturer)
}

fn common(code: &str, description: &str, manufacturer: &str) -> Fields {
    let mut f = Fields::new();
    f.insert("codigo".into(), Value::String(code.to_string()));
    f.insert("descricao".into(), Value::String(description.to_string()));
    f.insert("fabricante".into(), Value::String(manufacturer.to_string()));
    f
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
