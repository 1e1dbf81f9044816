// src/codec/customer.rs

use serde_json::Value;

use super::{opt_f64_value, pick_f64, pick_string, pick_timestamp, timestamp_value};
use crate::{
    db::{Document, Fields},
    models::customer::{Coordinates, Customer},
};

// O Android já gravou coordenadas com três nomes diferentes
const LATITUDE_KEYS: &[&str] = &["latitude", "lat", "latitude_raw"];
const LONGITUDE_KEYS: &[&str] = &["longitude", "lng", "longitude_raw"];

pub fn decode(doc: &Document) -> Customer {
    let f = &doc.fields;
    Customer {
        id: doc.id.clone(),
        name: pick_string(f, &["nome"]),
        tax_document: pick_string(f, &["documento", "cnpjCpf"]),
        phone: pick_string(f, &["telefone", "telefone1", "celular"]),
        mobile: pick_string(f, &["celular", "telefone"]),
        email: pick_string(f, &["email"]),
        street_address: pick_string(f, &["endereco", "address"]),
        number: pick_string(f, &["numero"]),
        complement: pick_string(f, &["complemento"]),
        city: pick_string(f, &["cidade"]),
        state: pick_string(f, &["estado"]),
        // Meio par conta como ausente
        coordinates: Coordinates::from_pair(pick_f64(f, LATITUDE_KEYS), pick_f64(f, LONGITUDE_KEYS)),
        created_at: pick_timestamp(f, &["created_at", "createdAt"]),
    }
}

pub fn encode(customer: &Customer) -> Fields {
    let mut f = Fields::new();
    let text = |s: &str| Value::String(s.to_string());

    f.insert("nome".into(), text(&customer.name));
    // Documento nas duas convenções
    f.insert("cnpjCpf".into(), text(&customer.tax_document));
    f.insert("documento".into(), text(&customer.tax_document));
    f.insert("telefone".into(), text(&customer.phone));
    f.insert("celular".into(), text(&customer.mobile));
    f.insert("email".into(), text(&customer.email));
    f.insert("endereco".into(), text(&customer.street_address));
    f.insert("numero".into(), text(&customer.number));
    f.insert("complemento".into(), text(&customer.complement));
    f.insert("cidade".into(), text(&customer.city));
    f.insert("estado".into(), text(&customer.state));
    f.insert("latitude".into(), opt_f64_value(customer.coordinates.map(|c| c.latitude)));
    f.insert("longitude".into(), opt_f64_value(customer.coordinates.map(|c| c.longitude)));
    if let Some(created_at) = customer.created_at {
        f.insert("created_at".into(), timestamp_value(created_at));
    }
    f
}

#[cfg(test)]
#[path = "customer_test.rs"]
mod tests;
