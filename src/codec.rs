//! Codecs bidirecionais entre documentos crus e registros canônicos.
//!
//! O painel web grava em snake_case e o app Android em camelCase, nas mesmas
//! coleções. A leitura tenta as convenções numa ordem fixa e cai num padrão;
//! a escrita emite todas as convenções no mesmo documento.

pub mod catalog;
pub mod customer;
pub mod machine;
pub mod service_report;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::{json, Number, Value};

use crate::db::Fields;

/// Primeiro texto não vazio. Números também servem (o Android às vezes grava
/// telefone como número).
pub(crate) fn pick_string(fields: &Fields, keys: &[&str]) -> String {
    pick_opt_string(fields, keys).unwrap_or_default()
}

pub(crate) fn pick_opt_string(fields: &Fields, keys: &[&str]) -> Option<String> {
    keys.iter().filter_map(|k| fields.get(*k)).find_map(|v| match v {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

pub(crate) fn pick_f64(fields: &Fields, keys: &[&str]) -> Option<f64> {
    keys.iter().filter_map(|k| fields.get(*k)).find_map(as_f64)
}

pub(crate) fn pick_i64(fields: &Fields, keys: &[&str]) -> Option<i64> {
    keys.iter().filter_map(|k| fields.get(*k)).find_map(|v| match v {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    })
}

pub(crate) fn pick_bool(fields: &Fields, keys: &[&str]) -> Option<bool> {
    keys.iter().filter_map(|k| fields.get(*k)).find_map(Value::as_bool)
}

pub(crate) fn pick_decimal(fields: &Fields, keys: &[&str]) -> Option<Decimal> {
    keys.iter().filter_map(|k| fields.get(*k)).find_map(|v| match v {
        Value::Number(n) => n
            .as_i64()
            .map(Decimal::from)
            .or_else(|| n.as_f64().and_then(|f| Decimal::try_from(f).ok())),
        Value::String(s) => s.trim().replace(',', ".").parse::<Decimal>().ok(),
        _ => None,
    })
}

pub(crate) fn pick_timestamp(fields: &Fields, keys: &[&str]) -> Option<DateTime<Utc>> {
    keys.iter().filter_map(|k| fields.get(*k)).find_map(parse_timestamp)
}

/// Data simples ("2025-03-10") ou um timestamp completo.
pub(crate) fn pick_date(fields: &Fields, keys: &[&str]) -> Option<NaiveDate> {
    keys.iter().filter_map(|k| fields.get(*k)).find_map(|v| match v {
        Value::String(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .ok()
            .or_else(|| parse_timestamp(v).map(|dt| dt.date_naive())),
        other => parse_timestamp(other).map(|dt| dt.date_naive()),
    })
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
        _ => None,
    }
}

// Aceita RFC 3339, o objeto do SDK ({_seconds|seconds, _nanoseconds|nanoseconds})
// e epoch em milissegundos.
fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Object(map) => {
            let seconds = map.get("_seconds").or_else(|| map.get("seconds"))?.as_i64()?;
            let nanos = map
                .get("_nanoseconds")
                .or_else(|| map.get("nanoseconds"))
                .and_then(Value::as_u64)
                .unwrap_or(0);
            DateTime::from_timestamp(seconds, u32::try_from(nanos).ok()?)
        }
        Value::Number(n) => DateTime::from_timestamp_millis(n.as_i64()?),
        _ => None,
    }
}

/// Formato de escrita de timestamps: o mesmo objeto que o SDK serializa.
pub(crate) fn timestamp_value(dt: DateTime<Utc>) -> Value {
    json!({ "_seconds": dt.timestamp(), "_nanoseconds": dt.timestamp_subsec_nanos() })
}

pub(crate) fn opt_string_value(value: Option<&str>) -> Value {
    value.map_or(Value::Null, |s| Value::String(s.to_string()))
}

pub(crate) fn opt_f64_value(value: Option<f64>) -> Value {
    value
        .and_then(Number::from_f64)
        .map_or(Value::Null, Value::Number)
}

pub(crate) fn opt_decimal_value(value: Option<Decimal>) -> Value {
    opt_f64_value(value.and_then(|d| d.to_f64()))
}

#[cfg(test)]
#[path = "codec_test.rs"]
mod tests;
