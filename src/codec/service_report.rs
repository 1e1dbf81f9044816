// src/codec/service_report.rs

use serde_json::Value;

use super::{
    opt_decimal_value, opt_string_value, pick_date, pick_decimal, pick_i64, pick_opt_string,
    pick_string, pick_timestamp, timestamp_value,
};
use crate::{
    db::{Document, Fields},
    models::service_report::{ReportStatus, ServiceReport},
};

// Relatórios nascem no app: camelCase primeiro, snake_case depois.
pub fn decode(doc: &Document) -> ServiceReport {
    let f = &doc.fields;
    let created_at = pick_timestamp(f, &["created_at", "createdAt"]);

    ServiceReport {
        id: doc.id.clone(),
        customer_id: pick_string(f, &["clienteId", "cliente_id"]),
        machine_id: pick_opt_string(f, &["maquinaId", "maquina_id"]),
        title: pick_string(f, &["titulo"]),
        description: pick_string(f, &["descricao"]),
        contact: pick_string(f, &["contato"]),
        status: ReportStatus::from_label(&pick_string(f, &["status"])),
        technician_id: pick_string(f, &["tecnicoId", "tecnico_id"]),
        technician_name: pick_string(f, &["tecnicoNome", "tecnico_nome"]),
        service_date: pick_timestamp(f, &["dataServico", "data_servico"]).or(created_at),
        next_preventive_date: pick_date(
            f,
            &["dataProximaManutencaoPreventiva", "data_proxima_manutencao_preventiva"],
        ),
        hours_until_next_preventive: pick_i64(
            f,
            &["horasAteProximaManutencaoPreventiva", "horas_ate_proxima_manutencao_preventiva"],
        )
        .and_then(|h| u32::try_from(h).ok()),
        hourly_rate: pick_decimal(f, &["valorHoraTecnica", "valor_hora_tecnica"]),
        travel_km: pick_i64(f, &["kmQuantidade", "km_quantidade"]).and_then(|k| u32::try_from(k).ok()),
        start_time: pick_string(f, &["horaInicio", "hora_inicio"]),
        end_time: pick_string(f, &["horaTermino", "hora_termino"]),
        notes: pick_string(f, &["observacoes"]),
        created_at,
    }
}

pub fn encode(report: &ServiceReport) -> Fields {
    let mut f = Fields::new();
    let mut both = |camel: &str, snake: &str, value: Value| {
        f.insert(camel.to_string(), value.clone());
        f.insert(snake.to_string(), value);
    };

    both("clienteId", "cliente_id", Value::String(report.customer_id.clone()));
    both("maquinaId", "maquina_id", opt_string_value(report.machine_id.as_deref()));
    both("tecnicoId", "tecnico_id", Value::String(report.technician_id.clone()));
    both("tecnicoNome", "tecnico_nome", Value::String(report.technician_name.clone()));
    both(
        "dataServico",
        "data_servico",
        report.service_date.map_or(Value::Null, timestamp_value),
    );
    both(
        "dataProximaManutencaoPreventiva",
        "data_proxima_manutencao_preventiva",
        report
            .next_preventive_date
            .map_or(Value::Null, |d| Value::String(d.format("%Y-%m-%d").to_string())),
    );
    both(
        "horasAteProximaManutencaoPreventiva",
        "horas_ate_proxima_manutencao_preventiva",
        report.hours_until_next_preventive.map_or(Value::Null, Value::from),
    );
    both("valorHoraTecnica", "valor_hora_tecnica", opt_decimal_value(report.hourly_rate));
    both("kmQuantidade", "km_quantidade", report.travel_km.map_or(Value::Null, Value::from));
    both("horaInicio", "hora_inicio", Value::String(report.start_time.clone()));
    both("horaTermino", "hora_termino", Value::String(report.end_time.clone()));

    f.insert("titulo".into(), Value::String(report.title.clone()));
    f.insert("descricao".into(), Value::String(report.description.clone()));
    f.insert("contato".into(), Value::String(report.contact.clone()));
    f.insert("status".into(), Value::String(report.status.as_label().to_string()));
    f.insert("observacoes".into(), Value::String(report.notes.clone()));
    if let Some(created_at) = report.created_at {
        f.insert("created_at".into(), timestamp_value(created_at));
    }
    f
}

#[cfg(test)]
#[path = "service_report_test.rs"]
mod tests;
