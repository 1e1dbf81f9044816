// src/services/machines.rs

use chrono::Utc;

use super::manager::{EntityManager, EntitySchema};
use crate::{
    codec,
    common::error::AppError,
    db::{Document, Fields},
    models::{
        customer::Customer,
        machine::{Machine, MachineForm, MachineListView, MachineRow},
        non_empty,
    },
};

pub type MachineManager = EntityManager<MachineSchema>;

pub const UNASSIGNED_LABEL: &str = "[Sem Cliente]";
pub const UNNAMED_CUSTOMER: &str = "[Cliente sem nome]";

pub struct MachineSchema {
    collection: String,
}

impl MachineSchema {
    pub fn new(collection: impl Into<String>) -> Self {
        Self { collection: collection.into() }
    }
}

impl EntitySchema for MachineSchema {
    type Record = Machine;
    type Form = MachineForm;

    const ORDER_BY: Option<&'static str> = Some("modelo");

    fn collection(&self) -> &str {
        &self.collection
    }

    fn decode(doc: &Document) -> Machine {
        codec::machine::decode(doc)
    }

    fn encode(record: &Machine) -> Fields {
        codec::machine::encode(record)
    }

    fn id(record: &Machine) -> &str {
        &record.id
    }

    fn set_id(record: &mut Machine, id: String) {
        record.id = id;
    }

    fn search_fields(record: &Machine) -> Vec<&str> {
        vec![
            record.model.as_str(),
            record.manufacturer.as_str(),
            record.serial_number.as_str(),
        ]
    }

    fn build(&self, form: MachineForm, existing: Option<&Machine>) -> Result<Machine, AppError> {
        Ok(Machine {
            id: existing.map(|m| m.id.clone()).unwrap_or_default(),
            customer_id: form.customer_id.trim().to_string(),
            manufacturer: form.manufacturer.trim().to_string(),
            model: form.model.trim().to_string(),
            serial_number: form.serial_number.trim().to_string(),
            identification: non_empty(form.identification),
            configuration_code: non_empty(form.configuration_code),
            manufacturing_year: form.manufacturing_year,
            active: form.active,
            created_at: existing.and_then(|m| m.created_at).or_else(|| Some(Utc::now())),
        })
    }
}

/// Rótulo do cliente de uma referência: nome, "[Sem Cliente]" ou o ID cortado.
pub fn customer_label(customer_id: &str, customers: &[Customer]) -> String {
    if customer_id.is_empty() {
        return UNASSIGNED_LABEL.to_string();
    }
    match customers.iter().find(|c| c.id == customer_id) {
        Some(c) if c.name.trim().is_empty() => UNNAMED_CUSTOMER.to_string(),
        Some(c) => c.name.clone(),
        None => dangling_label(customer_id),
    }
}

/// "[ID: abcdefgh...]" para referências que não existem mais.
pub fn dangling_label(id: &str) -> String {
    let short: String = id.chars().take(8).collect();
    format!("[ID: {short}...]")
}

/// Sem cliente ou apontando para um cliente que não existe.
pub fn is_orphan(machine: &Machine, customers: &[Customer]) -> bool {
    machine.customer_id.is_empty() || !customers.iter().any(|c| c.id == machine.customer_id)
}

/// Monta a tabela a partir das máquinas visíveis. O contador de órfãs olha
/// a coleção inteira, não só o filtro.
pub fn list_view(visible: &[&Machine], all: &[Machine], customers: &[Customer]) -> MachineListView {
    let machines: Vec<MachineRow> = visible
        .iter()
        .map(|m| MachineRow {
            machine: (*m).clone(),
            customer_label: customer_label(&m.customer_id, customers),
            orphan: is_orphan(m, customers),
        })
        .collect();

    MachineListView {
        total: machines.len(),
        orphan_count: all.iter().filter(|m| is_orphan(m, customers)).count(),
        machines,
    }
}

/// Máquinas de um cliente (para o seletor do formulário de relatório).
pub fn for_customer<'a>(machines: &'a [Machine], customer_id: &str) -> Vec<&'a Machine> {
    machines.iter().filter(|m| m.customer_id == customer_id).collect()
}

#[cfg(test)]
#[path = "machines_test.rs"]
mod tests;
