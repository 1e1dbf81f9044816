// src/services/service_reports.rs

//! Relatórios de serviço: o gerenciador genérico mais o que só esta aba tem.
//!
//! - Lê clientes e máquinas junto para agrupar e rotular.
//! - Pré-preenche contato e quilometragem ao escolher o cliente.
//! - Atribui o técnico a partir da sessão, nunca do formulário.

use std::sync::Arc;

use chrono::Utc;
use validator::{ValidationError, ValidationErrors};

use super::customers::{CustomerManager, CustomerSchema};
use super::machines::{self, MachineManager, MachineSchema, UNASSIGNED_LABEL, UNNAMED_CUSTOMER};
use super::manager::{Confirmation, EntityManager, EntitySchema};
use crate::{
    codec,
    common::error::AppError,
    config::Collections,
    db::{Document, DocumentStore, Fields},
    lookup::{DistanceLookup, round_trip_km},
    models::{
        auth::SessionContext,
        customer::{Coordinates, Customer},
        machine::Machine,
        non_empty,
        service_report::{CustomerGroup, ReportRow, ReportsView, ServiceReport, ServiceReportForm},
    },
};

pub struct ReportSchema {
    collection: String,
    session: SessionContext,
}

impl ReportSchema {
    pub fn new(collection: impl Into<String>, session: SessionContext) -> Self {
        Self { collection: collection.into(), session }
    }
}

impl EntitySchema for ReportSchema {
    type Record = ServiceReport;
    type Form = ServiceReportForm;

    const ORDER_BY: Option<&'static str> = None;
    const GROUP_FALLBACK: bool = true;

    fn collection(&self) -> &str {
        &self.collection
    }

    fn decode(doc: &Document) -> ServiceReport {
        codec::service_report::decode(doc)
    }

    fn encode(record: &ServiceReport) -> Fields {
        codec::service_report::encode(record)
    }

    fn id(record: &ServiceReport) -> &str {
        &record.id
    }

    fn set_id(record: &mut ServiceReport, id: String) {
        record.id = id;
    }

    fn search_fields(record: &ServiceReport) -> Vec<&str> {
        vec![record.title.as_str(), record.description.as_str()]
    }

    fn build(&self, form: ServiceReportForm, existing: Option<&ServiceReport>) -> Result<ServiceReport, AppError> {
        Ok(ServiceReport {
            id: existing.map(|r| r.id.clone()).unwrap_or_default(),
            customer_id: form.customer_id.trim().to_string(),
            machine_id: non_empty(form.machine_id),
            title: form.title.trim().to_string(),
            description: form.description.trim().to_string(),
            contact: form.contact.trim().to_string(),
            status: form.status,
            // Quem salva assina
            technician_id: self.session.user_id.clone(),
            technician_name: self.session.technician_name(),
            service_date: Some(form.service_date.unwrap_or_else(Utc::now)),
            next_preventive_date: form.next_preventive_date,
            hours_until_next_preventive: form.hours_until_next_preventive,
            hourly_rate: form.hourly_rate,
            travel_km: form.travel_km,
            start_time: non_empty(form.start_time).unwrap_or_default(),
            end_time: non_empty(form.end_time).unwrap_or_default(),
            notes: non_empty(form.notes).unwrap_or_default(),
            created_at: existing.and_then(|r| r.created_at).or_else(|| Some(Utc::now())),
        })
    }
}

pub struct ReportManager {
    reports: EntityManager<ReportSchema>,
    customers: CustomerManager,
    machines: MachineManager,
    distance: Option<Arc<dyn DistanceLookup>>,
    home_base: Option<Coordinates>,
}

impl ReportManager {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        collections: &Collections,
        session: SessionContext,
        distance: Option<Arc<dyn DistanceLookup>>,
        home_base: Option<Coordinates>,
    ) -> Self {
        Self {
            reports: EntityManager::new(store.clone(), ReportSchema::new(&collections.reports, session)),
            customers: CustomerManager::new(store.clone(), CustomerSchema::new(&collections.customers)),
            machines: MachineManager::new(store, MachineSchema::new(&collections.machines)),
            distance,
            home_base,
        }
    }

    /// Relatórios, clientes e máquinas. Se qualquer um falhar, tudo fica vazio.
    pub async fn load(&mut self) -> Result<(), AppError> {
        let result = self.load_all().await;
        if result.is_err() {
            self.reports.clear();
            self.customers.clear();
            self.machines.clear();
        }
        result
    }

    async fn load_all(&mut self) -> Result<(), AppError> {
        self.reports.load().await?;
        self.customers.load().await?;
        self.machines.load().await
    }

    #[cfg(test)]
    pub fn reports(&self) -> &[ServiceReport] {
        self.reports.records()
    }

    #[cfg(test)]
    pub fn customers(&self) -> &[Customer] {
        self.customers.records()
    }

    pub fn set_search(&mut self, term: &str) {
        self.reports.set_search(term);
    }

    /// Máquinas oferecidas no seletor depois de escolher o cliente.
    pub fn machines_for(&self, customer_id: &str) -> Vec<&Machine> {
        machines::for_customer(self.machines.records(), customer_id)
    }

    /// A listagem agrupada por cliente, já filtrada pela busca.
    pub fn view(&self) -> ReportsView {
        let visible = self.reports.visible();
        let customers = self.customers.records();

        let groups = customers
            .iter()
            .map(|c| CustomerGroup {
                customer_id: Some(c.id.clone()),
                customer_name: group_name(c),
                reports: visible
                    .iter()
                    .filter(|r| r.customer_id == c.id)
                    .map(|r| self.row(r))
                    .collect(),
            })
            .collect();

        // Sem cliente ou com cliente que não existe mais
        let unassigned: Vec<ReportRow> = visible
            .iter()
            .filter(|r| !customers.iter().any(|c| c.id == r.customer_id))
            .map(|r| self.row(r))
            .collect();

        ReportsView {
            groups,
            unassigned: (!unassigned.is_empty()).then(|| CustomerGroup {
                customer_id: None,
                customer_name: UNASSIGNED_LABEL.to_string(),
                reports: unassigned,
            }),
            report_count: self.reports.records().len(),
            customer_count: customers.len(),
            machine_count: self.machines.records().len(),
        }
    }

    /// Visualização somente leitura de um relatório.
    pub fn get(&self, id: &str) -> Result<ReportRow, AppError> {
        self.reports
            .find(id)
            .map(|r| self.row(r))
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }

    fn row(&self, report: &ServiceReport) -> ReportRow {
        ReportRow {
            report: report.clone(),
            customer_name: machines::customer_label(&report.customer_id, self.customers.records()),
            machine_label: machine_label(report.machine_id.as_deref(), self.machines.records()),
        }
    }

    pub fn open_new(&mut self) {
        self.reports.open_new();
    }

    pub fn open_edit(&mut self, id: &str) -> Result<(), AppError> {
        self.reports.open_edit(id)
    }

    #[cfg(test)]
    pub fn editor(&self) -> Option<&super::manager::Editor<ServiceReport>> {
        self.reports.editor()
    }

    /// Formulário novo já apontado para um cliente: título com o nome dele.
    pub async fn new_for_customer(&self, customer_id: &str) -> Result<ServiceReportForm, AppError> {
        let customer = self.customer(customer_id)?;
        let form = ServiceReportForm {
            title: customer.name.clone(),
            ..Default::default()
        };
        self.select_customer(customer_id, form).await
    }

    /// Troca o cliente do formulário e pré-preenche contato e quilometragem.
    /// Falha do serviço de distância não impede nada: o campo fica como estava.
    pub async fn select_customer(
        &self,
        customer_id: &str,
        mut form: ServiceReportForm,
    ) -> Result<ServiceReportForm, AppError> {
        let customer = self.customer(customer_id)?;

        if form.customer_id != customer.id {
            form.machine_id = None;
        }
        form.customer_id = customer.id.clone();

        if form.contact.trim().is_empty() {
            if let Some(phone) = customer.contact_phone() {
                form.contact = phone.to_string();
            }
        }

        if let (Some(lookup), Some(origin), Some(destination)) =
            (&self.distance, self.home_base, customer.coordinates)
        {
            match lookup.driving_distance(origin, destination).await {
                Ok(meters) => form.travel_km = Some(round_trip_km(meters)),
                Err(e) => {
                    tracing::warn!(customer_id, error = %e, "falha ao calcular distância");
                }
            }
        }
        Ok(form)
    }

    fn customer(&self, customer_id: &str) -> Result<&Customer, AppError> {
        self.customers
            .find(customer_id)
            .ok_or_else(|| AppError::NotFound(customer_id.to_string()))
    }

    /// Além das validações do formulário, a máquina escolhida precisa ser
    /// do cliente escolhido.
    pub async fn submit(&mut self, form: ServiceReportForm) -> Result<ServiceReport, AppError> {
        if let Some(machine_id) = form.machine_id.as_deref().filter(|m| !m.trim().is_empty()) {
            let belongs = self
                .machines
                .find(machine_id)
                .is_some_and(|m| m.customer_id == form.customer_id.trim());
            if !belongs {
                let mut err = ValidationError::new("machine_customer_mismatch");
                err.message = Some("a máquina não pertence ao cliente selecionado".into());
                let mut errors = ValidationErrors::new();
                errors.add("machine_id", err);
                return Err(AppError::ValidationError(errors));
            }
        }
        self.reports.submit(form).await
    }

    pub async fn delete(&mut self, id: &str, confirmation: Confirmation) -> Result<bool, AppError> {
        self.reports.delete(id, confirmation).await
    }
}

fn group_name(customer: &Customer) -> String {
    if customer.name.trim().is_empty() {
        UNNAMED_CUSTOMER.to_string()
    } else {
        customer.name.clone()
    }
}

/// "Fabricante Modelo", "-" sem máquina, "[ID: ...]" se a máquina sumiu.
pub fn machine_label(machine_id: Option<&str>, machines: &[Machine]) -> String {
    match machine_id {
        None => "-".to_string(),
        Some(id) => machines
            .iter()
            .find(|m| m.id == id)
            .map(Machine::label)
            .unwrap_or_else(|| machines::dangling_label(id)),
    }
}

#[cfg(test)]
#[path = "service_reports_test.rs"]
mod tests;
