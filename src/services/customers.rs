// src/services/customers.rs

use chrono::Utc;

use super::manager::{EntityManager, EntitySchema};
use crate::{
    codec,
    common::error::AppError,
    db::{Document, Fields},
    models::{
        customer::{Coordinates, Customer, CustomerForm},
        non_empty,
    },
};

pub type CustomerManager = EntityManager<CustomerSchema>;

pub struct CustomerSchema {
    collection: String,
}

impl CustomerSchema {
    pub fn new(collection: impl Into<String>) -> Self {
        Self { collection: collection.into() }
    }
}

impl EntitySchema for CustomerSchema {
    type Record = Customer;
    type Form = CustomerForm;

    const ORDER_BY: Option<&'static str> = Some("nome");

    fn collection(&self) -> &str {
        &self.collection
    }

    fn decode(doc: &Document) -> Customer {
        codec::customer::decode(doc)
    }

    fn encode(record: &Customer) -> Fields {
        codec::customer::encode(record)
    }

    fn id(record: &Customer) -> &str {
        &record.id
    }

    fn set_id(record: &mut Customer, id: String) {
        record.id = id;
    }

    fn search_fields(record: &Customer) -> Vec<&str> {
        vec![record.name.as_str(), record.tax_document.as_str()]
    }

    fn build(&self, form: CustomerForm, existing: Option<&Customer>) -> Result<Customer, AppError> {
        let phone = form.phone.trim().to_string();
        Ok(Customer {
            id: existing.map(|c| c.id.clone()).unwrap_or_default(),
            name: form.name.trim().to_string(),
            tax_document: form.tax_document.trim().to_string(),
            // O formulário só tem um telefone; o celular acompanha
            mobile: phone.clone(),
            phone,
            email: non_empty(form.email).unwrap_or_default(),
            street_address: form.street_address.trim().to_string(),
            number: form.number.trim().to_string(),
            complement: form.complement.trim().to_string(),
            city: form.city.trim().to_string(),
            state: form.state.trim().to_string(),
            coordinates: Coordinates::from_pair(form.latitude, form.longitude),
            created_at: existing.and_then(|c| c.created_at).or_else(|| Some(Utc::now())),
        })
    }
}

#[cfg(test)]
#[path = "customers_test.rs"]
mod tests;
