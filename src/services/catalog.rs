// src/services/catalog.rs

// Tintas e solventes: o código digitado é o ID do documento e não muda
// depois de criado.

use super::manager::{EntityManager, EntitySchema};
use crate::{
    codec,
    common::error::AppError,
    db::{DOCUMENT_ID_KEY, Document, Fields},
    models::{
        catalog::{Paint, PaintForm, Solvent, SolventForm},
        non_empty,
    },
};

pub type PaintManager = EntityManager<PaintSchema>;
pub type SolventManager = EntityManager<SolventSchema>;

pub struct PaintSchema {
    collection: String,
}

impl PaintSchema {
    pub fn new(collection: impl Into<String>) -> Self {
        Self { collection: collection.into() }
    }
}

pub struct SolventSchema {
    collection: String,
}

impl SolventSchema {
    pub fn new(collection: impl Into<String>) -> Self {
        Self { collection: collection.into() }
    }
}

// Na edição o código antigo vence o do formulário
fn effective_code(form_code: &str, existing_code: Option<&str>) -> String {
    existing_code.unwrap_or(form_code).trim().to_string()
}

impl EntitySchema for PaintSchema {
    type Record = Paint;
    type Form = PaintForm;

    const ORDER_BY: Option<&'static str> = Some(DOCUMENT_ID_KEY);

    fn collection(&self) -> &str {
        &self.collection
    }

    fn decode(doc: &Document) -> Paint {
        codec::catalog::decode_paint(doc)
    }

    fn encode(record: &Paint) -> Fields {
        codec::catalog::encode_paint(record)
    }

    fn id(record: &Paint) -> &str {
        &record.code
    }

    fn set_id(record: &mut Paint, id: String) {
        record.code = id;
    }

    fn search_fields(record: &Paint) -> Vec<&str> {
        vec![record.code.as_str(), record.description.as_str()]
    }

    fn natural_id(record: &Paint) -> Option<String> {
        Some(record.code.clone())
    }

    fn build(&self, form: PaintForm, existing: Option<&Paint>) -> Result<Paint, AppError> {
        Ok(Paint {
            code: effective_code(&form.code, existing.map(|p| p.code.as_str())),
            description: form.description.trim().to_string(),
            manufacturer: form.manufacturer.trim().to_string(),
            color_hex: non_empty(form.color_hex).map(|c| c.to_uppercase()),
        })
    }
}

impl EntitySchema for SolventSchema {
    type Record = Solvent;
    type Form = SolventForm;

    const ORDER_BY: Option<&'static str> = Some(DOCUMENT_ID_KEY);

    fn collection(&self) -> &str {
        &self.collection
    }

    fn decode(doc: &Document) -> Solvent {
        codec::catalog::decode_solvent(doc)
    }

    fn encode(record: &Solvent) -> Fields {
        codec::catalog::encode_solvent(record)
    }

    fn id(record: &Solvent) -> &str {
        &record.code
    }

    fn set_id(record: &mut Solvent, id: String) {
        record.code = id;
    }

    fn search_fields(record: &Solvent) -> Vec<&str> {
        vec![record.code.as_str(), record.description.as_str()]
    }

    fn natural_id(record: &Solvent) -> Option<String> {
        Some(record.code.clone())
    }

    fn build(&self, form: SolventForm, existing: Option<&Solvent>) -> Result<Solvent, AppError> {
        Ok(Solvent {
            code: effective_code(&form.code, existing.map(|s| s.code.as_str())),
            description: form.description.trim().to_string(),
            manufacturer: form.manufacturer.trim().to_string(),
        })
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
