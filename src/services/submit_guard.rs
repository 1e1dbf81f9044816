// src/services/submit_guard.rs

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use crate::common::error::AppError;

/// Barra o segundo envio do mesmo formulário enquanto o primeiro não termina
/// (duplo clique no "Salvar").
#[derive(Clone, Default)]
pub struct SubmitGuard {
    in_flight: Arc<Mutex<HashSet<String>>>,
}

/// Enquanto existir, a chave fica ocupada.
#[must_use]
pub struct SubmitTicket {
    key: String,
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl SubmitGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chave: usuário + coleção + registro (ou "novo").
    pub fn acquire(&self, user_id: &str, collection: &str, record_id: Option<&str>) -> Result<SubmitTicket, AppError> {
        let key = format!("{user_id}:{collection}:{}", record_id.unwrap_or("novo"));
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if !in_flight.insert(key.clone()) {
            tracing::warn!(%key, "envio duplicado recusado");
            return Err(AppError::SubmitInFlight(key));
        }
        Ok(SubmitTicket {
            key,
            in_flight: self.in_flight.clone(),
        })
    }
}

impl Drop for SubmitTicket {
    fn drop(&mut self) {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        in_flight.remove(&self.key);
    }
}

#[cfg(test)]
#[path = "submit_guard_test.rs"]
mod tests;
