// src/db/document_store.rs

use std::cmp::Ordering;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

/// Os campos crus de um documento, exatamente como estão no store.
pub type Fields = Map<String, Value>;

/// Chave especial de ordenação: o próprio ID do documento (igual ao Firestore).
pub const DOCUMENT_ID_KEY: &str = "__name__";

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    // Caminho da coleção que contém o documento.
    // Ex: "relatorios" ou "clientes/abc123/relatorios"
    pub path: String,
    pub fields: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, path: impl Into<String>, fields: Fields) -> Self {
        Self { id: id.into(), path: path.into(), fields }
    }
}

#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("store remoto indisponível: {0}")]
    Unavailable(String),

    #[error("{0}")]
    Backend(String),

    #[error("documento inválido: {0}")]
    Decode(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::Unavailable(e.to_string())
            }
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                StoreError::Decode(e.to_string())
            }
            _ => StoreError::Backend(e.to_string()),
        }
    }
}

/// O gateway do banco de documentos, compartilhado por todos os managers.
///
/// Toda operação é única (sem streams nem assinaturas): para ver dados novos
/// o chamador precisa chamar `list` de novo.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Lista a coleção de nível raiz, ordenada por `order_by` quando informado.
    async fn list(&self, collection: &str, order_by: Option<&str>) -> Result<Vec<Document>, StoreError>;

    /// Consulta "collection group": toda coleção aninhada com esse nome,
    /// em qualquer profundidade.
    async fn list_group(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// Insere e devolve o ID gerado.
    async fn create(&self, collection: &str, fields: Fields) -> Result<String, StoreError>;

    /// Substitui o documento inteiro; cria se o ID ainda não existe.
    async fn replace(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError>;

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;
}

/// Ordena em memória pela chave pedida. Documentos sem valor na chave vão
/// para o fim, mantendo a ordem relativa.
pub fn sort_documents(docs: &mut [Document], order_by: &str) {
    if order_by == DOCUMENT_ID_KEY {
        docs.sort_by(|a, b| a.id.cmp(&b.id));
        return;
    }
    docs.sort_by(|a, b| compare_values(a.fields.get(order_by), b.fields.get(order_by)));
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or_default();
            let y = y.as_f64().unwrap_or_default();
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        // Tipos diferentes: números antes de textos, o resto por último
        (Some(Value::Number(_)), Some(_)) => Ordering::Less,
        (Some(_), Some(Value::Number(_))) => Ordering::Greater,
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}

/// Último segmento de um caminho de coleção ("clientes/abc/relatorios" -> "relatorios").
pub fn collection_id(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
#[path = "document_store_test.rs"]
mod tests;
