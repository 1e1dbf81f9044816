// src/db/memory_store.rs

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::document_store::{
    collection_id, sort_documents, Document, DocumentStore, Fields, StoreError,
};

// Caminho da coleção -> (ID -> campos)
type Collections = HashMap<String, BTreeMap<String, Fields>>;

/// Store de documentos em memória do processo.
/// Usado nos testes e no modo demonstração (`DOCUMENT_STORE=memory`).
#[derive(Clone, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<Collections>>,
    failing: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    /// Faz toda operação seguinte falhar com `Unavailable` (simula queda do store).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    #[cfg(test)]
    /// Grava um documento numa coleção aninhada, como o app mobile faz
    /// com "clientes/{id}/relatorios".
    pub async fn insert_nested(&self, collection_path: &str, id: &str, fields: Fields) {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection_path.to_string())
            .or_default()
            .insert(id.to_string(), fields);
    }

    #[cfg(test)]
    pub async fn count(&self, collection: &str) -> usize {
        let collections = self.collections.read().await;
        collections.get(collection).map_or(0, BTreeMap::len)
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store marcado como indisponível".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list(&self, collection: &str, order_by: Option<&str>) -> Result<Vec<Document>, StoreError> {
        self.check()?;
        let collections = self.collections.read().await;
        let mut docs: Vec<Document> = collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, fields)| Document::new(id.clone(), collection, fields.clone()))
                    .collect()
            })
            .unwrap_or_default();

        if let Some(key) = order_by {
            sort_documents(&mut docs, key);
        }
        Ok(docs)
    }

    async fn list_group(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        self.check()?;
        let collections = self.collections.read().await;
        let mut docs = Vec::new();
        for (path, entries) in collections.iter() {
            if collection_id(path) != collection {
                continue;
            }
            for (id, fields) in entries {
                docs.push(Document::new(id.clone(), path.clone(), fields.clone()));
            }
        }
        // HashMap não tem ordem: estabiliza por caminho e ID
        docs.sort_by(|a, b| (&a.path, &a.id).cmp(&(&b.path, &b.id)));
        Ok(docs)
    }

    async fn create(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        self.check()?;
        let id = Uuid::new_v4().simple().to_string();
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), fields);
        Ok(id)
    }

    async fn replace(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        self.check()?;
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), fields);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.check()?;
        let mut collections = self.collections.write().await;
        if let Some(docs) = collections.get_mut(collection) {
            docs.remove(id);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_store_test.rs"]
mod tests;
