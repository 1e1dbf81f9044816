// src/services/manager.rs

//! O gerenciador genérico de uma coleção: lista, busca, editor e exclusão.
//!
//! Cada aba do painel é um `EntityManager` com um `EntitySchema` diferente.
//! O estado vive só enquanto o gerenciador vive; para ver dados novos é
//! preciso chamar `load` de novo.

use std::collections::HashMap;
use std::sync::Arc;

use validator::Validate;

use crate::{
    common::error::AppError,
    db::{Document, DocumentStore, Fields, StoreError, document_store::collection_id},
};

/// O que muda de uma coleção para outra.
pub trait EntitySchema: Send + Sync {
    type Record: Clone + Send + Sync;
    type Form: Validate + Send;

    /// Chave de ordenação pedida ao store (`None` = ordem do store).
    const ORDER_BY: Option<&'static str>;

    /// Se a coleção raiz vier vazia, procura coleções aninhadas com o mesmo nome.
    const GROUP_FALLBACK: bool = false;

    fn collection(&self) -> &str;

    fn decode(doc: &Document) -> Self::Record;

    fn encode(record: &Self::Record) -> Fields;

    fn id(record: &Self::Record) -> &str;

    fn set_id(record: &mut Self::Record, id: String);

    /// Campos comparados com o termo de busca.
    fn search_fields(record: &Self::Record) -> Vec<&str>;

    /// ID escolhido pelo usuário em vez de gerado pelo store.
    fn natural_id(_record: &Self::Record) -> Option<String> {
        None
    }

    /// Monta o registro a partir do formulário já validado.
    /// `existing` é o registro em edição, `None` na criação.
    fn build(&self, form: Self::Form, existing: Option<&Self::Record>) -> Result<Self::Record, AppError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum Editor<R> {
    Creating,
    Editing(R),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Confirmation::Confirmed
        } else {
            Confirmation::Declined
        }
    }
}

pub struct EntityManager<S: EntitySchema> {
    store: Arc<dyn DocumentStore>,
    schema: S,
    records: Vec<S::Record>,
    // ID -> caminho da coleção (relatórios podem vir de subcoleções)
    paths: HashMap<String, String>,
    search: String,
    editor: Option<Editor<S::Record>>,
}

impl<S: EntitySchema> EntityManager<S> {
    pub fn new(store: Arc<dyn DocumentStore>, schema: S) -> Self {
        Self {
            store,
            schema,
            records: Vec::new(),
            paths: HashMap::new(),
            search: String::new(),
            editor: None,
        }
    }

    /// Recarrega a coleção inteira. Em caso de falha a lista fica vazia.
    pub async fn load(&mut self) -> Result<(), AppError> {
        match self.fetch().await {
            Ok(docs) => {
                self.paths = docs.iter().map(|d| (d.id.clone(), d.path.clone())).collect();
                self.records = docs.iter().map(S::decode).collect();
                tracing::debug!(collection = self.schema.collection(), total = self.records.len(), "coleção carregada");
                Ok(())
            }
            Err(e) => {
                self.clear();
                Err(AppError::LoadFailed(e))
            }
        }
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.paths.clear();
    }

    async fn fetch(&self) -> Result<Vec<Document>, StoreError> {
        let collection = self.schema.collection();
        let docs = self.store.list(collection, S::ORDER_BY).await?;
        if !docs.is_empty() || !S::GROUP_FALLBACK {
            return Ok(docs);
        }

        match self.store.list_group(collection_id(collection)).await {
            Ok(nested) => {
                tracing::info!(collection, total = nested.len(), "coleção raiz vazia, usando subcoleções");
                Ok(nested)
            }
            Err(e) => {
                // A lista vazia da raiz continua valendo
                tracing::warn!(collection, error = %e, "falha ao buscar subcoleções");
                Ok(docs)
            }
        }
    }

    pub fn records(&self) -> &[S::Record] {
        &self.records
    }

    pub fn find(&self, id: &str) -> Option<&S::Record> {
        self.records.iter().find(|r| S::id(r) == id)
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
    }

    #[cfg(test)]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Registros que casam com a busca atual (sem diferenciar maiúsculas).
    pub fn visible(&self) -> Vec<&S::Record> {
        let term = self.search.trim().to_lowercase();
        if term.is_empty() {
            return self.records.iter().collect();
        }
        self.records
            .iter()
            .filter(|r| {
                S::search_fields(r)
                    .iter()
                    .any(|field| field.to_lowercase().contains(&term))
            })
            .collect()
    }

    #[cfg(test)]
    pub fn editor(&self) -> Option<&Editor<S::Record>> {
        self.editor.as_ref()
    }

    pub fn open_new(&mut self) {
        self.editor = Some(Editor::Creating);
    }

    pub fn open_edit(&mut self, id: &str) -> Result<(), AppError> {
        let record = self
            .find(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;
        self.editor = Some(Editor::Editing(record));
        Ok(())
    }

    #[cfg(test)]
    pub fn close(&mut self) {
        self.editor = None;
    }

    /// Valida, grava, recarrega e fecha o editor.
    /// Se a gravação falhar o editor continua aberto.
    pub async fn submit(&mut self, form: S::Form) -> Result<S::Record, AppError> {
        form.validate()?;

        let existing = match &self.editor {
            Some(Editor::Editing(record)) => Some(record.clone()),
            Some(Editor::Creating) => None,
            None => {
                return Err(AppError::InternalServerError(anyhow::anyhow!(
                    "nenhum formulário aberto em {}",
                    self.schema.collection()
                )));
            }
        };

        let mut record = self.schema.build(form, existing.as_ref())?;
        let id = self
            .write(&record, existing.as_ref())
            .await
            .map_err(AppError::SaveFailed)?;
        S::set_id(&mut record, id);

        self.editor = None;
        self.reload_after_write().await;
        Ok(record)
    }

    /// Grava um registro já montado, sem passar pelo editor.
    async fn write(&self, record: &S::Record, existing: Option<&S::Record>) -> Result<String, StoreError> {
        let fields = S::encode(record);
        let collection = self.schema.collection();

        if let Some(existing) = existing {
            let id = S::id(existing);
            self.store.replace(self.path_of(id), id, fields).await?;
            tracing::info!(collection, id, "registro atualizado");
            return Ok(id.to_string());
        }

        let id = match S::natural_id(record) {
            Some(id) => {
                self.store.replace(collection, &id, fields).await?;
                id
            }
            None => self.store.create(collection, fields).await?,
        };
        tracing::info!(collection, %id, "registro criado");
        Ok(id)
    }

    /// Exclui depois da confirmação explícita. Devolve `false` quando o
    /// usuário recusou (nada foi feito).
    pub async fn delete(&mut self, id: &str, confirmation: Confirmation) -> Result<bool, AppError> {
        if confirmation == Confirmation::Declined {
            return Ok(false);
        }
        if self.find(id).is_none() {
            return Err(AppError::NotFound(id.to_string()));
        }

        let path = self.path_of(id).to_string();
        self.store
            .delete(&path, id)
            .await
            .map_err(AppError::DeleteFailed)?;
        tracing::info!(collection = path.as_str(), id, "registro excluído");

        self.reload_after_write().await;
        Ok(true)
    }

    fn path_of(&self, id: &str) -> &str {
        self.paths
            .get(id)
            .map(String::as_str)
            .unwrap_or_else(|| self.schema.collection())
    }

    // A escrita já aconteceu; falha aqui só deixa a lista desatualizada
    async fn reload_after_write(&mut self) {
        if let Err(e) = self.load().await {
            tracing::warn!(collection = self.schema.collection(), error = %e, "falha ao recarregar após gravação");
        }
    }
}

#[cfg(test)]
#[path = "manager_test.rs"]
mod tests;
