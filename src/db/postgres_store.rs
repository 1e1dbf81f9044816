// src/db/postgres_store.rs

use async_trait::async_trait;
use sqlx::{types::Json, FromRow, PgPool};
use uuid::Uuid;

use super::document_store::{
    collection_id, sort_documents, Document, DocumentStore, Fields, StoreError, DOCUMENT_ID_KEY,
};

// Uma tabela só guarda todas as coleções. `collection_path` é o caminho
// completo ("relatorios" ou "clientes/abc/relatorios"); `collection` é o
// último segmento, usado nas consultas de collection group.
const CREATE_DOCUMENTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS documents (
    collection_path TEXT NOT NULL,
    collection      TEXT NOT NULL,
    id              TEXT NOT NULL,
    data            JSONB NOT NULL DEFAULT '{}'::jsonb,
    created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at      TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    PRIMARY KEY (collection_path, id)
)
"#;

const CREATE_COLLECTION_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS documents_collection_idx ON documents (collection)";

#[derive(Debug, FromRow)]
struct DocumentRow {
    collection_path: String,
    id: String,
    data: Json<Fields>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Document::new(row.id, row.collection_path, row.data.0)
    }
}

/// Store de documentos em JSONB no Postgres.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Cria a tabela se ainda não existir. Não há ferramenta de migração.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_DOCUMENTS_TABLE).execute(&self.pool).await?;
        sqlx::query(CREATE_COLLECTION_INDEX).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for PostgresStore {
    async fn list(&self, collection: &str, order_by: Option<&str>) -> Result<Vec<Document>, StoreError> {
        let rows = match order_by {
            Some(key) if key == DOCUMENT_ID_KEY => {
                sqlx::query_as::<_, DocumentRow>(
                    "SELECT collection_path, id, data FROM documents WHERE collection_path = $1 ORDER BY id ASC",
                )
                .bind(collection)
                .fetch_all(&self.pool)
                .await?
            }
            _ => {
                sqlx::query_as::<_, DocumentRow>(
                    "SELECT collection_path, id, data FROM documents WHERE collection_path = $1 ORDER BY created_at ASC",
                )
                .bind(collection)
                .fetch_all(&self.pool)
                .await?
            }
        };

        let mut docs: Vec<Document> = rows.into_iter().map(Document::from).collect();

        // A ordem do JSONB mistura tipos; ordenamos aqui com a mesma regra dos outros stores
        if let Some(key) = order_by.filter(|k| *k != DOCUMENT_ID_KEY) {
            sort_documents(&mut docs, key);
        }
        Ok(docs)
    }

    async fn list_group(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT collection_path, id, data
            FROM documents
            WHERE collection = $1
            ORDER BY collection_path ASC, id ASC
            "#,
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Document::from).collect())
    }

    async fn create(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        let id = Uuid::new_v4().simple().to_string();
        sqlx::query(
            "INSERT INTO documents (collection_path, collection, id, data) VALUES ($1, $2, $3, $4)",
        )
        .bind(collection)
        .bind(collection_id(collection))
        .bind(&id)
        .bind(Json(&fields))
        .execute(&self.pool)
        .await?;

        tracing::debug!(collection, %id, "documento criado");
        Ok(id)
    }

    async fn replace(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO documents (collection_path, collection, id, data)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (collection_path, id)
            DO UPDATE SET data = EXCLUDED.data, updated_at = NOW()
            "#,
        )
        .bind(collection)
        .bind(collection_id(collection))
        .bind(id)
        .bind(Json(&fields))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection_path = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            tracing::debug!(collection, id, "exclusão de documento inexistente");
        }
        Ok(())
    }
}
