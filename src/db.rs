pub mod document_store;
pub use document_store::{Document, DocumentStore, Fields, StoreError, DOCUMENT_ID_KEY};
pub mod memory_store;
pub use memory_store::MemoryStore;
pub mod postgres_store;
pub use postgres_store::PostgresStore;
pub mod firestore_store;
pub use firestore_store::FirestoreStore;
