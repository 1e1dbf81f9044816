use super::*;
use serde_json::json;

fn fields(v: serde_json::Value) -> Fields {
    v.as_object().cloned().unwrap()
}

#[tokio::test]
async fn create_then_list_returns_document() {
    let store = MemoryStore::new();
    let id = store.create("clientes", fields(json!({"nome": "Acme"}))).await.unwrap();
    let docs = store.list("clientes", Some("nome")).await.unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].id, id);
    assert_eq!(docs[0].path, "clientes");
    assert_eq!(docs[0].fields["nome"], "Acme");
}

#[tokio::test]
async fn replace_inserts_when_missing_and_overwrites_whole_document() {
    let store = MemoryStore::new();
    store
        .replace("tintas", "T-1", fields(json!({"descricao": "Azul", "fabricante": "X"})))
        .await
        .unwrap();
    store.replace("tintas", "T-1", fields(json!({"descricao": "Verde"}))).await.unwrap();
    let docs = store.list("tintas", None).await.unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].fields["descricao"], "Verde");
    assert!(docs[0].fields.get("fabricante").is_none());
}

#[tokio::test]
async fn delete_only_touches_one_collection() {
    let store = MemoryStore::new();
    store.replace("tintas", "X", Fields::new()).await.unwrap();
    store.replace("solventes", "X", Fields::new()).await.unwrap();
    store.delete("tintas", "X").await.unwrap();
    assert_eq!(store.count("tintas").await, 0);
    assert_eq!(store.count("solventes").await, 1);
    // excluir de novo não é erro
    store.delete("tintas", "X").await.unwrap();
}

#[tokio::test]
async fn list_group_finds_nested_collections_only_by_name() {
    let store = MemoryStore::new();
    store.insert_nested("clientes/c1/relatorios", "r1", Fields::new()).await;
    store.insert_nested("clientes/c2/relatorios", "r2", Fields::new()).await;
    store.insert_nested("clientes/c2/maquinas", "m1", Fields::new()).await;

    assert!(store.list("relatorios", None).await.unwrap().is_empty());
    let group = store.list_group("relatorios").await.unwrap();
    let ids: Vec<&str> = group.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, ["r1", "r2"]);
}

#[tokio::test]
async fn failing_store_rejects_everything() {
    let store = MemoryStore::new();
    store.set_failing(true);
    assert!(matches!(store.list("clientes", None).await, Err(StoreError::Unavailable(_))));
    assert!(store.create("clientes", Fields::new()).await.is_err());
    store.set_failing(false);
    assert!(store.list("clientes", None).await.is_ok());
}
