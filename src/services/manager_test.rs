use super::*;
use crate::db::MemoryStore;
use crate::models::customer::CustomerForm;
use crate::services::customers::{CustomerManager, CustomerSchema};

fn form(name: &str) -> CustomerForm {
    CustomerForm {
        name: name.to_string(),
        ..Default::default()
    }
}

async fn manager_with(names: &[&str]) -> (Arc<MemoryStore>, CustomerManager) {
    let store = Arc::new(MemoryStore::new());
    let mut manager = CustomerManager::new(store.clone(), CustomerSchema::new("clientes"));
    for name in names {
        manager.open_new();
        manager.submit(form(name)).await.unwrap();
    }
    (store, manager)
}

#[tokio::test]
async fn load_failure_clears_the_list() {
    let (store, mut manager) = manager_with(&["Acme"]).await;
    assert_eq!(manager.records().len(), 1);

    store.set_failing(true);
    let err = manager.load().await.unwrap_err();
    assert!(matches!(err, AppError::LoadFailed(_)));
    assert!(manager.records().is_empty());
}

#[tokio::test]
async fn empty_search_shows_everything() {
    let (_, mut manager) = manager_with(&["Acme", "Beta"]).await;
    manager.set_search("   ");
    assert_eq!(manager.visible().len(), 2);

    manager.set_search("BET");
    let visible = manager.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].name, "Beta");
    assert_eq!(manager.search(), "BET");
}

#[tokio::test]
async fn invalid_form_is_not_written() {
    let (store, mut manager) = manager_with(&[]).await;
    manager.open_new();
    let err = manager.submit(form("   ")).await.unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
    assert_eq!(store.count("clientes").await, 0);
    assert_eq!(manager.editor(), Some(&Editor::Creating));
}

#[tokio::test]
async fn write_failure_keeps_editor_open() {
    let (store, mut manager) = manager_with(&["Acme"]).await;
    let id = manager.records()[0].id.clone();
    manager.open_edit(&id).unwrap();

    store.set_failing(true);
    let err = manager.submit(form("Acme 2")).await.unwrap_err();
    assert!(matches!(err, AppError::SaveFailed(_)));
    assert!(matches!(manager.editor(), Some(Editor::Editing(c)) if c.id == id));
}

#[tokio::test]
async fn submit_without_open_editor_fails() {
    let (_, mut manager) = manager_with(&[]).await;
    let err = manager.submit(form("Acme")).await.unwrap_err();
    assert!(matches!(err, AppError::InternalServerError(_)));
}

#[tokio::test]
async fn edit_replaces_in_place_and_closes_editor() {
    let (store, mut manager) = manager_with(&["Acme"]).await;
    let original = manager.records()[0].clone();

    manager.open_edit(&original.id).unwrap();
    let saved = manager.submit(form("Acme Ltda")).await.unwrap();

    assert_eq!(saved.id, original.id);
    assert_eq!(saved.created_at, original.created_at);
    assert!(manager.editor().is_none());
    assert_eq!(store.count("clientes").await, 1);
    assert_eq!(manager.records()[0].name, "Acme Ltda");
}

#[tokio::test]
async fn open_edit_of_unknown_id_is_not_found() {
    let (_, mut manager) = manager_with(&[]).await;
    assert!(matches!(manager.open_edit("nope"), Err(AppError::NotFound(_))));
    assert!(manager.editor().is_none());
}

#[tokio::test]
async fn close_discards_the_editor() {
    let (_, mut manager) = manager_with(&[]).await;
    manager.open_new();
    manager.close();
    assert!(manager.editor().is_none());
}

#[tokio::test]
async fn declined_delete_does_nothing() {
    let (store, mut manager) = manager_with(&["Acme"]).await;
    let id = manager.records()[0].id.clone();

    let deleted = manager.delete(&id, Confirmation::Declined).await.unwrap();
    assert!(!deleted);
    assert_eq!(store.count("clientes").await, 1);
}

#[tokio::test]
async fn confirmed_delete_removes_and_reloads() {
    let (store, mut manager) = manager_with(&["Acme", "Beta"]).await;
    let id = manager.records()[0].id.clone();

    let deleted = manager.delete(&id, Confirmation::from(true)).await.unwrap();
    assert!(deleted);
    assert_eq!(store.count("clientes").await, 1);
    assert_eq!(manager.records().len(), 1);
    assert_eq!(manager.records()[0].name, "Beta");
}

#[tokio::test]
async fn failed_delete_leaves_list_stale() {
    let (store, mut manager) = manager_with(&["Acme"]).await;
    let id = manager.records()[0].id.clone();

    store.set_failing(true);
    let err = manager.delete(&id, Confirmation::Confirmed).await.unwrap_err();
    assert!(matches!(err, AppError::DeleteFailed(_)));
    assert_eq!(manager.records().len(), 1);
}
