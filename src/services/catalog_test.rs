use super::*;
use crate::db::MemoryStore;
use std::sync::Arc;

fn paint_form(code: &str, description: &str) -> PaintForm {
    PaintForm {
        code: code.into(),
        description: description.into(),
        manufacturer: "Epson".into(),
        color_hex: Some("#00ffff".into()),
    }
}

#[tokio::test]
async fn paints_are_keyed_and_ordered_by_code() {
    let store = Arc::new(MemoryStore::new());
    let mut paints = PaintManager::new(store.clone(), PaintSchema::new("tintas"));

    for code in ["T-2", "T-1"] {
        paints.open_new();
        paints.submit(paint_form(code, "Ciano")).await.unwrap();
    }

    let codes: Vec<&str> = paints.records().iter().map(|p| p.code.as_str()).collect();
    assert_eq!(codes, ["T-1", "T-2"]);
    assert_eq!(paints.records()[0].color_hex.as_deref(), Some("#00FFFF"));
}

#[tokio::test]
async fn editing_keeps_the_original_code() {
    let store = Arc::new(MemoryStore::new());
    let mut paints = PaintManager::new(store.clone(), PaintSchema::new("tintas"));
    paints.open_new();
    paints.submit(paint_form("T-1", "Ciano")).await.unwrap();

    paints.open_edit("T-1").unwrap();
    let saved = paints.submit(paint_form("T-999", "Magenta")).await.unwrap();

    assert_eq!(saved.code, "T-1");
    assert_eq!(paints.records().len(), 1);
    assert_eq!(paints.records()[0].description, "Magenta");
}

#[tokio::test]
async fn code_with_slash_is_rejected() {
    let store = Arc::new(MemoryStore::new());
    let mut solvents = SolventManager::new(store.clone(), SolventSchema::new("solventes"));
    solvents.open_new();
    let form = SolventForm {
        code: "S/1".into(),
        description: String::new(),
        manufacturer: String::new(),
    };
    let err = solvents.submit(form).await.unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
    assert_eq!(store.count("solventes").await, 0);
}

#[tokio::test]
async fn search_matches_code_or_description() {
    let store = Arc::new(MemoryStore::new());
    let mut solvents = SolventManager::new(store, SolventSchema::new("solventes"));
    for (code, description) in [("S-1", "Limpeza"), ("S-2", "Diluente")] {
        solvents.open_new();
        solvents
            .submit(SolventForm {
                code: code.into(),
                description: description.into(),
                manufacturer: String::new(),
            })
            .await
            .unwrap();
    }

    solvents.set_search("dilu");
    let visible: Vec<&str> = solvents.visible().iter().map(|s| s.code.as_str()).collect();
    assert_eq!(visible, ["S-2"]);

    solvents.set_search("s-1");
    assert_eq!(solvents.visible().len(), 1);
}
