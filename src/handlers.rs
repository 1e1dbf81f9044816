// src/handlers.rs

// Cada requisição monta o gerenciador da aba, carrega a coleção e executa
// uma ação, como o painel fazia a cada montagem de aba.

pub mod address;
pub mod catalog;
pub mod customers;
pub mod dashboard;
pub mod machines;
pub mod service_reports;

use serde::Deserialize;

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::SessionContext,
    services::{
        manager::{EntityManager, EntitySchema},
        submit_guard::SubmitTicket,
    },
};

// ?q= da caixa de busca
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

// ?confirm=true substitui o confirm() do navegador
#[derive(Debug, Default, Deserialize)]
pub struct DeleteQuery {
    #[serde(default)]
    pub confirm: bool,
}

pub(crate) fn acquire_ticket(
    app_state: &AppState,
    session: &SessionContext,
    collection: &str,
    record_id: Option<&str>,
) -> Result<SubmitTicket, AppError> {
    app_state
        .submit_guard
        .acquire(&session.user_id, collection, record_id)
}

pub(crate) async fn create_entity<S: EntitySchema>(
    manager: &mut EntityManager<S>,
    form: S::Form,
) -> Result<S::Record, AppError> {
    manager.load().await?;
    manager.open_new();
    manager.submit(form).await
}

pub(crate) async fn update_entity<S: EntitySchema>(
    manager: &mut EntityManager<S>,
    id: &str,
    form: S::Form,
) -> Result<S::Record, AppError> {
    manager.load().await?;
    manager.open_edit(id)?;
    manager.submit(form).await
}

pub(crate) async fn delete_entity<S: EntitySchema>(
    manager: &mut EntityManager<S>,
    id: &str,
    confirm: bool,
) -> Result<(), AppError> {
    manager.load().await?;
    if !manager.delete(id, confirm.into()).await? {
        return Err(AppError::ConfirmationRequired);
    }
    Ok(())
}
