// src/services/dashboard.rs

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::{
    auth::SessionContext,
    dashboard::{DashboardView, MenuItem, Tab},
};

/// A aba ativa de cada sessão. Só uma por usuário; o padrão é "clientes".
#[derive(Clone, Default)]
pub struct DashboardService {
    active_tabs: Arc<RwLock<HashMap<String, Tab>>>,
}

impl DashboardService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn active_tab(&self, user_id: &str) -> Tab {
        let tabs = self.active_tabs.read().await;
        tabs.get(user_id).copied().unwrap_or_default()
    }

    pub async fn select_tab(&self, user_id: &str, tab: Tab) {
        let mut tabs = self.active_tabs.write().await;
        tabs.insert(user_id.to_string(), tab);
        tracing::debug!(user_id, ?tab, "aba selecionada");
    }

    pub async fn view(&self, session: &SessionContext) -> DashboardView {
        let active = self.active_tab(&session.user_id).await;
        DashboardView {
            menu: Tab::ALL
                .iter()
                .map(|tab| MenuItem {
                    id: *tab,
                    label: tab.label(),
                    active: *tab == active,
                })
                .collect(),
            active_tab: active,
            user: session.clone(),
        }
    }
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
