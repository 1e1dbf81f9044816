// src/models/dashboard.rs

use serde::{Deserialize, Serialize};

use super::auth::SessionContext;

// As abas da barra lateral. Só uma fica montada por vez.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Clientes,
    Maquinas,
    Relatorios,
    Tintas,
    Solventes,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Clientes,
        Tab::Maquinas,
        Tab::Relatorios,
        Tab::Tintas,
        Tab::Solventes,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Clientes => "Clientes",
            Tab::Maquinas => "Máquinas",
            Tab::Relatorios => "Relatórios",
            Tab::Tintas => "Tintas",
            Tab::Solventes => "Solventes",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: Tab,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub menu: Vec<MenuItem>,
    pub active_tab: Tab,
    pub user: SessionContext,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectTabPayload {
    pub tab: Tab,
}
