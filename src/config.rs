// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use crate::{
    db::{DocumentStore, FirestoreStore, MemoryStore, PostgresStore},
    lookup::{AddressLookup, DistanceLookup, GoogleMapsClient},
    models::customer::Coordinates,
    services::{DashboardService, SessionService, SubmitGuard},
};

// Nomes das coleções. Os padrões são os que o app mobile já usa.
#[derive(Debug, Clone, PartialEq)]
pub struct Collections {
    pub customers: String,
    pub machines: String,
    pub reports: String,
    pub paints: String,
    pub solvents: String,
}

impl Default for Collections {
    fn default() -> Self {
        Self {
            customers: "clientes".into(),
            machines: "maquinas".into(),
            reports: "relatorios".into(),
            paints: "tintas".into(),
            solvents: "solventes".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StoreBackend {
    Postgres { database_url: String },
    Firestore {
        project_id: String,
        api_key: Option<String>,
        access_token: Option<String>,
    },
    Memory,
}

// Tudo que vem do ambiente, lido uma vez na subida
#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub jwt_secret: String,
    pub backend: StoreBackend,
    pub google_maps_api_key: Option<String>,
    // Base do técnico, origem do cálculo de quilometragem
    pub home_base: Option<Coordinates>,
    pub collections: Collections,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Mesmo que `from_env`, mas lendo de qualquer fonte (usado nos testes).
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        // Variável vazia conta como ausente
        let var = |key: &str| get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match var("PORT") {
            Some(p) => p.parse().context("PORT inválida")?,
            None => 3000,
        };
        let jwt_secret = var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;

        let backend = match var("DOCUMENT_STORE").as_deref().unwrap_or("postgres") {
            "postgres" => StoreBackend::Postgres {
                database_url: var("DATABASE_URL").context("DATABASE_URL deve ser definida")?,
            },
            "firestore" => StoreBackend::Firestore {
                project_id: var("FIRESTORE_PROJECT_ID").context("FIRESTORE_PROJECT_ID deve ser definido")?,
                api_key: var("FIRESTORE_API_KEY"),
                access_token: var("FIRESTORE_ACCESS_TOKEN"),
            },
            "memory" => StoreBackend::Memory,
            other => anyhow::bail!("DOCUMENT_STORE desconhecido: {other}"),
        };

        let coordinate = |key: &str| -> anyhow::Result<Option<f64>> {
            var(key)
                .map(|v| v.parse::<f64>().with_context(|| format!("{key} inválida")))
                .transpose()
        };
        let home_base = Coordinates::from_pair(coordinate("TECH_BASE_LAT")?, coordinate("TECH_BASE_LNG")?);

        let defaults = Collections::default();
        let collections = Collections {
            customers: var("COLLECTION_CUSTOMERS").unwrap_or(defaults.customers),
            machines: var("COLLECTION_MACHINES").unwrap_or(defaults.machines),
            reports: var("COLLECTION_REPORTS").unwrap_or(defaults.reports),
            paints: var("COLLECTION_PAINTS").unwrap_or(defaults.paints),
            solvents: var("COLLECTION_SOLVENTS").unwrap_or(defaults.solvents),
        };

        Ok(Self {
            port,
            jwt_secret,
            backend,
            google_maps_api_key: var("GOOGLE_MAPS_API_KEY"),
            home_base,
            collections,
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub store: Arc<dyn DocumentStore>,
    // `None` sem chave do Maps: o formulário segue só com digitação manual
    pub address_lookup: Option<Arc<dyn AddressLookup>>,
    pub distance_lookup: Option<Arc<dyn DistanceLookup>>,
    pub session_service: SessionService,
    pub submit_guard: SubmitGuard,
    pub dashboard: DashboardService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let settings = Settings::from_env()?;
        let store = connect_store(&settings.backend).await?;
        Self::with_store(settings, store)
    }

    /// Monta o gráfico de dependências em cima de um store já pronto.
    pub fn with_store(settings: Settings, store: Arc<dyn DocumentStore>) -> anyhow::Result<Self> {
        let (address_lookup, distance_lookup) = match &settings.google_maps_api_key {
            Some(key) => {
                let maps = Arc::new(GoogleMapsClient::new(key.clone()));
                tracing::info!("✅ Google Maps configurado");
                (
                    Some(maps.clone() as Arc<dyn AddressLookup>),
                    Some(maps as Arc<dyn DistanceLookup>),
                )
            }
            None => {
                tracing::warn!("GOOGLE_MAPS_API_KEY ausente: autocomplete e distância desativados");
                (None, None)
            }
        };

        Ok(Self {
            session_service: SessionService::new(&settings.jwt_secret),
            settings: Arc::new(settings),
            store,
            address_lookup,
            distance_lookup,
            submit_guard: SubmitGuard::new(),
            dashboard: DashboardService::new(),
        })
    }

    pub fn collections(&self) -> &Collections {
        &self.settings.collections
    }
}

async fn connect_store(backend: &StoreBackend) -> anyhow::Result<Arc<dyn DocumentStore>> {
    match backend {
        StoreBackend::Postgres { database_url } => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .acquire_timeout(Duration::from_secs(3))
                .connect(database_url)
                .await?;
            tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

            let store = PostgresStore::new(pool);
            store.ensure_schema().await?;
            Ok(Arc::new(store))
        }
        StoreBackend::Firestore { project_id, api_key, access_token } => {
            tracing::info!(project_id = %project_id, "usando Firestore REST");
            Ok(Arc::new(FirestoreStore::new(project_id, api_key.clone(), access_token.clone())))
        }
        StoreBackend::Memory => {
            tracing::warn!("store em memória: os dados somem ao reiniciar");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
