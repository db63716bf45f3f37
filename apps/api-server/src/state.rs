//! Application state - shared across all requests.

use std::collections::HashMap;
use std::sync::Arc;

use lostfound_core::ports::{AiService, ImageStorage, TableService};
use lostfound_infra::{BitableClient, GasImageStorage, OpenRouterClient, TenantTokenCache};

use crate::config::AppConfig;
use crate::handlers::actions::{self, ActionHandler};

/// Shared application state: the three collaborator ports plus the
/// action registry.
#[derive(Clone)]
pub struct AppState {
    pub tables: Arc<dyn TableService>,
    pub storage: Arc<dyn ImageStorage>,
    pub ai: Arc<dyn AiService>,
    pub actions: Arc<HashMap<&'static str, Arc<dyn ActionHandler>>>,
}

impl AppState {
    /// Build the production state. One reqwest client is shared by
    /// every adapter; the token cache is created here and injected
    /// into the table client so it stays process-wide.
    pub fn new(config: &AppConfig) -> Self {
        let http = reqwest::Client::new();
        let tokens = Arc::new(TenantTokenCache::new(http.clone(), config.lark.clone()));
        let tables: Arc<dyn TableService> = Arc::new(BitableClient::new(
            http.clone(),
            tokens,
            config.lark.clone(),
        ));
        let storage: Arc<dyn ImageStorage> = Arc::new(GasImageStorage::new(
            http.clone(),
            config.gas_upload_url.clone(),
        ));
        let ai: Arc<dyn AiService> = Arc::new(OpenRouterClient::new(http, config.ai.clone()));

        Self::with_ports(tables, storage, ai)
    }

    /// State over explicit port implementations; tests use this with
    /// in-memory fakes.
    pub fn with_ports(
        tables: Arc<dyn TableService>,
        storage: Arc<dyn ImageStorage>,
        ai: Arc<dyn AiService>,
    ) -> Self {
        Self {
            tables,
            storage,
            ai,
            actions: Arc::new(actions::registry()),
        }
    }
}
