use std::sync::Arc;

use crate::config::Config;
use crate::gateway::{GatewaySettings, ListHandler, PutHandler};
use crate::storage::ObjectStore;

/// Shared state for the HTTP surface. The store client is built once and
/// handed to both handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub list_handler: Arc<ListHandler>,
    pub put_handler: Arc<PutHandler>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn ObjectStore>) -> Self {
        let settings = GatewaySettings::new(
            config.storage.s3_bucket.clone(),
            config.gateway.status_mode,
        );

        Self {
            list_handler: Arc::new(ListHandler::new(store.clone(), settings.clone())),
            put_handler: Arc::new(PutHandler::new(store, settings)),
            config,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub storage: String,
    pub bucket: String,
}
