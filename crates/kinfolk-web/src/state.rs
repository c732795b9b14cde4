use std::sync::Arc;

use kinfolk_core::Storage;

use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<Storage>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub async fn new(config: ServerConfig) -> anyhow::Result<Self> {
        let storage = Storage::open(&config.db_path).await?;
        Ok(Self::with_storage(storage, config))
    }

    pub fn with_storage(storage: Storage, config: ServerConfig) -> Self {
        Self {
            storage: Arc::new(storage),
            config: Arc::new(config),
        }
    }
}
