use std::sync::Arc;

use aula_config::{CorsConfig, HttpConfig, StorageConfig};
use aula_core::storage::{FileStore, LocalFileStore};
use sqlx::PgPool;

use crate::config::database::init_db_pool;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub http_config: HttpConfig,
    pub cors_config: CorsConfig,
    pub storage_config: StorageConfig,
    pub files: Arc<dyn FileStore>,
}

pub async fn init_app_state() -> AppState {
    let storage_config = StorageConfig::from_env();
    let files: Arc<dyn FileStore> = Arc::new(LocalFileStore::new(
        storage_config.upload_dir.clone(),
        storage_config.public_base_url.clone(),
    ));

    AppState {
        db: init_db_pool().await,
        http_config: HttpConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        storage_config,
        files,
    }
}
