use std::sync::Arc;

use polis_config::CorsConfig;
use polis_db::{Repository, RepositoryFactory};

#[derive(Clone, Debug)]
pub struct AppState {
    pub repository: Arc<dyn Repository>,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(repository: Arc<dyn Repository>, cors_config: CorsConfig) -> Self {
        Self {
            repository,
            cors_config,
        }
    }
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let repository = RepositoryFactory::from_env().await?;
    tracing::info!(repository = %repository.kind(), "Repository initialized");

    Ok(AppState {
        repository,
        cors_config: CorsConfig::from_env(),
    })
}
