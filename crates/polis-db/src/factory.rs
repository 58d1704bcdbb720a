//! Repository selection at start-up.

use std::sync::Arc;

use polis_config::{DatabaseConfig, RepositoryKind};
use tracing::info;

use crate::memory::MemoryRepository;
use crate::postgres::PostgresRepository;
use crate::repository::{Repository, RepositoryError, RepositoryResult};
use crate::{init_db_pool, run_migrations};

pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Creates the repository for `kind`.
    ///
    /// The Postgres backend requires `database` and applies pending
    /// migrations before it is returned.
    pub async fn create(
        kind: RepositoryKind,
        database: Option<&DatabaseConfig>,
    ) -> RepositoryResult<Arc<dyn Repository>> {
        match kind {
            RepositoryKind::Postgres => {
                let config = database.ok_or_else(|| {
                    RepositoryError::Configuration(
                        "Postgres repository requires DATABASE_URL".to_string(),
                    )
                })?;
                let pg = Self::create_postgres(config).await?;
                Ok(pg as Arc<dyn Repository>)
            }
            RepositoryKind::Memory => Ok(Self::create_memory()),
        }
    }

    pub async fn create_postgres(config: &DatabaseConfig) -> RepositoryResult<Arc<PostgresRepository>> {
        let pool = init_db_pool(config).await?;
        run_migrations(&pool).await?;
        Ok(Arc::new(PostgresRepository::new(pool)))
    }

    pub fn create_memory() -> Arc<dyn Repository> {
        info!("Using in-memory repository; data is lost on restart");
        Arc::new(MemoryRepository::new())
    }

    /// Reads `REPOSITORY_TYPE` and `DATABASE_URL`.
    pub async fn from_env() -> RepositoryResult<Arc<dyn Repository>> {
        let kind = RepositoryKind::from_env()
            .map_err(|e| RepositoryError::Configuration(e.to_string()))?;

        let database = match kind {
            RepositoryKind::Postgres => Some(
                DatabaseConfig::from_env().map_err(|e| RepositoryError::Configuration(e.to_string()))?,
            ),
            RepositoryKind::Memory => None,
        };

        Self::create(kind, database.as_ref()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_memory() {
        let repo = RepositoryFactory::create(RepositoryKind::Memory, None).await.unwrap();
        assert_eq!(repo.kind(), RepositoryKind::Memory);
        assert!(repo.health_check().await.is_ok());
    }

    #[tokio::test]
    async fn test_postgres_requires_config() {
        let err = RepositoryFactory::create(RepositoryKind::Postgres, None)
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Configuration(_)));
    }
}
