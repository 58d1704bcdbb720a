//! # Polis DB
//!
//! Storage for the Polis registry: the repository traits, a PostgreSQL
//! implementation on SQLx, an in-process implementation, and the factory
//! that picks one at start-up.
//!
//! # Example
//!
//! ```ignore
//! use polis_config::{DatabaseConfig, RepositoryKind};
//! use polis_db::RepositoryFactory;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let kind = RepositoryKind::from_env()?;
//!     let repository = RepositoryFactory::create(kind, DatabaseConfig::from_env().ok().as_ref()).await?;
//!     repository.health_check().await?;
//!     Ok(())
//! }
//! ```

pub mod factory;
pub mod memory;
pub mod postgres;
pub mod repository;

use polis_config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

pub use factory::RepositoryFactory;
pub use memory::MemoryRepository;
pub use postgres::PostgresRepository;
pub use repository::{
    ClearedCounts, CourseRepository, Repository, RepositoryError, RepositoryResult,
    StudentRepository, TeacherRepository, UnitOfWork,
};
pub use sqlx::PgPool;

/// Opens a PostgreSQL connection pool.
pub async fn init_db_pool(config: &DatabaseConfig) -> RepositoryResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;

    info!(max_connections = config.max_connections, "Database pool ready");
    Ok(pool)
}

/// Applies the migrations under `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> RepositoryResult<()> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}
