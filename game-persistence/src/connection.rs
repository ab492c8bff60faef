use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection, DbErr};
use tracing::info;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://dictionarydle.db?mode=rwc";

/// `DATABASE_URL` if set and non-empty, otherwise the local SQLite file.
pub fn database_url(configured: Option<String>) -> String {
    configured
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
}

pub async fn connect_to_database() -> Result<DatabaseConnection, DbErr> {
    let database_url = database_url(std::env::var("DATABASE_URL").ok());

    Database::connect(&database_url).await
}

pub async fn connect_to_memory_database() -> Result<DatabaseConnection, DbErr> {
    Database::connect("sqlite::memory:").await
}

pub async fn connect_and_migrate() -> Result<DatabaseConnection, DbErr> {
    let db = connect_to_database().await?;
    Migrator::up(&db, None).await?;
    info!("Database ready, migrations applied");
    Ok(db)
}
