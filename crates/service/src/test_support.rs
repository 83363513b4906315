#![cfg(test)]
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use migration::MigratorTrait;

/// Fresh, fully migrated database for a single test.
///
/// Each call opens a private in-memory SQLite database, so tests never see each
/// other's rows. A single pooled connection keeps the in-memory schema alive.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let mut opt = ConnectOptions::new("sqlite::memory:".to_string());
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
