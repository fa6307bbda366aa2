use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use std::time::Duration;
use tracing::info;

use super::migrations::Migrator;

pub const MEMORY_DATABASE_URL: &str = "sqlite::memory:";

pub async fn establish_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(database_url);

    // An in-memory database lives and dies with its connection, so it gets exactly one
    let max_connections = if database_url == MEMORY_DATABASE_URL { 1 } else { 10 };

    opt.max_connections(max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(true)
        .sqlx_logging_level(tracing::log::LevelFilter::Debug);

    Database::connect(opt).await
}

pub fn get_database_url(database_path: Option<&str>) -> String {
    match database_path {
        Some(":memory:") => MEMORY_DATABASE_URL.to_string(),
        Some(path) => format!("sqlite://{}?mode=rwc", path),
        None => "sqlite://catalog.db?mode=rwc".to_string(),
    }
}

/// Create the catalog tables if they do not exist yet.
///
/// Runs once at startup; safe to call again on an initialised database.
pub async fn setup_database(db: &DatabaseConnection) -> Result<(), DbErr> {
    Migrator::up(db, None).await?;
    info!("Database schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_url() {
        assert_eq!(get_database_url(Some(":memory:")), "sqlite::memory:");
        assert_eq!(
            get_database_url(Some("shop.db")),
            "sqlite://shop.db?mode=rwc"
        );
        assert_eq!(get_database_url(None), "sqlite://catalog.db?mode=rwc");
    }

    #[tokio::test]
    async fn test_setup_is_idempotent() {
        let db = establish_connection(MEMORY_DATABASE_URL).await.unwrap();
        setup_database(&db).await.unwrap();
        setup_database(&db).await.unwrap();
    }
}
