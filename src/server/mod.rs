pub mod app;
pub mod errors;
pub mod handlers;

use clap::Subcommand;

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum MigrateDirection {
    Up,
    Down,
    Fresh,
}

use crate::config::ServerConfig;
use crate::database::{connection::*, migrations::Migrator};
use anyhow::Result;
use sea_orm_migration::prelude::*;
use tracing::info;

pub async fn start_server(config: &ServerConfig) -> Result<()> {
    let database_url = get_database_url(Some(&config.database));
    let db = establish_connection(&database_url).await?;

    // Create or upgrade the schema before accepting requests
    setup_database(&db).await?;

    let app = app::create_app(db, config.cors_origin.as_deref()).await?;

    log_routes();

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    info!("Server running on http://0.0.0.0:{}", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}

fn log_routes() {
    info!("Endpoints:");
    info!("  GET    /health                       - Health check");
    info!("  GET    /                             - Dashboard summary");
    info!("  GET    /categories                   - List categories");
    info!("  POST   /categories                   - Create category");
    info!("  GET    /categories/:id               - Category and its attributes");
    info!("  DELETE /categories/:id               - Delete category");
    info!("  POST   /categories/:id/attributes    - Add attribute");
    info!("  GET    /products                     - List products");
    info!("  POST   /products                     - Create product");
    info!("  GET    /products/:id/edit            - Product with attribute values");
    info!("  POST   /products/:id/edit            - Save attribute values");
    info!("  DELETE /products/:id                 - Delete product");
    info!("  GET    /seed                         - Seed demo catalog");
}

pub async fn migrate_database(database_path: &str, direction: MigrateDirection) -> Result<()> {
    let database_url = get_database_url(Some(database_path));
    let db = establish_connection(&database_url).await?;

    match direction {
        MigrateDirection::Up => {
            info!("Running migrations up");
            Migrator::up(&db, None).await?;
        }
        MigrateDirection::Down => {
            info!("Running migrations down");
            Migrator::down(&db, None).await?;
        }
        MigrateDirection::Fresh => {
            info!("Running fresh migrations (down then up)");
            Migrator::down(&db, None).await?;
            Migrator::up(&db, None).await?;
        }
    }

    info!("Database migration completed");
    Ok(())
}

/// Seed the demo catalog into the given database, creating the schema if needed.
pub async fn seed_database(database_path: &str) -> Result<bool> {
    let database_url = get_database_url(Some(database_path));
    let db = establish_connection(&database_url).await?;
    setup_database(&db).await?;

    let created = crate::AppContext::new(db).seed_demo_data().await?;
    if created {
        info!("Demo catalog created");
    } else {
        info!("Demo catalog already present");
    }
    Ok(created)
}
