use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use catalog::config::CatalogConfig;
use catalog::server;

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    #[clap(short, long, global = true)]
    log_level: Option<String>,
    /// Optional TOML config file
    #[clap(short, long, global = true)]
    config: Option<PathBuf>,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Serve {
        #[clap(short, long)]
        port: Option<u16>,
        #[clap(short, long)]
        database: Option<String>,
        #[clap(long)]
        cors_origin: Option<String>,
    },
    Db {
        #[clap(subcommand)]
        command: DbCommands,
    },
    /// Insert the demo categories and attributes
    Seed {
        #[clap(short, long)]
        database: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum DbCommands {
    Init {
        #[clap(short, long)]
        database: Option<String>,
    },
    Migrate {
        #[clap(subcommand)]
        direction: server::MigrateDirection,
        #[clap(short, long)]
        database: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    let config = CatalogConfig::load(args.config.as_deref())?;

    let log_level = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.log_level.clone());
    setup_logging(&log_level);

    match args.command {
        Commands::Serve {
            port,
            database,
            cors_origin,
        } => {
            let config = config.with_overrides(port, database, cors_origin);
            info!(
                "Starting server on port {} with database {}",
                config.server.port, config.server.database
            );
            server::start_server(&config.server).await?;
        }
        Commands::Db { command } => match command {
            DbCommands::Init { database } => {
                let config = config.with_overrides(None, database, None);
                info!("Initializing database: {}", config.server.database);
                server::migrate_database(&config.server.database, server::MigrateDirection::Up)
                    .await?;
            }
            DbCommands::Migrate {
                direction,
                database,
            } => {
                let config = config.with_overrides(None, database, None);
                info!("Running database migration: {:?}", direction);
                server::migrate_database(&config.server.database, direction).await?;
            }
        },
        Commands::Seed { database } => {
            let config = config.with_overrides(None, database, None);
            info!("Seeding database: {}", config.server.database);
            server::seed_database(&config.server.database).await?;
        }
    }

    Ok(())
}

fn setup_logging(log_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_directives(log_level)))
        .without_time()
        .init();
}

/// Filter directives for the configured level; SQL statement logging follows it.
fn log_directives(log_level: &str) -> String {
    let log_level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let level = log_level.as_str().to_lowercase();
    format!("sqlx={0},sea_orm={0},{0}", level)
}
