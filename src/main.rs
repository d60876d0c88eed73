//! TMS Server
//!
//! Main entry point that wires all crates together and starts the server.

use tracing_subscriber::{EnvFilter, fmt};

use tms_core::config::AppConfig;
use tms_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from files and the environment.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("TMS_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Connects the database, applies migrations, and serves until shutdown.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting TMS v{}", env!("CARGO_PKG_VERSION"));

    let db_pool = tms_database::connection::create_pool(&config.database).await?;

    tms_database::migration::run_migrations(&db_pool).await?;

    tms_api::run_server(config, db_pool).await
}
