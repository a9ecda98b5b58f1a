use dotenvy::dotenv;
use std::{env, io};
use store_inventory::errors::Result;
use store_inventory::{config, db, import, menu, reconcile};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (non-fatal, env vars can be set externally)
    dotenv().ok();

    // 3. Load the application configuration
    let config_path = env::var("INVENTORY_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let app_config = config::load_config(&config_path)?;
    info!("Successfully processed application configuration.");

    // 4. Initialize the database
    let pool = db::init_db(&app_config.database_path)
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    // 5. Import and reconcile the inventory CSV before any interactive work
    let records = import::read_inventory_csv(&app_config.inventory_csv)
        .inspect_err(|e| error!("Failed to import {}: {}", app_config.inventory_csv, e))?;
    reconcile::reconcile(&pool, &records)
        .inspect_err(|e| error!("Failed to reconcile imported records: {}", e))?;

    // 6. Run the interactive session on stdin/stdout
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    menu::run_session(&pool, &app_config, &mut input, &mut output)?;

    Ok(())
}
