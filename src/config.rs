use crate::errors::{Error, Result};
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Deserialize, Debug, Clone)]
pub struct AppConfig {
    #[serde(default = "default_database_path")]
    pub database_path: String,
    /// Source file for the startup import/reconciliation pass.
    #[serde(default = "default_inventory_csv")]
    pub inventory_csv: String,
    /// Destination of the `b` menu option; overwritten on every backup.
    #[serde(default = "default_backup_csv")]
    pub backup_csv: String,
}

fn default_database_path() -> String {
    "inventory.db".to_string()
}

fn default_inventory_csv() -> String {
    "inventory.csv".to_string()
}

fn default_backup_csv() -> String {
    "backup.csv".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            inventory_csv: default_inventory_csv(),
            backup_csv: default_backup_csv(),
        }
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    if !path_ref.exists() {
        tracing::info!(
            "No config file at {:?}, using default paths (inventory.db / inventory.csv / backup.csv).",
            path_ref
        );
        return Ok(AppConfig::default());
    }
    let contents = fs::read_to_string(path_ref)
        .map_err(|e| Error::Config(format!("Failed to read config file {:?}: {}", path_ref, e)))?;
    let app_config: AppConfig = toml::from_str(&contents).map_err(|e| {
        Error::Config(format!(
            "Failed to parse TOML from config file {:?}: {}",
            path_ref, e
        ))
    })?;
    Ok(app_config)
}
