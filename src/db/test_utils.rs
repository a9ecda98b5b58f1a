#![allow(dead_code)]
use crate::db::{DbPool, schema};
use crate::errors::{Error, Result};
use crate::models::ProductRecord;
use chrono::NaiveDate;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

pub(crate) fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")),
        )
        .with_test_writer() // Crucial for `cargo test` output
        .try_init(); // Use try_init to avoid panic if already initialized
}

// Fresh in-memory database per test, with the schema applied.
pub(crate) fn setup_test_db() -> Result<DbPool> {
    let conn = Connection::open_in_memory()
        .map_err(|e| Error::Database(format!("Test DB: Failed to open in-memory: {}", e)))?;
    schema::create_tables(&conn)?;
    Ok(Arc::new(Mutex::new(conn)))
}

/// Shorthand for building a normalized record in tests.
pub(crate) fn test_record(
    name: &str,
    quantity: i64,
    price_cents: i64,
    updated_on: NaiveDate,
) -> ProductRecord {
    ProductRecord {
        name: name.to_string(),
        quantity,
        price_cents,
        updated_on,
    }
}
