use crate::errors::{Error, Result};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, instrument};

pub mod products;
pub mod schema;
#[cfg(test)]
pub(crate) mod test_utils;

// The app is single-threaded, but Arc<Mutex<Connection>> keeps the handle
// cheap to clone into operations and safe should a caller ever move it.
pub type DbPool = Arc<Mutex<Connection>>;

/// Opens (or creates) the SQLite database at `db_path` and ensures the schema
/// exists.
#[instrument]
pub fn init_db(db_path: &str) -> Result<DbPool> {
    debug!("Initializing database connection to: {}", db_path);
    let conn = Connection::open(db_path)
        .map_err(|e| Error::Database(format!("Failed to open database at {}: {}", db_path, e)))?;

    info!("Database connection opened. Ensuring tables are created...");
    schema::create_tables(&conn)?;

    Ok(Arc::new(Mutex::new(conn)))
}

/// Locks the pool, mapping a poisoned mutex into a database error.
pub(crate) fn lock_conn(pool: &DbPool) -> Result<std::sync::MutexGuard<'_, Connection>> {
    pool.lock()
        .map_err(|_| Error::Database("Failed to acquire DB lock".to_string()))
}
