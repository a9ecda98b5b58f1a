use crate::db::{DbPool, lock_conn};
use crate::errors::Result;
use crate::models::{Product, ProductRecord};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::{debug, info, instrument, trace};

/// Maps a `SELECT id, name, quantity, price_cents, updated_on` row.
fn map_product_row(row: &Row<'_>) -> rusqlite::Result<Product> {
    Ok(Product {
        id: row.get(0)?,
        name: row.get(1)?,
        quantity: row.get(2)?,
        price_cents: row.get(3)?,
        updated_on: row.get(4)?,
    })
}

// Connection-level variants below let the reconciler batch its work inside a
// single transaction; the pool-level functions wrap them for the interactive
// operations, which commit per call.

pub(crate) fn insert_product_conn(conn: &Connection, record: &ProductRecord) -> Result<i64> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO products (name, quantity, price_cents, updated_on) VALUES (?1, ?2, ?3, ?4)",
    )?;
    let id = stmt.insert(params![
        record.name,
        record.quantity,
        record.price_cents,
        record.updated_on,
    ])?;
    Ok(id)
}

pub(crate) fn update_product_conn(
    conn: &Connection,
    id: i64,
    quantity: i64,
    price_cents: i64,
    updated_on: NaiveDate,
) -> Result<()> {
    let mut stmt = conn.prepare_cached(
        "UPDATE products SET quantity = ?1, price_cents = ?2, updated_on = ?3 WHERE id = ?4",
    )?;
    stmt.execute(params![quantity, price_cents, updated_on, id])?;
    Ok(())
}

pub(crate) fn get_product_by_name_conn(conn: &Connection, name: &str) -> Result<Option<Product>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, name, quantity, price_cents, updated_on FROM products WHERE name = ?1",
    )?;
    let product = stmt
        .query_row(params![name], map_product_row)
        .optional()?;
    Ok(product)
}

/// Inserts a new product and returns its store-assigned id.
///
/// # Errors
///
/// Returns `Error::Rusqlite` if the name violates the UNIQUE constraint or the
/// statement otherwise fails, and `Error::Database` if the lock is poisoned.
#[instrument(skip(pool))]
pub fn insert_product(pool: &DbPool, record: &ProductRecord) -> Result<i64> {
    let conn = lock_conn(pool)?;
    let id = insert_product_conn(&conn, record)?;
    info!(
        "Added new product '{}' (ID: {}) with price {} cents, quantity {}",
        record.name, id, record.price_cents, record.quantity
    );
    Ok(id)
}

/// Overwrites quantity, price, and updated date of an existing product.
/// Name and id are immutable once created.
#[instrument(skip(pool))]
pub fn update_product(
    pool: &DbPool,
    id: i64,
    quantity: i64,
    price_cents: i64,
    updated_on: NaiveDate,
) -> Result<()> {
    let conn = lock_conn(pool)?;
    update_product_conn(&conn, id, quantity, price_cents, updated_on)?;
    info!(
        "Updated product id {}: quantity = {}, price_cents = {}, updated_on = {}",
        id, quantity, price_cents, updated_on
    );
    Ok(())
}

/// Fetches a product by its unique name, the business key used by the
/// reconciler and the add operation.
#[instrument(skip(pool))]
pub fn get_product_by_name(pool: &DbPool, name: &str) -> Result<Option<Product>> {
    let conn = lock_conn(pool)?;
    let product = get_product_by_name_conn(&conn, name)?;
    debug!(
        "Product lookup by name '{}': {:?}",
        name,
        product.as_ref().map(|p| p.id)
    );
    Ok(product)
}

/// Fetches a product by its store-assigned id.
#[instrument(skip(pool))]
pub fn get_product_by_id(pool: &DbPool, id: i64) -> Result<Option<Product>> {
    let conn = lock_conn(pool)?;
    let mut stmt = conn.prepare_cached(
        "SELECT id, name, quantity, price_cents, updated_on FROM products WHERE id = ?1",
    )?;
    let product = stmt.query_row(params![id], map_product_row).optional()?;
    debug!("Product lookup by id {}: found = {}", id, product.is_some());
    Ok(product)
}

/// Lists every product id currently in the store, in id order. The view
/// operation validates user input against this set.
#[instrument(skip(pool))]
pub fn get_all_product_ids(pool: &DbPool) -> Result<Vec<i64>> {
    let conn = lock_conn(pool)?;
    let mut stmt = conn.prepare_cached("SELECT id FROM products ORDER BY id")?;
    let ids = stmt
        .query_map([], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<i64>>>()?;
    trace!("Fetched {} product ids", ids.len());
    Ok(ids)
}

/// Lists all products in id order, for the backup export.
#[instrument(skip(pool))]
pub fn list_all_products(pool: &DbPool) -> Result<Vec<Product>> {
    let conn = lock_conn(pool)?;
    let mut stmt = conn.prepare_cached(
        "SELECT id, name, quantity, price_cents, updated_on FROM products ORDER BY id",
    )?;
    let products = stmt
        .query_map([], map_product_row)?
        .collect::<rusqlite::Result<Vec<Product>>>()?;
    debug!("Fetched {} products", products.len());
    Ok(products)
}
