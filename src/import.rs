//! CSV import: reads the fixed-schema inventory file into normalized records.
//!
//! Column set is `{product_name, product_quantity, product_price,
//! date_updated}` with a header row. Output preserves file order, which the
//! reconciler relies on when the same name appears twice in one file. Policy:
//! the first bad row aborts the whole import, carrying the line number.

use crate::errors::{Error, Result};
use crate::models::ProductRecord;
use crate::validate;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, instrument};

/// Raw CSV row, one string per column. Fields are normalized through the
/// validators before anything else sees them.
#[derive(Debug, Deserialize)]
struct RawInventoryRow {
    product_name: String,
    product_quantity: String,
    product_price: String,
    date_updated: String,
}

impl RawInventoryRow {
    fn normalize(&self) -> std::result::Result<ProductRecord, crate::errors::ValidationError> {
        Ok(ProductRecord {
            name: validate::parse_name(&self.product_name)?,
            quantity: validate::parse_quantity(&self.product_quantity)?,
            price_cents: validate::parse_price(&self.product_price)?,
            updated_on: validate::parse_date(&self.date_updated)?,
        })
    }
}

/// Reads the inventory CSV at `path` into normalized records, in file order.
///
/// # Errors
///
/// Returns `Error::Csv` for an unreadable file or malformed CSV structure, and
/// `Error::Import` (with the 1-based line number) for the first row whose
/// fields fail validation.
#[instrument]
pub fn read_inventory_csv<P: AsRef<Path> + std::fmt::Debug>(path: P) -> Result<Vec<ProductRecord>> {
    let mut reader = csv::Reader::from_path(path.as_ref())?;

    let mut records = Vec::new();
    for (idx, row) in reader.deserialize().enumerate() {
        // Header occupies line 1; data rows start at line 2
        let line = idx as u64 + 2;
        let raw: RawInventoryRow = row?;
        let record = raw
            .normalize()
            .map_err(|source| Error::Import { line, source })?;
        records.push(record);
    }

    debug!("Read {} inventory records from {:?}", records.len(), path);
    Ok(records)
}
