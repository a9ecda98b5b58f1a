//! Backup export: writes every stored product to a CSV file.
//!
//! Column order is `{product_name, product_price, product_quantity,
//! date_updated}` with the price rendered as `$D.DD` and the date as
//! `M/D/YYYY`. The file is written to a sibling temp path and renamed over
//! the target, so a failed export leaves any previous backup intact.

use crate::db::{DbPool, products};
use crate::errors::Result;
use crate::validate::{format_date, format_price};
use std::fs;
use std::path::Path;
use tracing::{info, instrument};

const BACKUP_HEADER: [&str; 4] = [
    "product_name",
    "product_price",
    "product_quantity",
    "date_updated",
];

/// Exports the whole store to `path`, replacing any previous backup.
/// Returns the number of product rows written.
#[instrument(skip(pool))]
pub fn write_backup<P: AsRef<Path> + std::fmt::Debug>(pool: &DbPool, path: P) -> Result<usize> {
    let path = path.as_ref();
    let products = products::list_all_products(pool)?;

    let tmp_path = path.with_extension("csv.tmp");
    let mut writer = csv::Writer::from_path(&tmp_path)?;
    writer.write_record(BACKUP_HEADER)?;
    for product in &products {
        let price = format_price(product.price_cents);
        let quantity = product.quantity.to_string();
        let updated = format_date(product.updated_on);
        writer.write_record([
            product.name.as_str(),
            price.as_str(),
            quantity.as_str(),
            updated.as_str(),
        ])?;
    }
    writer.flush()?;
    drop(writer);
    fs::rename(&tmp_path, path)?;

    info!("Backed up {} products to {:?}", products.len(), path);
    Ok(products.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::products::insert_product;
    use crate::db::test_utils::{init_test_tracing, setup_test_db, test_record};
    use crate::errors::Result;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_backup_formats_rows_for_display() -> Result<()> {
        init_test_tracing();
        let pool = setup_test_db()?;
        insert_product(&pool, &test_record("Widget", 7, 600, date(2020, 2, 1)))?;

        let dir = tempfile::tempdir()?;
        let backup_path = dir.path().join("backup.csv");
        let written = write_backup(&pool, &backup_path)?;
        assert_eq!(written, 1);

        let contents = fs::read_to_string(&backup_path)?;
        let mut lines = contents.lines();
        assert_eq!(
            lines.next(),
            Some("product_name,product_price,product_quantity,date_updated")
        );
        assert_eq!(lines.next(), Some("Widget,$6.00,7,2/1/2020"));
        assert_eq!(lines.next(), None);
        Ok(())
    }

    #[test]
    fn test_backup_overwrites_previous_file() -> Result<()> {
        init_test_tracing();
        let pool = setup_test_db()?;
        insert_product(&pool, &test_record("Widget", 7, 600, date(2020, 2, 1)))?;

        let dir = tempfile::tempdir()?;
        let backup_path = dir.path().join("backup.csv");
        fs::write(&backup_path, "stale contents")?;

        write_backup(&pool, &backup_path)?;
        let contents = fs::read_to_string(&backup_path)?;
        assert!(contents.starts_with("product_name,"));
        assert!(contents.contains("Widget"));
        Ok(())
    }

    #[test]
    fn test_backup_of_empty_store_writes_header_only() -> Result<()> {
        init_test_tracing();
        let pool = setup_test_db()?;

        let dir = tempfile::tempdir()?;
        let backup_path = dir.path().join("backup.csv");
        let written = write_backup(&pool, &backup_path)?;
        assert_eq!(written, 0);

        let contents = fs::read_to_string(&backup_path)?;
        assert_eq!(
            contents.trim_end(),
            "product_name,product_price,product_quantity,date_updated"
        );
        Ok(())
    }
}
