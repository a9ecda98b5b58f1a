//! Merges imported CSV records into the store: newest date wins, keyed by
//! product name. Runs once at startup, before the interactive loop, as a
//! single transaction.

use crate::db::{DbPool, lock_conn, products};
use crate::errors::{Error, Result};
use crate::models::ProductRecord;
use tracing::{debug, info, instrument};

/// What a reconciliation pass did, for the startup log line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub inserted: usize,
    pub updated: usize,
    pub unchanged: usize,
}

/// Applies `records` to the store in order.
///
/// Per record: unknown name is inserted; a known name is overwritten only when
/// the record's date is strictly newer than the stored one (id and name are
/// left untouched); otherwise the stored row is authoritative and nothing
/// happens. The whole batch commits as one transaction.
#[instrument(skip(pool, records))]
pub fn reconcile(pool: &DbPool, records: &[ProductRecord]) -> Result<ReconcileSummary> {
    let mut conn = lock_conn(pool)?;
    let tx = conn
        .transaction()
        .map_err(|e| Error::Database(format!("Failed to start transaction: {}", e)))?;

    let mut summary = ReconcileSummary::default();
    for record in records {
        match products::get_product_by_name_conn(&tx, &record.name)? {
            None => {
                debug!("Inserting new product '{}'", record.name);
                products::insert_product_conn(&tx, record)?;
                summary.inserted += 1;
            }
            Some(existing) if record.updated_on > existing.updated_on => {
                debug!(
                    "Updating product '{}': {} is newer than {}",
                    record.name, record.updated_on, existing.updated_on
                );
                products::update_product_conn(
                    &tx,
                    existing.id,
                    record.quantity,
                    record.price_cents,
                    record.updated_on,
                )?;
                summary.updated += 1;
            }
            Some(existing) => {
                debug!(
                    "Skipping product '{}': stored date {} is not older than {}",
                    record.name, existing.updated_on, record.updated_on
                );
                summary.unchanged += 1;
            }
        }
    }

    tx.commit()
        .map_err(|e| Error::Database(format!("Failed to commit reconciliation: {}", e)))?;
    info!(
        "Reconciled {} records: {} inserted, {} updated, {} unchanged",
        records.len(),
        summary.inserted,
        summary.updated,
        summary.unchanged
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::products::{get_all_product_ids, get_product_by_name};
    use crate::db::test_utils::{init_test_tracing, setup_test_db, test_record};
    use crate::errors::Result;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_import_then_reimport_then_newer_file() -> Result<()> {
        init_test_tracing();
        let pool = setup_test_db()?;

        // Empty store: the row is inserted as-is
        let first = vec![test_record("Widget", 10, 500, date(2020, 1, 1))];
        let summary = reconcile(&pool, &first)?;
        assert_eq!(summary.inserted, 1);

        let widget = get_product_by_name(&pool, "Widget")?.unwrap();
        assert_eq!(widget.quantity, 10);
        assert_eq!(widget.price_cents, 500);
        assert_eq!(widget.updated_on, date(2020, 1, 1));

        // Re-importing the same file is a no-op
        let summary = reconcile(&pool, &first)?;
        assert_eq!(summary.unchanged, 1);
        assert_eq!(summary.inserted + summary.updated, 0);
        assert_eq!(get_all_product_ids(&pool)?.len(), 1);
        assert_eq!(get_product_by_name(&pool, "Widget")?.unwrap(), widget);

        // A later file with a newer date overwrites in place
        let second = vec![test_record("Widget", 7, 600, date(2020, 2, 1))];
        let summary = reconcile(&pool, &second)?;
        assert_eq!(summary.updated, 1);

        let widget_after = get_product_by_name(&pool, "Widget")?.unwrap();
        assert_eq!(widget_after.id, widget.id);
        assert_eq!(widget_after.quantity, 7);
        assert_eq!(widget_after.price_cents, 600);
        assert_eq!(widget_after.updated_on, date(2020, 2, 1));
        Ok(())
    }

    #[test]
    fn test_older_record_never_mutates() -> Result<()> {
        init_test_tracing();
        let pool = setup_test_db()?;

        reconcile(&pool, &[test_record("Widget", 7, 600, date(2020, 2, 1))])?;
        let summary = reconcile(&pool, &[test_record("Widget", 99, 100, date(2019, 12, 31))])?;
        assert_eq!(summary.unchanged, 1);

        let widget = get_product_by_name(&pool, "Widget")?.unwrap();
        assert_eq!(widget.quantity, 7);
        assert_eq!(widget.price_cents, 600);
        assert_eq!(widget.updated_on, date(2020, 2, 1));
        Ok(())
    }

    #[test]
    fn test_equal_date_is_a_no_op() -> Result<()> {
        init_test_tracing();
        let pool = setup_test_db()?;

        reconcile(&pool, &[test_record("Widget", 10, 500, date(2020, 1, 1))])?;
        let summary = reconcile(&pool, &[test_record("Widget", 1, 999, date(2020, 1, 1))])?;
        assert_eq!(summary.unchanged, 1);
        assert_eq!(get_product_by_name(&pool, "Widget")?.unwrap().quantity, 10);
        Ok(())
    }

    #[test]
    fn test_duplicate_names_within_one_batch_resolve_in_file_order() -> Result<()> {
        init_test_tracing();
        let pool = setup_test_db()?;

        // The later row re-queries the state left by the earlier one, so the
        // newest date in the file ends up stored regardless of position.
        let batch = vec![
            test_record("Widget", 10, 500, date(2020, 1, 1)),
            test_record("Widget", 7, 600, date(2020, 2, 1)),
        ];
        let summary = reconcile(&pool, &batch)?;
        assert_eq!(summary.inserted, 1);
        assert_eq!(summary.updated, 1);

        assert_eq!(get_all_product_ids(&pool)?.len(), 1);
        let widget = get_product_by_name(&pool, "Widget")?.unwrap();
        assert_eq!(widget.quantity, 7);
        assert_eq!(widget.updated_on, date(2020, 2, 1));
        Ok(())
    }
}
