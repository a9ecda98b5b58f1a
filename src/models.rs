use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// Based on the "products" table
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: i64, // Primary Key, INTEGER, assigned by the store, never reused
    pub name: String, // TEXT, business key for CSV reconciliation (UNIQUE)
    pub quantity: i64, // INTEGER, non-negative stock count
    pub price_cents: i64, // INTEGER, price in cents to avoid float currency error
    pub updated_on: NaiveDate, // DATE, non-decreasing per name under the merge rule
}

/// A normalized inventory row that has passed validation but is not yet
/// persisted. The importer produces these; the reconciler and the interactive
/// add operation turn them into `Product` rows.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub name: String,
    pub quantity: i64,
    pub price_cents: i64,
    pub updated_on: NaiveDate,
}
