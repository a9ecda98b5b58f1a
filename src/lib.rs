//! `store-inventory` - An interactive command-line store inventory manager
//!
//! This crate imports product records from a CSV file into a local SQLite
//! store (merging by product name with a newest-date-wins rule), then offers
//! an interactive menu for viewing a product by id, adding or updating a
//! product, and exporting the store to a CSV backup.

// Deny the most critical lints that could lead to bugs or security issues
#![deny(
    // Security and correctness
    unsafe_code,
    unsafe_op_in_unsafe_fn,

    // Code quality - things that are almost always bugs
    unreachable_code,
    unreachable_patterns,
    unused_must_use,

    // Documentation - broken links are bugs
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
)]
// Warn on things that should be fixed but aren't necessarily bugs
#![warn(
    // Clippy categories for overall code quality
    clippy::all,
    clippy::pedantic,

    // Correctness
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::exit,
    clippy::float_cmp,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,

    // Style consistency
    clippy::enum_glob_use,
    clippy::inconsistent_struct_constructor,
    clippy::semicolon_if_nothing_returned,
    clippy::wildcard_imports,

    // Future compatibility
    future_incompatible,
    rust_2018_idioms,
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,  // Common pattern in Rust
    clippy::missing_errors_doc,        // Will add gradually
    clippy::missing_panics_doc,        // Will add gradually
)]

/// CSV backup export of the whole store
pub mod backup;
/// TOML configuration with sensible default file paths
pub mod config;
/// SQLite store: connection handle, schema, and product queries
pub mod db;
/// Unified error types and result handling
pub mod errors;
/// Fixed-schema CSV import into normalized records
pub mod import;
/// Interactive menu loop and the view/add/backup operations
pub mod menu;
/// The `Product` row type and its pre-persistence counterpart
pub mod models;
/// Newest-date-wins merge of imported records into the store
pub mod reconcile;
/// Field validators and display formatters
pub mod validate;
