//! The interactive session: menu loop plus the view/add/backup operations.
//!
//! Everything here is generic over `BufRead`/`Write` so a whole session can be
//! scripted in tests. Validation failures re-prompt the same field; only I/O
//! and database failures propagate. EOF on the input ends the session the same
//! way `q` does.

use crate::backup;
use crate::config::AppConfig;
use crate::db::{DbPool, products};
use crate::errors::{Error, Result};
use crate::models::{Product, ProductRecord};
use crate::validate::{self, format_date, format_price};
use chrono::{Local, NaiveDate};
use std::io::{BufRead, Write};
use tracing::{info, warn};

/// Runs the menu loop until the user quits or input reaches EOF.
pub fn run_session<R: BufRead, W: Write>(
    pool: &DbPool,
    config: &AppConfig,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    loop {
        writeln!(output)?;
        writeln!(output, "======== MENU ========")?;
        writeln!(output, "v - View product details")?;
        writeln!(output, "a - Add a new product")?;
        writeln!(output, "b - Backup the database")?;
        writeln!(output, "q - Quit")?;
        writeln!(output, "======================")?;
        let Some(choice) = prompt(input, output, "What would you like to do? ")? else {
            break;
        };

        match choice.trim().to_lowercase().as_str() {
            "v" => view_product(pool, input, output)?,
            "a" => add_product(pool, input, output, Local::now().date_naive())?,
            "b" => run_backup(pool, config, output)?,
            "q" => {
                writeln!(output, "GOODBYE!")?;
                break;
            }
            other => {
                writeln!(
                    output,
                    "The option '{}' is not valid. Please choose v, a, b, or q.",
                    other
                )?;
            }
        }
    }
    Ok(())
}

/// Prompts for a product id until a valid one is entered, then displays the
/// product. An empty store just prints a notice; there is no id to ask for.
pub fn view_product<R: BufRead, W: Write>(
    pool: &DbPool,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    let ids = products::get_all_product_ids(pool)?;
    if ids.is_empty() {
        writeln!(output, "There are no products in the database yet.")?;
        return Ok(());
    }

    loop {
        writeln!(output, "Id options: {:?}", ids)?;
        let Some(raw) = prompt(input, output, "Product id: ")? else {
            return Ok(());
        };
        match validate::parse_identifier(&raw, &ids) {
            Ok(id) => {
                let product = products::get_product_by_id(pool, id)?.ok_or_else(|| {
                    Error::Database(format!("Product id {} disappeared mid-operation", id))
                })?;
                display_product(output, &product)?;
                return Ok(());
            }
            Err(e) => {
                writeln!(output, "{}. Please try again.", e)?;
            }
        }
    }
}

fn display_product<W: Write>(output: &mut W, product: &Product) -> Result<()> {
    writeln!(output)?;
    writeln!(output, "==== PRODUCT DETAILS ====")?;
    writeln!(output, "Id:           {}", product.id)?;
    writeln!(output, "Name:         {}", product.name)?;
    writeln!(output, "Price:        {}", format_price(product.price_cents))?;
    writeln!(output, "Quantity:     {}", product.quantity)?;
    writeln!(output, "Date updated: {}", format_date(product.updated_on))?;
    writeln!(output, "=========================")?;
    Ok(())
}

/// Adds a product, or offers to update it if the name already exists.
/// `today` becomes the new `updated_on` either way.
pub fn add_product<R: BufRead, W: Write>(
    pool: &DbPool,
    input: &mut R,
    output: &mut W,
    today: NaiveDate,
) -> Result<()> {
    let Some(name) = prompt_name(input, output)? else {
        return Ok(());
    };

    match products::get_product_by_name(pool, &name)? {
        Some(existing) => {
            writeln!(
                output,
                "The product '{}' already exists. It was last updated on {}.",
                name,
                format_date(existing.updated_on)
            )?;
            let Some(choice) =
                prompt(input, output, "Do you want to update the product details? (y/n): ")?
            else {
                return Ok(());
            };
            if !choice.trim().eq_ignore_ascii_case("y") {
                writeln!(output, "No changes made.")?;
                return Ok(());
            }

            let Some(price_cents) = prompt_price(input, output)? else {
                return Ok(());
            };
            let Some(quantity) = prompt_quantity(input, output)? else {
                return Ok(());
            };
            products::update_product(pool, existing.id, quantity, price_cents, today)?;
            info!("Interactive update of product '{}' (id {})", name, existing.id);
            writeln!(output, "Product {} updated successfully!", name)?;
        }
        None => {
            let Some(price_cents) = prompt_price(input, output)? else {
                return Ok(());
            };
            let Some(quantity) = prompt_quantity(input, output)? else {
                return Ok(());
            };
            let record = ProductRecord {
                name: name.clone(),
                quantity,
                price_cents,
                updated_on: today,
            };
            let id = products::insert_product(pool, &record)?;
            info!("Interactive add of product '{}' (id {})", name, id);
            writeln!(output, "Product {} added successfully!", name)?;
        }
    }
    Ok(())
}

fn run_backup<W: Write>(pool: &DbPool, config: &AppConfig, output: &mut W) -> Result<()> {
    match backup::write_backup(pool, &config.backup_csv) {
        Ok(count) => {
            writeln!(
                output,
                "Backup completed successfully! ({} products written to {})",
                count, config.backup_csv
            )?;
        }
        Err(e) => {
            // The export renames over the old file only on success, so the
            // previous backup is still intact here.
            warn!("Backup to {} failed: {}", config.backup_csv, e);
            writeln!(
                output,
                "Backup failed: {}. The previous backup was left untouched.",
                e
            )?;
        }
    }
    Ok(())
}

// Prompt-and-validate loops. Each returns Ok(None) on EOF so callers can bail
// out of a half-finished operation without an error.

fn prompt_name<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Option<String>> {
    loop {
        let Some(raw) = prompt(input, output, "Product name: ")? else {
            return Ok(None);
        };
        match validate::parse_name(&raw) {
            Ok(name) => return Ok(Some(name)),
            Err(e) => writeln!(output, "{}. Please try again.", e)?,
        }
    }
}

fn prompt_price<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Option<i64>> {
    loop {
        let Some(raw) = prompt(input, output, "Product price (e.g. 10.99 or $10.99): ")? else {
            return Ok(None);
        };
        match validate::parse_price(&raw) {
            Ok(cents) => return Ok(Some(cents)),
            Err(e) => writeln!(output, "{}. Please try again.", e)?,
        }
    }
}

fn prompt_quantity<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Option<i64>> {
    loop {
        let Some(raw) = prompt(input, output, "Product quantity: ")? else {
            return Ok(None);
        };
        match validate::parse_quantity(&raw) {
            Ok(quantity) => return Ok(Some(quantity)),
            Err(e) => writeln!(output, "{}. Please try again.", e)?,
        }
    }
}

/// Writes `text` as a prompt (no trailing newline), flushes, and reads one
/// line. Returns `Ok(None)` once the input is exhausted.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    text: &str,
) -> Result<Option<String>> {
    write!(output, "{}", text)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}
