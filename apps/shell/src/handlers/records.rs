use crate::sample::User;
use anyhow::{Context, Result};
use serde_json::Value;
use shelf::store::Driver;

/// Prints one record as pretty JSON.
///
/// # Errors
/// Returns an error if the record is missing or cannot be decoded.
pub(crate) fn read(db: &Driver, collection: &str, resource: &str) -> Result<()> {
    let value: Value = db.read(collection, resource)?;
    let text = serde_json::to_string_pretty(&value).context("Failed to render record")?;
    println!("{text}");

    Ok(())
}

/// Prints every record of a collection exactly as stored.
///
/// # Errors
/// Returns an error if the collection is missing or unreadable.
pub(crate) fn list(db: &Driver, collection: &str) -> Result<()> {
    let records = db.read_all(collection)?;

    if records.is_empty() {
        println!("ℹ️ Collection '{collection}' is empty.");
        return Ok(());
    }

    for raw in &records {
        println!("{}", String::from_utf8_lossy(raw).trim_end());
    }

    Ok(())
}

/// Decodes every record of a collection as a [`User`] and prints one line per record.
///
/// # Errors
/// Returns an error if the collection is missing or any record is not a `User`.
pub(crate) fn list_decoded(db: &Driver, collection: &str) -> Result<()> {
    let users: Vec<User> = db
        .read_all_as(collection)
        .with_context(|| format!("Failed to decode records of '{collection}'"))?;

    if users.is_empty() {
        println!("ℹ️ Collection '{collection}' is empty.");
        return Ok(());
    }

    for user in &users {
        println!("{user}");
    }

    Ok(())
}

/// Deletes one record, or the whole collection when `resource` is `None`.
///
/// # Errors
/// Returns an error if the target does not exist or cannot be removed.
pub(crate) fn delete(db: &Driver, collection: &str, resource: Option<&str>) -> Result<()> {
    db.delete(collection, resource.unwrap_or_default())?;

    match resource {
        Some(name) => println!("🗑️ Deleted '{collection}/{name}'"),
        None => println!("🗑️ Deleted collection '{collection}'"),
    }

    Ok(())
}
