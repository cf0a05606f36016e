use crate::sample::{COLLECTION, employees};
use anyhow::{Context, Result};
use shelf::store::Driver;

/// Writes the sample employees into the `users` collection, one record per name.
///
/// # Errors
/// Returns an error on the first record that cannot be written.
pub(crate) fn seed(db: &Driver) -> Result<()> {
    let users = employees();

    for user in &users {
        db.write(COLLECTION, &user.name, user)
            .with_context(|| format!("Failed to seed '{}'", user.name))?;
    }

    println!("✅ Seeded {} records into '{COLLECTION}'", users.len());

    Ok(())
}
