/// Database models for PawMinder
///
/// This module contains the persisted records and their CRUD operations.
///
/// # Models
///
/// - `account`: Registered accounts (identity store)
/// - `pet`: Pets, owned by reference to an account
/// - `reminder`: Care reminders, owned by reference to a pet
/// - `order`: `<column>.<direction>` ordering shared by listings
///
/// # Example
///
/// ```no_run
/// use pawminder_shared::models::pet::{CreatePet, Pet};
/// use pawminder_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let pet = Pet::create(&pool, CreatePet {
///     name: "Whiskers".to_string(),
///     pet_type: "Cat".to_string(),
///     ..Default::default()
/// }).await?;
/// # Ok(())
/// # }
/// ```

pub mod account;
pub mod order;
pub mod pet;
pub mod reminder;

use validator::ValidationError;

/// Rejects empty or whitespace-only required text fields
pub(crate) fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some("This field is required".into());
        return Err(error);
    }
    Ok(())
}
