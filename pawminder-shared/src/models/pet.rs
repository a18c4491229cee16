/// Pet model and database operations
///
/// Pets are created by their owner, listed, and deleted. There is no update
/// operation. Deleting a pet removes its reminders through the
/// `ON DELETE CASCADE` on `reminders.pet_id`; this module issues a single
/// `DELETE` and relies on the store for the cascade.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE pets (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID REFERENCES accounts(id) ON DELETE SET NULL,
///     name VARCHAR(255) NOT NULL,
///     "type" VARCHAR(100) NOT NULL,
///     breed VARCHAR(255) NOT NULL DEFAULT '',
///     age INTEGER NOT NULL DEFAULT 0 CHECK (age >= 0),
///     weight DOUBLE PRECISION NOT NULL DEFAULT 0 CHECK (weight >= 0),
///     notes TEXT NOT NULL DEFAULT '',
///     image_url VARCHAR(1024) NOT NULL DEFAULT '',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use pawminder_shared::models::pet::{CreatePet, Pet};
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, owner: Uuid) -> Result<(), sqlx::Error> {
/// let pet = Pet::create(&pool, CreatePet {
///     user_id: Some(owner),
///     name: "Rex".to_string(),
///     pet_type: "Dog".to_string(),
///     ..Default::default()
/// }).await?;
///
/// let pets = Pet::list_by_user(&pool, owner).await?;
/// assert_eq!(pets[0].id, pet.id);
/// # Ok(())
/// # }
/// ```

use super::order::{Order, SortColumn};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;
use validator::Validate;

const PET_COLUMNS: &str =
    r#"id, user_id, name, "type", breed, age, weight, notes, image_url, created_at"#;

/// A registered pet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Pet {
    /// Unique pet ID
    pub id: Uuid,

    /// Owning account, if any
    pub user_id: Option<Uuid>,

    /// Pet name
    pub name: String,

    /// Species label ("Dog", "Cat", ...)
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub pet_type: String,

    /// Breed (empty when not given)
    pub breed: String,

    /// Age in years, 0 meaning unknown
    pub age: i32,

    /// Weight, 0 meaning unknown
    pub weight: f64,

    /// Free-text notes
    pub notes: String,

    /// Image reference
    pub image_url: String,

    /// When the pet was registered
    pub created_at: DateTime<Utc>,
}

impl Pet {
    /// Age, or `None` when recorded as unknown (0)
    pub fn known_age(&self) -> Option<i32> {
        (self.age > 0).then_some(self.age)
    }

    /// Weight, or `None` when recorded as unknown (0)
    pub fn known_weight(&self) -> Option<f64> {
        (self.weight > 0.0).then_some(self.weight)
    }
}

/// Input for registering a pet
///
/// Only `name` and `type` are required on the wire; everything else falls
/// back to its "unknown" value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct CreatePet {
    /// Owning account
    #[serde(default)]
    pub user_id: Option<Uuid>,

    #[validate(
        length(max = 255, message = "Name must be at most 255 characters"),
        custom(function = "crate::models::non_blank")
    )]
    pub name: String,

    #[serde(rename = "type")]
    #[validate(
        length(max = 100, message = "Type must be at most 100 characters"),
        custom(function = "crate::models::non_blank")
    )]
    pub pet_type: String,

    #[serde(default)]
    #[validate(length(max = 255, message = "Breed must be at most 255 characters"))]
    pub breed: String,

    #[serde(default)]
    #[validate(range(min = 0, message = "Age cannot be negative"))]
    pub age: i32,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "Weight cannot be negative"))]
    pub weight: f64,

    #[serde(default)]
    pub notes: String,

    #[serde(default)]
    #[validate(length(max = 1024, message = "Image URL must be at most 1024 characters"))]
    pub image_url: String,
}

/// Columns pets can be listed by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PetColumn {
    CreatedAt,
    Name,
}

impl SortColumn for PetColumn {
    fn column_name(&self) -> &'static str {
        match self {
            PetColumn::CreatedAt => "created_at",
            PetColumn::Name => "name",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "created_at" => Some(PetColumn::CreatedAt),
            "name" => Some(PetColumn::Name),
            _ => None,
        }
    }
}

/// Default pet ordering: newest first
pub fn default_pet_order() -> Order<PetColumn> {
    Order::desc(PetColumn::CreatedAt)
}

/// Optional filters for [`Pet::list`]
#[derive(Debug, Clone, Default)]
pub struct PetQuery {
    /// Restrict to pets owned by this account
    pub user_id: Option<Uuid>,
}

impl Pet {
    /// Inserts a pet exactly as given
    pub async fn create(pool: &PgPool, data: CreatePet) -> Result<Self, sqlx::Error> {
        let pet = sqlx::query_as::<_, Pet>(&format!(
            r#"
            INSERT INTO pets (user_id, name, "type", breed, age, weight, notes, image_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {PET_COLUMNS}
            "#
        ))
        .bind(data.user_id)
        .bind(data.name)
        .bind(data.pet_type)
        .bind(data.breed)
        .bind(data.age)
        .bind(data.weight)
        .bind(data.notes)
        .bind(data.image_url)
        .fetch_one(pool)
        .await?;

        Ok(pet)
    }

    /// Lists the pets owned by an account, newest first
    pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        Self::list(
            pool,
            &PetQuery {
                user_id: Some(user_id),
            },
            default_pet_order(),
        )
        .await
    }

    /// Lists pets matching `filter` in the requested order
    ///
    /// Ties on the sort column are broken by `id` so repeated listings are
    /// stable.
    pub async fn list(
        pool: &PgPool,
        filter: &PetQuery,
        order: Order<PetColumn>,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {PET_COLUMNS} FROM pets"));

        if let Some(user_id) = filter.user_id {
            query.push(" WHERE user_id = ").push_bind(user_id);
        }

        query.push(format!(" ORDER BY {}, id", order.to_sql()));

        let pets = query.build_query_as::<Pet>().fetch_all(pool).await?;

        Ok(pets)
    }

    /// Deletes a pet (and, through the store, its reminders)
    ///
    /// Returns true if a pet was removed.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pets WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
