/// Account model and database operations
///
/// Accounts are the identity store behind registration and login. They are
/// created once and read on every login; nothing in PawMinder updates or
/// deletes them.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE accounts (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     email CITEXT NOT NULL,
///     password_hash VARCHAR(255) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     CONSTRAINT accounts_email_key UNIQUE (email)
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use pawminder_shared::models::account::{Account, CreateAccount};
/// use pawminder_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let account = Account::create(&pool, CreateAccount {
///     email: "owner@example.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
/// }).await?;
///
/// let found = Account::find_by_email(&pool, "OWNER@example.com").await?;
/// assert_eq!(found.map(|a| a.id), Some(account.id));
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Name of the unique constraint guarding account emails
///
/// The API layer matches on it to turn an insert failure into a duplicate
/// email error instead of a generic store failure.
pub const EMAIL_UNIQUE_CONSTRAINT: &str = "accounts_email_key";

/// A registered account
///
/// Passwords are stored as Argon2id hashes, never in plaintext. The hash is
/// skipped on serialization so an `Account` can be returned to clients as-is.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    /// Unique account ID
    pub id: Uuid,

    /// Email address (case-insensitive via CITEXT, unique)
    pub email: String,

    /// Argon2id password hash (PHC string)
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// When the account was registered
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new account
#[derive(Debug, Clone)]
pub struct CreateAccount {
    /// Email address
    pub email: String,

    /// Argon2id password hash (NOT the plaintext password)
    pub password_hash: String,
}

impl Account {
    /// Inserts a new account
    ///
    /// No existence check is made beforehand: a second registration with the
    /// same email is rejected by the `accounts_email_key` constraint and
    /// surfaces as `sqlx::Error::Database`.
    pub async fn create(pool: &PgPool, data: CreateAccount) -> Result<Self, sqlx::Error> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email::TEXT AS email, password_hash, created_at
            "#,
        )
        .bind(data.email)
        .bind(data.password_hash)
        .fetch_one(pool)
        .await?;

        Ok(account)
    }

    /// Finds an account by email address (case-insensitive)
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use pawminder_shared::models::account::Account;
    /// # use sqlx::PgPool;
    /// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
    /// if let Some(account) = Account::find_by_email(&pool, "owner@example.com").await? {
    ///     println!("Found account: {}", account.id);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, email::TEXT AS email, password_hash, created_at
            FROM accounts
            WHERE email = $1::CITEXT
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(account)
    }
}
