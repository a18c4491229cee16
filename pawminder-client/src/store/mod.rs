/// Record stores the presentation layer reads from and writes to
///
/// The [`Store`] trait is the seam between the view logic and persistence.
/// Two implementations ship with the crate:
///
/// - [`HostedStore`]: the `/rest/v1` collection surface over HTTP
/// - [`MemoryStore`]: an in-process store with the same ordering and
///   cascade rules, used for tests and offline runs
///
/// # Contract
///
/// - `list_pets` returns newest first; `list_reminders` returns soonest due
///   first. Callers rely on this order and never re-sort.
/// - `create_reminder` stores interval `none` for non-recurring reminders.
/// - `set_completion` writes `is_completed` and `completed_at` together.
/// - `delete_pet` also removes the pet's reminders.
/// - Every failure is returned; nothing is retried or swallowed.

use async_trait::async_trait;
use pawminder_shared::models::{
    pet::{CreatePet, Pet},
    reminder::{CreateReminder, Reminder, SetCompletion},
};
use uuid::Uuid;

pub mod hosted;
pub mod memory;

pub use hosted::HostedStore;
pub use memory::MemoryStore;

/// Store error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// The request never produced a response
    #[error("Request failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status
    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body was not what we expected
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// No record with this ID
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: Uuid },

    /// The store refused the write (validation or constraint)
    #[error("Rejected: {0}")]
    Rejected(String),
}

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Pet and reminder persistence
#[async_trait]
pub trait Store: Send + Sync {
    /// Pets visible to this client, newest first
    async fn list_pets(&self) -> StoreResult<Vec<Pet>>;

    async fn create_pet(&self, data: CreatePet) -> StoreResult<Pet>;

    /// Deletes a pet together with its reminders
    async fn delete_pet(&self, id: Uuid) -> StoreResult<()>;

    /// All reminders, soonest due first
    async fn list_reminders(&self) -> StoreResult<Vec<Reminder>>;

    async fn create_reminder(&self, data: CreateReminder) -> StoreResult<Reminder>;

    /// Writes the completion flag and its timestamp
    async fn set_completion(&self, id: Uuid, update: SetCompletion) -> StoreResult<Reminder>;

    async fn delete_reminder(&self, id: Uuid) -> StoreResult<()>;
}
