/// In-process store
///
/// Holds pets and reminders behind a `tokio::sync::Mutex` and follows the
/// same rules the database enforces: field validation, interval
/// normalization, reminders requiring an existing pet, cascade delete and
/// paired completion fields.

use super::{Store, StoreError, StoreResult};
use async_trait::async_trait;
use chrono::Utc;
use pawminder_shared::models::{
    pet::{CreatePet, Pet},
    reminder::{CreateReminder, Reminder, SetCompletion},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

#[derive(Debug, Default)]
struct Records {
    pets: Vec<Pet>,
    reminders: Vec<Reminder>,
}

/// Store kept entirely in memory
///
/// Clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<Records>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn rejected(errors: ValidationErrors) -> StoreError {
    let mut fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|field| field.to_string())
        .collect();
    fields.sort_unstable();
    StoreError::Rejected(format!("Invalid fields: {}", fields.join(", ")))
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_pets(&self) -> StoreResult<Vec<Pet>> {
        let records = self.records.lock().await;

        let mut pets = records.pets.clone();
        pets.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(pets)
    }

    async fn create_pet(&self, data: CreatePet) -> StoreResult<Pet> {
        data.validate().map_err(rejected)?;

        let pet = Pet {
            id: Uuid::new_v4(),
            user_id: data.user_id,
            name: data.name,
            pet_type: data.pet_type,
            breed: data.breed,
            age: data.age,
            weight: data.weight,
            notes: data.notes,
            image_url: data.image_url,
            created_at: Utc::now(),
        };

        self.records.lock().await.pets.push(pet.clone());
        Ok(pet)
    }

    async fn delete_pet(&self, id: Uuid) -> StoreResult<()> {
        let mut records = self.records.lock().await;

        let before = records.pets.len();
        records.pets.retain(|pet| pet.id != id);
        if records.pets.len() == before {
            return Err(StoreError::NotFound { kind: "Pet", id });
        }

        records.reminders.retain(|reminder| reminder.pet_id != id);
        Ok(())
    }

    async fn list_reminders(&self) -> StoreResult<Vec<Reminder>> {
        let records = self.records.lock().await;

        let mut reminders = records.reminders.clone();
        reminders.sort_by(|a, b| a.due_date.cmp(&b.due_date).then(a.id.cmp(&b.id)));
        Ok(reminders)
    }

    async fn create_reminder(&self, data: CreateReminder) -> StoreResult<Reminder> {
        data.validate().map_err(rejected)?;
        let data = data.normalized();

        let mut records = self.records.lock().await;
        if !records.pets.iter().any(|pet| pet.id == data.pet_id) {
            return Err(StoreError::Rejected(
                "Referenced record does not exist".to_string(),
            ));
        }

        let reminder = Reminder {
            id: Uuid::new_v4(),
            pet_id: data.pet_id,
            title: data.title,
            description: data.description,
            reminder_type: data.reminder_type,
            due_date: data.due_date,
            is_recurring: data.is_recurring,
            recurring_interval: data.recurring_interval,
            priority: data.priority,
            is_completed: false,
            completed_at: None,
            created_at: Utc::now(),
        };

        records.reminders.push(reminder.clone());
        Ok(reminder)
    }

    async fn set_completion(&self, id: Uuid, update: SetCompletion) -> StoreResult<Reminder> {
        let mut records = self.records.lock().await;

        let slot = records
            .reminders
            .iter_mut()
            .find(|reminder| reminder.id == id)
            .ok_or(StoreError::NotFound {
                kind: "Reminder",
                id,
            })?;

        *slot = slot.clone().with_completion(update, Utc::now());
        Ok(slot.clone())
    }

    async fn delete_reminder(&self, id: Uuid) -> StoreResult<()> {
        let mut records = self.records.lock().await;

        let before = records.reminders.len();
        records.reminders.retain(|reminder| reminder.id != id);
        if records.reminders.len() == before {
            return Err(StoreError::NotFound {
                kind: "Reminder",
                id,
            });
        }

        Ok(())
    }
}
