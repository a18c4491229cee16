/// Form input parsing
///
/// Forms hold raw text exactly as entered. `parse` turns them into the
/// shared `Create*` inputs or a list of per-field problems; nothing reaches
/// a store until a form parses cleanly.
///
/// Reminder defaults:
///
/// - priority is `medium` when left blank
/// - the interval is required when recurring and forced to `none` otherwise
/// - date (`YYYY-MM-DD`) and time (`HH:MM`) combine into `YYYY-MM-DDTHH:MM:00`

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use pawminder_shared::models::{
    pet::CreatePet,
    reminder::{CreateReminder, Priority, RecurringInterval, ReminderType, UnknownLabel},
};
use serde::Serialize;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

const MISSING_INTERVAL: &str = "Select how often the reminder repeats";

/// A problem with one form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn push_validation(errors: &mut Vec<FieldError>, result: Result<(), ValidationErrors>) {
    if let Err(validation) = result {
        for (field, problems) in validation.field_errors() {
            for problem in problems {
                let message = problem
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Invalid value".to_string());
                errors.push(FieldError::new(field.to_string(), message));
            }
        }
    }
}

fn finish<T>(value: T, mut errors: Vec<FieldError>) -> Result<T, Vec<FieldError>> {
    if errors.is_empty() {
        Ok(value)
    } else {
        errors.sort_by(|a, b| a.field.cmp(&b.field));
        Err(errors)
    }
}

/// Combines a `YYYY-MM-DD` date and an `HH:MM` time into one timestamp
/// with seconds set to zero
pub fn combine_due(date: &str, time: &str) -> Result<NaiveDateTime, Vec<FieldError>> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| FieldError::new("due_date", "Date must be YYYY-MM-DD"));
    let time = NaiveTime::parse_from_str(time.trim(), "%H:%M")
        .map_err(|_| FieldError::new("due_time", "Time must be HH:MM"));

    match (date, time) {
        (Ok(date), Ok(time)) => Ok(date.and_time(time)),
        (date, time) => Err(date.err().into_iter().chain(time.err()).collect()),
    }
}

/// Pet form fields as entered
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PetForm {
    pub name: String,
    pub pet_type: String,
    pub breed: String,
    pub age: String,
    pub weight: String,
    pub notes: String,
    pub image_url: String,
}

impl PetForm {
    /// Parses the form; blank age and weight mean unknown (0)
    pub fn parse(&self) -> Result<CreatePet, Vec<FieldError>> {
        let mut errors = Vec::new();

        let age = match self.age.trim() {
            "" => 0,
            raw => raw.parse::<i32>().unwrap_or_else(|_| {
                errors.push(FieldError::new("age", "Age must be a whole number"));
                0
            }),
        };

        let weight = match self.weight.trim() {
            "" => 0.0,
            raw => match raw.parse::<f64>() {
                Ok(weight) if weight.is_finite() => weight,
                _ => {
                    errors.push(FieldError::new("weight", "Weight must be a number"));
                    0.0
                }
            },
        };

        let data = CreatePet {
            user_id: None,
            name: self.name.trim().to_string(),
            pet_type: self.pet_type.trim().to_string(),
            breed: self.breed.trim().to_string(),
            age,
            weight,
            notes: self.notes.trim().to_string(),
            image_url: self.image_url.trim().to_string(),
        };

        push_validation(&mut errors, data.validate());
        finish(data, errors)
    }
}

/// Reminder form fields as entered
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderForm {
    pub pet_id: Option<Uuid>,
    pub title: String,
    pub description: String,
    pub reminder_type: String,
    pub due_date: String,
    pub due_time: String,
    pub is_recurring: bool,
    pub recurring_interval: String,
    pub priority: String,
}

impl ReminderForm {
    pub fn parse(&self) -> Result<CreateReminder, Vec<FieldError>> {
        let mut errors = Vec::new();

        let pet_id = self.pet_id.unwrap_or_else(|| {
            errors.push(FieldError::new("pet_id", "Select a pet"));
            Uuid::nil()
        });

        let reminder_type = match self.reminder_type.trim() {
            "" => {
                errors.push(FieldError::new("reminder_type", "Select a reminder type"));
                ReminderType::default()
            }
            raw => raw.parse::<ReminderType>().unwrap_or_else(|e: UnknownLabel| {
                errors.push(FieldError::new("reminder_type", e.to_string()));
                ReminderType::default()
            }),
        };

        let due_date = combine_due(&self.due_date, &self.due_time).unwrap_or_else(|problems| {
            errors.extend(problems);
            NaiveDateTime::default()
        });

        let priority = match self.priority.trim() {
            "" => Priority::Medium,
            raw => raw.parse::<Priority>().unwrap_or_else(|e: UnknownLabel| {
                errors.push(FieldError::new("priority", e.to_string()));
                Priority::Medium
            }),
        };

        let recurring_interval = if self.is_recurring {
            let raw = self.recurring_interval.trim();
            match raw.parse::<RecurringInterval>() {
                Ok(RecurringInterval::None) => {
                    errors.push(FieldError::new("recurring_interval", MISSING_INTERVAL));
                    RecurringInterval::None
                }
                Err(_) if raw.is_empty() => {
                    errors.push(FieldError::new("recurring_interval", MISSING_INTERVAL));
                    RecurringInterval::None
                }
                Ok(interval) => interval,
                Err(e) => {
                    errors.push(FieldError::new("recurring_interval", e.to_string()));
                    RecurringInterval::None
                }
            }
        } else {
            RecurringInterval::None
        };

        let data = CreateReminder {
            pet_id,
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            reminder_type,
            due_date,
            is_recurring: self.is_recurring,
            recurring_interval,
            priority,
        };

        push_validation(&mut errors, data.validate());
        finish(data, errors)
    }
}
