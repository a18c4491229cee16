/// Reminder endpoints (minimal API)
///
/// # Endpoints
///
/// - `GET /reminders/:pet_id` - A pet's reminders, soonest due first
/// - `POST /reminders` - Create a reminder, returning the stored record

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, State},
    Json,
};
use pawminder_shared::models::reminder::{CreateReminder, Reminder};
use uuid::Uuid;
use validator::Validate;

/// Lists one pet's reminders
pub async fn list_for_pet(
    State(state): State<AppState>,
    Path(pet_id): Path<Uuid>,
) -> ApiResult<Json<Vec<Reminder>>> {
    let reminders = Reminder::list_by_pet(&state.db, pet_id).await?;
    Ok(Json(reminders))
}

/// Validates and stores a reminder
///
/// The interval is normalized by [`Reminder::create`]; an unknown `pet_id`
/// is rejected by the foreign key and surfaces as 400.
pub(crate) async fn insert(state: &AppState, req: CreateReminder) -> ApiResult<Reminder> {
    req.validate()?;

    let reminder = Reminder::create(&state.db, req).await?;
    tracing::debug!(reminder_id = %reminder.id, pet_id = %reminder.pet_id, "Reminder created");

    Ok(reminder)
}

/// Creates a reminder
///
/// ```text
/// POST /reminders
/// Content-Type: application/json
///
/// {
///   "pet_id": "uuid",
///   "title": "Vet checkup",
///   "reminder_type": "vet",
///   "due_date": "2024-03-05T14:30:00",
///   "priority": "high"
/// }
/// ```
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateReminder>,
) -> ApiResult<Json<Reminder>> {
    Ok(Json(insert(&state, req).await?))
}
