/// Hosted-store collection surface
///
/// Row-level endpoints over the `pets` and `reminders` tables, used by the
/// PawMinder client. Every route sits behind the `apikey` header check.
///
/// # Endpoints
///
/// | Method | Path | Notes |
/// |---|---|---|
/// | GET | `/rest/v1/pets` | `?user_id=&order=`; default `created_at.desc` |
/// | POST | `/rest/v1/pets` | 201 with the stored row |
/// | DELETE | `/rest/v1/pets/:id` | 204; reminders go with it |
/// | GET | `/rest/v1/reminders` | `?pet_id=&order=`; default `due_date.asc` |
/// | POST | `/rest/v1/reminders` | 201 with the stored row |
/// | PATCH | `/rest/v1/reminders/:id` | `{ "is_completed": bool }` |
/// | DELETE | `/rest/v1/reminders/:id` | 204 |
///
/// `order` takes `<column>` or `<column>.<asc|desc>`. Pets order by
/// `created_at` or `name`; reminders by `due_date`, `created_at` or
/// `priority`. Anything else is a 400.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::{pets, reminders},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use pawminder_shared::models::{
    order::{Order, SortColumn},
    pet::{default_pet_order, CreatePet, Pet, PetQuery},
    reminder::{default_reminder_order, CreateReminder, Reminder, ReminderQuery, SetCompletion},
};
use serde::Deserialize;
use uuid::Uuid;

/// Query string for `GET /rest/v1/pets`
#[derive(Debug, Default, Deserialize)]
pub struct PetListParams {
    pub user_id: Option<Uuid>,
    pub order: Option<String>,
}

/// Query string for `GET /rest/v1/reminders`
#[derive(Debug, Default, Deserialize)]
pub struct ReminderListParams {
    pub pet_id: Option<Uuid>,
    pub order: Option<String>,
}

fn parse_order<C: SortColumn>(raw: Option<&str>, default: Order<C>) -> ApiResult<Order<C>> {
    match raw {
        Some(raw) if !raw.trim().is_empty() => Ok(raw.trim().parse()?),
        _ => Ok(default),
    }
}

pub async fn list_pets(
    State(state): State<AppState>,
    Query(params): Query<PetListParams>,
) -> ApiResult<Json<Vec<Pet>>> {
    let order = parse_order(params.order.as_deref(), default_pet_order())?;
    let query = PetQuery {
        user_id: params.user_id,
    };

    Ok(Json(Pet::list(&state.db, &query, order).await?))
}

pub async fn insert_pet(
    State(state): State<AppState>,
    Json(req): Json<CreatePet>,
) -> ApiResult<(StatusCode, Json<Pet>)> {
    let pet = pets::insert(&state, req).await?;
    Ok((StatusCode::CREATED, Json(pet)))
}

/// Deletes a pet; the store removes its reminders
pub async fn delete_pet(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    if !Pet::delete(&state.db, id).await? {
        return Err(ApiError::NotFound(format!("Pet {} not found", id)));
    }

    tracing::info!(pet_id = %id, "Pet deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_reminders(
    State(state): State<AppState>,
    Query(params): Query<ReminderListParams>,
) -> ApiResult<Json<Vec<Reminder>>> {
    let order = parse_order(params.order.as_deref(), default_reminder_order())?;
    let query = ReminderQuery {
        pet_id: params.pet_id,
    };

    Ok(Json(Reminder::list(&state.db, &query, order).await?))
}

pub async fn insert_reminder(
    State(state): State<AppState>,
    Json(req): Json<CreateReminder>,
) -> ApiResult<(StatusCode, Json<Reminder>)> {
    let reminder = reminders::insert(&state, req).await?;
    Ok((StatusCode::CREATED, Json(reminder)))
}

/// Sets completion; `completed_at` is derived server-side
pub async fn update_reminder(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<SetCompletion>,
) -> ApiResult<Json<Reminder>> {
    let reminder = Reminder::set_completion(&state.db, id, update)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Reminder {} not found", id)))?;

    Ok(Json(reminder))
}

pub async fn delete_reminder(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    if !Reminder::delete(&state.db, id).await? {
        return Err(ApiError::NotFound(format!("Reminder {} not found", id)));
    }

    Ok(StatusCode::NO_CONTENT)
}
