/// Pet endpoints (minimal API)
///
/// # Endpoints
///
/// - `GET /pets/:user_id` - An owner's pets, newest first
/// - `POST /pets` - Register a pet, returning the stored record

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, State},
    Json,
};
use pawminder_shared::models::pet::{CreatePet, Pet};
use uuid::Uuid;
use validator::Validate;

/// Lists the pets owned by `user_id`
pub async fn list_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<Vec<Pet>>> {
    let pets = Pet::list_by_user(&state.db, user_id).await?;
    Ok(Json(pets))
}

/// Validates and stores a pet
///
/// Shared by `POST /pets` and `POST /rest/v1/pets`.
pub(crate) async fn insert(state: &AppState, req: CreatePet) -> ApiResult<Pet> {
    req.validate()?;

    let pet = Pet::create(&state.db, req).await?;
    tracing::debug!(pet_id = %pet.id, "Pet created");

    Ok(pet)
}

/// Registers a pet
///
/// ```text
/// POST /pets
/// Content-Type: application/json
///
/// { "user_id": "uuid", "name": "Rex", "type": "Dog", "age": 3 }
/// ```
///
/// # Errors
///
/// - `422 Unprocessable Entity`: blank name or type, negative age or weight
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreatePet>,
) -> ApiResult<Json<Pet>> {
    Ok(Json(insert(&state, req).await?))
}
