//! Handlers for the current user's profile.

use axum::extract::State;
use axum::Json;
use corkboard_core::error::{ErrorCode, ServiceError};
use corkboard_db::models::user::{UpdateUserProfile, User};
use corkboard_db::repositories::UserRepo;

use crate::error::AppResult;
use crate::middleware::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/users/me
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<User>>> {
    let record = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or_else(|| ServiceError::new(ErrorCode::UserNotFound, "User not found"))?;
    Ok(Json(DataResponse { data: record }))
}

/// PATCH /api/v1/users/me
///
/// Partial profile update; a request with no fields returns the profile
/// unchanged without a write.
pub async fn update_me(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<UpdateUserProfile>,
) -> AppResult<Json<DataResponse<User>>> {
    if input.name.is_none() && input.image.is_none() {
        return me(State(state), user).await;
    }

    let updated = UserRepo::update_profile(&state.pool, user.user_id, &input)
        .await?
        .ok_or_else(|| ServiceError::new(ErrorCode::UserNotFound, "User not found"))?;
    Ok(Json(DataResponse { data: updated }))
}
