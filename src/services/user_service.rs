use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

use crate::{
    audit,
    dto::users::{ChangePasswordRequest, UpdateProfileRequest},
    entity::{Users, users},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Profile, profile_from_entity},
    response::{ApiResponse, Empty, Meta},
    services::auth_service::set_password,
    state::AppState,
    validation::{check_name, check_password},
};

async fn load_user(state: &AppState, user: &AuthUser) -> AppResult<users::Model> {
    Users::find_by_id(user.user_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("User"))
}

pub async fn get_profile(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<Profile>> {
    let model = load_user(state, user).await?;
    Ok(ApiResponse::success(
        "Profile",
        profile_from_entity(model),
        Some(Meta::empty()),
    ))
}

pub async fn update_profile(
    state: &AppState,
    user: &AuthUser,
    payload: UpdateProfileRequest,
) -> AppResult<ApiResponse<Profile>> {
    let username = check_name("username", &payload.username)?;
    let mobile_phone = payload
        .mobile_phone
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty());

    let existing = load_user(state, user).await?;
    let mut active: users::ActiveModel = existing.into();
    active.username = Set(Some(username));
    active.mobile_phone = Set(mobile_phone);
    active.birth_date = Set(payload.birth_date);
    active.updated_at = Set(Utc::now().into());
    let updated = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Profile updated",
        profile_from_entity(updated),
        Some(Meta::empty()),
    ))
}

pub async fn change_password(
    state: &AppState,
    user: &AuthUser,
    payload: ChangePasswordRequest,
) -> AppResult<ApiResponse<Empty>> {
    check_password(&payload.password, &payload.password_repeat)?;

    let existing = load_user(state, user).await?;
    set_password(&state.orm, existing, &payload.password).await?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "password_change",
        "users",
        serde_json::json!({ "user_id": user.user_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Password successfully changed",
        Empty::default(),
        Some(Meta::empty()),
    ))
}

/// Tokens are stateless, so logging out only acknowledges the caller.
pub fn logout(user: &AuthUser) -> ApiResponse<Empty> {
    tracing::debug!(user_id = %user.user_id, "logout");
    ApiResponse::success("Logout successful", Empty::default(), Some(Meta::empty()))
}
