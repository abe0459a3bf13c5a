use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::auth::{
        LoginRequest, LoginResponse, PasswordRecoverRequest, ResetPasswordRequest, SignupRequest,
    },
    error::AppResult,
    extract::AppJson,
    middleware::auth::AuthUser,
    models::User,
    response::{ApiResponse, Empty},
    services::{auth_service, user_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/passwordrecover", post(password_recover))
        .route("/resetpassword", post(reset_password))
}

#[utoipa::path(
    post,
    path = "/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "User created", body = ApiResponse<User>),
        (status = 400, description = "Invalid email or password"),
        (status = 409, description = "Email already taken")
    ),
    tag = "Auth"
)]
pub async fn signup(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SignupRequest>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = auth_service::signup(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login user", body = ApiResponse<LoginResponse>),
        (status = 400, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let resp = auth_service::login(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/logout",
    responses(
        (status = 200, description = "Logout successful", body = ApiResponse<Empty>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn logout(user: AuthUser) -> Json<ApiResponse<Empty>> {
    Json(user_service::logout(&user))
}

#[utoipa::path(
    post,
    path = "/passwordrecover",
    request_body = PasswordRecoverRequest,
    responses(
        (status = 200, description = "Reset link issued", body = ApiResponse<Empty>),
        (status = 404, description = "Unknown email")
    ),
    tag = "Auth"
)]
pub async fn password_recover(
    State(state): State<AppState>,
    AppJson(payload): AppJson<PasswordRecoverRequest>,
) -> AppResult<Json<ApiResponse<Empty>>> {
    let resp = auth_service::password_recover(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/resetpassword",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = ApiResponse<Empty>),
        (status = 400, description = "Invalid or expired token, or invalid password")
    ),
    tag = "Auth"
)]
pub async fn reset_password(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ResetPasswordRequest>,
) -> AppResult<Json<ApiResponse<Empty>>> {
    let resp = auth_service::reset_password(&state, payload).await?;
    Ok(Json(resp))
}
