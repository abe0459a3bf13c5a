use axum::{
    Json, Router,
    http::{StatusCode, Uri},
    middleware,
    routing::get,
};

use crate::{
    middleware::auth::require_admin,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod doc;
pub mod favorites;
pub mod feed;
pub mod health;
pub mod users;

/// Every user-facing route. Admin routes sit behind [`require_admin`].
pub fn create_api_router(state: &AppState) -> Router<AppState> {
    let admin_routes = admin::router()
        .merge(catalog::admin_router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .merge(auth::router())
        .merge(users::router())
        .merge(feed::router())
        .merge(favorites::router())
        .merge(catalog::router())
        .nest("/admin", admin_routes)
}

/// Full application without transport layers; the server and the tests
/// share it.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .merge(create_api_router(&state))
        .merge(doc::scalar_docs())
        .fallback(not_found)
        .with_state(state)
}

async fn not_found(uri: Uri) -> (StatusCode, Json<ApiResponse<serde_json::Value>>) {
    let body = ApiResponse::success(
        "Not Found",
        serde_json::json!({ "path": uri.path() }),
        Some(Meta::empty()),
    );
    (StatusCode::NOT_FOUND, Json(body))
}
