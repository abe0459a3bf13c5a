use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::favorites::FavoriteList,
    error::AppResult,
    extract::AppPath,
    middleware::auth::AuthUser,
    models::Favorite,
    response::{ApiResponse, Empty},
    services::favorite_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/movie/favorite", get(list_favorites))
        .route(
            "/movie/{id}/favorite",
            post(add_favorite).delete(remove_favorite),
        )
}

#[utoipa::path(
    get,
    path = "/movie/favorite",
    responses(
        (status = 200, description = "Favorites of the caller, newest first", body = ApiResponse<FavoriteList>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Favorites"
)]
pub async fn list_favorites(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<FavoriteList>>> {
    let resp = favorite_service::list_favorites(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/movie/{id}/favorite",
    params(
        ("id" = Uuid, Path, description = "Movie ID")
    ),
    responses(
        (status = 200, description = "Added to favorites", body = ApiResponse<Favorite>),
        (status = 404, description = "Movie not found"),
        (status = 409, description = "Already in favorites")
    ),
    security(("bearer_auth" = [])),
    tag = "Favorites"
)]
pub async fn add_favorite(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<ApiResponse<Favorite>>> {
    let resp = favorite_service::add_favorite(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/movie/{id}/favorite",
    params(
        ("id" = Uuid, Path, description = "Movie ID")
    ),
    responses(
        (status = 200, description = "Removed from favorites", body = ApiResponse<Empty>),
        (status = 404, description = "Favorite not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Favorites"
)]
pub async fn remove_favorite(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<ApiResponse<Empty>>> {
    let resp = favorite_service::remove_favorite(&state, &user, id).await?;
    Ok(Json(resp))
}
