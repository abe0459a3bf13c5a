use axum::{
    Json, Router,
    extract::State,
    routing::{delete, get, post, put},
};
use uuid::Uuid;

use crate::{
    dto::{
        movies::{CreateMovieRequest, UpdateMovieRequest},
        seasons::SeasonRequest,
    },
    error::AppResult,
    extract::{AppJson, AppPath},
    middleware::auth::AuthUser,
    models::{Movie, MovieDetail, Season},
    response::ApiResponse,
    services::{movie_service, season_service},
    state::AppState,
};

/// Movie and season management, mounted under `/admin`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/movie/create", post(create_movie))
        .route("/movie/{id}/edit", get(edit_movie))
        .route("/movie/{id}/update", put(update_movie))
        .route("/movie/{id}/delete", delete(delete_movie))
        .route("/movie/{id}/season/create", post(create_season))
        .route("/movie/{id}/season/{season_id}/edit", get(edit_season))
        .route("/movie/{id}/season/{season_id}/update", put(update_season))
        .route("/movie/{id}/season/{season_id}/delete", delete(delete_season))
}

#[utoipa::path(
    post,
    path = "/admin/movie/create",
    request_body = CreateMovieRequest,
    responses(
        (status = 200, description = "Movie created", body = ApiResponse<MovieDetail>),
        (status = 400, description = "Invalid movie data"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Unknown type, age category or category"),
        (status = 409, description = "Name already exists")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_movie(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<CreateMovieRequest>,
) -> AppResult<Json<ApiResponse<MovieDetail>>> {
    let resp = movie_service::create_movie(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/admin/movie/{id}/edit",
    params(("id" = Uuid, Path, description = "Movie ID")),
    responses(
        (status = 200, description = "Movie with all associations", body = ApiResponse<MovieDetail>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn edit_movie(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<ApiResponse<MovieDetail>>> {
    let resp = movie_service::get_movie(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/admin/movie/{id}/update",
    params(("id" = Uuid, Path, description = "Movie ID")),
    request_body = UpdateMovieRequest,
    responses(
        (status = 200, description = "Movie updated", body = ApiResponse<MovieDetail>),
        (status = 400, description = "Invalid movie data"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Name already exists")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_movie(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateMovieRequest>,
) -> AppResult<Json<ApiResponse<MovieDetail>>> {
    let resp = movie_service::update_movie(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/admin/movie/{id}/delete",
    params(("id" = Uuid, Path, description = "Movie ID")),
    responses(
        (status = 200, description = "Movie deleted", body = ApiResponse<Movie>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_movie(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<ApiResponse<Movie>>> {
    let resp = movie_service::delete_movie(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/admin/movie/{id}/season/create",
    params(("id" = Uuid, Path, description = "Movie ID")),
    request_body = SeasonRequest,
    responses(
        (status = 200, description = "Season created", body = ApiResponse<Season>),
        (status = 404, description = "Movie not found"),
        (status = 409, description = "Season number taken")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_season(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<SeasonRequest>,
) -> AppResult<Json<ApiResponse<Season>>> {
    let resp = season_service::create_season(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/admin/movie/{id}/season/{season_id}/edit",
    params(
        ("id" = Uuid, Path, description = "Movie ID"),
        ("season_id" = Uuid, Path, description = "Season ID")
    ),
    responses(
        (status = 200, description = "Season with videos", body = ApiResponse<Season>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn edit_season(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath((id, season_id)): AppPath<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<Season>>> {
    let resp = season_service::get_season(&state, &user, id, season_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/admin/movie/{id}/season/{season_id}/update",
    params(
        ("id" = Uuid, Path, description = "Movie ID"),
        ("season_id" = Uuid, Path, description = "Season ID")
    ),
    request_body = SeasonRequest,
    responses(
        (status = 200, description = "Season updated", body = ApiResponse<Season>),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Season number taken")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_season(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath((id, season_id)): AppPath<(Uuid, Uuid)>,
    AppJson(payload): AppJson<SeasonRequest>,
) -> AppResult<Json<ApiResponse<Season>>> {
    let resp = season_service::update_season(&state, &user, id, season_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/admin/movie/{id}/season/{season_id}/delete",
    params(
        ("id" = Uuid, Path, description = "Movie ID"),
        ("season_id" = Uuid, Path, description = "Season ID")
    ),
    responses(
        (status = 200, description = "Season deleted", body = ApiResponse<Season>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_season(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath((id, season_id)): AppPath<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<Season>>> {
    let resp = season_service::delete_season(&state, &user, id, season_id).await?;
    Ok(Json(resp))
}
