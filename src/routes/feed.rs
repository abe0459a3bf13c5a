use axum::{Json, Router, extract::State, routing::get};
use uuid::Uuid;

use crate::{
    dto::{
        feed::{HomeFeed, SearchQuery},
        movies::{EpisodeLink, MovieList, MoviePage},
    },
    error::AppResult,
    extract::{AppPath, AppQuery},
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::feed_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/home", get(home))
        .route("/trends", get(trends))
        .route("/newprojects", get(new_projects))
        .route("/serials", get(serials))
        .route("/category/{name}", get(by_category))
        .route("/search", get(search))
        .route("/all", get(all_movies))
        .route("/movie/{id}", get(movie_page))
        .route("/movie/{id}/series/{season}/{episode}", get(episode))
}

#[utoipa::path(
    get,
    path = "/home",
    responses(
        (status = 200, description = "Home page sections", body = ApiResponse<HomeFeed>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Feed"
)]
pub async fn home(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<HomeFeed>>> {
    let resp = feed_service::home(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/trends",
    responses(
        (status = 200, description = "Movies by watch count", body = ApiResponse<MovieList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Feed"
)]
pub async fn trends(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<MovieList>>> {
    Ok(Json(feed_service::trends(&state).await?))
}

#[utoipa::path(
    get,
    path = "/newprojects",
    responses(
        (status = 200, description = "Movies, newest first", body = ApiResponse<MovieList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Feed"
)]
pub async fn new_projects(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<MovieList>>> {
    Ok(Json(feed_service::new_projects(&state).await?))
}

#[utoipa::path(
    get,
    path = "/serials",
    responses(
        (status = 200, description = "Serials, newest first", body = ApiResponse<MovieList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Feed"
)]
pub async fn serials(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<MovieList>>> {
    Ok(Json(feed_service::serial_list(&state).await?))
}

#[utoipa::path(
    get,
    path = "/category/{name}",
    params(
        ("name" = String, Path, description = "Category name")
    ),
    responses(
        (status = 200, description = "Movies in the category", body = ApiResponse<MovieList>),
        (status = 404, description = "Category not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Feed"
)]
pub async fn by_category(
    State(state): State<AppState>,
    _user: AuthUser,
    AppPath(name): AppPath<String>,
) -> AppResult<Json<ApiResponse<MovieList>>> {
    let resp = feed_service::by_category(&state, &name).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/search",
    params(
        ("search" = String, Query, description = "Case-insensitive part of the movie name")
    ),
    responses(
        (status = 200, description = "Matching movies", body = ApiResponse<MovieList>),
        (status = 400, description = "Missing search term")
    ),
    security(("bearer_auth" = [])),
    tag = "Feed"
)]
pub async fn search(
    State(state): State<AppState>,
    _user: AuthUser,
    AppQuery(query): AppQuery<SearchQuery>,
) -> AppResult<Json<ApiResponse<MovieList>>> {
    let resp = feed_service::search(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/all",
    responses(
        (status = 200, description = "Every movie", body = ApiResponse<MovieList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Feed"
)]
pub async fn all_movies(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<MovieList>>> {
    Ok(Json(feed_service::all_movies(&state).await?))
}

#[utoipa::path(
    get,
    path = "/movie/{id}",
    params(
        ("id" = Uuid, Path, description = "Movie ID")
    ),
    responses(
        (status = 200, description = "Movie page", body = ApiResponse<MoviePage>),
        (status = 404, description = "Movie not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Feed"
)]
pub async fn movie_page(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<ApiResponse<MoviePage>>> {
    let resp = feed_service::movie_page(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/movie/{id}/series/{season}/{episode}",
    params(
        ("id" = Uuid, Path, description = "Movie ID"),
        ("season" = i32, Path, description = "Season number"),
        ("episode" = i32, Path, description = "Episode number")
    ),
    responses(
        (status = 200, description = "Episode link", body = ApiResponse<EpisodeLink>),
        (status = 404, description = "Movie, season or episode not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Feed"
)]
pub async fn episode(
    State(state): State<AppState>,
    _user: AuthUser,
    AppPath((id, season, episode)): AppPath<(Uuid, i32, i32)>,
) -> AppResult<Json<ApiResponse<EpisodeLink>>> {
    let resp = feed_service::episode_link(&state, id, season, episode).await?;
    Ok(Json(resp))
}
