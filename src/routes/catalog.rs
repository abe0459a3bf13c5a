//! Lookup tables: public listings plus the admin CRUD for categories,
//! project types and age categories.

use axum::{
    Json, Router,
    extract::State,
    routing::{delete, get, post, put},
};
use uuid::Uuid;

use crate::{
    dto::catalog::{LookupList, LookupRequest},
    error::AppResult,
    extract::{AppJson, AppPath},
    middleware::auth::AuthUser,
    models::Lookup,
    response::ApiResponse,
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/types", get(list_movie_types))
        .route("/agecategories", get(list_age_categories))
}

/// Mounted under `/admin`.
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/category/create", post(create_category))
        .route("/category/{id}/edit", get(get_category))
        .route("/category/{id}/update", put(update_category))
        .route("/category/{id}/delete", delete(delete_category))
        .route("/type/create", post(create_movie_type))
        .route("/type/{id}/edit", get(get_movie_type))
        .route("/type/{id}/update", put(update_movie_type))
        .route("/type/{id}/delete", delete(delete_movie_type))
        .route("/agecategory/create", post(create_age_category))
        .route("/agecategory/{id}/edit", get(get_age_category))
        .route("/agecategory/{id}/update", put(update_age_category))
        .route("/agecategory/{id}/delete", delete(delete_age_category))
}

#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "All categories", body = ApiResponse<LookupList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn list_categories(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<LookupList>>> {
    Ok(Json(catalog_service::list_categories(&state).await?))
}

#[utoipa::path(
    get,
    path = "/types",
    responses(
        (status = 200, description = "All project types", body = ApiResponse<LookupList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn list_movie_types(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<LookupList>>> {
    Ok(Json(catalog_service::list_movie_types(&state).await?))
}

#[utoipa::path(
    get,
    path = "/agecategories",
    responses(
        (status = 200, description = "All age categories", body = ApiResponse<LookupList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn list_age_categories(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<LookupList>>> {
    Ok(Json(catalog_service::list_age_categories(&state).await?))
}

#[utoipa::path(
    post,
    path = "/admin/category/create",
    request_body = LookupRequest,
    responses(
        (status = 200, description = "Category created", body = ApiResponse<Lookup>),
        (status = 400, description = "Invalid name"),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Name already exists")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_category(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<LookupRequest>,
) -> AppResult<Json<ApiResponse<Lookup>>> {
    let resp = catalog_service::create_category(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/admin/category/{id}/edit",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category", body = ApiResponse<Lookup>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_category(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<ApiResponse<Lookup>>> {
    let resp = catalog_service::get_category(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/admin/category/{id}/update",
    params(("id" = Uuid, Path, description = "Category ID")),
    request_body = LookupRequest,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<Lookup>),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Name already exists")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_category(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<LookupRequest>,
) -> AppResult<Json<ApiResponse<Lookup>>> {
    let resp = catalog_service::update_category(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/admin/category/{id}/delete",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category deleted", body = ApiResponse<Lookup>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_category(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<ApiResponse<Lookup>>> {
    let resp = catalog_service::delete_category(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/admin/type/create",
    request_body = LookupRequest,
    responses(
        (status = 200, description = "Project type created", body = ApiResponse<Lookup>),
        (status = 400, description = "Invalid name"),
        (status = 409, description = "Name already exists")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_movie_type(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<LookupRequest>,
) -> AppResult<Json<ApiResponse<Lookup>>> {
    let resp = catalog_service::create_movie_type(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/admin/type/{id}/edit",
    params(("id" = Uuid, Path, description = "Project type ID")),
    responses(
        (status = 200, description = "Project type", body = ApiResponse<Lookup>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_movie_type(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<ApiResponse<Lookup>>> {
    let resp = catalog_service::get_movie_type(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/admin/type/{id}/update",
    params(("id" = Uuid, Path, description = "Project type ID")),
    request_body = LookupRequest,
    responses(
        (status = 200, description = "Project type updated", body = ApiResponse<Lookup>),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Name already exists")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_movie_type(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<LookupRequest>,
) -> AppResult<Json<ApiResponse<Lookup>>> {
    let resp = catalog_service::update_movie_type(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/admin/type/{id}/delete",
    params(("id" = Uuid, Path, description = "Project type ID")),
    responses(
        (status = 200, description = "Project type deleted", body = ApiResponse<Lookup>),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Still used by movies")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_movie_type(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<ApiResponse<Lookup>>> {
    let resp = catalog_service::delete_movie_type(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/admin/agecategory/create",
    request_body = LookupRequest,
    responses(
        (status = 200, description = "Age category created", body = ApiResponse<Lookup>),
        (status = 400, description = "Invalid name"),
        (status = 409, description = "Name already exists")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_age_category(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<LookupRequest>,
) -> AppResult<Json<ApiResponse<Lookup>>> {
    let resp = catalog_service::create_age_category(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/admin/agecategory/{id}/edit",
    params(("id" = Uuid, Path, description = "Age category ID")),
    responses(
        (status = 200, description = "Age category", body = ApiResponse<Lookup>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_age_category(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<ApiResponse<Lookup>>> {
    let resp = catalog_service::get_age_category(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/admin/agecategory/{id}/update",
    params(("id" = Uuid, Path, description = "Age category ID")),
    request_body = LookupRequest,
    responses(
        (status = 200, description = "Age category updated", body = ApiResponse<Lookup>),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Name already exists")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_age_category(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<LookupRequest>,
) -> AppResult<Json<ApiResponse<Lookup>>> {
    let resp = catalog_service::update_age_category(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/admin/agecategory/{id}/delete",
    params(("id" = Uuid, Path, description = "Age category ID")),
    responses(
        (status = 200, description = "Age category deleted", body = ApiResponse<Lookup>),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Still used by movies")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_age_category(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<ApiResponse<Lookup>>> {
    let resp = catalog_service::delete_age_category(&state, &user, id).await?;
    Ok(Json(resp))
}
