use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    audit,
    dto::favorites::FavoriteList,
    entity::{Favorites, Movies, favorites, movies},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Favorite, favorite_from_entity},
    response::{ApiResponse, Empty, Meta},
    state::AppState,
    validation::{pair_exists, value_exists},
};

pub async fn list_favorites(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<FavoriteList>> {
    let items: Vec<Favorite> = Favorites::find()
        .filter(favorites::Column::UserId.eq(user.user_id))
        .order_by_desc(favorites::Column::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(favorite_from_entity)
        .collect();

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("OK", FavoriteList { items }, Some(meta)))
}

pub async fn add_favorite(
    state: &AppState,
    user: &AuthUser,
    movie_id: Uuid,
) -> AppResult<ApiResponse<Favorite>> {
    if !value_exists::<Movies>(&state.orm, movies::Column::Id, movie_id).await? {
        return Err(AppError::NotFound("Movie"));
    }

    if pair_exists::<Favorites>(
        &state.orm,
        favorites::Column::UserId,
        user.user_id,
        favorites::Column::MovieId,
        movie_id,
    )
    .await?
    {
        return Err(AppError::Conflict("movie is already in favorites".into()));
    }

    let favorite = favorites::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        movie_id: Set(movie_id),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "favorite_add",
        "favorites",
        serde_json::json!({ "movie_id": movie_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Added to favorites",
        favorite_from_entity(favorite),
        Some(Meta::empty()),
    ))
}

pub async fn remove_favorite(
    state: &AppState,
    user: &AuthUser,
    movie_id: Uuid,
) -> AppResult<ApiResponse<Empty>> {
    let result = Favorites::delete_many()
        .filter(favorites::Column::UserId.eq(user.user_id))
        .filter(favorites::Column::MovieId.eq(movie_id))
        .exec(&state.orm)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Favorite"));
    }

    audit::record(
        &state.orm,
        Some(user.user_id),
        "favorite_remove",
        "favorites",
        serde_json::json!({ "movie_id": movie_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Removed from favorites",
        Empty::default(),
        Some(Meta::empty()),
    ))
}
