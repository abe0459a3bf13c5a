use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::seasons::SeasonRequest,
    entity::{Movies, Seasons, Videos, movies, seasons, videos},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Season, season_from_entity},
    response::{ApiResponse, Meta},
    state::AppState,
    validation::{require_links, value_exists},
};

/// Finds `season_id` only if it belongs to `movie_id`.
async fn find_season(
    db: &impl ConnectionTrait,
    movie_id: Uuid,
    season_id: Uuid,
) -> AppResult<seasons::Model> {
    Seasons::find_by_id(season_id)
        .filter(seasons::Column::MovieId.eq(movie_id))
        .one(db)
        .await?
        .ok_or(AppError::NotFound("Season"))
}

async fn next_number(db: &impl ConnectionTrait, movie_id: Uuid) -> AppResult<i32> {
    let last = Seasons::find()
        .filter(seasons::Column::MovieId.eq(movie_id))
        .order_by_desc(seasons::Column::Number)
        .one(db)
        .await?;
    Ok(last.map_or(1, |season| season.number + 1))
}

/// True when another season of the movie already uses `number`.
async fn number_taken(
    db: &impl ConnectionTrait,
    movie_id: Uuid,
    number: i32,
    except: Option<Uuid>,
) -> AppResult<bool> {
    let mut query = Seasons::find()
        .filter(seasons::Column::MovieId.eq(movie_id))
        .filter(seasons::Column::Number.eq(number));
    if let Some(id) = except {
        query = query.filter(seasons::Column::Id.ne(id));
    }
    Ok(query.one(db).await?.is_some())
}

async fn insert_videos(
    db: &impl ConnectionTrait,
    season_id: Uuid,
    links: Vec<String>,
) -> AppResult<Vec<videos::Model>> {
    let mut inserted = Vec::with_capacity(links.len());
    for (index, link) in links.into_iter().enumerate() {
        let video = videos::ActiveModel {
            id: Set(Uuid::new_v4()),
            season_id: Set(season_id),
            position: Set(index as i32 + 1),
            link: Set(link),
        }
        .insert(db)
        .await?;
        inserted.push(video);
    }
    Ok(inserted)
}

fn check_number(number: Option<i32>) -> AppResult<Option<i32>> {
    match number {
        Some(n) if n < 1 => Err(AppError::BadRequest(
            "season number must be at least 1".into(),
        )),
        other => Ok(other),
    }
}

pub async fn create_season(
    state: &AppState,
    user: &AuthUser,
    movie_id: Uuid,
    payload: SeasonRequest,
) -> AppResult<ApiResponse<Season>> {
    ensure_admin(user)?;
    let number = check_number(payload.number)?;
    let links = require_links("videos", payload.videos)?;

    let txn = state.orm.begin().await?;
    if !value_exists::<Movies>(&txn, movies::Column::Id, movie_id).await? {
        return Err(AppError::NotFound("Movie"));
    }

    let number = match number {
        Some(n) => {
            if number_taken(&txn, movie_id, n, None).await? {
                return Err(AppError::Conflict(format!("season {n} already exists")));
            }
            n
        }
        None => next_number(&txn, movie_id).await?,
    };

    let season = seasons::ActiveModel {
        id: Set(Uuid::new_v4()),
        movie_id: Set(movie_id),
        number: Set(number),
        created_at: Set(Utc::now().into()),
    }
    .insert(&txn)
    .await?;
    let videos = insert_videos(&txn, season.id, links).await?;
    txn.commit().await?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "season_create",
        "seasons",
        serde_json::json!({ "movie_id": movie_id, "season_id": season.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Season created",
        season_from_entity(season, videos),
        Some(Meta::empty()),
    ))
}

pub async fn get_season(
    state: &AppState,
    user: &AuthUser,
    movie_id: Uuid,
    season_id: Uuid,
) -> AppResult<ApiResponse<Season>> {
    ensure_admin(user)?;
    let season = find_season(&state.orm, movie_id, season_id).await?;
    let videos = Videos::find()
        .filter(videos::Column::SeasonId.eq(season.id))
        .order_by_asc(videos::Column::Position)
        .all(&state.orm)
        .await?;

    Ok(ApiResponse::success(
        "Season",
        season_from_entity(season, videos),
        Some(Meta::empty()),
    ))
}

/// Replaces the whole video list; the number changes only when given.
pub async fn update_season(
    state: &AppState,
    user: &AuthUser,
    movie_id: Uuid,
    season_id: Uuid,
    payload: SeasonRequest,
) -> AppResult<ApiResponse<Season>> {
    ensure_admin(user)?;
    let number = check_number(payload.number)?;
    let links = require_links("videos", payload.videos)?;

    let txn = state.orm.begin().await?;
    let season = find_season(&txn, movie_id, season_id).await?;

    let season = match number {
        Some(n) if n != season.number => {
            if number_taken(&txn, movie_id, n, Some(season_id)).await? {
                return Err(AppError::Conflict(format!("season {n} already exists")));
            }
            let mut active: seasons::ActiveModel = season.into();
            active.number = Set(n);
            active.update(&txn).await?
        }
        _ => season,
    };

    Videos::delete_many()
        .filter(videos::Column::SeasonId.eq(season_id))
        .exec(&txn)
        .await?;
    let videos = insert_videos(&txn, season_id, links).await?;
    txn.commit().await?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "season_update",
        "seasons",
        serde_json::json!({ "movie_id": movie_id, "season_id": season_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        season_from_entity(season, videos),
        Some(Meta::empty()),
    ))
}

pub async fn delete_season(
    state: &AppState,
    user: &AuthUser,
    movie_id: Uuid,
    season_id: Uuid,
) -> AppResult<ApiResponse<Season>> {
    ensure_admin(user)?;
    let txn = state.orm.begin().await?;
    let season = find_season(&txn, movie_id, season_id).await?;

    Videos::delete_many()
        .filter(videos::Column::SeasonId.eq(season_id))
        .exec(&txn)
        .await?;
    Seasons::delete_by_id(season_id).exec(&txn).await?;
    txn.commit().await?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "season_delete",
        "seasons",
        serde_json::json!({ "movie_id": movie_id, "season_id": season_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "The season has been deleted successfully",
        season_from_entity(season, Vec::new()),
        Some(Meta::empty()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_numbers_start_at_one() {
        assert!(check_number(Some(0)).is_err());
        assert_eq!(check_number(Some(2)).unwrap(), Some(2));
        assert_eq!(check_number(None).unwrap(), None);
    }
}
