use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, LoaderTrait, ModelTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::movies::{CreateMovieRequest, UpdateMovieRequest},
    entity::{
        AgeCategories, Categories, Favorites, MovieCategories, MovieTypes, Movies, Screenshots,
        Seasons, Videos, categories, favorites, movie_categories, movies, screenshots, seasons,
        videos,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{
        Movie, MovieCard, MovieDetail, age_category_from_entity, category_from_entity,
        movie_from_entity, movie_type_from_entity, screenshot_from_entity, season_from_entity,
    },
    response::{ApiResponse, Meta},
    state::AppState,
    validation::{dedup_ids, require_links, require_text, value_exists, value_exists_except},
};

/// Validated, normalised movie fields shared by create and update.
struct MovieInput {
    name: String,
    type_id: Uuid,
    age_category_id: Uuid,
    category_ids: Vec<Uuid>,
    year: i32,
    timing: i32,
    keywords: String,
    description: String,
    director: String,
    producer: String,
    cover: String,
}

impl MovieInput {
    #[allow(clippy::too_many_arguments)]
    fn parse(
        name: &str,
        type_id: Uuid,
        age_category_id: Uuid,
        category_ids: &[Uuid],
        year: i32,
        timing: i32,
        keywords: String,
        description: String,
        director: String,
        producer: String,
        cover: &str,
    ) -> AppResult<Self> {
        if year <= 0 {
            return Err(AppError::BadRequest("year must be positive".into()));
        }
        if timing < 0 {
            return Err(AppError::BadRequest("timing must not be negative".into()));
        }
        Ok(Self {
            name: require_text("name", name)?,
            type_id,
            age_category_id,
            category_ids: dedup_ids(category_ids),
            year,
            timing,
            keywords: keywords.trim().to_string(),
            description: description.trim().to_string(),
            director: director.trim().to_string(),
            producer: producer.trim().to_string(),
            cover: require_text("cover", cover)?,
        })
    }
}

/// Every id a movie points at must resolve.
async fn ensure_references(db: &impl ConnectionTrait, input: &MovieInput) -> AppResult<()> {
    if !value_exists::<MovieTypes>(db, crate::entity::movie_types::Column::Id, input.type_id).await?
    {
        return Err(AppError::NotFound("Type"));
    }
    if !value_exists::<AgeCategories>(
        db,
        crate::entity::age_categories::Column::Id,
        input.age_category_id,
    )
    .await?
    {
        return Err(AppError::NotFound("Age category"));
    }
    for category_id in &input.category_ids {
        if !value_exists::<Categories>(db, categories::Column::Id, *category_id).await? {
            return Err(AppError::NotFound("Category"));
        }
    }
    Ok(())
}

async fn replace_categories(
    db: &impl ConnectionTrait,
    movie_id: Uuid,
    category_ids: &[Uuid],
) -> AppResult<()> {
    MovieCategories::delete_many()
        .filter(movie_categories::Column::MovieId.eq(movie_id))
        .exec(db)
        .await?;

    if category_ids.is_empty() {
        return Ok(());
    }
    let links = category_ids
        .iter()
        .map(|category_id| movie_categories::ActiveModel {
            movie_id: Set(movie_id),
            category_id: Set(*category_id),
        });
    MovieCategories::insert_many(links)
        .exec_without_returning(db)
        .await?;
    Ok(())
}

async fn replace_screenshots(
    db: &impl ConnectionTrait,
    movie_id: Uuid,
    links: Vec<String>,
) -> AppResult<()> {
    Screenshots::delete_many()
        .filter(screenshots::Column::MovieId.eq(movie_id))
        .exec(db)
        .await?;

    if links.is_empty() {
        return Ok(());
    }
    let rows = links
        .into_iter()
        .enumerate()
        .map(|(index, link)| screenshots::ActiveModel {
            id: Set(Uuid::new_v4()),
            movie_id: Set(movie_id),
            position: Set(index as i32 + 1),
            link: Set(link),
        });
    Screenshots::insert_many(rows).exec_without_returning(db).await?;
    Ok(())
}

/// Loads type, age category, categories, screenshots and seasons with
/// their videos.
pub async fn load_detail(db: &impl ConnectionTrait, movie: movies::Model) -> AppResult<MovieDetail> {
    let movie_type = MovieTypes::find_by_id(movie.type_id)
        .one(db)
        .await?
        .map(movie_type_from_entity);
    let age_category = AgeCategories::find_by_id(movie.age_category_id)
        .one(db)
        .await?
        .map(age_category_from_entity);

    let categories = movie
        .find_related(Categories)
        .order_by_asc(categories::Column::Name)
        .all(db)
        .await?
        .into_iter()
        .map(category_from_entity)
        .collect();

    let screenshots = Screenshots::find()
        .filter(screenshots::Column::MovieId.eq(movie.id))
        .order_by_asc(screenshots::Column::Position)
        .all(db)
        .await?
        .into_iter()
        .map(screenshot_from_entity)
        .collect();

    let season_models = Seasons::find()
        .filter(seasons::Column::MovieId.eq(movie.id))
        .order_by_asc(seasons::Column::Number)
        .all(db)
        .await?;
    let seasons = if season_models.is_empty() {
        Vec::new()
    } else {
        let videos = season_models.load_many(Videos, db).await?;
        season_models
            .into_iter()
            .zip(videos)
            .map(|(season, videos)| season_from_entity(season, videos))
            .collect()
    };

    Ok(MovieDetail {
        movie: movie_from_entity(movie),
        movie_type,
        age_category,
        categories,
        screenshots,
        seasons,
    })
}

/// Attaches category names to each movie, preserving input order.
pub async fn to_cards(
    db: &impl ConnectionTrait,
    movies: Vec<movies::Model>,
) -> AppResult<Vec<MovieCard>> {
    if movies.is_empty() {
        return Ok(Vec::new());
    }
    let categories = movies
        .load_many_to_many(Categories, MovieCategories, db)
        .await?;

    Ok(movies
        .into_iter()
        .zip(categories)
        .map(|(movie, categories)| {
            let mut names: Vec<String> = categories.into_iter().map(|c| c.name).collect();
            names.sort();
            MovieCard {
                movie: movie_from_entity(movie),
                categories: names,
            }
        })
        .collect())
}

pub async fn create_movie(
    state: &AppState,
    user: &AuthUser,
    payload: CreateMovieRequest,
) -> AppResult<ApiResponse<MovieDetail>> {
    ensure_admin(user)?;
    let input = MovieInput::parse(
        &payload.name,
        payload.type_id,
        payload.age_category_id,
        &payload.category_ids,
        payload.year,
        payload.timing,
        payload.keywords,
        payload.description,
        payload.director,
        payload.producer,
        &payload.cover,
    )?;
    let screenshots = require_links("screenshots", payload.screenshots)?;

    let txn = state.orm.begin().await?;
    if value_exists::<Movies>(&txn, movies::Column::Name, input.name.clone()).await? {
        return Err(AppError::Conflict("movie name already exists".into()));
    }
    ensure_references(&txn, &input).await?;

    let now = Utc::now();
    let movie = movies::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(input.name),
        type_id: Set(input.type_id),
        age_category_id: Set(input.age_category_id),
        year: Set(input.year),
        timing: Set(input.timing),
        keywords: Set(input.keywords),
        description: Set(input.description),
        director: Set(input.director),
        producer: Set(input.producer),
        cover: Set(input.cover),
        watch_count: Set(0),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&txn)
    .await?;

    replace_categories(&txn, movie.id, &input.category_ids).await?;
    replace_screenshots(&txn, movie.id, screenshots).await?;
    let detail = load_detail(&txn, movie).await?;
    txn.commit().await?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "movie_create",
        "movies",
        serde_json::json!({ "movie_id": detail.movie.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Movie created",
        detail,
        Some(Meta::empty()),
    ))
}

pub async fn get_movie(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<MovieDetail>> {
    ensure_admin(user)?;
    let movie = Movies::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("Movie"))?;
    let detail = load_detail(&state.orm, movie).await?;
    Ok(ApiResponse::success("Movie", detail, Some(Meta::empty())))
}

pub async fn update_movie(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateMovieRequest,
) -> AppResult<ApiResponse<MovieDetail>> {
    ensure_admin(user)?;
    let input = MovieInput::parse(
        &payload.name,
        payload.type_id,
        payload.age_category_id,
        &payload.category_ids,
        payload.year,
        payload.timing,
        payload.keywords,
        payload.description,
        payload.director,
        payload.producer,
        &payload.cover,
    )?;
    let screenshots = payload
        .screenshots
        .map(|links| require_links("screenshots", links))
        .transpose()?;

    let txn = state.orm.begin().await?;
    let existing = Movies::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound("Movie"))?;

    if value_exists_except::<Movies>(
        &txn,
        movies::Column::Name,
        input.name.clone(),
        movies::Column::Id,
        id,
    )
    .await?
    {
        return Err(AppError::Conflict("movie name already exists".into()));
    }
    ensure_references(&txn, &input).await?;

    replace_categories(&txn, id, &input.category_ids).await?;
    if let Some(links) = screenshots {
        replace_screenshots(&txn, id, links).await?;
    }

    let mut active: movies::ActiveModel = existing.into();
    active.name = Set(input.name);
    active.type_id = Set(input.type_id);
    active.age_category_id = Set(input.age_category_id);
    active.year = Set(input.year);
    active.timing = Set(input.timing);
    active.keywords = Set(input.keywords);
    active.description = Set(input.description);
    active.director = Set(input.director);
    active.producer = Set(input.producer);
    active.cover = Set(input.cover);
    active.updated_at = Set(Utc::now().into());
    let movie = active.update(&txn).await?;

    let detail = load_detail(&txn, movie).await?;
    txn.commit().await?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "movie_update",
        "movies",
        serde_json::json!({ "movie_id": id }),
    )
    .await;

    Ok(ApiResponse::success("Updated", detail, Some(Meta::empty())))
}

/// Removes the movie together with its favorites, category links,
/// screenshots, seasons and videos.
pub async fn delete_movie(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Movie>> {
    ensure_admin(user)?;
    let txn = state.orm.begin().await?;
    let movie = Movies::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound("Movie"))?;

    let removed_favorites = Favorites::delete_many()
        .filter(favorites::Column::MovieId.eq(id))
        .exec(&txn)
        .await?
        .rows_affected;

    let season_ids: Vec<Uuid> = Seasons::find()
        .filter(seasons::Column::MovieId.eq(id))
        .all(&txn)
        .await?
        .into_iter()
        .map(|season| season.id)
        .collect();
    if !season_ids.is_empty() {
        Videos::delete_many()
            .filter(videos::Column::SeasonId.is_in(season_ids))
            .exec(&txn)
            .await?;
    }
    Seasons::delete_many()
        .filter(seasons::Column::MovieId.eq(id))
        .exec(&txn)
        .await?;
    Screenshots::delete_many()
        .filter(screenshots::Column::MovieId.eq(id))
        .exec(&txn)
        .await?;
    MovieCategories::delete_many()
        .filter(movie_categories::Column::MovieId.eq(id))
        .exec(&txn)
        .await?;
    Movies::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    tracing::debug!(movie_id = %id, removed_favorites, "movie deleted");
    audit::record(
        &state.orm,
        Some(user.user_id),
        "movie_delete",
        "movies",
        serde_json::json!({ "movie_id": id, "removed_favorites": removed_favorites }),
    )
    .await;

    Ok(ApiResponse::success(
        "The movie has been deleted successfully",
        movie_from_entity(movie),
        Some(Meta::empty()),
    ))
}
