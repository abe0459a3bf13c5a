//! Read-only browsing for signed-in users: home sections, ranked listings,
//! category pages, search and the movie page itself.

use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, QuerySelect,
    Select,
    sea_query::{Expr, Query},
};
use uuid::Uuid;

use crate::{
    dto::{
        feed::{CategorySection, HomeFeed, SearchQuery},
        movies::{EpisodeLink, MovieList, MoviePage},
    },
    entity::{
        AgeCategories, Categories, Favorites, MovieCategories, MovieTypes, Movies, Seasons,
        Videos, age_categories, categories, favorites, movie_categories, movie_types, movies,
        seasons, videos,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{MovieCard, age_category_from_entity, category_from_entity},
    response::{ApiResponse, Meta},
    services::movie_service::{load_detail, to_cards},
    state::AppState,
    validation::pair_exists,
};

/// Size of every home section and of the similar-movies list.
pub const FEED_LIMIT: u64 = 5;
/// Name of the project type whose movies are listed as serials.
pub const SERIAL_TYPE: &str = "Serial";

fn trending() -> Select<Movies> {
    Movies::find()
        .order_by_desc(movies::Column::WatchCount)
        .order_by_asc(movies::Column::Name)
}

fn newest() -> Select<Movies> {
    Movies::find()
        .order_by_desc(movies::Column::CreatedAt)
        .order_by_asc(movies::Column::Name)
}

fn serials() -> Select<Movies> {
    newest()
        .inner_join(MovieTypes)
        .filter(movie_types::Column::Name.eq(SERIAL_TYPE))
}

async fn cards_of(
    db: &impl ConnectionTrait,
    query: Select<Movies>,
    limit: Option<u64>,
) -> AppResult<Vec<MovieCard>> {
    let movies = query.limit(limit).all(db).await?;
    to_cards(db, movies).await
}

async fn category_movies(
    db: &impl ConnectionTrait,
    category: &categories::Model,
    limit: Option<u64>,
) -> AppResult<Vec<MovieCard>> {
    let movies = category
        .find_related(Movies)
        .order_by_desc(movies::Column::CreatedAt)
        .order_by_asc(movies::Column::Name)
        .limit(limit)
        .all(db)
        .await?;
    to_cards(db, movies).await
}

fn listing(message: &str, items: Vec<MovieCard>) -> ApiResponse<MovieList> {
    let meta = Meta::total(items.len());
    ApiResponse::success(message, MovieList { items }, Some(meta))
}

/// Escape character for LIKE patterns; it needs no quoting on any backend.
pub const LIKE_ESCAPE: char = '!';

/// Escapes `%`, `_` and [`LIKE_ESCAPE`] itself so `term` matches literally.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

pub async fn home(state: &AppState) -> AppResult<ApiResponse<HomeFeed>> {
    let db = &state.orm;
    let trends = cards_of(db, trending(), Some(FEED_LIMIT)).await?;
    let new_projects = cards_of(db, newest(), Some(FEED_LIMIT)).await?;
    let serials = cards_of(db, serials(), Some(FEED_LIMIT)).await?;

    let mut featured = Vec::with_capacity(state.config.featured_categories.len());
    for name in &state.config.featured_categories {
        let category = Categories::find()
            .filter(categories::Column::Name.eq(name.as_str()))
            .one(db)
            .await?;
        let Some(category) = category else {
            tracing::debug!(category = %name, "featured category missing, skipped");
            continue;
        };
        let movies = category_movies(db, &category, Some(FEED_LIMIT)).await?;
        featured.push(CategorySection {
            category: category.name,
            movies,
        });
    }

    let categories = Categories::find()
        .order_by_asc(categories::Column::Name)
        .all(db)
        .await?
        .into_iter()
        .map(category_from_entity)
        .collect();
    let age_categories = AgeCategories::find()
        .order_by_asc(age_categories::Column::Name)
        .all(db)
        .await?
        .into_iter()
        .map(age_category_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Home",
        HomeFeed {
            trends,
            new_projects,
            serials,
            featured,
            categories,
            age_categories,
        },
        Some(Meta::empty()),
    ))
}

pub async fn trends(state: &AppState) -> AppResult<ApiResponse<MovieList>> {
    let items = cards_of(&state.orm, trending(), None).await?;
    Ok(listing("Trends", items))
}

pub async fn new_projects(state: &AppState) -> AppResult<ApiResponse<MovieList>> {
    let items = cards_of(&state.orm, newest(), None).await?;
    Ok(listing("New projects", items))
}

pub async fn serial_list(state: &AppState) -> AppResult<ApiResponse<MovieList>> {
    let items = cards_of(&state.orm, serials(), None).await?;
    Ok(listing("Serials", items))
}

pub async fn all_movies(state: &AppState) -> AppResult<ApiResponse<MovieList>> {
    let query = Movies::find().order_by_asc(movies::Column::Name);
    let items = cards_of(&state.orm, query, None).await?;
    Ok(listing("All movies", items))
}

pub async fn by_category(state: &AppState, name: &str) -> AppResult<ApiResponse<MovieList>> {
    let category = Categories::find()
        .filter(categories::Column::Name.eq(name.trim()))
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("Category"))?;

    let items = category_movies(&state.orm, &category, None).await?;
    Ok(listing(&category.name, items))
}

pub async fn search(state: &AppState, query: SearchQuery) -> AppResult<ApiResponse<MovieList>> {
    let term = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::BadRequest("search query is required".into()))?;

    // Both sides go through the database's LOWER so case folding is the
    // same on either side of the comparison.
    let pattern = format!("%{}%", escape_like(term));
    let name_matches = Expr::cust_with_exprs(
        format!("LOWER($1) LIKE LOWER($2) ESCAPE '{LIKE_ESCAPE}'"),
        [
            Expr::col((Movies, movies::Column::Name)).into(),
            Expr::val(pattern).into(),
        ],
    );

    let movies = Movies::find()
        .filter(name_matches)
        .order_by_desc(movies::Column::WatchCount)
        .order_by_asc(movies::Column::Name)
        .all(&state.orm)
        .await?;
    let items = to_cards(&state.orm, movies).await?;
    Ok(listing("Search results", items))
}

/// Most watched movies sharing a category with `movie`, excluding itself.
async fn similar(db: &impl ConnectionTrait, movie: &movies::Model) -> AppResult<Vec<MovieCard>> {
    let category_ids: Vec<Uuid> = MovieCategories::find()
        .filter(movie_categories::Column::MovieId.eq(movie.id))
        .all(db)
        .await?
        .into_iter()
        .map(|link| link.category_id)
        .collect();
    if category_ids.is_empty() {
        return Ok(Vec::new());
    }

    let sharing = Query::select()
        .column(movie_categories::Column::MovieId)
        .from(MovieCategories)
        .and_where(movie_categories::Column::CategoryId.is_in(category_ids))
        .to_owned();

    let query = Movies::find()
        .filter(movies::Column::Id.in_subquery(sharing))
        .filter(movies::Column::Id.ne(movie.id))
        .order_by_desc(movies::Column::WatchCount)
        .order_by_asc(movies::Column::Name);
    cards_of(db, query, Some(FEED_LIMIT)).await
}

/// Movie page for `user`; each call counts as one view.
pub async fn movie_page(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<MoviePage>> {
    let db = &state.orm;
    let updated = Movies::update_many()
        .col_expr(
            movies::Column::WatchCount,
            Expr::col(movies::Column::WatchCount).add(1),
        )
        .filter(movies::Column::Id.eq(id))
        .exec(db)
        .await?;
    if updated.rows_affected == 0 {
        return Err(AppError::NotFound("Movie"));
    }

    let movie = Movies::find_by_id(id)
        .one(db)
        .await?
        .ok_or(AppError::NotFound("Movie"))?;

    let is_favorite = pair_exists::<Favorites>(
        db,
        favorites::Column::UserId,
        user.user_id,
        favorites::Column::MovieId,
        id,
    )
    .await?;
    let similar = similar(db, &movie).await?;
    let detail = load_detail(db, movie).await?;

    Ok(ApiResponse::success(
        "Movie",
        MoviePage {
            detail,
            is_favorite,
            similar,
        },
        Some(Meta::empty()),
    ))
}

/// Link of episode `episode` in season `season` of the movie.
pub async fn episode_link(
    state: &AppState,
    movie_id: Uuid,
    season: i32,
    episode: i32,
) -> AppResult<ApiResponse<EpisodeLink>> {
    let db = &state.orm;
    if Movies::find_by_id(movie_id).one(db).await?.is_none() {
        return Err(AppError::NotFound("Movie"));
    }

    let season = Seasons::find()
        .filter(seasons::Column::MovieId.eq(movie_id))
        .filter(seasons::Column::Number.eq(season))
        .one(db)
        .await?
        .ok_or(AppError::NotFound("Season"))?;

    let video = Videos::find()
        .filter(videos::Column::SeasonId.eq(season.id))
        .filter(videos::Column::Position.eq(episode))
        .one(db)
        .await?
        .ok_or(AppError::NotFound("Episode"))?;

    Ok(ApiResponse::success(
        "Episode",
        EpisodeLink { link: video.link },
        Some(Meta::empty()),
    ))
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("50%_off"), "50!%!_off");
        assert_eq!(escape_like("wow!"), "wow!!");
        assert_eq!(escape_like("plain"), "plain");
    }
}
