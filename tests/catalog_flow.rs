mod common;

use chrono::{Duration, Utc};
use ozinshe_api::{
    dto::{
        auth::{PasswordRecoverRequest, ResetPasswordRequest},
        catalog::LookupRequest,
        feed::SearchQuery,
        seasons::SeasonRequest,
    },
    entity::{
        Favorites, MovieCategories, PasswordResetTokens, Screenshots, Videos, favorites,
        password_reset_tokens, users::Role,
    },
    error::AppError,
    services::{
        auth_service, catalog_service, favorite_service, feed_service, movie_service,
        season_service,
    },
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};
use uuid::Uuid;

use common::{create_movie, create_user, movie_request, seed_lookups, setup_state};

#[tokio::test]
async fn movie_names_are_unique_and_references_must_exist() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = create_user(&state, Role::Admin, "admin@x.com", "admin1").await?;
    let lookups = seed_lookups(&state, &admin).await?;

    let detail = create_movie(
        &state,
        &admin,
        movie_request(
            "Night",
            lookups.movie.id,
            lookups.adult.id,
            vec![lookups.horror.id, lookups.horror.id],
        ),
    )
    .await?;
    assert_eq!(detail.categories.len(), 1);
    assert_eq!(detail.screenshots.len(), 2);
    assert_eq!(detail.screenshots[0].position, 1);
    assert_eq!(detail.movie.watch_count, 0);

    let duplicate = movie_service::create_movie(
        &state,
        &admin,
        movie_request("Night", lookups.movie.id, lookups.adult.id, vec![]),
    )
    .await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));

    let unknown_type = movie_service::create_movie(
        &state,
        &admin,
        movie_request("Day", Uuid::new_v4(), lookups.adult.id, vec![]),
    )
    .await;
    assert!(matches!(unknown_type, Err(AppError::NotFound(_))));

    let unknown_category = movie_service::create_movie(
        &state,
        &admin,
        movie_request(
            "Day",
            lookups.movie.id,
            lookups.adult.id,
            vec![Uuid::new_v4()],
        ),
    )
    .await;
    assert!(matches!(unknown_category, Err(AppError::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn non_admin_cannot_manage_movies() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = create_user(&state, Role::Admin, "admin@x.com", "admin1").await?;
    let user = create_user(&state, Role::User, "user@x.com", "user1").await?;
    let lookups = seed_lookups(&state, &admin).await?;

    let result = movie_service::create_movie(
        &state,
        &user,
        movie_request("Night", lookups.movie.id, lookups.adult.id, vec![]),
    )
    .await;
    assert!(matches!(result, Err(AppError::Forbidden)));
    Ok(())
}

#[tokio::test]
async fn update_renames_and_replaces_associations() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = create_user(&state, Role::Admin, "admin@x.com", "admin1").await?;
    let lookups = seed_lookups(&state, &admin).await?;

    let first = create_movie(
        &state,
        &admin,
        movie_request("First", lookups.movie.id, lookups.adult.id, vec![lookups.horror.id]),
    )
    .await?;
    create_movie(
        &state,
        &admin,
        movie_request("Second", lookups.movie.id, lookups.adult.id, vec![]),
    )
    .await?;

    let mut request = movie_request(
        "Second",
        lookups.serial.id,
        lookups.adult.id,
        vec![lookups.anime.id],
    );
    let clash = movie_service::update_movie(
        &state,
        &admin,
        first.movie.id,
        ozinshe_api::dto::movies::UpdateMovieRequest {
            name: request.name.clone(),
            type_id: request.type_id,
            age_category_id: request.age_category_id,
            category_ids: request.category_ids.clone(),
            year: request.year,
            timing: request.timing,
            keywords: String::new(),
            description: String::new(),
            director: String::new(),
            producer: String::new(),
            cover: request.cover.clone(),
            screenshots: None,
        },
    )
    .await;
    assert!(matches!(clash, Err(AppError::Conflict(_))));

    request.name = "First".to_string();
    let updated = movie_service::update_movie(
        &state,
        &admin,
        first.movie.id,
        ozinshe_api::dto::movies::UpdateMovieRequest {
            name: request.name,
            type_id: request.type_id,
            age_category_id: request.age_category_id,
            category_ids: request.category_ids,
            year: 2024,
            timing: request.timing,
            keywords: String::new(),
            description: String::new(),
            director: String::new(),
            producer: String::new(),
            cover: request.cover,
            screenshots: Some(vec!["https://cdn.example.com/only.jpg".to_string()]),
        },
    )
    .await?
    .data
    .expect("updated movie");

    assert_eq!(updated.movie.year, 2024);
    assert_eq!(updated.movie.type_id, lookups.serial.id);
    let names: Vec<_> = updated.categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Anime"]);
    assert_eq!(updated.screenshots.len(), 1);

    let missing = movie_service::get_movie(&state, &admin, Uuid::new_v4()).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn deleting_a_movie_removes_everything_it_owns() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = create_user(&state, Role::Admin, "admin@x.com", "admin1").await?;
    let user = create_user(&state, Role::User, "user@x.com", "user1").await?;
    let lookups = seed_lookups(&state, &admin).await?;

    let detail = create_movie(
        &state,
        &admin,
        movie_request("Gone", lookups.serial.id, lookups.adult.id, vec![lookups.horror.id]),
    )
    .await?;
    let movie_id = detail.movie.id;
    season_service::create_season(
        &state,
        &admin,
        movie_id,
        SeasonRequest {
            number: None,
            videos: vec!["v1".into(), "v2".into()],
        },
    )
    .await?;
    favorite_service::add_favorite(&state, &user, movie_id).await?;
    favorite_service::add_favorite(&state, &admin, movie_id).await?;

    movie_service::delete_movie(&state, &admin, movie_id).await?;

    let favorites = Favorites::find()
        .filter(favorites::Column::MovieId.eq(movie_id))
        .count(&state.orm)
        .await?;
    assert_eq!(favorites, 0);
    assert_eq!(Videos::find().count(&state.orm).await?, 0);
    assert_eq!(Screenshots::find().count(&state.orm).await?, 0);
    assert_eq!(MovieCategories::find().count(&state.orm).await?, 0);

    let again = movie_service::delete_movie(&state, &admin, movie_id).await;
    assert!(matches!(again, Err(AppError::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn season_update_replaces_the_video_list() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = create_user(&state, Role::Admin, "admin@x.com", "admin1").await?;
    let lookups = seed_lookups(&state, &admin).await?;
    let movie = create_movie(
        &state,
        &admin,
        movie_request("Show", lookups.serial.id, lookups.adult.id, vec![]),
    )
    .await?
    .movie;

    let season = season_service::create_season(
        &state,
        &admin,
        movie.id,
        SeasonRequest {
            number: None,
            videos: vec!["a".into(), "b".into(), "c".into()],
        },
    )
    .await?
    .data
    .expect("season");
    assert_eq!(season.number, 1);
    assert_eq!(season.videos.len(), 3);

    let taken = season_service::create_season(
        &state,
        &admin,
        movie.id,
        SeasonRequest {
            number: Some(1),
            videos: vec![],
        },
    )
    .await;
    assert!(matches!(taken, Err(AppError::Conflict(_))));

    let updated = season_service::update_season(
        &state,
        &admin,
        movie.id,
        season.id,
        SeasonRequest {
            number: None,
            videos: vec!["x".into(), "y".into()],
        },
    )
    .await?
    .data
    .expect("season");
    let links: Vec<_> = updated.videos.iter().map(|v| v.link.as_str()).collect();
    assert_eq!(links, vec!["x", "y"]);
    assert_eq!(Videos::find().count(&state.orm).await?, 2);

    let link = feed_service::episode_link(&state, movie.id, 1, 2)
        .await?
        .data
        .expect("episode");
    assert_eq!(link.link, "y");
    let missing = feed_service::episode_link(&state, movie.id, 1, 3).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    let wrong_movie =
        season_service::get_season(&state, &admin, Uuid::new_v4(), season.id).await;
    assert!(matches!(wrong_movie, Err(AppError::NotFound(_))));

    season_service::delete_season(&state, &admin, movie.id, season.id).await?;
    assert_eq!(Videos::find().count(&state.orm).await?, 0);
    Ok(())
}

#[tokio::test]
async fn favorites_are_unique_per_user_and_movie() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = create_user(&state, Role::Admin, "admin@x.com", "admin1").await?;
    let user = create_user(&state, Role::User, "user@x.com", "user1").await?;
    let lookups = seed_lookups(&state, &admin).await?;
    let movie = create_movie(
        &state,
        &admin,
        movie_request("Fav", lookups.movie.id, lookups.adult.id, vec![]),
    )
    .await?
    .movie;

    let favorite = favorite_service::add_favorite(&state, &user, movie.id)
        .await?
        .data
        .expect("favorite");
    assert_eq!(favorite.movie_id, movie.id);
    assert_eq!(favorite.user_id, user.user_id);

    let duplicate = favorite_service::add_favorite(&state, &user, movie.id).await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));

    let unknown = favorite_service::add_favorite(&state, &user, Uuid::new_v4()).await;
    assert!(matches!(unknown, Err(AppError::NotFound(_))));

    let listed = favorite_service::list_favorites(&state, &user)
        .await?
        .data
        .expect("favorites");
    assert_eq!(listed.items, vec![favorite]);

    favorite_service::remove_favorite(&state, &user, movie.id).await?;
    let absent = favorite_service::remove_favorite(&state, &user, movie.id).await;
    assert!(matches!(absent, Err(AppError::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn lookups_in_use_cannot_be_deleted() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = create_user(&state, Role::Admin, "admin@x.com", "admin1").await?;
    let lookups = seed_lookups(&state, &admin).await?;
    create_movie(
        &state,
        &admin,
        movie_request("Used", lookups.movie.id, lookups.adult.id, vec![lookups.horror.id]),
    )
    .await?;

    let in_use = catalog_service::delete_movie_type(&state, &admin, lookups.movie.id).await;
    assert!(matches!(in_use, Err(AppError::Conflict(_))));
    let in_use = catalog_service::delete_age_category(&state, &admin, lookups.adult.id).await;
    assert!(matches!(in_use, Err(AppError::Conflict(_))));

    catalog_service::delete_movie_type(&state, &admin, lookups.serial.id).await?;
    catalog_service::delete_category(&state, &admin, lookups.horror.id).await?;
    assert_eq!(MovieCategories::find().count(&state.orm).await?, 0);

    let duplicate = catalog_service::create_category(
        &state,
        &admin,
        LookupRequest {
            name: "Anime".into(),
        },
    )
    .await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));
    Ok(())
}

#[tokio::test]
async fn feed_ranks_searches_and_counts_views() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = create_user(&state, Role::Admin, "admin@x.com", "admin1").await?;
    let user = create_user(&state, Role::User, "user@x.com", "user1").await?;
    let lookups = seed_lookups(&state, &admin).await?;

    let dark = create_movie(
        &state,
        &admin,
        movie_request("Dark Water", lookups.movie.id, lookups.adult.id, vec![lookups.horror.id]),
    )
    .await?
    .movie;
    let deep = create_movie(
        &state,
        &admin,
        movie_request("Deep_Dark", lookups.serial.id, lookups.adult.id, vec![lookups.horror.id]),
    )
    .await?
    .movie;
    create_movie(
        &state,
        &admin,
        movie_request("Sunny", lookups.movie.id, lookups.adult.id, vec![lookups.anime.id]),
    )
    .await?;

    let page = feed_service::movie_page(&state, &user, dark.id)
        .await?
        .data
        .expect("page");
    assert_eq!(page.detail.movie.watch_count, 1);
    assert!(!page.is_favorite);
    let similar: Vec<_> = page.similar.iter().map(|c| c.movie.id).collect();
    assert_eq!(similar, vec![deep.id]);

    favorite_service::add_favorite(&state, &user, dark.id).await?;
    let page = feed_service::movie_page(&state, &user, dark.id)
        .await?
        .data
        .expect("page");
    assert_eq!(page.detail.movie.watch_count, 2);
    assert!(page.is_favorite);

    let trends = feed_service::trends(&state).await?.data.expect("trends");
    assert_eq!(trends.items[0].movie.id, dark.id);
    assert_eq!(trends.items[0].categories, vec!["Horror".to_string()]);

    let serials = feed_service::serial_list(&state).await?.data.expect("serials");
    assert_eq!(serials.items.len(), 1);
    assert_eq!(serials.items[0].movie.id, deep.id);

    let found = feed_service::search(
        &state,
        SearchQuery {
            search: Some("DARK".into()),
        },
    )
    .await?
    .data
    .expect("results");
    assert_eq!(found.items.len(), 2);

    create_movie(
        &state,
        &admin,
        movie_request("Ночной дозор", lookups.movie.id, lookups.adult.id, vec![]),
    )
    .await?;
    let cyrillic = feed_service::search(
        &state,
        SearchQuery {
            search: Some("Ночной".into()),
        },
    )
    .await?
    .data
    .expect("results");
    let names: Vec<_> = cyrillic.items.iter().map(|c| c.movie.name.as_str()).collect();
    assert_eq!(names, vec!["Ночной дозор"]);

    let literal = feed_service::search(
        &state,
        SearchQuery {
            search: Some("p_d".into()),
        },
    )
    .await?
    .data
    .expect("results");
    let names: Vec<_> = literal.items.iter().map(|c| c.movie.name.as_str()).collect();
    assert_eq!(names, vec!["Deep_Dark"]);

    let wildcard = feed_service::search(
        &state,
        SearchQuery {
            search: Some("%".into()),
        },
    )
    .await?
    .data
    .expect("results");
    assert!(wildcard.items.is_empty());

    let empty = feed_service::search(&state, SearchQuery { search: None }).await;
    assert!(matches!(empty, Err(AppError::BadRequest(_))));

    let horror = feed_service::by_category(&state, "Horror")
        .await?
        .data
        .expect("horror");
    assert_eq!(horror.items.len(), 2);
    let missing = feed_service::by_category(&state, "Western").await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    let home = feed_service::home(&state).await?.data.expect("home");
    assert_eq!(home.trends.len(), 4);
    assert_eq!(home.serials.len(), 1);
    let featured: Vec<_> = home.featured.iter().map(|s| s.category.as_str()).collect();
    assert_eq!(featured, vec!["Horror", "Anime"]);
    assert_eq!(home.categories.len(), 2);

    let unknown = feed_service::movie_page(&state, &user, Uuid::new_v4()).await;
    assert!(matches!(unknown, Err(AppError::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn reset_tokens_work_once_and_expire() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = create_user(&state, Role::User, "user@x.com", "user1").await?;

    let unknown = auth_service::password_recover(
        &state,
        PasswordRecoverRequest {
            email: "nobody@x.com".into(),
        },
    )
    .await;
    assert!(matches!(unknown, Err(AppError::NotFound(_))));

    auth_service::password_recover(
        &state,
        PasswordRecoverRequest {
            email: "user@x.com".into(),
        },
    )
    .await?;
    let token = PasswordResetTokens::find()
        .filter(password_reset_tokens::Column::UserId.eq(user.user_id))
        .one(&state.orm)
        .await?
        .expect("reset token");

    let reset = |token: &str| ResetPasswordRequest {
        token: token.to_string(),
        password: "newpass".into(),
        password_repeat: "newpass".into(),
    };

    auth_service::reset_password(&state, reset(&token.token)).await?;
    let reused = auth_service::reset_password(&state, reset(&token.token)).await;
    assert!(matches!(reused, Err(AppError::BadRequest(_))));

    let login = auth_service::login(
        &state,
        ozinshe_api::dto::auth::LoginRequest {
            email: "user@x.com".into(),
            password: "newpass".into(),
        },
    )
    .await?;
    assert!(login.data.is_some());

    let now = Utc::now();
    password_reset_tokens::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        token: Set("stale".into()),
        expires_at: Set((now - Duration::minutes(5)).into()),
        used: Set(false),
        created_at: Set((now - Duration::hours(2)).into()),
    }
    .insert(&state.orm)
    .await?;
    let expired = auth_service::reset_password(&state, reset("stale")).await;
    assert!(matches!(expired, Err(AppError::BadRequest(_))));
    Ok(())
}
