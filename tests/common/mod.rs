#![allow(dead_code)]

use std::path::{Path, PathBuf};

use chrono::Utc;
use ozinshe_api::{
    config::AppConfig,
    db::{create_orm_conn_with, run_migrations},
    dto::{catalog::LookupRequest, movies::CreateMovieRequest},
    entity::users::{self, Role},
    middleware::auth::AuthUser,
    models::{Lookup, MovieDetail},
    services::{auth_service::hash_password, catalog_service, movie_service},
    state::AppState,
};
use sea_orm::{ActiveModelTrait, Set};
use uuid::Uuid;

pub const JWT_SECRET: &str = "test-secret";

/// Fresh in-memory database with every migration applied. A single
/// connection keeps the in-memory schema alive for the whole test.
pub async fn setup_state() -> anyhow::Result<AppState> {
    let orm = create_orm_conn_with("sqlite::memory:", 1).await?;
    run_migrations(&orm).await?;
    Ok(AppState::new(
        orm,
        AppConfig::new("sqlite::memory:", JWT_SECRET),
    ))
}

/// Database in a temporary file, so a pool of `max_connections` can run
/// requests side by side. Pass the returned path to [`remove_db_file`].
pub async fn setup_file_state(max_connections: u32) -> anyhow::Result<(AppState, PathBuf)> {
    let path = std::env::temp_dir().join(format!("ozinshe-{}.db", Uuid::new_v4()));
    let url = format!("sqlite://{}?mode=rwc", path.display());
    let orm = create_orm_conn_with(&url, max_connections).await?;
    run_migrations(&orm).await?;
    Ok((AppState::new(orm, AppConfig::new(url, JWT_SECRET)), path))
}

pub fn remove_db_file(path: &Path) {
    for suffix in ["", "-wal", "-shm", "-journal"] {
        let mut file = path.as_os_str().to_owned();
        file.push(suffix);
        let _ = std::fs::remove_file(file);
    }
}

pub async fn create_user(
    state: &AppState,
    role: Role,
    email: &str,
    password: &str,
) -> anyhow::Result<AuthUser> {
    let now = Utc::now();
    let user = users::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email.to_string()),
        password_hash: Set(hash_password(password)?),
        role: Set(role),
        username: Set(None),
        mobile_phone: Set(None),
        birth_date: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&state.orm)
    .await?;

    Ok(AuthUser {
        user_id: user.id,
        email: user.email,
        role: user.role,
    })
}

/// Lookup rows most movie tests need.
pub struct Lookups {
    pub movie: Lookup,
    pub serial: Lookup,
    pub adult: Lookup,
    pub horror: Lookup,
    pub anime: Lookup,
}

fn lookup(name: &str) -> LookupRequest {
    LookupRequest {
        name: name.to_string(),
    }
}

pub async fn seed_lookups(state: &AppState, admin: &AuthUser) -> anyhow::Result<Lookups> {
    let take = |resp: ozinshe_api::response::ApiResponse<Lookup>| {
        resp.data.ok_or_else(|| anyhow::anyhow!("missing lookup"))
    };
    Ok(Lookups {
        movie: take(catalog_service::create_movie_type(state, admin, lookup("Movie")).await?)?,
        serial: take(catalog_service::create_movie_type(state, admin, lookup("Serial")).await?)?,
        adult: take(catalog_service::create_age_category(state, admin, lookup("18+")).await?)?,
        horror: take(catalog_service::create_category(state, admin, lookup("Horror")).await?)?,
        anime: take(catalog_service::create_category(state, admin, lookup("Anime")).await?)?,
    })
}

pub fn movie_request(name: &str, type_id: Uuid, age_id: Uuid, categories: Vec<Uuid>) -> CreateMovieRequest {
    CreateMovieRequest {
        name: name.to_string(),
        type_id,
        age_category_id: age_id,
        category_ids: categories,
        year: 2020,
        timing: 90,
        keywords: String::new(),
        description: "A test title".to_string(),
        director: "Someone".to_string(),
        producer: "Studio".to_string(),
        cover: "https://cdn.example.com/cover.jpg".to_string(),
        screenshots: vec![
            "https://cdn.example.com/s1.jpg".to_string(),
            "https://cdn.example.com/s2.jpg".to_string(),
        ],
    }
}

pub async fn create_movie(
    state: &AppState,
    admin: &AuthUser,
    request: CreateMovieRequest,
) -> anyhow::Result<MovieDetail> {
    movie_service::create_movie(state, admin, request)
        .await?
        .data
        .ok_or_else(|| anyhow::anyhow!("missing movie"))
}
