use ozinshe_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    dto::{catalog::LookupRequest, movies::CreateMovieRequest, seasons::SeasonRequest},
    entity::{
        AgeCategories, Categories, MovieTypes, Movies, Users, age_categories, categories,
        movie_types, movies, users::{self, Role},
    },
    middleware::auth::AuthUser,
    services::{auth_service, catalog_service, movie_service, season_service},
    state::AppState,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

const MOVIE_TYPES: [&str; 2] = ["Movie", "Serial"];
const AGE_CATEGORIES: [&str; 4] = ["0+", "6+", "12+", "18+"];
const CATEGORIES: [&str; 5] = ["Anime", "Comedy", "Drama", "Family", "Horror"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;

    let admin_email = config
        .admin_email
        .clone()
        .unwrap_or_else(|| "admin@example.com".to_string());
    let admin_password = config
        .admin_password
        .clone()
        .unwrap_or_else(|| "admin123".to_string());
    let admin_id = auth_service::bootstrap_admin(&orm, &admin_email, &admin_password).await?;
    let state = AppState::new(orm, config);
    let admin = AuthUser {
        user_id: admin_id,
        email: admin_email,
        role: Role::Admin,
    };

    let user_id = ensure_user(&state, "user@example.com", "user123").await?;

    for name in MOVIE_TYPES {
        let exists = MovieTypes::find()
            .filter(movie_types::Column::Name.eq(name))
            .one(&state.orm)
            .await?;
        if exists.is_none() {
            catalog_service::create_movie_type(&state, &admin, lookup(name)).await?;
        }
    }
    for name in AGE_CATEGORIES {
        let exists = AgeCategories::find()
            .filter(age_categories::Column::Name.eq(name))
            .one(&state.orm)
            .await?;
        if exists.is_none() {
            catalog_service::create_age_category(&state, &admin, lookup(name)).await?;
        }
    }
    for name in CATEGORIES {
        let exists = Categories::find()
            .filter(categories::Column::Name.eq(name))
            .one(&state.orm)
            .await?;
        if exists.is_none() {
            catalog_service::create_category(&state, &admin, lookup(name)).await?;
        }
    }

    seed_movies(&state, &admin).await?;

    println!("Seed completed. Admin ID: {admin_id}, User ID: {user_id}");
    Ok(())
}

fn lookup(name: &str) -> LookupRequest {
    LookupRequest {
        name: name.to_string(),
    }
}

async fn ensure_user(state: &AppState, email: &str, password: &str) -> anyhow::Result<Uuid> {
    let existing = Users::find()
        .filter(users::Column::Email.eq(email))
        .one(&state.orm)
        .await?;
    if let Some(user) = existing {
        return Ok(user.id);
    }

    let created = auth_service::signup(
        state,
        ozinshe_api::dto::auth::SignupRequest {
            email: email.to_string(),
            password: password.to_string(),
            password_repeat: password.to_string(),
        },
    )
    .await?;
    created
        .data
        .map(|user| user.id)
        .ok_or_else(|| anyhow::anyhow!("signup returned no user"))
}

async fn id_of_type(state: &AppState, name: &str) -> anyhow::Result<Uuid> {
    MovieTypes::find()
        .filter(movie_types::Column::Name.eq(name))
        .one(&state.orm)
        .await?
        .map(|m| m.id)
        .ok_or_else(|| anyhow::anyhow!("missing project type {name}"))
}

async fn id_of_age(state: &AppState, name: &str) -> anyhow::Result<Uuid> {
    AgeCategories::find()
        .filter(age_categories::Column::Name.eq(name))
        .one(&state.orm)
        .await?
        .map(|m| m.id)
        .ok_or_else(|| anyhow::anyhow!("missing age category {name}"))
}

async fn ids_of_categories(state: &AppState, names: &[&str]) -> anyhow::Result<Vec<Uuid>> {
    let found = Categories::find()
        .filter(categories::Column::Name.is_in(names.iter().copied()))
        .all(&state.orm)
        .await?;
    Ok(found.into_iter().map(|c| c.id).collect())
}

async fn seed_movies(state: &AppState, admin: &AuthUser) -> anyhow::Result<()> {
    let demo: [(&str, &str, &str, &[&str], i32); 4] = [
        ("Midnight Harbor", "Movie", "18+", &["Horror", "Drama"], 2021),
        ("Paper Lanterns", "Serial", "12+", &["Anime", "Family"], 2019),
        ("Weekend Shift", "Movie", "6+", &["Comedy"], 2023),
        ("Hollow Pines", "Serial", "18+", &["Horror"], 2022),
    ];

    for (name, kind, age, category_names, year) in demo {
        let exists = Movies::find()
            .filter(movies::Column::Name.eq(name))
            .one(&state.orm)
            .await?;
        if exists.is_some() {
            continue;
        }

        let payload = CreateMovieRequest {
            name: name.to_string(),
            type_id: id_of_type(state, kind).await?,
            age_category_id: id_of_age(state, age).await?,
            category_ids: ids_of_categories(state, category_names).await?,
            year,
            timing: 95,
            keywords: category_names.join(", ").to_lowercase(),
            description: format!("{name}, a demo title."),
            director: "Demo Director".to_string(),
            producer: "Demo Studio".to_string(),
            cover: format!("https://cdn.example.com/covers/{}.jpg", slug(name)),
            screenshots: vec![format!(
                "https://cdn.example.com/screens/{}-1.jpg",
                slug(name)
            )],
        };
        let created = movie_service::create_movie(state, admin, payload).await?;
        let Some(detail) = created.data else {
            continue;
        };

        if kind == "Serial" {
            let videos = (1..=3)
                .map(|ep| format!("https://cdn.example.com/video/{}/s1e{ep}.m3u8", slug(name)))
                .collect();
            season_service::create_season(
                state,
                admin,
                detail.movie.id,
                SeasonRequest {
                    number: Some(1),
                    videos,
                },
            )
            .await?;
        }
    }
    Ok(())
}

fn slug(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}
