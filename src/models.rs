use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::{
    age_categories, categories, favorites, movie_types, movies, screenshots, seasons, users,
    users::Role, videos,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub username: Option<String>,
    pub mobile_phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Profile {
    pub email: String,
    pub username: Option<String>,
    pub mobile_phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

/// Row of one of the lookup tables: categories, project types, age categories.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct Lookup {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct Movie {
    pub id: Uuid,
    pub name: String,
    pub type_id: Uuid,
    pub age_category_id: Uuid,
    pub year: i32,
    pub timing: i32,
    pub keywords: String,
    pub description: String,
    pub director: String,
    pub producer: String,
    pub cover: String,
    pub watch_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Movie as shown in feeds and listings.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MovieCard {
    #[serde(flatten)]
    pub movie: Movie,
    pub categories: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Video {
    pub id: Uuid,
    pub position: i32,
    pub link: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Season {
    pub id: Uuid,
    pub movie_id: Uuid,
    pub number: i32,
    pub videos: Vec<Video>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Screenshot {
    pub id: Uuid,
    pub position: i32,
    pub link: String,
}

/// Movie with every association loaded.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MovieDetail {
    #[serde(flatten)]
    pub movie: Movie,
    pub movie_type: Option<Lookup>,
    pub age_category: Option<Lookup>,
    pub categories: Vec<Lookup>,
    pub screenshots: Vec<Screenshot>,
    pub seasons: Vec<Season>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Favorite {
    pub user_id: Uuid,
    pub movie_id: Uuid,
}

pub fn user_from_entity(model: users::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        role: model.role,
        username: model.username,
        mobile_phone: model.mobile_phone,
        birth_date: model.birth_date,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

pub fn profile_from_entity(model: users::Model) -> Profile {
    Profile {
        email: model.email,
        username: model.username,
        mobile_phone: model.mobile_phone,
        birth_date: model.birth_date,
    }
}

pub fn category_from_entity(model: categories::Model) -> Lookup {
    Lookup {
        id: model.id,
        name: model.name,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

pub fn movie_type_from_entity(model: movie_types::Model) -> Lookup {
    Lookup {
        id: model.id,
        name: model.name,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

pub fn age_category_from_entity(model: age_categories::Model) -> Lookup {
    Lookup {
        id: model.id,
        name: model.name,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

pub fn movie_from_entity(model: movies::Model) -> Movie {
    Movie {
        id: model.id,
        name: model.name,
        type_id: model.type_id,
        age_category_id: model.age_category_id,
        year: model.year,
        timing: model.timing,
        keywords: model.keywords,
        description: model.description,
        director: model.director,
        producer: model.producer,
        cover: model.cover,
        watch_count: model.watch_count,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

pub fn screenshot_from_entity(model: screenshots::Model) -> Screenshot {
    Screenshot {
        id: model.id,
        position: model.position,
        link: model.link,
    }
}

pub fn video_from_entity(model: videos::Model) -> Video {
    Video {
        id: model.id,
        position: model.position,
        link: model.link,
    }
}

/// Videos are sorted by position regardless of load order.
pub fn season_from_entity(model: seasons::Model, mut videos: Vec<videos::Model>) -> Season {
    videos.sort_by_key(|v| v.position);
    Season {
        id: model.id,
        movie_id: model.movie_id,
        number: model.number,
        videos: videos.into_iter().map(video_from_entity).collect(),
    }
}

pub fn favorite_from_entity(model: favorites::Model) -> Favorite {
    Favorite {
        user_id: model.user_id,
        movie_id: model.movie_id,
    }
}
