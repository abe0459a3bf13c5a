use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{MovieCard, MovieDetail};

#[derive(Deserialize, Debug, ToSchema)]
pub struct CreateMovieRequest {
    pub name: String,
    pub type_id: Uuid,
    pub age_category_id: Uuid,
    #[serde(default)]
    pub category_ids: Vec<Uuid>,
    pub year: i32,
    pub timing: i32,
    #[serde(default)]
    pub keywords: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub producer: String,
    /// URL of an already uploaded cover image.
    pub cover: String,
    #[serde(default)]
    pub screenshots: Vec<String>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct UpdateMovieRequest {
    pub name: String,
    pub type_id: Uuid,
    pub age_category_id: Uuid,
    #[serde(default)]
    pub category_ids: Vec<Uuid>,
    pub year: i32,
    pub timing: i32,
    #[serde(default)]
    pub keywords: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub producer: String,
    pub cover: String,
    /// Replaces the screenshot list when present.
    pub screenshots: Option<Vec<String>>,
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(transparent)]
pub struct MovieList {
    #[schema(value_type = Vec<MovieCard>)]
    pub items: Vec<MovieCard>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct MoviePage {
    #[serde(flatten)]
    pub detail: MovieDetail,
    pub is_favorite: bool,
    pub similar: Vec<MovieCard>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct EpisodeLink {
    pub link: String,
}
