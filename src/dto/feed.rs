use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Lookup, MovieCard};

#[derive(Serialize, Debug, ToSchema)]
pub struct CategorySection {
    pub category: String,
    pub movies: Vec<MovieCard>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct HomeFeed {
    pub trends: Vec<MovieCard>,
    pub new_projects: Vec<MovieCard>,
    pub serials: Vec<MovieCard>,
    pub featured: Vec<CategorySection>,
    pub categories: Vec<Lookup>,
    pub age_categories: Vec<Lookup>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct SearchQuery {
    pub search: Option<String>,
}
