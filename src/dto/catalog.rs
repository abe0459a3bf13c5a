use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Lookup;

/// Body for creating or renaming a category, project type or age category.
#[derive(Deserialize, Debug, ToSchema)]
pub struct LookupRequest {
    pub name: String,
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(transparent)]
pub struct LookupList {
    #[schema(value_type = Vec<Lookup>)]
    pub items: Vec<Lookup>,
}
