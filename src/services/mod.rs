pub mod auth_service;
pub mod catalog_service;
pub mod favorite_service;
pub mod feed_service;
pub mod movie_service;
pub mod season_service;
pub mod user_service;
