pub mod auth;
pub mod catalog;
pub mod favorites;
pub mod feed;
pub mod movies;
pub mod seasons;
pub mod users;
