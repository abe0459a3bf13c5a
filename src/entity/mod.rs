pub mod age_categories;
pub mod audit_logs;
pub mod categories;
pub mod favorites;
pub mod movie_categories;
pub mod movie_types;
pub mod movies;
pub mod password_reset_tokens;
pub mod screenshots;
pub mod seasons;
pub mod users;
pub mod videos;

pub use age_categories::Entity as AgeCategories;
pub use audit_logs::Entity as AuditLogs;
pub use categories::Entity as Categories;
pub use favorites::Entity as Favorites;
pub use movie_categories::Entity as MovieCategories;
pub use movie_types::Entity as MovieTypes;
pub use movies::Entity as Movies;
pub use password_reset_tokens::Entity as PasswordResetTokens;
pub use screenshots::Entity as Screenshots;
pub use seasons::Entity as Seasons;
pub use users::Entity as Users;
pub use videos::Entity as Videos;
