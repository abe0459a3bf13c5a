use utoipa::{
    Modify, OpenApi,
    openapi::{
        self, OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{
            LoginRequest, LoginResponse, PasswordRecoverRequest, ResetPasswordRequest,
            SignupRequest,
        },
        catalog::{LookupList, LookupRequest},
        favorites::FavoriteList,
        feed::{CategorySection, HomeFeed},
        movies::{CreateMovieRequest, EpisodeLink, MovieList, MoviePage, UpdateMovieRequest},
        seasons::SeasonRequest,
        users::{ChangePasswordRequest, UpdateProfileRequest},
    },
    entity::users::Role,
    models::{
        Favorite, Lookup, Movie, MovieCard, MovieDetail, Profile, Screenshot, Season, User, Video,
    },
    response::{ApiResponse, Empty, Meta},
    routes::{admin, auth, catalog, favorites, feed, health, users},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::signup,
        auth::login,
        auth::logout,
        auth::password_recover,
        auth::reset_password,
        users::edit_profile,
        users::update_profile,
        users::change_password,
        feed::home,
        feed::trends,
        feed::new_projects,
        feed::serials,
        feed::by_category,
        feed::search,
        feed::all_movies,
        feed::movie_page,
        feed::episode,
        favorites::list_favorites,
        favorites::add_favorite,
        favorites::remove_favorite,
        catalog::list_categories,
        catalog::list_movie_types,
        catalog::list_age_categories,
        catalog::create_category,
        catalog::get_category,
        catalog::update_category,
        catalog::delete_category,
        catalog::create_movie_type,
        catalog::get_movie_type,
        catalog::update_movie_type,
        catalog::delete_movie_type,
        catalog::create_age_category,
        catalog::get_age_category,
        catalog::update_age_category,
        catalog::delete_age_category,
        admin::create_movie,
        admin::edit_movie,
        admin::update_movie,
        admin::delete_movie,
        admin::create_season,
        admin::edit_season,
        admin::update_season,
        admin::delete_season
    ),
    components(
        schemas(
            Role,
            User,
            Profile,
            Lookup,
            Movie,
            MovieCard,
            MovieDetail,
            Screenshot,
            Season,
            Video,
            Favorite,
            SignupRequest,
            LoginRequest,
            LoginResponse,
            PasswordRecoverRequest,
            ResetPasswordRequest,
            UpdateProfileRequest,
            ChangePasswordRequest,
            LookupRequest,
            LookupList,
            CreateMovieRequest,
            UpdateMovieRequest,
            SeasonRequest,
            MovieList,
            MoviePage,
            EpisodeLink,
            HomeFeed,
            CategorySection,
            FavoriteList,
            Empty,
            Meta,
            ApiResponse<MovieDetail>,
            ApiResponse<MovieList>,
            ApiResponse<Lookup>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Signup, login and password recovery"),
        (name = "Profile", description = "Profile of the signed-in user"),
        (name = "Feed", description = "Browsing and watching"),
        (name = "Favorites", description = "Favorite endpoints"),
        (name = "Catalog", description = "Categories, project types and age categories"),
        (name = "Admin", description = "Admin endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
