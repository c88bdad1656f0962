use utoipa::OpenApi;
use crate::common::patch::{PatchOp, PatchOperation};
use crate::common::validation::FieldError;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::genre::handler::list_genres,
        crate::modules::genre::handler::get_genre,
        crate::modules::genre::handler::create_genre,
        crate::modules::genre::handler::update_genre,
        crate::modules::genre::handler::patch_genre,
        crate::modules::genre::handler::delete_genre,
        crate::modules::actor::handler::list_actors,
        crate::modules::actor::handler::get_actor,
        crate::modules::actor::handler::create_actor,
        crate::modules::actor::handler::update_actor,
        crate::modules::actor::handler::patch_actor,
        crate::modules::actor::handler::delete_actor,
        crate::modules::cinema_room::handler::list_cinema_rooms,
        crate::modules::cinema_room::handler::get_cinema_room,
        crate::modules::cinema_room::handler::create_cinema_room,
        crate::modules::cinema_room::handler::update_cinema_room,
        crate::modules::cinema_room::handler::patch_cinema_room,
        crate::modules::cinema_room::handler::delete_cinema_room,
        crate::modules::movie::handler::list_movies,
        crate::modules::movie::handler::showcase,
        crate::modules::movie::handler::filter_movies,
        crate::modules::movie::handler::get_movie,
        crate::modules::movie::handler::create_movie,
        crate::modules::movie::handler::update_movie,
        crate::modules::movie::handler::patch_movie,
        crate::modules::movie::handler::delete_movie,
        crate::modules::review::handler::list_reviews,
        crate::modules::review::handler::create_review,
        crate::modules::review::handler::update_review,
        crate::modules::review::handler::delete_review,
    ),
    components(
        schemas(
            FieldError,
            PatchOp,
            PatchOperation,
            crate::modules::genre::dto::GenreCreateRequest,
            crate::modules::genre::dto::GenreResponse,
            crate::modules::actor::dto::ActorResponse,
            crate::modules::cinema_room::dto::CinemaRoomCreateRequest,
            crate::modules::cinema_room::dto::CinemaRoomResponse,
            crate::modules::movie::dto::ActorCreditRequest,
            crate::modules::movie::dto::MovieActorResponse,
            crate::modules::movie::dto::MovieResponse,
            crate::modules::movie::dto::MoviesShowcaseResponse,
            crate::modules::review::dto::ReviewCreateRequest,
            crate::modules::review::dto::ReviewResponse,
        )
    ),
    tags(
        (name = "Genres", description = "Movie genres"),
        (name = "Actors", description = "Actors and their photos"),
        (name = "Cinema rooms", description = "Cinema rooms"),
        (name = "Movies", description = "Movies, their cast and genres"),
        (name = "Reviews", description = "User reviews of movies")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

use utoipa::Modify;
use utoipa::openapi::security::{SecurityScheme, HttpAuthScheme, HttpBuilder};

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
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
}
