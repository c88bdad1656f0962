use axum::Router;
use axum::routing::get;
use crate::state::AppState;

pub mod dto;
pub mod handler;
pub mod model;
pub mod repository;
pub mod service;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_cinema_rooms).post(handler::create_cinema_room))
        .route(
            "/{id}",
            get(handler::get_cinema_room)
                .put(handler::update_cinema_room)
                .patch(handler::patch_cinema_room)
                .delete(handler::delete_cinema_room),
        )
}
