use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use crate::state::AppState;

pub mod dto;
pub mod handler;
pub mod links;
pub mod memory;
pub mod model;
pub mod query;
pub mod repository;
pub mod service;

/// Room for a maximum-size poster plus the text fields.
const FORM_BODY_LIMIT: usize = 8 * 1024 * 1024;

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_movies).post(handler::create_movie))
        .route("/showcase", get(handler::showcase))
        .route("/filter", get(handler::filter_movies))
        .route(
            "/{id}",
            get(handler::get_movie)
                .put(handler::update_movie)
                .patch(handler::patch_movie)
                .delete(handler::delete_movie),
        )
        .layer(DefaultBodyLimit::max(FORM_BODY_LIMIT))
        .nest("/{id}/reviews", crate::modules::review::router(state))
}
