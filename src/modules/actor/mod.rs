use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use crate::state::AppState;

pub mod dto;
pub mod handler;
pub mod model;
pub mod repository;
pub mod service;

/// Room for a maximum-size photo plus the text fields.
const FORM_BODY_LIMIT: usize = 8 * 1024 * 1024;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_actors).post(handler::create_actor))
        .route(
            "/{id}",
            get(handler::get_actor)
                .put(handler::update_actor)
                .patch(handler::patch_actor)
                .delete(handler::delete_actor),
        )
        .layer(DefaultBodyLimit::max(FORM_BODY_LIMIT))
}
