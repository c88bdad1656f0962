use axum::Router;
use axum::routing::{get, post, put};
use crate::state::AppState;
use axum::middleware;

pub mod dto;
pub mod handler;
pub mod memory;
pub mod model;
pub mod repository;
pub mod service;

/// Routes under `/movies/{id}/reviews`. Reads are public; writes need a token.
pub fn router(state: AppState) -> Router<AppState> {
    let public_routes = Router::new()
        .route("/", get(handler::list_reviews));

    let protected_routes = Router::new()
        .route("/", post(handler::create_review))
        .route("/{review_id}", put(handler::update_review).delete(handler::delete_review))
        .route_layer(middleware::from_fn_with_state(
            state,
            crate::middleware::auth::auth_middleware,
        ));

    public_routes.merge(protected_routes)
}
