use axum::Router;
use crate::state::AppState;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Hard cap on any request body; the image forms are the largest.
const MAX_REQUEST_BYTES: usize = 8 * 1024 * 1024;

pub fn create_app(state: AppState) -> Router {
    crate::routes::configure_routes(state.clone())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BYTES)),
        )
        .with_state(state)
}
