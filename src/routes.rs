use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use crate::common::response::TOTAL_PAGES_HEADER;
use crate::docs::ApiDoc;
use axum::Router;
use axum::http::HeaderName;
use crate::state::AppState;

use tower_http::cors::{Any, CorsLayer};

pub fn configure_routes(state: AppState) -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([HeaderName::from_static(TOTAL_PAGES_HEADER)]);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api/v1", api_routes())
        .nest("/api/v1/genres", crate::modules::genre::router())
        .nest("/api/v1/actors", crate::modules::actor::router())
        .nest("/api/v1/cinema-rooms", crate::modules::cinema_room::router())
        .nest("/api/v1/movies", crate::modules::movie::router(state))
        .layer(cors)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", axum::routing::get(|| async { "ok" }))
}
