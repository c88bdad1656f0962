#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::Value;
use time::{Date, OffsetDateTime};
use tower::ServiceExt;

use movie_catalog::app::create_app;
use movie_catalog::common::response::TOTAL_PAGES_HEADER;
use movie_catalog::config::settings::AppConfig;
use movie_catalog::infrastructure::storage::memory::MemoryFileStorage;
use movie_catalog::middleware::auth::TokenClaims;
use movie_catalog::modules::actor::model::Actor;
use movie_catalog::modules::cinema_room::model::CinemaRoom;
use movie_catalog::modules::genre::model::Genre;
use movie_catalog::state::{AppState, Repositories};

pub const JWT_SECRET: &str = "test-secret";
const BOUNDARY: &str = "catalog-test-boundary";

/// Build a test `AppConfig`. Nothing here is dialed: the tests run on the
/// in-memory store and file storage.
pub fn test_config() -> AppConfig {
    AppConfig {
        server_port: 0,
        database_url: "postgres://unused".to_string(),
        db_max_connections: 1,
        jwt_secret: JWT_SECRET.to_string(),
        s3_endpoint: "http://localhost:9000".to_string(),
        s3_bucket: "catalog".to_string(),
        s3_access_key: "test".to_string(),
        s3_secret_key: "test".to_string(),
        files_public_url: "http://localhost:9000/catalog".to_string(),
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub storage: MemoryFileStorage,
}

/// The production router over in-memory backends.
pub fn build_test_app() -> TestApp {
    let storage = MemoryFileStorage::new();
    let state = AppState::new(
        test_config(),
        Repositories::in_memory(),
        Arc::new(storage.clone()),
    );

    TestApp {
        router: create_app(state.clone()),
        state,
        storage,
    }
}

pub fn token_for(user_id: &str) -> String {
    let now = OffsetDateTime::now_utc().unix_timestamp() as usize;
    let claims = TokenClaims {
        sub: user_id.to_string(),
        role: "USER".to_string(),
        iat: now,
        exp: now + 3600,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("token encoding should succeed")
}

/// Signs arbitrary claims, for tokens shaped differently from `TokenClaims`.
pub fn token_with_claims(claims: &Value) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("token encoding should succeed")
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn delete(app: &Router, uri: &str, token: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method(Method::DELETE).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn send_json(
    app: &Router,
    method: Method,
    uri: &str,
    body: Value,
    token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// One part of a multipart form.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        file_name: &'a str,
        content_type: &'a str,
        content: &'a [u8],
    },
}

pub async fn send_multipart(app: &Router, method: Method, uri: &str, parts: &[Part<'_>]) -> Response<Body> {
    let mut body: Vec<u8> = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n").as_bytes(),
                );
            }
            Part::File {
                name,
                file_name,
                content_type,
                content,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(content);
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

pub fn total_pages(response: &Response<Body>) -> Option<i64> {
    response
        .headers()
        .get(TOTAL_PAGES_HEADER)
        .map(|v| v.to_str().unwrap().parse().unwrap())
}

/// `data` of a success envelope.
pub async fn data(response: Response<Body>) -> Value {
    body_json(response).await["data"].clone()
}

// ---------------------------------------------------------------------------
// Seeding straight into the store
// ---------------------------------------------------------------------------

pub async fn seed_genre(state: &AppState, name: &str) -> Genre {
    state
        .genres
        .insert(Genre {
            id: 0,
            name: name.to_string(),
        })
        .await
        .unwrap()
}

pub async fn seed_actor(state: &AppState, name: &str, date_of_birth: Date) -> Actor {
    state
        .actors
        .insert(Actor {
            id: 0,
            name: name.to_string(),
            date_of_birth,
            photo: None,
        })
        .await
        .unwrap()
}

pub async fn seed_cinema_room(state: &AppState, name: &str) -> CinemaRoom {
    state
        .cinema_rooms
        .insert(CinemaRoom {
            id: 0,
            name: name.to_string(),
            latitude: None,
            longitude: None,
        })
        .await
        .unwrap()
}
