//! Actor endpoints: multipart forms, photo storage and paging.

mod common;

use axum::http::{header, Method, StatusCode};
use serde_json::json;
use time::macros::date;

use common::{
    body_json, build_test_app, data, delete, get, seed_actor, send_json, send_multipart, total_pages, Part,
};

const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0, 0, 0];

// ---------------------------------------------------------------------------
// Test: create with and without a photo
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_actor_with_photo() {
    let app = build_test_app();

    let response = send_multipart(
        &app.router,
        Method::POST,
        "/api/v1/actors",
        &[
            Part::Text("name", "Keanu Reeves"),
            Part::Text("dateOfBirth", "1964-09-02"),
            Part::File {
                name: "photo",
                file_name: "keanu.png",
                content_type: "image/png",
                content: PNG,
            },
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response.headers()[header::LOCATION].to_str().unwrap().to_string();
    let actor = data(response).await;
    assert_eq!(location, format!("/api/v1/actors/{}", actor["id"]));
    assert_eq!(actor["dateOfBirth"], "1964-09-02");

    let photo = actor["photo"].as_str().unwrap();
    assert!(photo.ends_with(".png"));
    let stored = app.storage.get(photo).await.unwrap();
    assert_eq!(stored.content.as_ref(), PNG);
    assert_eq!(stored.content_type, "image/png");
}

#[tokio::test]
async fn create_actor_without_photo() {
    let app = build_test_app();

    let response = send_multipart(
        &app.router,
        Method::POST,
        "/api/v1/actors",
        &[Part::Text("name", "Tilda Swinton"), Part::Text("dateOfBirth", "1960-11-05")],
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(data(response).await["photo"].is_null());
    assert!(app.storage.is_empty().await);
}

#[tokio::test]
async fn create_actor_rejects_non_image_photo() {
    let app = build_test_app();

    let response = send_multipart(
        &app.router,
        Method::POST,
        "/api/v1/actors",
        &[
            Part::Text("name", "Keanu Reeves"),
            Part::Text("dateOfBirth", "1964-09-02"),
            Part::File {
                name: "photo",
                file_name: "notes.txt",
                content_type: "text/plain",
                content: b"hello",
            },
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["errors"][0]["field"], "photo");
    assert_eq!(app.state.actors.count().await.unwrap(), 0);
    assert!(app.storage.is_empty().await);
}

#[tokio::test]
async fn create_actor_reports_every_field_error() {
    let app = build_test_app();

    let response = send_multipart(&app.router, Method::POST, "/api/v1/actors", &[Part::Text("name", "")]).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    let fields: Vec<_> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(fields, vec!["dateOfBirth", "name"]);
}

// ---------------------------------------------------------------------------
// Test: paging
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_actors_pages_through_store_order() {
    let app = build_test_app();
    for name in ["Ana", "Bruno", "Carla"] {
        seed_actor(&app.state, name, date!(1980 - 01 - 01)).await;
    }

    let mut sizes = Vec::new();
    for page in 1..=3 {
        let response = get(&app.router, &format!("/api/v1/actors?page={page}&elementsPerPage=2")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(total_pages(&response), Some(2));
        sizes.push(data(response).await.as_array().unwrap().len());
    }
    assert_eq!(sizes, vec![2, 1, 0]);
}

#[tokio::test]
async fn list_actors_defaults_to_first_page_of_ten() {
    let app = build_test_app();
    for i in 0..12 {
        seed_actor(&app.state, &format!("Actor {i}"), date!(1990 - 06 - 15)).await;
    }

    let response = get(&app.router, "/api/v1/actors").await;

    assert_eq!(total_pages(&response), Some(2));
    let actors = data(response).await;
    assert_eq!(actors.as_array().unwrap().len(), 10);
    assert_eq!(actors[0]["name"], "Actor 0");
}

// ---------------------------------------------------------------------------
// Test: replace and patch
// ---------------------------------------------------------------------------

#[tokio::test]
async fn patch_actor_name_keeps_date_of_birth() {
    let app = build_test_app();
    let actor = seed_actor(&app.state, "Jon Doe", date!(1975 - 03 - 10)).await;
    let uri = format!("/api/v1/actors/{}", actor.id);

    let ops = json!([{ "op": "replace", "path": "/name", "value": "John Doe" }]);
    let response = send_json(&app.router, Method::PATCH, &uri, ops, None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let fetched = data(get(&app.router, &uri).await).await;
    assert_eq!(fetched["name"], "John Doe");
    assert_eq!(fetched["dateOfBirth"], "1975-03-10");
}

#[tokio::test]
async fn replace_actor_swaps_photo_only_when_uploaded() {
    let app = build_test_app();

    let created = send_multipart(
        &app.router,
        Method::POST,
        "/api/v1/actors",
        &[
            Part::Text("name", "Keanu Reeves"),
            Part::Text("dateOfBirth", "1964-09-02"),
            Part::File {
                name: "photo",
                file_name: "keanu.png",
                content_type: "image/png",
                content: PNG,
            },
        ],
    )
    .await;
    let actor = data(created).await;
    let uri = format!("/api/v1/actors/{}", actor["id"]);
    let first_photo = actor["photo"].as_str().unwrap().to_string();

    let response = send_multipart(
        &app.router,
        Method::PUT,
        &uri,
        &[Part::Text("name", "Keanu C. Reeves"), Part::Text("dateOfBirth", "1964-09-02")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let fetched = data(get(&app.router, &uri).await).await;
    assert_eq!(fetched["name"], "Keanu C. Reeves");
    assert_eq!(fetched["photo"], first_photo.as_str());

    let response = send_multipart(
        &app.router,
        Method::PUT,
        &uri,
        &[
            Part::Text("name", "Keanu C. Reeves"),
            Part::Text("dateOfBirth", "1964-09-02"),
            Part::File {
                name: "photo",
                file_name: "new.jpg",
                content_type: "image/jpeg",
                content: b"jpeg-bytes",
            },
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let fetched = data(get(&app.router, &uri).await).await;
    let second_photo = fetched["photo"].as_str().unwrap();
    assert_ne!(second_photo, first_photo);
    assert!(app.storage.get(&first_photo).await.is_none());
    assert_eq!(app.storage.len().await, 1);
}

#[tokio::test]
async fn replace_missing_actor_is_not_found() {
    let app = build_test_app();

    let response = send_multipart(
        &app.router,
        Method::PUT,
        "/api/v1/actors/99",
        &[Part::Text("name", "Nobody"), Part::Text("dateOfBirth", "2000-01-01")],
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.state.actors.count().await.unwrap(), 0);
}

// ---------------------------------------------------------------------------
// Test: delete removes the stored photo
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_actor_removes_photo() {
    let app = build_test_app();

    let created = send_multipart(
        &app.router,
        Method::POST,
        "/api/v1/actors",
        &[
            Part::Text("name", "Keanu Reeves"),
            Part::Text("dateOfBirth", "1964-09-02"),
            Part::File {
                name: "photo",
                file_name: "keanu.png",
                content_type: "image/png",
                content: PNG,
            },
        ],
    )
    .await;
    let actor = data(created).await;
    let uri = format!("/api/v1/actors/{}", actor["id"]);

    assert_eq!(delete(&app.router, &uri, None).await.status(), StatusCode::NO_CONTENT);
    assert!(app.storage.is_empty().await);
    assert_eq!(get(&app.router, &uri).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_missing_actor_leaves_store_untouched() {
    let app = build_test_app();
    seed_actor(&app.state, "Ana", date!(1980 - 01 - 01)).await;

    let response = delete(&app.router, "/api/v1/actors/404", None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.state.actors.count().await.unwrap(), 1);
}
