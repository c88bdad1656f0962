mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{body_json, build_test_app, data, get, seed_cinema_room, send_json, total_pages};

#[tokio::test]
async fn create_cinema_room_with_coordinates() {
    let app = build_test_app();

    let body = json!({ "name": "Sala 1", "latitude": 18.47, "longitude": -69.93 });
    let response = send_json(&app.router, Method::POST, "/api/v1/cinema-rooms", body, None).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let room = data(response).await;
    assert_eq!(room["name"], "Sala 1");
    assert_eq!(room["latitude"], 18.47);
}

#[tokio::test]
async fn out_of_range_latitude_is_rejected() {
    let app = build_test_app();

    let body = json!({ "name": "Polar", "latitude": 120.0 });
    let response = send_json(&app.router, Method::POST, "/api/v1/cinema-rooms", body, None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["errors"][0]["field"], "latitude");
}

#[tokio::test]
async fn list_cinema_rooms_reports_total_pages() {
    let app = build_test_app();
    for name in ["A", "B", "C", "D", "E"] {
        seed_cinema_room(&app.state, name).await;
    }

    let response = get(&app.router, "/api/v1/cinema-rooms?page=2&elementsPerPage=2").await;

    assert_eq!(total_pages(&response), Some(3));
    let names: Vec<_> = data(response)
        .await
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["C", "D"]);
}

#[tokio::test]
async fn patch_cinema_room_clears_coordinates() {
    let app = build_test_app();
    let room = seed_cinema_room(&app.state, "Sala 2").await;
    let uri = format!("/api/v1/cinema-rooms/{}", room.id);

    let ops = json!([{ "op": "replace", "path": "/latitude", "value": 10.5 }]);
    let response = send_json(&app.router, Method::PATCH, &uri, ops, None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let fetched = data(get(&app.router, &uri).await).await;
    assert_eq!(fetched["latitude"], 10.5);
    assert!(fetched["longitude"].is_null());
}
