//! Reviews nested under a movie: authentication, uniqueness and ownership.

mod common;

use axum::http::{header, Method, StatusCode};
use serde_json::json;
use time::macros::date;

use common::{
    body_json, build_test_app, data, delete, get, send_json, token_for, token_with_claims, total_pages, TestApp,
};
use movie_catalog::modules::movie::model::Movie;

async fn seed_movie(app: &TestApp, title: &str) -> i64 {
    app.state
        .movies
        .insert(Movie {
            id: 0,
            title: title.to_string(),
            in_cinema: true,
            release_date: date!(2010 - 07 - 16),
            poster: None,
        })
        .await
        .unwrap()
        .id
}

async fn post_review(app: &TestApp, movie_id: i64, token: Option<&str>, rating: i32) -> axum::response::Response {
    send_json(
        &app.router,
        Method::POST,
        &format!("/api/v1/movies/{movie_id}/reviews"),
        json!({ "comment": "Dreams within dreams", "rating": rating }),
        token,
    )
    .await
}

// ---------------------------------------------------------------------------
// Test: authentication
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_review_requires_token() {
    let app = build_test_app();
    let movie_id = seed_movie(&app, "Inception").await;

    let response = post_review(&app, movie_id, None, 5).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn forged_token_is_rejected() {
    let app = build_test_app();
    let movie_id = seed_movie(&app, "Inception").await;

    let response = post_review(&app, movie_id, Some("not.a.jwt"), 5).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_with_only_subject_and_expiry_is_accepted() {
    let app = build_test_app();
    let movie_id = seed_movie(&app, "Inception").await;
    let exp = time::OffsetDateTime::now_utc().unix_timestamp() + 3600;
    let token = token_with_claims(&json!({ "sub": "carol", "exp": exp }));

    let response = post_review(&app, movie_id, Some(&token), 5).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(data(response).await["userId"], "carol");
}

#[tokio::test]
async fn listing_reviews_is_public() {
    let app = build_test_app();
    let movie_id = seed_movie(&app, "Inception").await;
    let alice = token_for("alice");
    post_review(&app, movie_id, Some(&alice), 4).await;

    let response = get(&app.router, &format!("/api/v1/movies/{movie_id}/reviews")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(total_pages(&response), Some(1));
    let reviews = data(response).await;
    assert_eq!(reviews[0]["userId"], "alice");
    assert_eq!(reviews[0]["rating"], 4);
}

// ---------------------------------------------------------------------------
// Test: one review per (movie, user)
// ---------------------------------------------------------------------------

#[tokio::test]
async fn second_review_by_same_user_conflicts() {
    let app = build_test_app();
    let movie_id = seed_movie(&app, "Inception").await;
    let alice = token_for("alice");

    let first = post_review(&app, movie_id, Some(&alice), 5).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    assert_eq!(
        first.headers()[header::LOCATION],
        format!("/api/v1/movies/{movie_id}/reviews").as_str()
    );

    let second = post_review(&app, movie_id, Some(&alice), 3).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(second).await["code"], "CONFLICT");

    let bob = token_for("bob");
    let other_user = post_review(&app, movie_id, Some(&bob), 3).await;
    assert_eq!(other_user.status(), StatusCode::CREATED);

    assert_eq!(app.state.reviews.count_for_movie(movie_id).await.unwrap(), 2);
}

#[tokio::test]
async fn same_user_can_review_different_movies() {
    let app = build_test_app();
    let first = seed_movie(&app, "Inception").await;
    let second = seed_movie(&app, "Interstellar").await;
    let alice = token_for("alice");

    assert_eq!(post_review(&app, first, Some(&alice), 5).await.status(), StatusCode::CREATED);
    assert_eq!(post_review(&app, second, Some(&alice), 4).await.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn rating_out_of_range_is_rejected() {
    let app = build_test_app();
    let movie_id = seed_movie(&app, "Inception").await;

    let response = post_review(&app, movie_id, Some(&token_for("alice")), 6).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["errors"][0]["field"], "rating");
}

#[tokio::test]
async fn review_for_missing_movie_is_not_found() {
    let app = build_test_app();

    let response = post_review(&app, 77, Some(&token_for("alice")), 5).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let listing = get(&app.router, "/api/v1/movies/77/reviews").await;
    assert_eq!(listing.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: only the author edits or deletes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn only_author_can_update_review() {
    let app = build_test_app();
    let movie_id = seed_movie(&app, "Inception").await;
    let alice = token_for("alice");
    let review = data(post_review(&app, movie_id, Some(&alice), 5).await).await;
    let uri = format!("/api/v1/movies/{movie_id}/reviews/{}", review["id"]);

    let body = json!({ "comment": "Overrated", "rating": 1 });
    let response = send_json(&app.router, Method::PUT, &uri, body.clone(), Some(&token_for("mallory"))).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = send_json(&app.router, Method::PUT, &uri, json!({ "comment": "Still great", "rating": 4 }), Some(&alice)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let reviews = data(get(&app.router, &format!("/api/v1/movies/{movie_id}/reviews")).await).await;
    assert_eq!(reviews[0]["comment"], "Still great");
    assert_eq!(reviews[0]["rating"], 4);
}

#[tokio::test]
async fn only_author_can_delete_review() {
    let app = build_test_app();
    let movie_id = seed_movie(&app, "Inception").await;
    let alice = token_for("alice");
    let review = data(post_review(&app, movie_id, Some(&alice), 5).await).await;
    let uri = format!("/api/v1/movies/{movie_id}/reviews/{}", review["id"]);

    let forbidden = delete(&app.router, &uri, Some(&token_for("mallory"))).await;
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
    assert_eq!(app.state.reviews.count_for_movie(movie_id).await.unwrap(), 1);

    let deleted = delete(&app.router, &uri, Some(&alice)).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
    assert_eq!(app.state.reviews.count_for_movie(movie_id).await.unwrap(), 0);
}

#[tokio::test]
async fn review_under_another_movie_is_not_found() {
    let app = build_test_app();
    let first = seed_movie(&app, "Inception").await;
    let second = seed_movie(&app, "Interstellar").await;
    let alice = token_for("alice");
    let review = data(post_review(&app, first, Some(&alice), 5).await).await;

    let uri = format!("/api/v1/movies/{second}/reviews/{}", review["id"]);
    let response = delete(&app.router, &uri, Some(&alice)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.state.reviews.count_for_movie(first).await.unwrap(), 1);
}
