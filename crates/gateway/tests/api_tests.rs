//! HTTP surface tests driven through the router.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use groundwork_config::DatabaseConfig;
use groundwork_database::{prepare_database, run_migrations};
use groundwork_gateway::{create_router, AppState};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

fn sqlite_config(url: String) -> DatabaseConfig {
    DatabaseConfig {
        host: String::new(),
        port: 5432,
        user: String::new(),
        password: String::new(),
        name: String::new(),
        ssl_mode: "disable".to_string(),
        min_idle_conns: 1,
        max_open_conns: 5,
        conn_lifetime_seconds: 300,
        url: Some(url),
    }
}

async fn test_app() -> (Router, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let config = sqlite_config(format!("sqlite://{}", db_path.display()));

    let pool = prepare_database(&config).await.unwrap();
    run_migrations(&pool).await.unwrap();

    (create_router(AppState::new(pool)), temp_dir)
}

fn post_users(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let (app, _temp_dir) = test_app().await;

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({"status": "OK"}));
}

#[tokio::test]
async fn create_then_get_user() {
    let (app, _temp_dir) = test_app().await;

    let created = app
        .clone()
        .oneshot(post_users(json!({
            "name": "Ada",
            "email": "ada@example.com",
            "password": "correct horse battery"
        })))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);

    let created = json_body(created).await;
    assert_eq!(created["name"], "Ada");
    let id = created["id"].as_str().unwrap().to_string();
    // The response carries exactly id and name; no password field ever.
    assert_eq!(created.as_object().unwrap().len(), 2);

    let fetched = app.oneshot(get(&format!("/users/{id}"))).await.unwrap();
    assert_eq!(fetched.status(), StatusCode::OK);
    let fetched = json_body(fetched).await;
    assert_eq!(fetched["id"], id.as_str());
    assert_eq!(fetched["name"], "Ada");
}

#[tokio::test]
async fn validation_errors_render_the_envelope_with_fields() {
    let (app, _temp_dir) = test_app().await;

    // Everything missing: the name rule is reported first.
    let response = app
        .clone()
        .oneshot(post_users(json!({"name": "", "email": "", "password": ""})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["status"], 400);
    assert_eq!(body["title"], "Bad Request");
    assert_eq!(body["details"][0]["field"], "name");
    assert_eq!(body["details"][0]["text"], "name is required");

    let response = app
        .clone()
        .oneshot(post_users(json!({
            "name": "Ada",
            "email": "ada@example.com",
            "password": "short"
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["details"][0]["field"], "password");
    assert_eq!(
        body["details"][0]["text"],
        "password must be at least 8 characters long"
    );

    // Keys absent from the body behave like empty values.
    let response = app
        .oneshot(post_users(json!({"name": "Ada", "email": "ada@example.com"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["details"][0]["field"], "password");
    assert_eq!(body["details"][0]["text"], "password is required");
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let (app, _temp_dir) = test_app().await;
    let input = json!({
        "name": "Ada",
        "email": "ada@example.com",
        "password": "correct horse battery"
    });

    let first = app.clone().oneshot(post_users(input.clone())).await.unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app.oneshot(post_users(input)).await.unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let body = json_body(second).await;
    assert_eq!(body["status"], 409);
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let (app, _temp_dir) = test_app().await;

    let response = app
        .oneshot(get("/users/4f9d34bc-4413-4cc9-a463-51d9553da8ec"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["status"], 404);
    assert_eq!(body["title"], "Not Found");
}

#[tokio::test]
async fn malformed_uuid_is_a_bad_request() {
    let (app, _temp_dir) = test_app().await;

    let response = app.oneshot(get("/users/not-a-uuid")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["details"][0]["text"], "invalid UUID format");
}

#[tokio::test]
async fn unparseable_body_is_a_bad_request() {
    let (app, _temp_dir) = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/users")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["details"][0]["text"], "invalid parameter");
}
