//! Integration tests for fitlog-server API endpoints
//!
//! Every test builds the router over a fresh in-memory database and drives it
//! with `oneshot`, carrying the session cookie by hand between requests.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use fitlog_common::config::ServerConfig;
use fitlog_common::db::init_memory_database;
use fitlog_server::{build_router, AppState};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower::util::ServiceExt; // for `oneshot` method

/// Test helper: router plus a handle on its database
async fn setup_app() -> (Router, SqlitePool) {
    let db = init_memory_database()
        .await
        .expect("Should create in-memory database");
    let app = build_router(AppState::new(db.clone(), ServerConfig::default()));
    (app, db)
}

/// Test helper: send a request, return status, Set-Cookie and JSON body
async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    cookie: Option<&str>,
) -> (StatusCode, Option<String>, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Should parse JSON")
    };
    (status, set_cookie, json)
}

/// Test helper: register + login, returning the `name=value` cookie pair
async fn sign_in(app: &Router, email: &str) -> String {
    let creds = json!({ "email": email, "password": "secret", "action": "register" });
    let (status, _, _) = send(app, "POST", "/api/auth", Some(creds), None).await;
    assert_eq!(status, StatusCode::OK);

    let creds = json!({ "email": email, "password": "secret", "action": "login" });
    let (status, set_cookie, _) = send(app, "POST", "/api/auth", Some(creds), None).await;
    assert_eq!(status, StatusCode::OK);

    set_cookie
        .expect("login should set a cookie")
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

fn workout_body(date: &str, exercises: &[&str]) -> Value {
    json!({
        "date": date,
        "type": "Strength",
        "notes": "test session",
        "exercises": exercises
            .iter()
            .map(|name| json!({ "exerciseName": name, "reps": 5, "weight": 100, "notes": "" }))
            .collect::<Vec<_>>(),
    })
}

async fn count(db: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(db)
        .await
        .unwrap()
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _) = setup_app().await;
    let (status, _, body) = send(&app, "GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "fitlog-server");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_build_info_endpoint() {
    let (app, _) = setup_app().await;
    let (status, _, body) = send(&app, "GET", "/api/buildinfo", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["git_hash"].is_string());
    assert!(body["build_profile"].is_string());
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_register_returns_user_without_password() {
    let (app, _) = setup_app().await;
    let creds = json!({ "email": "ana@example.com", "password": "pw", "action": "register" });
    let (status, _, body) = send(&app, "POST", "/api/auth", Some(creds), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "ana@example.com");
    assert_eq!(body["name"], "ana");
    assert!(body["id"].is_string());
    assert!(body.get("password").is_none());
    assert!(body.get("passwordHash").is_none());
}

#[tokio::test]
async fn test_register_existing_email_returns_400() {
    let (app, _) = setup_app().await;
    let creds = json!({ "email": "ben@example.com", "password": "pw", "action": "register" });
    send(&app, "POST", "/api/auth", Some(creds.clone()), None).await;

    let (status, _, body) = send(&app, "POST", "/api/auth", Some(creds), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User already exists");
}

#[tokio::test]
async fn test_login_wrong_password_returns_401() {
    let (app, _) = setup_app().await;
    let creds = json!({ "email": "cy@example.com", "password": "right", "action": "register" });
    send(&app, "POST", "/api/auth", Some(creds), None).await;

    let creds = json!({ "email": "cy@example.com", "password": "wrong", "action": "login" });
    let (status, set_cookie, body) = send(&app, "POST", "/api/auth", Some(creds), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");
    assert!(set_cookie.is_none());
}

#[tokio::test]
async fn test_login_unknown_email_returns_401() {
    let (app, _) = setup_app().await;
    let creds = json!({ "email": "ghost@example.com", "password": "pw", "action": "login" });
    let (status, _, body) = send(&app, "POST", "/api/auth", Some(creds), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let (app, _) = setup_app().await;
    let cookie = sign_in(&app, "dee@example.com").await;
    assert!(cookie.starts_with("fitlog_session="));
    assert!(cookie.len() > "fitlog_session=".len());
}

#[tokio::test]
async fn test_invalid_action_and_missing_fields() {
    let (app, _) = setup_app().await;

    let body = json!({ "email": "x@example.com", "password": "pw", "action": "reset" });
    let (status, _, json) = send(&app, "POST", "/api/auth", Some(body), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid action");

    let body = json!({ "email": "x@example.com", "action": "register" });
    let (status, _, _) = send(&app, "POST", "/api/auth", Some(body), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let (app, _) = setup_app().await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_logout_ends_session() {
    let (app, _) = setup_app().await;
    let cookie = sign_in(&app, "eli@example.com").await;

    let (status, _, _) = send(&app, "GET", "/api/workouts", None, Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);

    let logout = json!({ "action": "logout" });
    let (status, set_cookie, body) = send(&app, "POST", "/api/auth", Some(logout), Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(set_cookie.unwrap().contains("Max-Age=0"));

    let (status, _, _) = send(&app, "GET", "/api/workouts", None, Some(&cookie)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Users
// =============================================================================

#[tokio::test]
async fn test_create_and_list_users() {
    let (app, _) = setup_app().await;

    let (status, _, created) = send(
        &app,
        "POST",
        "/api/users",
        Some(json!({ "name": "Fay", "email": "fay@example.com" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["name"], "Fay");

    let (status, _, users) = send(&app, "GET", "/api/users", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let users = users.as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["email"], "fay@example.com");
    assert!(users[0].get("passwordHash").is_none());

    // The demo password is usable for login
    let creds = json!({ "email": "fay@example.com", "password": "demo-password", "action": "login" });
    let (status, _, _) = send(&app, "POST", "/api/auth", Some(creds), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_create_user_validation() {
    let (app, _) = setup_app().await;
    let (status, _, _) = send(&app, "POST", "/api/users", Some(json!({ "name": "NoEmail" })), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let body = json!({ "email": "gus@example.com" });
    send(&app, "POST", "/api/users", Some(body.clone()), None).await;
    let (status, _, json) = send(&app, "POST", "/api/users", Some(body), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "User already exists");
}

// =============================================================================
// Workouts
// =============================================================================

#[tokio::test]
async fn test_workouts_require_session() {
    let (app, _) = setup_app().await;

    let (status, _, body) = send(&app, "GET", "/api/workouts", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No user found. Please sign in first.");

    let (status, _, _) = send(
        &app,
        "GET",
        "/api/workouts",
        None,
        Some("fitlog_session=forged"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_workout_nests_one_set_per_exercise() {
    let (app, _) = setup_app().await;
    let cookie = sign_in(&app, "hana@example.com").await;

    let body = workout_body("2024-05-01", &["Squat", "Bench", "Row", "Press"]);
    let (status, _, workout) = send(&app, "POST", "/api/workouts", Some(body), Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(workout["type"], "Strength");
    assert_eq!(workout["date"], "2024-05-01T00:00:00.000Z");
    let exercises = workout["exercises"].as_array().unwrap();
    assert_eq!(exercises.len(), 4);
    let names: Vec<&str> = exercises.iter().map(|e| e["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Squat", "Bench", "Row", "Press"]);
    let positions: Vec<i64> = exercises.iter().map(|e| e["position"].as_i64().unwrap()).collect();
    assert_eq!(positions, vec![0, 1, 2, 3]);
    for exercise in exercises {
        let sets = exercise["sets"].as_array().unwrap();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0]["reps"], 5);
        assert_eq!(sets[0]["weight"], 100.0);
        assert_eq!(sets[0]["exerciseId"], exercise["id"]);
    }
}

#[tokio::test]
async fn test_create_workout_presence_checks() {
    let (app, _) = setup_app().await;
    let cookie = sign_in(&app, "ian@example.com").await;

    let no_exercises = json!({ "date": "2024-05-01", "type": "Strength", "exercises": [] });
    let (status, _, _) = send(&app, "POST", "/api/workouts", Some(no_exercises), Some(&cookie)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let bad_date = workout_body("someday", &["Squat"]);
    let (status, _, _) = send(&app, "POST", "/api/workouts", Some(bad_date), Some(&cookie)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_workouts_newest_first_and_scoped_to_user() {
    let (app, _) = setup_app().await;
    let jan = sign_in(&app, "jan@example.com").await;
    let kai = sign_in(&app, "kai@example.com").await;

    send(&app, "POST", "/api/workouts", Some(workout_body("2024-01-10", &["Squat"])), Some(&jan)).await;
    send(&app, "POST", "/api/workouts", Some(workout_body("2024-03-10", &["Bench"])), Some(&jan)).await;
    send(&app, "POST", "/api/workouts", Some(workout_body("2024-02-10", &["Row"])), Some(&kai)).await;

    let (status, _, list) = send(&app, "GET", "/api/workouts", None, Some(&jan)).await;
    assert_eq!(status, StatusCode::OK);
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["exercises"][0]["name"], "Bench");
    assert_eq!(list[1]["exercises"][0]["name"], "Squat");
    assert_eq!(list[0]["exercises"][0]["sets"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_workout_not_owned_returns_403() {
    let (app, db) = setup_app().await;
    let owner = sign_in(&app, "lia@example.com").await;
    let intruder = sign_in(&app, "mo@example.com").await;

    let (_, _, workout) = send(
        &app,
        "POST",
        "/api/workouts",
        Some(workout_body("2024-05-01", &["Squat"])),
        Some(&owner),
    )
    .await;
    let uri = format!("/api/workouts/{}", workout["id"].as_str().unwrap());

    let (status, _, body) = send(&app, "DELETE", &uri, None, Some(&intruder)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Unauthorized to delete this workout");
    assert_eq!(count(&db, "workouts").await, 1);
}

#[tokio::test]
async fn test_delete_owned_workout_cascades() {
    let (app, db) = setup_app().await;
    let cookie = sign_in(&app, "ned@example.com").await;

    let (_, _, keep) = send(
        &app,
        "POST",
        "/api/workouts",
        Some(workout_body("2024-04-01", &["Row"])),
        Some(&cookie),
    )
    .await;
    let (_, _, doomed) = send(
        &app,
        "POST",
        "/api/workouts",
        Some(workout_body("2024-05-01", &["Squat", "Bench", "Press"])),
        Some(&cookie),
    )
    .await;
    assert_eq!(count(&db, "sets").await, 4);

    let uri = format!("/api/workouts/{}", doomed["id"].as_str().unwrap());
    let (status, _, body) = send(&app, "DELETE", &uri, None, Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    assert_eq!(count(&db, "workouts").await, 1);
    assert_eq!(count(&db, "exercises").await, 1);
    assert_eq!(count(&db, "sets").await, 1);

    let (_, _, list) = send(&app, "GET", "/api/workouts", None, Some(&cookie)).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["id"], keep["id"]);
}

#[tokio::test]
async fn test_delete_unknown_workout_returns_404() {
    let (app, _) = setup_app().await;
    let cookie = sign_in(&app, "oz@example.com").await;

    let (status, _, body) = send(&app, "DELETE", "/api/workouts/does-not-exist", None, Some(&cookie)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Workout not found");
}
