mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn test_signup_rejects_duplicate_email() {
    let app = TestApp::new().await;

    let (status, body) = app.signup("Acme", "a@x.com", "pw").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Signup successful");

    let (status, body) = app.signup("Acme", "a@x.com", "pw").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Email already registered");
}

#[tokio::test]
async fn test_concurrent_duplicate_signups_yield_one_success() {
    let app = TestApp::new().await;

    let (first, second) = tokio::join!(
        app.signup("Race Corp", "race@x.com", "pw"),
        app.signup("Race Corp", "race@x.com", "pw"),
    );

    let mut statuses = vec![first.0.as_u16(), second.0.as_u16()];
    statuses.sort();
    assert_eq!(statuses, vec![200, 400]);

    let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = 'race@x.com'")
        .fetch_one(&app.pool).await.unwrap();
    assert_eq!(users, 1);
}

#[tokio::test]
async fn test_signup_validates_input() {
    let app = TestApp::new().await;

    let (status, _) = app.signup("Acme", "not-an-email", "pw").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.signup("   ", "a@x.com", "pw").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.signup("Acme", "a@x.com", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_first_signup_is_admin_later_signups_join_as_employee() {
    let app = TestApp::new().await;

    let admin = app.admin_of("Acme", "boss@acme.com").await;
    let (_, me) = app.send("GET", "/auth/me", Some(&admin.access_token), None).await;
    assert_eq!(me["role"], "COMPANY_ADMIN");

    let (status, _) = app.signup("Acme", "late@acme.com", "pw").await;
    assert_eq!(status, StatusCode::OK);
    let joiner = app.login("late@acme.com", "pw").await;
    let (_, joiner_me) = app.send("GET", "/auth/me", Some(&joiner.access_token), None).await;

    assert_eq!(joiner_me["role"], "EMPLOYEE");
    assert_eq!(joiner_me["company_id"], me["company_id"]);
}

#[tokio::test]
async fn test_login_issues_distinct_tokens_and_audits() {
    let app = TestApp::new().await;
    app.signup("Acme", "a@x.com", "pw").await;

    let (status, body) = app.send("POST", "/auth/login", None, Some(json!({
        "email": "a@x.com",
        "password": "wrong"
    }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Invalid credentials");

    let (status, _) = app.send("POST", "/auth/login", None, Some(json!({
        "email": "nobody@x.com",
        "password": "pw"
    }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app.send("POST", "/auth/login", None, Some(json!({
        "email": "a@x.com",
        "password": "pw"
    }))).await;
    assert_eq!(status, StatusCode::OK);
    let access = body["access_token"].as_str().unwrap();
    let refresh = body["refresh_token"].as_str().unwrap();
    assert!(!access.is_empty());
    assert!(!refresh.is_empty());
    assert_ne!(access, refresh);
    assert_eq!(body["token_type"], "bearer");

    let (_, me) = app.send("GET", "/auth/me", Some(access), None).await;
    let company_id = me["company_id"].as_str().unwrap();
    assert_eq!(app.count_actions(company_id, "USER_LOGIN").await, 1);
}

#[tokio::test]
async fn test_me_requires_valid_access_token() {
    let app = TestApp::new().await;
    let tokens = app.admin_of("Acme", "a@x.com").await;

    let (status, _) = app.send("GET", "/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.send("GET", "/auth/me", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // A refresh token is not an access token.
    let (status, _) = app.send("GET", "/auth/me", Some(&tokens.refresh_token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, me) = app.send("GET", "/auth/me", Some(&tokens.access_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], "a@x.com");
    assert!(me.get("password_hash").is_none());
}

#[tokio::test]
async fn test_refresh_rotates_pair_and_rejects_access_tokens() {
    let app = TestApp::new().await;
    let tokens = app.admin_of("Acme", "a@x.com").await;

    let (status, body) = app.send("POST", "/auth/refresh", None, Some(json!({
        "refresh_token": tokens.access_token
    }))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Invalid or expired token");

    let (status, body) = app.send("POST", "/auth/refresh", None, Some(json!({
        "refresh_token": "not-a-token"
    }))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Invalid or expired token");

    let (status, body) = app.send("POST", "/auth/refresh", None, Some(json!({
        "refresh_token": tokens.refresh_token
    }))).await;
    assert_eq!(status, StatusCode::OK);
    let new_access = body["access_token"].as_str().unwrap();
    assert!(!body["refresh_token"].as_str().unwrap().is_empty());

    let (status, _) = app.send("GET", "/auth/me", Some(new_access), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_for_deleted_user_is_rejected() {
    let app = TestApp::new().await;
    let admin = app.admin_of("Acme", "a@x.com").await;
    let employee = app.create_employee(&admin.access_token, "e@x.com", "EMPLOYEE").await;
    let employee_tokens = app.login("e@x.com", "employeepass").await;

    let (status, _) = app.send("DELETE", &format!("/users/{}", employee["id"].as_str().unwrap()), Some(&admin.access_token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app.send("POST", "/auth/refresh", None, Some(json!({
        "refresh_token": employee_tokens.refresh_token
    }))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "User not found");

    let (status, _) = app.send("GET", "/auth/me", Some(&employee_tokens.access_token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = TestApp::new().await;

    let (status, body) = app.send("GET", "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Backend is running");

    let (status, body) = app.send("GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
