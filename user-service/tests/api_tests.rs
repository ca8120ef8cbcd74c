mod common;

use common::TestApp;
use common::ADMIN_USERNAME;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

#[tokio::test]
async fn test_create_user_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/users/")
        .json(&json!({
            "username": "alice",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response
        .headers()
        .get(reqwest::header::LOCATION)
        .expect("Missing Location header")
        .to_str()
        .unwrap()
        .to_string();

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 201);
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["role"], "user");
    assert!(body["data"]["id"].is_i64());
    assert!(body["data"].get("password_hash").is_none());
    assert_eq!(location, format!("/users/{}", body["data"]["id"]));
}

#[tokio::test]
async fn test_create_user_duplicate_username() {
    let app = TestApp::spawn().await;
    app.create_user("alice", "pass_word!").await;

    let response = app
        .post("/users/")
        .json(&json!({
            "username": "alice",
            "password": "another"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));
}

#[tokio::test]
async fn test_create_user_invalid_username() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/users/")
        .json(&json!({
            "username": "a",
            "password": "pass_word"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("Invalid username"));
}

#[tokio::test]
async fn test_create_user_missing_password() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/users/")
        .json(&json!({ "username": "alice" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_admin_requires_admin_token() {
    let app = TestApp::spawn().await;
    let new_admin = json!({
        "username": "carol",
        "password": "pass_word!",
        "role": "admin"
    });

    let anonymous = app
        .post("/users/")
        .json(&new_admin)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    app.create_user("alice", "pass_word!").await;
    let (user_token, _) = app.login("alice", "pass_word!").await;
    let as_user = app
        .post("/users/")
        .bearer_auth(&user_token)
        .json(&new_admin)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(as_user.status(), StatusCode::UNAUTHORIZED);

    let admin_token = app.admin_token().await;
    let as_admin = app
        .post("/users/")
        .bearer_auth(&admin_token)
        .json(&new_admin)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(as_admin.status(), StatusCode::CREATED);

    let body: Value = as_admin.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["role"], "admin");
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;
    app.create_user("alice", "pass_word!").await;

    let response = app
        .post("/auth/")
        .json(&json!({
            "username": "alice",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse response");
    let access_token = body["data"]["access_token"].as_str().unwrap();
    assert!(body["data"]["refresh_token"].is_string());

    let claims = app
        .authenticator
        .validate_token(access_token, chrono::Utc::now().timestamp())
        .expect("Access token should be valid");
    assert_eq!(claims.username, "alice");
    assert_eq!(claims.role, "user");
}

#[tokio::test]
async fn test_login_missing_field() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/auth/")
        .json(&json!({ "username": "alice" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::spawn().await;
    app.create_user("alice", "pass_word!").await;

    let response = app
        .post("/auth/")
        .json(&json!({
            "username": "alice",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_unknown_user() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/auth/")
        .json(&json!({
            "username": "nobody",
            "password": "whatever"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_refresh_token() {
    let app = TestApp::spawn().await;
    app.create_user("alice", "pass_word!").await;
    let (_, refresh_token) = app.login("alice", "pass_word!").await;

    let response = app
        .put("/auth/")
        .json(&json!({ "refresh_token": refresh_token }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["access_token"].is_string());
    assert!(body["data"]["refresh_token"].is_string());
}

#[tokio::test]
async fn test_refresh_token_invalid() {
    let app = TestApp::spawn().await;

    let response = app
        .put("/auth/")
        .json(&json!({ "refresh_token": "not.a.token" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_access_token_cannot_refresh() {
    let app = TestApp::spawn().await;
    app.create_user("alice", "pass_word!").await;
    let (access_token, _) = app.login("alice", "pass_word!").await;

    let response = app
        .put("/auth/")
        .json(&json!({ "refresh_token": access_token }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_token_is_not_a_bearer_credential() {
    let app = TestApp::spawn().await;
    app.create_user("alice", "pass_word!").await;
    let (_, refresh_token) = app.login("alice", "pass_word!").await;

    let response = app
        .get("/users/")
        .bearer_auth(&refresh_token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_token_for_deleted_user() {
    let app = TestApp::spawn().await;
    let created = app.create_user("alice", "pass_word!").await;
    let (_, refresh_token) = app.login("alice", "pass_word!").await;

    let admin_token = app.admin_token().await;
    let response = app
        .delete(&format!("/users/{}", created["data"]["id"]))
        .bearer_auth(&admin_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .put("/auth/")
        .json(&json!({ "refresh_token": refresh_token }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let app = TestApp::spawn().await;
    let an_hour_ago = chrono::Utc::now().timestamp() - 3600;
    let token = app.token_for("alice", "user", an_hour_ago);

    let response = app
        .get("/users/")
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_users_requires_authentication() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/users/")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_users() {
    let app = TestApp::spawn().await;
    app.create_user("alice", "pass_word!").await;
    app.create_user("bob", "pass_word!").await;
    let (token, _) = app.login("alice", "pass_word!").await;

    let response = app
        .get("/users/")
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    let usernames: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|user| user["username"].as_str().unwrap())
        .collect();
    assert_eq!(usernames, vec![ADMIN_USERNAME, "alice", "bob"]);
}

#[tokio::test]
async fn test_get_user() {
    let app = TestApp::spawn().await;
    let created = app.create_user("alice", "pass_word!").await;
    let (token, _) = app.login("alice", "pass_word!").await;

    let response = app
        .get(&format!("/users/{}", created["data"]["id"]))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"], created["data"]);
}

#[tokio::test]
async fn test_get_user_not_found() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let response = app
        .get("/users/999")
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_user_invalid_id() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let response = app
        .get("/users/not-a-number")
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_own_password() {
    let app = TestApp::spawn().await;
    let created = app.create_user("alice", "pass_word!").await;
    let (token, _) = app.login("alice", "pass_word!").await;

    let response = app
        .put(&format!("/users/{}", created["data"]["id"]))
        .bearer_auth(&token)
        .json(&json!({ "password": "new_pass_word!" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    app.login("alice", "new_pass_word!").await;
    let old_password = app
        .post("/auth/")
        .json(&json!({ "username": "alice", "password": "pass_word!" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(old_password.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_other_user_denied() {
    let app = TestApp::spawn().await;
    let bob = app.create_user("bob", "pass_word!").await;
    app.create_user("alice", "pass_word!").await;
    let (token, _) = app.login("alice", "pass_word!").await;

    let response = app
        .put(&format!("/users/{}", bob["data"]["id"]))
        .bearer_auth(&token)
        .json(&json!({ "username": "mallory" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_role_change_requires_admin() {
    let app = TestApp::spawn().await;
    let alice = app.create_user("alice", "pass_word!").await;
    let path = format!("/users/{}", alice["data"]["id"]);
    let (user_token, _) = app.login("alice", "pass_word!").await;

    let response = app
        .put(&path)
        .bearer_auth(&user_token)
        .json(&json!({ "role": "admin" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let admin_token = app.admin_token().await;
    let response = app
        .put(&path)
        .bearer_auth(&admin_token)
        .json(&json!({ "role": "admin" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["role"], "admin");
}

#[tokio::test]
async fn test_update_username_conflict() {
    let app = TestApp::spawn().await;
    app.create_user("bob", "pass_word!").await;
    let alice = app.create_user("alice", "pass_word!").await;
    let (token, _) = app.login("alice", "pass_word!").await;

    let response = app
        .put(&format!("/users/{}", alice["data"]["id"]))
        .bearer_auth(&token)
        .json(&json!({ "username": "bob" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_delete_user() {
    let app = TestApp::spawn().await;
    let alice = app.create_user("alice", "pass_word!").await;
    let path = format!("/users/{}", alice["data"]["id"]);
    let admin_token = app.admin_token().await;

    let response = app
        .delete(&path)
        .bearer_auth(&admin_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .get(&path)
        .bearer_auth(&admin_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .delete(&path)
        .bearer_auth(&admin_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_endpoint_end_to_end() {
    let app = TestApp::spawn().await;
    app.create_user("alice", "pass_word!").await;
    let bob = app.create_user("bob", "pass_word!").await;
    let path = format!("/users/{}", bob["data"]["id"]);

    let (alice_token, _) = app.login("alice", "pass_word!").await;
    let denied = app
        .delete(&path)
        .bearer_auth(&alice_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(denied.status(), StatusCode::UNAUTHORIZED);

    let admin_token = app.admin_token().await;
    let allowed = app
        .delete(&path)
        .bearer_auth(&admin_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(allowed.status(), StatusCode::NO_CONTENT);
}
