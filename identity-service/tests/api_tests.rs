mod common;

use std::collections::HashSet;

use common::TestApp;
use reqwest::StatusCode;

#[tokio::test]
async fn test_signup_success() {
    let app = TestApp::spawn().await;

    let response = app
        .signup("Alice Doe", "alice@example.com", "Passw0rd")
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["fullname"], "Alice Doe");
    assert!(body["data"]["profile_img"].is_null());

    // The token verifies against the signing secret and binds an id
    let token = body["data"]["access_token"]
        .as_str()
        .expect("access_token missing");
    let claims: auth::AccessClaims = app
        .jwt_handler
        .decode(token)
        .expect("access token did not verify");
    assert!(!claims.id.is_empty());

    assert_eq!(app.repository.len(), 1);
}

#[tokio::test]
async fn test_signup_rejects_missing_fields() {
    let app = TestApp::spawn().await;

    let response = app.signup("Alice Doe", "alice@example.com", "").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "All fields are required");
    assert!(app.repository.is_empty());
}

#[tokio::test]
async fn test_signup_rejects_short_fullname() {
    let app = TestApp::spawn().await;

    let response = app.signup("Al", "alice@example.com", "Passw0rd").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body["data"]["message"],
        "Fullname must be at least 3 characters long"
    );
    assert!(app.repository.is_empty());
}

#[tokio::test]
async fn test_signup_rejects_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app
        .signup("Alice Doe", "alice-at-example.com", "Passw0rd")
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Email is invalid");
    assert!(app.repository.is_empty());
}

#[tokio::test]
async fn test_signup_rejects_weak_password() {
    let app = TestApp::spawn().await;

    let response = app.signup("Alice Doe", "alice@example.com", "password").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("6 to 20 characters"));
    assert!(app.repository.is_empty());
}

#[tokio::test]
async fn test_invalid_signup_fails_the_same_way_twice() {
    let app = TestApp::spawn().await;

    let first = app.signup("Alice Doe", "not-an-email", "Passw0rd").await;
    let second = app.signup("Alice Doe", "not-an-email", "Passw0rd").await;

    assert_eq!(first.status(), StatusCode::BAD_REQUEST);
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);

    let first_body: serde_json::Value = first.json().await.unwrap();
    let second_body: serde_json::Value = second.json().await.unwrap();
    assert_eq!(first_body, second_body);

    assert!(app.repository.is_empty());
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    let app = TestApp::spawn().await;

    let first = app
        .signup("Alice Doe", "alice@example.com", "Passw0rd")
        .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .signup("Alice Again", "alice@example.com", "Passw0rd")
        .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = second.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Email already exists");

    // The failed attempt persisted nothing
    assert_eq!(app.repository.len(), 1);
}

#[tokio::test]
async fn test_signup_suffixes_taken_username() {
    let app = TestApp::spawn().await;

    let first = app
        .signup("Alice Doe", "alice@example.com", "Passw0rd")
        .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    // Different email, same local part: base candidate is taken
    let second = app.signup("Alice Smith", "alice@other.org", "Passw0rd").await;
    assert_eq!(second.status(), StatusCode::CREATED);

    let body: serde_json::Value = second.json().await.expect("Failed to parse response");
    let username = body["data"]["username"].as_str().unwrap();
    assert!(username.starts_with("alice"));
    assert_eq!(username.len(), "alice".len() + 5);
}

#[tokio::test]
async fn test_signin_returns_registered_username() {
    let app = TestApp::spawn().await;

    let signup: serde_json::Value = app
        .signup("Alice Doe", "alice@example.com", "Passw0rd")
        .await
        .json()
        .await
        .unwrap();

    let response = app.signin("alice@example.com", "Passw0rd").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["username"], signup["data"]["username"]);
    assert_eq!(body["data"]["fullname"], "Alice Doe");

    let token = body["data"]["access_token"].as_str().unwrap();
    let claims: auth::AccessClaims = app
        .jwt_handler
        .decode(token)
        .expect("access token did not verify");
    assert!(!claims.id.is_empty());
}

#[tokio::test]
async fn test_signin_unknown_email() {
    let app = TestApp::spawn().await;

    let response = app.signin("ghost@example.com", "Passw0rd").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "User not found");
}

#[tokio::test]
async fn test_signin_wrong_password() {
    let app = TestApp::spawn().await;

    app.signup("Alice Doe", "alice@example.com", "Passw0rd")
        .await;

    let response = app.signin("alice@example.com", "Wr0ngPass").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Password is incorrect");
}

#[tokio::test]
async fn test_concurrent_signups_with_shared_local_part() {
    let app = TestApp::spawn().await;

    let tasks: Vec<_> = (0..5)
        .map(|i| {
            let client = app.api_client.clone();
            let address = app.address.clone();
            tokio::spawn(async move {
                client
                    .post(format!("{}/api/auth/signup", address))
                    .json(&serde_json::json!({
                        "fullname": "Alice Doe",
                        "email": format!("alice@mail{}.co", i),
                        "password": "Passw0rd",
                    }))
                    .send()
                    .await
                    .expect("Failed to execute signup request")
            })
        })
        .collect();

    let mut usernames = HashSet::new();
    let mut created = 0;
    for task in futures::future::join_all(tasks).await {
        let response = task.expect("signup task panicked");
        let status = response.status();
        // A signup may lose the allocation race and surface a conflict,
        // but it must never silently corrupt the store
        assert!(
            status == StatusCode::CREATED || status == StatusCode::CONFLICT,
            "unexpected status {status}"
        );

        if status == StatusCode::CREATED {
            let body: serde_json::Value = response.json().await.unwrap();
            let username = body["data"]["username"].as_str().unwrap().to_string();
            assert!(username.starts_with("alice"));
            assert!(usernames.insert(username), "duplicate username handed out");
            created += 1;
        }
    }

    assert!(created >= 1);
    assert_eq!(app.repository.len(), created);
}
