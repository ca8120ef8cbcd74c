use std::sync::Arc;

use auth::AuthSettings;
use auth::Authenticator;
use auth::ClaimsBase;
use auth::PasswordSettings;
use auth::TokenSettings;
use serde_json::json;
use serde_json::Value;
use user_service::domain::authentication::service::AuthService;
use user_service::domain::user::models::Username;
use user_service::domain::user::ports::UserServicePort;
use user_service::domain::user::service::UserService;
use user_service::inbound::http::router::create_router;
use user_service::outbound::repositories::InMemoryUserRepository;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin-password";

/// Test application that spawns a real server over an in-memory store
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub authenticator: Arc<Authenticator>,
    pub user_service: Arc<dyn UserServicePort>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let address = format!("http://127.0.0.1:{}", listener.local_addr().unwrap().port());

        // Few iterations keep the suite fast
        let authenticator = Arc::new(
            Authenticator::new(AuthSettings::new(
                TokenSettings::new(TEST_SECRET.to_vec()),
                PasswordSettings::new(b"test-salt".to_vec(), 100),
            ))
            .expect("Failed to create authenticator"),
        );

        let user_repository = Arc::new(InMemoryUserRepository::new());
        let user_service = Arc::new(UserService::new(
            Arc::clone(&user_repository),
            Arc::clone(&authenticator),
        ));
        let auth_service = Arc::new(AuthService::new(
            user_repository,
            Arc::clone(&authenticator),
        ));

        user_service
            .ensure_admin(
                Username::new(ADMIN_USERNAME.to_string()).unwrap(),
                ADMIN_PASSWORD.to_string(),
            )
            .await
            .expect("Failed to seed admin");

        let router = create_router(
            user_service.clone(),
            auth_service,
            Arc::clone(&authenticator),
        );

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            authenticator,
            user_service,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make PUT request
    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(format!("{}{}", self.address, path))
    }

    /// Helper to make DELETE request
    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(format!("{}{}", self.address, path))
    }

    /// Register a user and return the response body
    pub async fn create_user(&self, username: &str, password: &str) -> Value {
        let response = self
            .post("/users/")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        response.json().await.expect("Failed to parse response")
    }

    /// Log in and return the token pair
    pub async fn login(&self, username: &str, password: &str) -> (String, String) {
        let response = self
            .post("/auth/")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        (
            body["data"]["access_token"].as_str().unwrap().to_string(),
            body["data"]["refresh_token"].as_str().unwrap().to_string(),
        )
    }

    /// Access token of the seeded admin
    pub async fn admin_token(&self) -> String {
        self.login(ADMIN_USERNAME, ADMIN_PASSWORD).await.0
    }

    /// Sign a token directly, bypassing login
    pub fn token_for(&self, username: &str, role: &str, now: i64) -> String {
        self.authenticator
            .issue_tokens(&ClaimsBase::new(username, role), now)
            .expect("Failed to issue token")
            .access_token
    }
}
