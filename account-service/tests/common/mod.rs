use std::sync::Arc;

use account_service::domain::user::service::UserService;
use account_service::domain::user::service::TOKEN_ISSUER;
use account_service::inbound::http::router::create_router;
use account_service::outbound::repositories::InMemoryUserRepository;
use auth::Authenticator;
use auth::JwtHandler;
use serde_json::json;
use serde_json::Value;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over an in-memory store
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let user_repo = Arc::new(InMemoryUserRepository::new());
        let authenticator = Arc::new(Authenticator::new(TEST_SECRET, TOKEN_ISSUER));
        let user_service = Arc::new(UserService::new(user_repo, authenticator));

        let router = create_router(user_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(TEST_SECRET, TOKEN_ISSUER),
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

    /// Helper to make GET request with a raw Authorization header
    pub fn get_with_authorization(&self, path: &str, value: &str) -> reqwest::RequestBuilder {
        self.get(path).header(reqwest::header::AUTHORIZATION, value)
    }

    /// Register a user and return the response body
    pub async fn register(&self, email: &str, username: &str, password: &str) -> Value {
        let response = self
            .post("/users")
            .json(&json!({
                "email": email,
                "username": username,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }

    /// Log in and return the session token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .post("/sessions")
            .json(&json!({
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: Value = response.json().await.expect("Failed to parse response");
        body["token"]
            .as_str()
            .expect("Missing token in response")
            .to_string()
    }
}
