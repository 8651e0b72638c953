use std::sync::Arc;

use auth::JwtHandler;
use identity_service::domain::identity::service::IdentityService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::repositories::InMemoryIdentityRepository;
use serde_json::json;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns the real axum app on a random port,
/// backed by the in-memory repository.
pub struct TestApp {
    pub address: String,
    pub repository: Arc<InMemoryIdentityRepository>,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let repository = Arc::new(InMemoryIdentityRepository::new());
        let token_issuer = Arc::new(JwtHandler::new(TEST_SECRET));
        let identity_service = Arc::new(IdentityService::new(
            Arc::clone(&repository),
            token_issuer,
        ));

        let application = create_router(identity_service);
        tokio::spawn(async move {
            axum::serve(listener, application)
                .await
                .expect("Server crashed");
        });

        Self {
            address,
            repository,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(TEST_SECRET),
        }
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub async fn signup(&self, fullname: &str, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth/signup")
            .json(&json!({
                "fullname": fullname,
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute signup request")
    }

    pub async fn signin(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth/signin")
            .json(&json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute signin request")
    }
}
