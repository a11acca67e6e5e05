//! Shared helpers for the HTTP API tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderValue;
use axum_test::{TestResponse, TestServer};
use serde_json::{json, Value};

use microblog::web::{create_router, AppState};
use microblog::{CredentialHasher, Database, UserRepository, UserValidator};

/// Items per page used by the test server.
pub const PER_PAGE: u32 = 5;

/// A test server together with the database behind it.
pub struct TestApp {
    pub server: TestServer,
    pub db: Arc<Database>,
}

/// A signed-up user.
pub struct SignedUp {
    pub id: i64,
    pub token: String,
}

impl TestApp {
    /// Start a server on a fresh in-memory database.
    pub async fn new() -> Self {
        let db = Arc::new(Database::open_in_memory().await.unwrap());
        let state = AppState::new(
            db.clone(),
            CredentialHasher::new(8, 1, 1).unwrap(),
            UserValidator::default(),
            PER_PAGE,
        );
        let router = create_router(Arc::new(state), &[]);
        let server = TestServer::new(router).unwrap();

        Self { server, db }
    }

    /// Sign up a user through the API.
    pub async fn sign_up(&self, name: &str, email: &str) -> SignedUp {
        let response = self
            .server
            .post("/api/users")
            .json(&json!({
                "name": name,
                "email": email,
                "password": "foobar",
                "password_confirmation": "foobar"
            }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);

        let body: Value = response.json();
        SignedUp {
            id: body["data"]["user"]["id"].as_i64().unwrap(),
            token: body["data"]["remember_token"].as_str().unwrap().to_string(),
        }
    }

    /// Sign up a user and grant admin rights directly in the store.
    pub async fn sign_up_admin(&self, name: &str, email: &str) -> SignedUp {
        let user = self.sign_up(name, email).await;
        UserRepository::new(self.db.pool())
            .set_admin(user.id, true)
            .await
            .unwrap();
        user
    }

    /// Number of users in the store.
    pub async fn user_count(&self) -> i64 {
        UserRepository::new(self.db.pool()).count().await.unwrap()
    }

    /// Post a micropost as the given user.
    pub async fn post(&self, token: &str, content: &str) -> TestResponse {
        self.server
            .post("/api/microposts")
            .add_header(AUTHORIZATION, bearer(token))
            .json(&json!({ "content": content }))
            .await
    }
}

/// Authorization header value for a remember token.
pub fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {token}")).unwrap()
}
