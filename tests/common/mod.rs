#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use hexsat_auth::TokenAuthority;
use hexsat_config::CorsConfig;
use hexsat_db::{MemoryStore, UserStore};
use hexsat_models::{NewUser, User, UserWithRole};
use hexsatisfaction::{AppState, init_router};

pub const SECRET: &[u8] = b"test-secret-key-at-least-32-characters-long";

/// Counts every call made to the wrapped store.
#[derive(Default)]
pub struct CountingUserStore {
    inner: MemoryStore,
    pub reads: AtomicUsize,
    pub creates: AtomicUsize,
}

impl CountingUserStore {
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn creates(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.reads() + self.creates()
    }
}

#[async_trait]
impl UserStore for CountingUserStore {
    async fn find_by_login(&self, login: &str) -> anyhow::Result<Option<User>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_login(login).await
    }

    async fn is_exist(&self, login: &str) -> anyhow::Result<bool> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.is_exist(login).await
    }

    async fn create(&self, user: NewUser) -> anyhow::Result<i32> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        UserStore::create(&self.inner, user).await
    }

    async fn find_all_with_role(&self) -> anyhow::Result<Vec<UserWithRole>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.find_all_with_role().await
    }
}

/// Answers `is_exist` with `false` so that duplicates are only caught by
/// the insert, as when two registrations of one login interleave.
#[derive(Default)]
pub struct StaleExistenceUserStore {
    pub inner: MemoryStore,
}

#[async_trait]
impl UserStore for StaleExistenceUserStore {
    async fn find_by_login(&self, login: &str) -> anyhow::Result<Option<User>> {
        self.inner.find_by_login(login).await
    }

    async fn is_exist(&self, _login: &str) -> anyhow::Result<bool> {
        Ok(false)
    }

    async fn create(&self, user: NewUser) -> anyhow::Result<i32> {
        UserStore::create(&self.inner, user).await
    }

    async fn find_all_with_role(&self) -> anyhow::Result<Vec<UserWithRole>> {
        self.inner.find_all_with_role().await
    }
}

/// A user store whose every call fails.
pub struct BrokenUserStore;

#[async_trait]
impl UserStore for BrokenUserStore {
    async fn find_by_login(&self, _login: &str) -> anyhow::Result<Option<User>> {
        anyhow::bail!("connection refused")
    }

    async fn is_exist(&self, _login: &str) -> anyhow::Result<bool> {
        anyhow::bail!("connection refused")
    }

    async fn create(&self, _user: NewUser) -> anyhow::Result<i32> {
        anyhow::bail!("connection refused")
    }

    async fn find_all_with_role(&self) -> anyhow::Result<Vec<UserWithRole>> {
        anyhow::bail!("connection refused")
    }
}

pub fn authority() -> Arc<TokenAuthority> {
    Arc::new(TokenAuthority::new(SECRET, Duration::from_secs(3600)).unwrap())
}

pub fn app_with_users(users: Arc<dyn UserStore>, authority: Arc<TokenAuthority>) -> Router {
    let authors = Arc::new(MemoryStore::new());
    let state = AppState::new(
        users,
        authors,
        authority,
        CorsConfig::parse("http://localhost:3000"),
    );
    init_router(state).unwrap()
}

pub fn setup_test_app() -> Router {
    let state = AppState::in_memory(
        TokenAuthority::new(SECRET, Duration::from_secs(3600)).unwrap(),
        CorsConfig::parse("http://localhost:3000"),
    );
    init_router(state).unwrap()
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> TestResponse {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();

    TestResponse { status, body }
}

/// Registers `login`/`password` and returns a token for it.
pub async fn register_and_login(app: &Router, login: &str, password: &str) -> String {
    let credentials = serde_json::json!({ "login": login, "password": password });

    let response = send(app, "POST", "/user/registration", Some(credentials.clone()), None).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = send(app, "POST", "/user/login", Some(credentials), None).await;
    assert_eq!(response.status, StatusCode::OK);
    response.json()["result"].as_str().unwrap().to_string()
}
