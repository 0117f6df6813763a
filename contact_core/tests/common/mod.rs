#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use contact_core::{
    config::{AppConfig, NotifierConfig},
    create_app, AppState,
};
use serde_json::Value;
use sqlx::AnyPool;
use tempfile::{NamedTempFile, TempDir};
use tower::ServiceExt;

pub const LANDING_PAGE: &str = "<!doctype html><title>Contact</title>";

pub struct TestApp {
    pub config: AppConfig,
    pub state: AppState,
    _database: Option<NamedTempFile>,
    _site: TempDir,
}

pub type ContactRow = (i64, String, String, String, String);

impl TestApp {
    /// App backed by a fresh SQLite database holding an empty `contact`
    /// table.
    pub async fn with_database(notifier: NotifierConfig) -> Self {
        let database = NamedTempFile::new().unwrap();
        let mut config = base_config(notifier);
        config.database.url = format!("sqlite://{}", database.path().display());

        let (state, site) = build_state(&mut config);
        create_contact_table(state.contacts.repository().pool().unwrap()).await;

        Self {
            config,
            state,
            _database: Some(database),
            _site: site,
        }
    }

    pub async fn without_database(notifier: NotifierConfig) -> Self {
        let mut config = base_config(notifier);
        let (state, site) = build_state(&mut config);

        Self {
            config,
            state,
            _database: None,
            _site: site,
        }
    }

    pub fn router(&self) -> Router {
        create_app(self.state.clone(), &self.config)
    }

    pub async fn post_json(&self, body: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method(Method::POST)
                .uri("/api/contact")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        let response = self
            .router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    pub async fn rows(&self) -> Vec<ContactRow> {
        let pool = self.state.contacts.repository().pool().unwrap();
        sqlx::query_as::<_, ContactRow>(
            "SELECT id, name, contact_number, emailid, message FROM contact ORDER BY id",
        )
        .fetch_all(pool)
        .await
        .unwrap()
    }
}

/// Notifier settings that point nowhere: closed port, fake credentials.
pub fn unreachable_notifier() -> NotifierConfig {
    NotifierConfig {
        bot_token: "123:test".to_string(),
        chat_id: "42".to_string(),
        api_base: "http://127.0.0.1:1".to_string(),
        timeout_seconds: 2,
        wait_for_delivery: true,
        ..NotifierConfig::default()
    }
}

pub fn disabled_notifier() -> NotifierConfig {
    NotifierConfig {
        wait_for_delivery: true,
        ..NotifierConfig::default()
    }
}

fn base_config(notifier: NotifierConfig) -> AppConfig {
    AppConfig {
        notifier,
        ..AppConfig::default()
    }
}

fn build_state(config: &mut AppConfig) -> (AppState, TempDir) {
    let site = TempDir::new().unwrap();
    let index_file = site.path().join("index.html");
    std::fs::write(&index_file, LANDING_PAGE).unwrap();
    let static_dir = site.path().join("static");
    std::fs::create_dir(&static_dir).unwrap();
    std::fs::write(static_dir.join("app.js"), "console.log('ok');").unwrap();

    config.site.index_file = index_file;
    config.site.static_dir = static_dir;

    (AppState::from_config(config).unwrap(), site)
}

async fn create_contact_table(pool: &AnyPool) {
    sqlx::query(
        "CREATE TABLE contact (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name VARCHAR(100) NOT NULL,
            contact_number VARCHAR(100) NOT NULL,
            emailid VARCHAR(100),
            message VARCHAR(100)
        )",
    )
    .execute(pool)
    .await
    .unwrap();
}
