use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tempfile::TempDir;
use uuid::Uuid;

use macaron::config::Config;
use macaron::email::Mailer;

pub const JWT_SECRET: &str = "test-jwt-secret-that-is-long-enough";

#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Captures outgoing mail instead of talking to SMTP.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<SentMail>>,
}

impl RecordingMailer {
    /// The six digit code from the most recent mail sent to `to`.
    pub fn last_code_for(&self, to: &str) -> Option<String> {
        let sent = self.sent.lock().unwrap();
        let mail = sent.iter().rev().find(|m| m.to == to)?;
        let start = mail.body.find("code: ")? + "code: ".len();
        Some(mail.body[start..start + 6].to_string())
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), String> {
        self.sent.lock().unwrap().push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

/// A transport that is always down.
pub struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _to: &str, _subject: &str, _body: &str) -> Result<(), String> {
        Err("connection refused".to_string())
    }
}

/// A running test server instance with a dedicated test database.
pub struct TestApp {
    pub addr: SocketAddr,
    pub pool: PgPool,
    pub client: Client,
    pub db_name: String,
    pub mailer: Arc<RecordingMailer>,
    pub upload_dir: TempDir,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn register(&self, email: &str, password: &str) -> (Value, StatusCode) {
        self.post_json("/api/auth/register", &json!({ "email": email, "password": password }))
            .await
    }

    pub async fn login(&self, email: &str, password: &str) -> (Value, StatusCode) {
        self.post_json("/api/auth/login", &json!({ "email": email, "password": password }))
            .await
    }

    /// Register a user and return its token.
    pub async fn signup(&self, email: &str, password: &str) -> String {
        let (body, status) = self.register(email, password).await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        body["token"].as_str().unwrap().to_string()
    }

    pub async fn forgot_password(&self, email: &str) -> (Value, StatusCode) {
        self.post_json("/api/forgot-password", &json!({ "email": email }))
            .await
    }

    pub async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> (Value, StatusCode) {
        self.post_json(
            "/api/reset-password",
            &json!({ "email": email, "code": code, "newPassword": new_password }),
        )
        .await
    }

    /// Unauthenticated POST with JSON body.
    pub async fn post_json(&self, path: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn get(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Make an authenticated GET request.
    pub async fn get_auth(&self, path: &str, token: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Make an authenticated POST request with JSON body.
    pub async fn post_auth(&self, path: &str, token: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Make an authenticated PUT request with JSON body.
    pub async fn put_auth(&self, path: &str, token: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .put(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("put request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Make an authenticated DELETE request.
    pub async fn delete_auth(&self, path: &str, token: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("delete request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Authenticated multipart POST with text fields and `images` file parts.
    pub async fn post_multipart(
        &self,
        path: &str,
        token: Option<&str>,
        fields: &[(&str, &str)],
        images: &[(&str, &'static [u8])],
    ) -> (Value, StatusCode) {
        let mut form = reqwest::multipart::Form::new();
        for (name, value) in fields {
            form = form.text(name.to_string(), value.to_string());
        }
        for (file_name, data) in images {
            let part = reqwest::multipart::Part::bytes(*data)
                .file_name(file_name.to_string())
                .mime_str("image/png")
                .unwrap();
            form = form.part("images", part);
        }

        let mut req = self.client.post(self.url(path)).multipart(form);
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        let resp = req.send().await.expect("multipart request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn count_rows(&self, table: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }

    /// Number of files currently stored for a catalog kind.
    pub fn stored_files(&self, kind: &str) -> usize {
        std::fs::read_dir(self.upload_dir.path().join(kind))
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

pub fn test_config(database_url: String, upload_dir: &TempDir) -> Config {
    Config {
        database_url,
        jwt_secret: JWT_SECRET.to_string(),
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        upload_dir: upload_dir.path().to_path_buf(),
        max_body_size: 10 * 1024 * 1024,
        cors_origins: vec!["http://localhost:5173".to_string()],
        log_level: "warn".to_string(),
        smtp: None,
    }
}

fn admin_url(base_url: &str) -> String {
    base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/postgres"))
        .unwrap_or_else(|| base_url.to_string())
}

/// Spawn a test app with a fresh temporary database and a recording mailer.
pub async fn spawn_app() -> TestApp {
    spawn_app_inner(None).await
}

/// Same as `spawn_app` but with the given mailer in place of the recorder.
pub async fn spawn_app_with_mailer(mailer: Arc<dyn Mailer>) -> TestApp {
    spawn_app_inner(Some(mailer)).await
}

async fn spawn_app_inner(mailer_override: Option<Arc<dyn Mailer>>) -> TestApp {
    let _ = dotenvy::dotenv();

    let base_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");

    // Create a unique test database
    let db_name = format!("macaron_test_{}", Uuid::now_v7().to_string().replace('-', ""));

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url(&base_url))
        .await
        .expect("Failed to connect to postgres for test DB creation");

    sqlx::query(&format!("CREATE DATABASE \"{db_name}\""))
        .execute(&admin_pool)
        .await
        .expect("Failed to create test database");

    admin_pool.close().await;

    let test_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/{db_name}"))
        .unwrap_or_else(|| base_url.clone());

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&test_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations on test database");

    let upload_dir = tempfile::tempdir().expect("Failed to create upload dir");
    let config = test_config(test_url, &upload_dir);

    let recorder = Arc::new(RecordingMailer::default());
    let mailer: Arc<dyn Mailer> = mailer_override.unwrap_or_else(|| recorder.clone() as Arc<dyn Mailer>);

    let (app, _state) = macaron::build_app_with_mailer(pool.clone(), config, mailer);

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        pool,
        client: Client::new(),
        db_name,
        mailer: recorder,
        upload_dir,
    }
}

/// Drop the test database after tests complete.
pub async fn cleanup(app: TestApp) {
    let db_name = app.db_name.clone();
    app.pool.close().await;

    let base_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url(&base_url))
        .await
        .expect("Failed to connect for cleanup");

    let _ = sqlx::query(&format!("DROP DATABASE IF EXISTS \"{db_name}\" WITH (FORCE)"))
        .execute(&admin_pool)
        .await;

    admin_pool.close().await;
}
