use std::net::SocketAddr;
use std::path::PathBuf;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tempfile::TempDir;
use uuid::Uuid;

use jobboard::config::{BootstrapAdmin, CompanyStoreKind, Config};
use jobboard::models::Role;

pub const ROOT_EMAIL: &str = "root@test.com";
pub const ROOT_PASSWORD: &str = "root-password-1";
pub const PASSWORD: &str = "password123";

/// A running test server instance with a dedicated test database.
pub struct TestApp {
    pub addr: SocketAddr,
    pub pool: PgPool,
    pub client: Client,
    pub db_name: String,
    pub upload_dir: PathBuf,
    _uploads: TempDir,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn register(&self, email: &str, password: &str) -> (Value, StatusCode) {
        self.post_json("/api/register", &json!({ "email": email, "password": password }))
            .await
    }

    pub async fn login(&self, email: &str, password: &str) -> (Value, StatusCode) {
        self.post_json("/api/login", &json!({ "email": email, "password": password }))
            .await
    }

    /// Register a regular user and return (token, user id).
    pub async fn user(&self, email: &str) -> (String, i64) {
        let (body, status) = self.register(email, PASSWORD).await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        let id = body["id"].as_i64().unwrap();

        let (body, status) = self.login(email, PASSWORD).await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        (body["access_token"].as_str().unwrap().to_string(), id)
    }

    /// Register a user, promote it to admin directly in the database and
    /// return (token, user id).
    pub async fn admin(&self, email: &str) -> (String, i64) {
        let (_, id) = self.user(email).await;
        jobboard::db::users::set_role(&self.pool, id, Role::Admin)
            .await
            .unwrap();

        let (body, status) = self.login(email, PASSWORD).await;
        assert_eq!(status, StatusCode::OK);
        (body["access_token"].as_str().unwrap().to_string(), id)
    }

    /// Token of the seeded super admin.
    pub async fn root(&self) -> String {
        let (body, status) = self.login(ROOT_EMAIL, ROOT_PASSWORD).await;
        assert_eq!(status, StatusCode::OK, "root login failed: {body}");
        body["access_token"].as_str().unwrap().to_string()
    }

    /// Post a job, return its id.
    pub async fn create_job(&self, token: &str, title: &str) -> i64 {
        let (body, status) = self
            .post_auth(
                "/api/jobs",
                token,
                &json!({
                    "company": "Acme",
                    "title": title,
                    "description": "Build things",
                    "location": "Remote",
                    "salary": "100k",
                    "tags": ["Rust", "SQL"],
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create job failed: {body}");
        body["id"].as_i64().unwrap()
    }

    /// Multipart resume upload for `job_id`.
    pub async fn apply(
        &self,
        token: &str,
        job_id: &str,
        filename: &str,
        content: &[u8],
    ) -> (Value, StatusCode) {
        let form = Form::new().text("job_id", job_id.to_string()).part(
            "resume",
            Part::bytes(content.to_vec()).file_name(filename.to_string()),
        );
        let resp = self
            .client
            .post(self.url("/api/applications"))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await
            .expect("apply request failed");
        read(resp).await
    }

    pub async fn get(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed");
        read(resp).await
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("post request failed");
        read(resp).await
    }

    pub async fn get_auth(&self, path: &str, token: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("get request failed");
        read(resp).await
    }

    pub async fn post_auth(&self, path: &str, token: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("post request failed");
        read(resp).await
    }

    pub async fn put_auth(&self, path: &str, token: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .put(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("put request failed");
        read(resp).await
    }

    pub async fn delete_auth(&self, path: &str, token: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("delete request failed");
        read(resp).await
    }

    /// Url-encoded company form.
    pub async fn post_form(
        &self,
        path: &str,
        token: &str,
        fields: &[(&str, &str)],
    ) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .form(fields)
            .send()
            .await
            .expect("post form failed");
        read(resp).await
    }

    pub async fn put_form(
        &self,
        path: &str,
        token: &str,
        fields: &[(&str, &str)],
    ) -> (Value, StatusCode) {
        let resp = self
            .client
            .put(self.url(path))
            .bearer_auth(token)
            .form(fields)
            .send()
            .await
            .expect("put form failed");
        read(resp).await
    }

    pub fn uploaded_files(&self) -> Vec<String> {
        std::fs::read_dir(&self.upload_dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect()
    }

    /// Count rows of `table` whose `column` equals `id`.
    pub async fn count_rows(&self, table: &str, column: &str, id: i64) -> i64 {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table} WHERE {column} = $1"))
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .expect("count query failed")
    }
}

async fn read(resp: reqwest::Response) -> (Value, StatusCode) {
    let status = resp.status();
    let body: Value = resp.json().await.unwrap_or(json!(null));
    (body, status)
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(CompanyStoreKind::Postgres).await
}

/// Spawn a test app with a fresh temporary database, a temporary upload
/// directory and a seeded super admin.
pub async fn spawn_app_with(company_store: CompanyStoreKind) -> TestApp {
    let _ = dotenvy::dotenv();

    let base_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for tests");

    let db_name = format!("jobboard_test_{}", Uuid::now_v7().to_string().replace('-', ""));

    // Connect to default postgres DB to create test DB
    let admin_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/postgres"))
        .unwrap_or_else(|| base_url.clone());

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url)
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

    let uploads = tempfile::tempdir().expect("Failed to create upload dir");
    let upload_dir = uploads.path().to_path_buf();

    let config = Config {
        database_url: test_url,
        jwt_secret: "test-jwt-secret-that-is-long-enough".to_string(),
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        upload_dir: upload_dir.clone(),
        max_upload_bytes: 1_048_576,
        token_ttl_minutes: 5,
        cors_origins: vec!["http://localhost:3000".to_string()],
        company_store,
        bootstrap_admin: Some(BootstrapAdmin {
            email: ROOT_EMAIL.to_string(),
            password: ROOT_PASSWORD.to_string(),
            full_name: Some("Root".to_string()),
        }),
        log_level: "warn".to_string(),
    };

    jobboard::seed::run(&pool, config.bootstrap_admin.as_ref())
        .await
        .expect("Failed to seed test database");

    let app = jobboard::build_app(pool.clone(), config);

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
        upload_dir,
        _uploads: uploads,
    }
}

/// Drop stale test databases (useful after test crashes).
#[allow(dead_code)]
pub async fn cleanup_stale_test_dbs() {
    let base_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for tests");
    let admin_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/postgres"))
        .unwrap_or_else(|| base_url.clone());

    if let Ok(admin_pool) = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url)
        .await
    {
        let rows = sqlx::query_scalar::<_, String>(
            "SELECT datname FROM pg_database WHERE datname LIKE 'jobboard_test_%'",
        )
        .fetch_all(&admin_pool)
        .await
        .unwrap_or_default();

        for db_name in rows {
            let _ = sqlx::query(&format!("DROP DATABASE IF EXISTS \"{db_name}\" WITH (FORCE)"))
                .execute(&admin_pool)
                .await;
        }
        admin_pool.close().await;
    }
}

/// Drop the test database after tests complete.
pub async fn cleanup(app: TestApp) {
    let db_name = app.db_name.clone();
    app.pool.close().await;

    let base_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for tests");
    let admin_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/postgres"))
        .unwrap_or_else(|| base_url.clone());

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url)
        .await
        .expect("Failed to connect for cleanup");

    let _ = sqlx::query(&format!("DROP DATABASE IF EXISTS \"{db_name}\" WITH (FORCE)"))
        .execute(&admin_pool)
        .await;

    admin_pool.close().await;
}
