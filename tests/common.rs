use saas_platform::{
    api::router::create_router,
    state::AppState,
    config::Config,
    infra::repositories::{
        sqlite_activity_repo::SqliteActivityRepo,
        sqlite_company_repo::SqliteCompanyRepo,
        sqlite_user_repo::SqliteUserRepo,
    },
    domain::models::{insights::Insights, scope::CompanyScope},
    domain::ports::InsightsProvider,
    error::AppError,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::sync::Arc;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    Router,
};
use std::str::FromStr;
use async_trait::async_trait;
use jsonwebtoken::Algorithm;
use tower::ServiceExt;
use serde_json::Value;

pub struct InstantInsightsProvider;

#[async_trait]
impl InsightsProvider for InstantInsightsProvider {
    async fn generate_insights(&self, scope: &CompanyScope) -> Result<Insights, AppError> {
        Ok(Insights {
            status: "success".to_string(),
            company_id: scope.company_id().to_string(),
            insights: vec!["Mock insight".to_string()],
            generated_by: "test".to_string(),
        })
    }
}

pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            jwt_secret: "integration-test-secret".to_string(),
            jwt_algorithm: Algorithm::HS256,
            access_token_expire_minutes: 60,
            refresh_token_expire_days: 7,
            ai_latency_ms: 0,
        };

        let state = Arc::new(AppState::new(
            &config,
            Arc::new(SqliteCompanyRepo::new(pool.clone())),
            Arc::new(SqliteUserRepo::new(pool.clone())),
            Arc::new(SqliteActivityRepo::new(pool.clone())),
            Arc::new(InstantInsightsProvider),
        ));

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    /// Sends a request and returns the status with the parsed JSON body
    /// (`Value::Null` for empty bodies such as 204).
    pub async fn send(&self, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        if bytes.is_empty() {
            return (status, Value::Null);
        }
        match serde_json::from_slice(&bytes) {
            Ok(v) => (status, v),
            Err(e) => panic!("Failed to parse JSON: {:?}. Status: {}. Body: {:?}", e, status, String::from_utf8_lossy(&bytes)),
        }
    }

    pub async fn signup(&self, company_name: &str, email: &str, password: &str) -> (StatusCode, Value) {
        self.send("POST", "/auth/signup", None, Some(serde_json::json!({
            "company_name": company_name,
            "email": email,
            "password": password
        }))).await
    }

    pub async fn login(&self, email: &str, password: &str) -> TokenPair {
        let (status, body) = self.send("POST", "/auth/login", None, Some(serde_json::json!({
            "email": email,
            "password": password
        }))).await;

        if !status.is_success() {
            panic!("Login failed in test helper: status {}, body {:?}", status, body);
        }

        TokenPair {
            access_token: body["access_token"].as_str().expect("No access_token in body").to_string(),
            refresh_token: body["refresh_token"].as_str().expect("No refresh_token in body").to_string(),
        }
    }

    /// Signs up a fresh company and returns its admin's tokens.
    pub async fn admin_of(&self, company_name: &str, email: &str) -> TokenPair {
        let (status, _) = self.signup(company_name, email, "adminpass").await;
        assert_eq!(status, StatusCode::OK);
        self.login(email, "adminpass").await
    }

    pub async fn create_employee(&self, admin_token: &str, email: &str, role: &str) -> Value {
        let (status, body) = self.send("POST", "/users/", Some(admin_token), Some(serde_json::json!({
            "email": email,
            "password": "employeepass",
            "role": role
        }))).await;
        assert_eq!(status, StatusCode::OK, "create employee failed: {:?}", body);
        body
    }

    pub async fn count_actions(&self, company_id: &str, action: &str) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM activity_logs WHERE company_id = ? AND action = ?")
            .bind(company_id)
            .bind(action)
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }

    pub async fn count_activity(&self, company_id: &str) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM activity_logs WHERE company_id = ?")
            .bind(company_id)
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}
