//! Student Records Web Server
//!
//! Server-rendered pages to list, create, update and delete student records
//! kept in a single JSON file.

use anyhow::Context;
use axum::{routing::get, Router};
use data_validator::Validator;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::net::SocketAddr;
use std::sync::Arc;
use storage::JsonFileStore;
use tower_governor::GovernorLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

pub mod config;
pub mod error;
pub mod pages;
pub mod rate_limit;
mod routes;

pub use crate::config::AppConfig;
pub use error::ApiError;

/// Application state shared across handlers
pub struct AppState {
    /// Handle to the records file
    pub store: JsonFileStore,
    /// Form field validator
    pub validator: Validator,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
    /// Prometheus handle when metrics are enabled
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new application state around `store`
    pub fn new(store: JsonFileStore) -> Self {
        Self {
            store,
            validator: Validator::default(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
            metrics: None,
        }
    }

    /// Attach a Prometheus handle so `/metrics` renders it
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::students::home))
        .route("/students", get(routes::students::list_students))
        .route(
            "/students/add",
            get(routes::students::add_student_form).post(routes::students::add_student),
        )
        .route("/students/delete/:roll_no", get(routes::students::delete_student))
        .route(
            "/students/update/:roll_no",
            get(routes::students::update_student_form).post(routes::students::update_student),
        )
        .route("/health", get(routes::health::health))
        .route("/metrics", get(routes::health::metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Initialize logging
pub fn init_logging(config: &AppConfig) -> anyhow::Result<()> {
    let level: Level = config
        .log_level
        .parse()
        .with_context(|| format!("invalid log level {:?}", config.log_level))?;

    if config.log_json {
        let subscriber = FmtSubscriber::builder()
            .json()
            .with_max_level(level)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(level)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }

    Ok(())
}

/// Serve `app` on an already bound listener
pub async fn serve(listener: tokio::net::TcpListener, app: Router) -> std::io::Result<()> {
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await
}

/// Run the server described by `config`
pub async fn run_server(config: &AppConfig) -> anyhow::Result<()> {
    let mut state = AppState::new(JsonFileStore::new(&config.data_file));
    if config.metrics_enabled {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("failed to install Prometheus recorder")?;
        state = state.with_metrics(handle);
    }

    let mut app = create_router(Arc::new(state));
    if config.rate_limit.enabled {
        let governor = rate_limit::create_governor_config(&config.rate_limit)
            .context("rate limit per_second and burst_size must be non-zero")?;
        app = app.layer(GovernorLayer { config: governor });
        info!(
            "Rate limiting: burst {} replenished every {}s",
            config.rate_limit.burst_size, config.rate_limit.per_second
        );
    }

    info!("Records file: {}", config.data_file.display());
    info!("Starting HTTP server on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    fn test_app() -> (Router, JsonFileStore) {
        let path = std::env::temp_dir().join(format!("student-records-{}.json", uuid::Uuid::new_v4()));
        let store = JsonFileStore::new(path);
        (create_router(Arc::new(AppState::new(store.clone()))), store)
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_home_redirects_to_listing() {
        let (app, _) = test_app();
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/students");
    }

    #[tokio::test]
    async fn test_empty_listing() {
        let (app, _) = test_app();
        let response = app
            .oneshot(Request::builder().uri("/students").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("No students found."));
    }

    #[tokio::test]
    async fn test_add_student_via_form() {
        let (app, store) = test_app();
        let request = Request::builder()
            .method("POST")
            .uri("/students/add")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("roll_no=1&name=Alice&marks=85"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let records = store.load();
        assert_eq!(records.get(storage::RollNumber(1)).unwrap().name, "Alice");

        std::fs::remove_file(store.path()).unwrap();
    }

    #[tokio::test]
    async fn test_bad_path_roll_number() {
        let (app, _) = test_app();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/students/delete/abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_negative_path_roll_number_rejected() {
        let (app, store) = test_app();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/students/delete/-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_metrics_disabled() {
        let (app, _) = test_app();
        let response = app
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
