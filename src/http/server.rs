//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the greeting and upload handlers
//! - Wire up middleware (tracing, limits, request ID, timeout, metrics)
//! - Bind server to listener
//! - Prepare the upload directory before serving

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{IntakeConfig, StorageMode};
use crate::http::handlers;
use crate::http::middleware::metrics::track_requests;
use crate::http::request;
use crate::intake::FormParser;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub parser: Arc<FormParser>,
}

/// HTTP server for the intake service.
pub struct IntakeServer {
    router: Router,
    config: IntakeConfig,
}

impl IntakeServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: IntakeConfig) -> Self {
        let state = AppState {
            parser: Arc::new(FormParser::new(config.upload.clone())),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &IntakeConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(handlers::greeting))
            .route("/upload", post(handlers::upload))
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.upload.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(GlobalConcurrencyLimitLayer::new(config.listener.max_connections))
            .layer(middleware::from_fn(track_requests))
            .layer(request::propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(request::request_span))
            .layer(request::set_request_id_layer())
    }

    /// The fully layered router, for serving or driving in tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until a
    /// shutdown signal arrives.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        if self.config.upload.storage == StorageMode::Disk {
            tokio::fs::create_dir_all(&self.config.upload.upload_dir).await?;
        }

        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            storage = ?self.config.upload.storage,
            file_field = %self.config.upload.file_field,
            "Hubdoc Intake listening on port {}!",
            addr.port()
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &IntakeConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    fn memory_server() -> IntakeServer {
        let mut config = IntakeConfig::default();
        config.upload.storage = StorageMode::Memory;
        IntakeServer::new(config)
    }

    #[tokio::test]
    async fn test_greeting() {
        let response = memory_server()
            .router()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(&request::X_REQUEST_ID));
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Hello Hubdoc!");
    }

    #[tokio::test]
    async fn test_upload_acknowledged_with_empty_body() {
        let body = "--b\r\n\
                    Content-Disposition: form-data; name=\"file\"; filename=\"a.pdf\"\r\n\
                    Content-Type: application/pdf\r\n\r\n\
                    %PDF\r\n\
                    --b\r\n\
                    Content-Disposition: form-data; name=\"email\"\r\n\r\n\
                    a@b.com\r\n\
                    --b--\r\n";
        let request = Request::post("/upload")
            .header(header::CONTENT_TYPE, "multipart/form-data; boundary=b")
            .body(Body::from(body))
            .unwrap();

        let response = memory_server().router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_missing_boundary_is_bad_request() {
        let request = Request::post("/upload")
            .header(header::CONTENT_TYPE, "multipart/form-data")
            .body(Body::from("garbage"))
            .unwrap();

        let response = memory_server().router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_client_request_id_is_echoed() {
        let request = Request::get("/")
            .header("x-request-id", "trace-me")
            .body(Body::empty())
            .unwrap();

        let response = memory_server().router().oneshot(request).await.unwrap();
        assert_eq!(response.headers()["x-request-id"], "trace-me");
    }

    #[tokio::test]
    async fn test_get_upload_not_allowed() {
        let response = memory_server()
            .router()
            .oneshot(Request::get("/upload").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
