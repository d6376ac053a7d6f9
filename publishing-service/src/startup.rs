use crate::config::PublishingConfig;
use crate::handlers;
use crate::services::{DocumentStore, MongoStore};
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: PublishingConfig,
    pub store: Arc<dyn DocumentStore>,
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    pub async fn build(config: PublishingConfig) -> Result<Self, AppError> {
        let store = MongoStore::connect(&config.mongodb.uri, &config.mongodb.database)
            .await
            .map_err(|e| {
                tracing::error!("Failed to connect to MongoDB: {}", e);
                e
            })?;

        Self::with_store(config, Arc::new(store)).await
    }

    /// Build against an arbitrary store implementation. Tests use this to
    /// substitute an in-memory fake.
    pub async fn with_store(
        config: PublishingConfig,
        store: Arc<dyn DocumentStore>,
    ) -> Result<Self, AppError> {
        let state = AppState {
            config: config.clone(),
            store,
        };

        let app = Router::new()
            .route("/health", get(handlers::health_check))
            .route("/api/", get(handlers::root))
            .route(
                "/api/status",
                post(handlers::create_status_check).get(handlers::list_status_checks),
            )
            .route("/api/admin/upload", post(handlers::upload_document))
            // Payload bounding is delegated to the fronting proxy.
            .layer(DefaultBodyLimit::disable())
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(&config.common.cors_origins))
            .with_state(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}

fn cors_layer(origins: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.trim() == "*" {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(
            origins
                .split(',')
                .filter_map(|origin| {
                    origin
                        .trim()
                        .parse::<HeaderValue>()
                        .map_err(|e| {
                            tracing::error!("Ignoring invalid CORS origin '{}': {}", origin, e);
                            e
                        })
                        .ok()
                })
                .collect::<Vec<HeaderValue>>(),
        )
    }
}
