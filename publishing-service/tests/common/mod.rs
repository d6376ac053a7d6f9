use async_trait::async_trait;
use publishing_service::config::{MongoConfig, PublishingConfig};
use publishing_service::models::{StatusCheck, UploadedDocument};
use publishing_service::services::DocumentStore;
use publishing_service::startup::Application;
use service_core::config::Config as CoreConfig;
use service_core::error::AppError;
use std::sync::{Arc, Mutex};

/// In-memory stand-in for the MongoDB adapter. Records inserted values so
/// tests can assert on what was (or was not) persisted.
#[derive(Default)]
pub struct InMemoryStore {
    status_checks: Mutex<Vec<StatusCheck>>,
    documents: Mutex<Vec<UploadedDocument>>,
}

impl InMemoryStore {
    pub fn status_checks(&self) -> Vec<StatusCheck> {
        self.status_checks.lock().unwrap().clone()
    }

    pub fn documents(&self) -> Vec<UploadedDocument> {
        self.documents.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn insert_status_check(&self, check: &StatusCheck) -> Result<(), AppError> {
        self.status_checks.lock().unwrap().push(check.clone());
        Ok(())
    }

    async fn list_status_checks(&self, limit: i64) -> Result<Vec<StatusCheck>, AppError> {
        let checks = self.status_checks.lock().unwrap();
        Ok(checks.iter().take(limit as usize).cloned().collect())
    }

    async fn insert_document(&self, document: &UploadedDocument) -> Result<(), AppError> {
        self.documents.lock().unwrap().push(document.clone());
        Ok(())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}

pub struct TestApp {
    pub address: String,
    pub store: Arc<InMemoryStore>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let config = PublishingConfig {
            common: CoreConfig {
                port: 0, // Random port for testing
                cors_origins: "*".to_string(),
            },
            mongodb: MongoConfig {
                uri: "mongodb://localhost:27017".to_string(),
                database: "publishing_test".to_string(),
            },
        };

        let store = Arc::new(InMemoryStore::default());
        let app = Application::with_store(config, store.clone())
            .await
            .expect("Failed to build test application");
        let address = format!("http://127.0.0.1:{}", app.port());

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        TestApp { address, store }
    }
}
