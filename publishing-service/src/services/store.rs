use crate::models::{StatusCheck, UploadedDocument};
use async_trait::async_trait;
use service_core::error::AppError;

/// Maximum number of records returned by a single status-check listing.
pub const STATUS_LIST_LIMIT: i64 = 1000;

/// Persistence contract shared by the status and upload paths: one insert
/// per request, one bounded read for listing. Handlers only ever see
/// structured instants; any serialized form is the adapter's concern.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert_status_check(&self, check: &StatusCheck) -> Result<(), AppError>;

    async fn list_status_checks(&self, limit: i64) -> Result<Vec<StatusCheck>, AppError>;

    async fn insert_document(&self, document: &UploadedDocument) -> Result<(), AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}
