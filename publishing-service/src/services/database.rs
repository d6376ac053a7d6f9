use crate::models::{StatusCheck, UploadedDocument};
use crate::services::store::DocumentStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::TryStreamExt;
use mongodb::{
    bson::{doc, Bson, Document},
    options::FindOptions,
    Client as MongoClient, Collection, Database,
};
use service_core::error::AppError;

#[derive(Clone)]
pub struct MongoStore {
    client: MongoClient,
    db: Database,
}

impl MongoStore {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(uri = %uri, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB at {}: {}", uri, e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { client, db })
    }

    pub fn status_checks(&self) -> Collection<Document> {
        self.db.collection("status_checks")
    }

    pub fn documents(&self) -> Collection<Document> {
        self.db.collection("documents")
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn insert_status_check(&self, check: &StatusCheck) -> Result<(), AppError> {
        // Instants are persisted in their canonical RFC 3339 text form.
        let record = doc! {
            "id": &check.id,
            "client_name": &check.client_name,
            "timestamp": check.timestamp.to_rfc3339(),
        };

        self.status_checks()
            .insert_one(record, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert status check {}: {}", check.id, e);
                AppError::from(e)
            })?;
        Ok(())
    }

    async fn list_status_checks(&self, limit: i64) -> Result<Vec<StatusCheck>, AppError> {
        // The Mongo primary key never leaves the adapter.
        let find_options = FindOptions::builder()
            .projection(doc! { "_id": 0 })
            .limit(limit)
            .build();

        let mut cursor = self
            .status_checks()
            .find(doc! {}, find_options)
            .await
            .map_err(AppError::from)?;

        let mut checks = Vec::new();
        while let Some(record) = cursor.try_next().await.map_err(AppError::from)? {
            checks.push(status_check_from_record(record)?);
        }
        Ok(checks)
    }

    async fn insert_document(&self, document: &UploadedDocument) -> Result<(), AppError> {
        let record = doc! {
            "id": &document.id,
            "title": &document.title,
            "doc_type": document.doc_type.as_str(),
            "slug": document.slug.as_deref(),
            "summary": document.summary.as_deref(),
            "filename": &document.filename,
            "file_size": document.file_size,
            "uploaded_at": document.uploaded_at.to_rfc3339(),
            "uploaded_by": &document.uploaded_by,
        };

        self.documents()
            .insert_one(record, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert document {}: {}", document.id, e);
                AppError::from(e)
            })?;
        Ok(())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }
}

/// The store holds instants as RFC 3339 text, but records written by other
/// tooling may carry a native BSON datetime. Both forms normalize to a
/// structured instant here, so the handler layer never sees the textual
/// representation.
fn status_check_from_record(record: Document) -> Result<StatusCheck, AppError> {
    let id = record
        .get_str("id")
        .map_err(|e| malformed_record("id", e))?
        .to_string();
    let client_name = record
        .get_str("client_name")
        .map_err(|e| malformed_record("client_name", e))?
        .to_string();

    let timestamp: DateTime<Utc> = match record.get("timestamp") {
        Some(Bson::String(text)) => DateTime::parse_from_rfc3339(text)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!(
                    "Malformed status check timestamp '{}': {}",
                    text,
                    e
                ))
            })?,
        Some(Bson::DateTime(ts)) => ts.to_chrono(),
        _ => {
            return Err(AppError::DatabaseError(anyhow::anyhow!(
                "Status check record is missing a timestamp"
            )))
        }
    };

    Ok(StatusCheck {
        id,
        client_name,
        timestamp,
    })
}

fn malformed_record(field: &str, err: mongodb::bson::document::ValueAccessError) -> AppError {
    AppError::DatabaseError(anyhow::anyhow!(
        "Malformed status check record, field '{}': {}",
        field,
        err
    ))
}
