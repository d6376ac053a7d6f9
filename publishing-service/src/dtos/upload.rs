use crate::models::DocType;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    pub document_id: String,
    pub doc_type: DocType,
}
