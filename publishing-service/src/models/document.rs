use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of token characters retained in the `uploaded_by` audit field.
const TOKEN_FRAGMENT_LEN: usize = 20;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DocType {
    #[default]
    StateRegulation,
    PmsReportRequests,
}

impl DocType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocType::StateRegulation => "state_regulation",
            DocType::PmsReportRequests => "pms_report_requests",
        }
    }
}

impl std::str::FromStr for DocType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "state_regulation" => Ok(DocType::StateRegulation),
            "pms_report_requests" => Ok(DocType::PmsReportRequests),
            other => Err(format!("Invalid doc_type: {}", other)),
        }
    }
}

/// Metadata for an uploaded document. The PDF bytes themselves are not
/// retained; only their length survives as `file_size`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedDocument {
    pub id: String,
    pub title: String,
    pub doc_type: DocType,
    pub slug: Option<String>,
    pub summary: Option<String>,
    /// Original file name as submitted by the caller, unsanitized.
    pub filename: String,
    pub file_size: i64,
    pub uploaded_at: DateTime<Utc>,
    pub uploaded_by: String,
}

impl UploadedDocument {
    pub fn new(
        title: String,
        doc_type: DocType,
        slug: Option<String>,
        summary: Option<String>,
        filename: String,
        file_size: i64,
        uploaded_by: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            doc_type,
            slug,
            summary,
            filename,
            file_size,
            uploaded_at: Utc::now(),
            uploaded_by,
        }
    }
}

/// First 20 characters of the presented token plus an ellipsis marker.
/// Distinct tokens sharing a prefix collide here; this is a traceability
/// hint, not an identity.
pub fn token_fragment(token: &str) -> String {
    let prefix: String = token.chars().take(TOKEN_FRAGMENT_LEN).collect();
    format!("{}...", prefix)
}
