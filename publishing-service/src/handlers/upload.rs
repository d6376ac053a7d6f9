use crate::dtos::UploadResponse;
use crate::models::{token_fragment, DocType, UploadedDocument};
use crate::startup::AppState;
use axum::{
    extract::{
        multipart::{Field, Multipart},
        State,
    },
    http::{header, HeaderMap},
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;

/// Admin endpoint: validates the bearer gate and the declared content type,
/// then persists the document metadata. Checks run in a fixed order
/// (auth, content type, read, persist) and the first failure short-circuits
/// with nothing written.
pub async fn upload_document(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let token = bearer_token(&headers)?;

    let mut title: Option<String> = None;
    let mut doc_type: Option<DocType> = None;
    let mut slug: Option<String> = None;
    let mut summary: Option<String> = None;
    let mut pdf: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest(anyhow::anyhow!("Failed to read multipart field: {}", e))
    })? {
        match field.name() {
            Some("title") => title = Some(text_field(field, "title").await?),
            Some("doc_type") => {
                let raw = text_field(field, "doc_type").await?;
                let parsed = raw
                    .parse::<DocType>()
                    .map_err(|e| AppError::UnprocessableEntity(anyhow::anyhow!(e)))?;
                doc_type = Some(parsed);
            }
            Some("slug") => slug = Some(text_field(field, "slug").await?),
            Some("summary") => summary = Some(text_field(field, "summary").await?),
            Some("pdf") => {
                // The label is checked before the body is read; this is not
                // a structural validation of the bytes.
                let content_type = field.content_type().unwrap_or_default().to_string();
                if content_type != "application/pdf" {
                    return Err(AppError::BadRequest(anyhow::anyhow!(
                        "Only PDF files are allowed"
                    )));
                }

                let filename = field.file_name().unwrap_or("unnamed").to_string();
                let data = field.bytes().await.map_err(|e| {
                    AppError::BadRequest(anyhow::anyhow!("Failed to read file bytes: {}", e))
                })?;
                pdf = Some((filename, data.to_vec()));
            }
            _ => {}
        }
    }

    let title = title.ok_or_else(|| {
        AppError::UnprocessableEntity(anyhow::anyhow!("Missing required field: title"))
    })?;
    let (filename, data) = pdf.ok_or_else(|| {
        AppError::UnprocessableEntity(anyhow::anyhow!("Missing required field: pdf"))
    })?;
    let doc_type = doc_type.unwrap_or_default();

    // file_size is what the server read, never a caller-supplied value.
    let document = UploadedDocument::new(
        title,
        doc_type,
        slug,
        summary,
        filename,
        data.len() as i64,
        token_fragment(token),
    );

    state.store.insert_document(&document).await?;

    tracing::info!(
        document_id = %document.id,
        title = %document.title,
        doc_type = %document.doc_type.as_str(),
        file_size = document.file_size,
        "Document uploaded"
    );

    Ok(Json(UploadResponse {
        success: true,
        message: "Document uploaded successfully".to_string(),
        document_id: document.id,
        doc_type: document.doc_type,
    }))
}

/// Presence gate, not authentication: the header must carry a non-empty
/// token behind the literal "Bearer " prefix. Nothing about the token is
/// verified.
fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized(anyhow::anyhow!("Authorization required")))?;

    if token.is_empty() {
        return Err(AppError::Unauthorized(anyhow::anyhow!("Invalid token")));
    }

    Ok(token)
}

async fn text_field(field: Field<'_>, name: &str) -> Result<String, AppError> {
    field.text().await.map_err(|e| {
        AppError::BadRequest(anyhow::anyhow!("Failed to read field '{}': {}", name, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_authorization(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn missing_header_is_unauthorized() {
        let err = bearer_token(&HeaderMap::new()).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn non_bearer_scheme_is_unauthorized() {
        let headers = headers_with_authorization("Basic dXNlcjpwYXNz");
        assert!(matches!(
            bearer_token(&headers),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn empty_token_is_unauthorized() {
        let headers = headers_with_authorization("Bearer ");
        assert!(matches!(
            bearer_token(&headers),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn well_formed_bearer_token_is_accepted() {
        let headers = headers_with_authorization("Bearer abc");
        assert_eq!(bearer_token(&headers).unwrap(), "abc");
    }
}
