use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::AuthUser;
use crate::documents::extract::{extract_text, file_extension};
use crate::errors::AppError;
use crate::state::AppState;

/// Uploads are capped at 5 MB, matching the client-side check.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

const ALLOWED_EXTENSIONS: &[&str] = &["txt", "pdf", "doc", "docx"];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub file_path: String,
    pub bucket: String,
}

/// POST /api/v1/documents/upload
///
/// Stores the uploaded file under the caller's own prefix so the parse
/// endpoint can verify ownership from the key alone.
pub async fn handle_upload(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let name = field
                .file_name()
                .map(str::to_string)
                .ok_or_else(|| AppError::Validation("File name is required".to_string()))?;
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
            file = Some((name, bytes.to_vec()));
        }
    }

    let (file_name, bytes) =
        file.ok_or_else(|| AppError::Validation("Missing 'file' field".to_string()))?;

    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::Validation(
            "File too large, maximum size is 5 MB".to_string(),
        ));
    }

    let extension = file_extension(&file_name).ok_or_else(|| {
        AppError::Validation("Unsupported file format".to_string())
    })?;
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(AppError::Validation("Unsupported file format".to_string()));
    }

    let sanitized: String = file_name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' { c } else { '_' })
        .collect();
    let key = format!(
        "{}/resume-{}-{}",
        user.user_id,
        chrono::Utc::now().timestamp_millis(),
        sanitized
    );

    state
        .s3
        .put_object()
        .bucket(&state.config.s3_bucket)
        .key(&key)
        .body(aws_sdk_s3::primitives::ByteStream::from(bytes))
        .send()
        .await
        .map_err(|e| AppError::Storage(format!("Upload failed: {e}")))?;

    info!("Stored document at s3://{}/{}", state.config.s3_bucket, key);

    Ok(Json(UploadResponse {
        success: true,
        file_path: key,
        bucket: state.config.s3_bucket.clone(),
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseRequest {
    pub file_path: String,
}

#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub success: bool,
    pub text: String,
    pub length: usize,
}

/// POST /api/v1/documents/parse
///
/// Downloads an uploaded document, extracts its text, and removes the object.
/// Uploads are single-use staging files, not long-term storage.
pub async fn handle_parse(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<ParseRequest>,
) -> Result<Json<ParseResponse>, AppError> {
    if req.file_path.trim().is_empty() {
        return Err(AppError::Validation("Missing filePath parameter".to_string()));
    }
    if !owns_key(user.user_id, &req.file_path) {
        return Err(AppError::Forbidden);
    }

    let object = state
        .s3
        .get_object()
        .bucket(&state.config.s3_bucket)
        .key(&req.file_path)
        .send()
        .await
        .map_err(|e| AppError::Storage(format!("Failed to download file: {e}")))?;

    let bytes = object
        .body
        .collect()
        .await
        .map_err(|e| AppError::Storage(format!("Failed to read file body: {e}")))?
        .into_bytes();

    let text = extract_text(&req.file_path, &bytes)?;
    if text.trim().is_empty() {
        return Err(AppError::Validation(
            "No text could be extracted from the document".to_string(),
        ));
    }

    // Best effort: extraction already succeeded, a leftover object is only waste.
    if let Err(e) = state
        .s3
        .delete_object()
        .bucket(&state.config.s3_bucket)
        .key(&req.file_path)
        .send()
        .await
    {
        warn!("Failed to delete parsed document {}: {e}", req.file_path);
    }

    info!("Extracted {} characters from {}", text.len(), req.file_path);

    Ok(Json(ParseResponse {
        success: true,
        length: text.len(),
        text,
    }))
}

/// Keys are namespaced by user at upload time, so ownership is decided by the
/// key prefix alone.
fn owns_key(user_id: uuid::Uuid, key: &str) -> bool {
    key.starts_with(&format!("{user_id}/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_owns_key_accepts_own_prefix() {
        let id = Uuid::new_v4();
        assert!(owns_key(id, &format!("{id}/resume-1700000000000-cv.pdf")));
    }

    #[test]
    fn test_owns_key_rejects_foreign_prefix() {
        let id = Uuid::new_v4();
        let other = Uuid::new_v4();
        assert!(!owns_key(id, &format!("{other}/resume-1700000000000-cv.pdf")));
    }

    #[test]
    fn test_owns_key_rejects_bare_and_empty_paths() {
        let id = Uuid::new_v4();
        assert!(!owns_key(id, ""));
        // The bare id without the slash separator is not inside the namespace.
        assert!(!owns_key(id, &id.to_string()));
    }
}
