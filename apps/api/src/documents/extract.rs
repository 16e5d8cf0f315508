//! Text extraction from uploaded resume documents.
//!
//! Plain text passes through, PDFs go through `pdf_extract`, and the Word
//! formats are rejected with guidance since their parsing is not supported.

use crate::errors::AppError;

pub fn file_extension(path: &str) -> Option<String> {
    path.rsplit('.').next().filter(|ext| *ext != path).map(str::to_lowercase)
}

pub fn extract_text(file_path: &str, bytes: &[u8]) -> Result<String, AppError> {
    match file_extension(file_path).as_deref() {
        Some("txt") => Ok(String::from_utf8_lossy(bytes).into_owned()),
        Some("pdf") => pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
            tracing::error!("PDF extraction failed for {file_path}: {e}");
            AppError::Validation(
                "Unable to parse PDF. Please copy the text and use the text area instead."
                    .to_string(),
            )
        }),
        Some("doc") | Some("docx") => Err(AppError::Validation(
            "DOC/DOCX parsing not yet supported. Please convert to PDF or paste the text directly."
                .to_string(),
        )),
        _ => Err(AppError::Validation("Unsupported file format".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_is_lowercased() {
        assert_eq!(file_extension("resume.PDF").as_deref(), Some("pdf"));
        assert_eq!(file_extension("a/b/notes.txt").as_deref(), Some("txt"));
        assert_eq!(file_extension("no_extension"), None);
    }

    #[test]
    fn test_txt_passes_through() {
        let text = extract_text("resume.txt", b"plain resume text").unwrap();
        assert_eq!(text, "plain resume text");
    }

    #[test]
    fn test_word_formats_are_rejected_with_guidance() {
        for path in ["resume.doc", "resume.docx"] {
            let err = extract_text(path, b"").unwrap_err();
            assert!(matches!(err, AppError::Validation(msg) if msg.contains("convert to PDF")));
        }
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let err = extract_text("resume.png", b"").unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == "Unsupported file format"));
    }
}
