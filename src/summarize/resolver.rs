use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::error::{AppError, Result};
use crate::summarize::dto::SummarizeRequest;
use crate::summarize::extract::{self, ArticleFetcher};

/// Declared document type plus its payload. Resolution priority when a request
/// carries several inputs: URL, then uploaded file, then inline text.
#[derive(Debug)]
pub enum DocumentSource {
    Url(String),
    Pdf(Vec<u8>),
    Docx(Vec<u8>),
    PlainText(String),
}

impl DocumentSource {
    pub fn from_request(req: &SummarizeRequest) -> Result<Self> {
        if let Some(url) = req.url.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
            return Ok(Self::Url(url.to_string()));
        }

        if let Some(file) = &req.file {
            let bytes = BASE64
                .decode(file.content_b64.trim())
                .map_err(|_| AppError::Validation("file content is not valid base64".into()))?;
            let name = file.name.to_lowercase();
            if name.ends_with(".pdf") {
                return Ok(Self::Pdf(bytes));
            }
            if name.ends_with(".docx") {
                return Ok(Self::Docx(bytes));
            }
            // unrecognized extension falls through to inline text
        }

        match req.text.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => Ok(Self::PlainText(t.to_string())),
            _ => Err(AppError::UnresolvedInput),
        }
    }

    /// Runs the matching extraction strategy. Collaborator failures propagate
    /// untouched; an extraction that produces nothing is a client error.
    pub async fn extract(self, fetcher: &dyn ArticleFetcher) -> Result<String> {
        let text = match self {
            Self::Url(url) => fetcher.fetch_article(&url).await?,
            Self::Pdf(bytes) => extract::pdf_text(&bytes)?,
            Self::Docx(bytes) => extract::docx_text(&bytes)?,
            Self::PlainText(text) => text,
        };
        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(AppError::UnresolvedInput);
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summarize::dto::FileUpload;

    fn request() -> SummarizeRequest {
        SummarizeRequest {
            text: None,
            url: None,
            file: None,
            mode: None,
        }
    }

    #[test]
    fn url_takes_precedence_over_inline_text() {
        let req = SummarizeRequest {
            text: Some("inline body".into()),
            url: Some("https://example.com/article".into()),
            ..request()
        };
        assert!(matches!(
            DocumentSource::from_request(&req),
            Ok(DocumentSource::Url(u)) if u == "https://example.com/article"
        ));
    }

    #[test]
    fn file_takes_precedence_over_inline_text() {
        let req = SummarizeRequest {
            text: Some("inline body".into()),
            file: Some(FileUpload {
                name: "paper.PDF".into(),
                content_b64: BASE64.encode(b"%PDF-"),
            }),
            ..request()
        };
        assert!(matches!(
            DocumentSource::from_request(&req),
            Ok(DocumentSource::Pdf(_))
        ));
    }

    #[test]
    fn docx_extension_selects_docx_strategy() {
        let req = SummarizeRequest {
            file: Some(FileUpload {
                name: "notes.docx".into(),
                content_b64: BASE64.encode(b"PK"),
            }),
            ..request()
        };
        assert!(matches!(
            DocumentSource::from_request(&req),
            Ok(DocumentSource::Docx(_))
        ));
    }

    #[test]
    fn unknown_extension_falls_through_to_inline_text() {
        let req = SummarizeRequest {
            text: Some("inline body".into()),
            file: Some(FileUpload {
                name: "image.png".into(),
                content_b64: BASE64.encode(b"\x89PNG"),
            }),
            ..request()
        };
        assert!(matches!(
            DocumentSource::from_request(&req),
            Ok(DocumentSource::PlainText(t)) if t == "inline body"
        ));
    }

    #[test]
    fn empty_request_is_unresolved() {
        assert!(matches!(
            DocumentSource::from_request(&request()),
            Err(AppError::UnresolvedInput)
        ));
    }

    #[test]
    fn blank_text_is_unresolved() {
        let req = SummarizeRequest {
            text: Some("   ".into()),
            ..request()
        };
        assert!(matches!(
            DocumentSource::from_request(&req),
            Err(AppError::UnresolvedInput)
        ));
    }

    #[test]
    fn bad_base64_is_a_validation_error() {
        let req = SummarizeRequest {
            file: Some(FileUpload {
                name: "paper.pdf".into(),
                content_b64: "not base64!!!".into(),
            }),
            ..request()
        };
        assert!(matches!(
            DocumentSource::from_request(&req),
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn url_extraction_uses_the_fetcher() {
        struct Canned;
        #[axum::async_trait]
        impl ArticleFetcher for Canned {
            async fn fetch_article(&self, url: &str) -> anyhow::Result<String> {
                Ok(format!("article from {url}"))
            }
        }
        let text = DocumentSource::Url("https://example.com".into())
            .extract(&Canned)
            .await
            .expect("text");
        assert_eq!(text, "article from https://example.com");
    }

    #[tokio::test]
    async fn empty_extraction_is_unresolved() {
        struct Empty;
        #[axum::async_trait]
        impl ArticleFetcher for Empty {
            async fn fetch_article(&self, _url: &str) -> anyhow::Result<String> {
                Ok("   \n".into())
            }
        }
        let err = DocumentSource::Url("https://example.com".into())
            .extract(&Empty)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnresolvedInput));
    }
}
