use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Uploaded document, carried inline as base64 so the whole request stays one
/// JSON body.
#[derive(Debug, Deserialize)]
pub struct FileUpload {
    pub name: String,
    pub content_b64: String,
}

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    pub text: Option<String>,
    pub url: Option<String>,
    pub file: Option<FileUpload>,
    pub mode: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    pub summary: String,
    pub word_count: usize,
    pub compression_ratio: f64,
    pub sentiment: f64,
    pub keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    20
}

#[derive(Debug, Serialize)]
pub struct SummaryListItem {
    pub id: Uuid,
    pub mode: String,
    pub summary: String,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Serialize)]
pub struct SummaryDetails {
    pub id: Uuid,
    pub mode: String,
    pub content: String,
    pub summary: String,
    pub created_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarize_response_has_all_contract_fields() {
        let json = serde_json::to_value(SummarizeResponse {
            summary: "short".into(),
            word_count: 1,
            compression_ratio: 0.25,
            sentiment: -0.5,
            keywords: vec!["tide".into()],
        })
        .expect("serialize");
        for field in ["summary", "word_count", "compression_ratio", "sentiment", "keywords"] {
            assert!(json.get(field).is_some(), "missing field {field}");
        }
    }

    #[test]
    fn pagination_defaults_apply() {
        let p: Pagination = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(p.limit, 20);
        assert_eq!(p.offset, 0);
    }
}
