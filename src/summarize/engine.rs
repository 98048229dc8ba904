use std::cmp::Ordering;
use std::collections::HashMap;
use std::time::Duration;

use anyhow::Context;
use axum::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SummarizerConfig;
use crate::error::{AppError, Result};
use crate::summarize::annotate::STOPWORDS;

/// Summarization strategy selected per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryMode {
    Abstractive,
    Extractive,
}

impl SummaryMode {
    /// Missing mode defaults to abstractive; anything but the two recognized
    /// values is a validation error and never reaches a collaborator.
    pub fn parse(raw: Option<&str>) -> Result<Self> {
        match raw.unwrap_or("abstractive") {
            "abstractive" => Ok(Self::Abstractive),
            "extractive" => Ok(Self::Extractive),
            other => Err(AppError::Validation(format!(
                "unknown mode '{other}', expected 'abstractive' or 'extractive'"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Abstractive => "abstractive",
            Self::Extractive => "extractive",
        }
    }
}

/// Neural abstractive summarization collaborator. The model itself is a black
/// box behind this seam.
#[async_trait]
pub trait SummaryModel: Send + Sync {
    async fn summarize(&self, text: &str) -> anyhow::Result<String>;
}

/// Calls an HTTP inference endpoint hosting a summarization model.
pub struct HttpSummaryModel {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

// Fixed generation bounds, no sampling.
const MIN_SUMMARY_TOKENS: u32 = 30;
const MAX_SUMMARY_TOKENS: u32 = 150;

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
}

#[derive(Serialize)]
struct InferenceParameters {
    min_length: u32,
    max_length: u32,
    do_sample: bool,
}

#[derive(Deserialize)]
struct InferenceOutput {
    summary_text: String,
}

impl HttpSummaryModel {
    pub fn new(config: &SummarizerConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("build summarizer http client")?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl SummaryModel for HttpSummaryModel {
    async fn summarize(&self, text: &str) -> anyhow::Result<String> {
        let mut request = self.client.post(&self.endpoint).json(&InferenceRequest {
            inputs: text,
            parameters: InferenceParameters {
                min_length: MIN_SUMMARY_TOKENS,
                max_length: MAX_SUMMARY_TOKENS,
                do_sample: false,
            },
        });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .context("summarization endpoint unreachable")?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("summarization endpoint returned {status}: {body}");
        }

        let outputs: Vec<InferenceOutput> = response
            .json()
            .await
            .context("decode summarization response")?;
        outputs
            .into_iter()
            .next()
            .map(|o| o.summary_text)
            .ok_or_else(|| anyhow::anyhow!("summarization endpoint returned no candidates"))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractiveError {
    #[error("input too short to summarize")]
    TooShort,
}

const EXTRACTIVE_RATIO: f64 = 0.2;
const MIN_SENTENCES: usize = 4;

fn split_sentences(text: &str) -> Vec<String> {
    text.split_inclusive(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn score_tokens(sentence: &str) -> Vec<String> {
    sentence
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .filter(|t| !STOPWORDS.contains(&t.as_str()))
        .collect()
}

/// Selects roughly 20% of the sentences by term-frequency score, returned in
/// original order. Errors on inputs with fewer than four sentences; the
/// dispatcher handles the fallback.
pub fn extractive_summary(text: &str) -> std::result::Result<String, ExtractiveError> {
    let clean = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let sentences = split_sentences(&clean);
    if sentences.len() < MIN_SENTENCES {
        return Err(ExtractiveError::TooShort);
    }
    let target = ((sentences.len() as f64 * EXTRACTIVE_RATIO).round() as usize).max(1);

    let mut freq: HashMap<String, f64> = HashMap::new();
    for sentence in &sentences {
        for token in score_tokens(sentence) {
            *freq.entry(token).or_insert(0.0) += 1.0;
        }
    }

    let scores: Vec<f64> = sentences
        .iter()
        .map(|sentence| {
            let tokens = score_tokens(sentence);
            if tokens.is_empty() {
                return 0.0;
            }
            let total: f64 = tokens.iter().filter_map(|t| freq.get(t)).sum();
            total / tokens.len() as f64
        })
        .collect();

    // Stable sort: on equal scores, earlier sentences win.
    let mut order: Vec<usize> = (0..sentences.len()).collect();
    order.sort_by(|a, b| scores[*b].partial_cmp(&scores[*a]).unwrap_or(Ordering::Equal));
    let mut picked: Vec<usize> = order.into_iter().take(target).collect();
    picked.sort_unstable();

    Ok(picked
        .into_iter()
        .map(|i| sentences[i].as_str())
        .collect::<Vec<_>>()
        .join(" "))
}

/// Trivial heuristic for texts the extractive collaborator refuses: the first
/// three sentences split on ". ", joined back with a trailing period.
pub fn fallback_summary(text: &str) -> String {
    let sentences: Vec<&str> = text.split(". ").take(3).collect();
    format!("{}.", sentences.join(". "))
}

/// Dispatches to the selected strategy. Abstractive failures propagate;
/// extractive falls back to the first-three-sentences heuristic.
pub async fn run(model: &dyn SummaryModel, mode: SummaryMode, text: &str) -> Result<String> {
    match mode {
        SummaryMode::Abstractive => Ok(model.summarize(text).await?),
        SummaryMode::Extractive => Ok(match extractive_summary(text) {
            Ok(summary) => summary,
            Err(ExtractiveError::TooShort) => {
                debug!("input too short for extraction, using first sentences");
                fallback_summary(text)
            }
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentences(n: usize) -> String {
        (0..n)
            .map(|i| format!("Sentence number {i} talks about topic {}.", i % 3))
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn mode_defaults_to_abstractive() {
        assert_eq!(SummaryMode::parse(None).unwrap(), SummaryMode::Abstractive);
    }

    #[test]
    fn mode_rejects_unknown_values() {
        assert!(matches!(
            SummaryMode::parse(Some("telepathic")),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn extractive_keeps_about_a_fifth_of_sentences() {
        let text = sentences(10);
        let summary = extractive_summary(&text).expect("summary");
        assert_eq!(split_sentences(&summary).len(), 2);
    }

    #[test]
    fn extractive_on_four_sentences_keeps_one() {
        let text = sentences(4);
        let summary = extractive_summary(&text).expect("summary");
        assert_eq!(split_sentences(&summary).len(), 1);
    }

    #[test]
    fn extractive_preserves_original_order() {
        let text = sentences(20);
        let summary = extractive_summary(&text).expect("summary");
        let picked = split_sentences(&summary);
        let all = split_sentences(&text);
        let positions: Vec<usize> = picked
            .iter()
            .map(|s| all.iter().position(|o| o == s).expect("picked from input"))
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn short_input_errors() {
        assert!(matches!(
            extractive_summary("One sentence. Two sentences. Three sentences."),
            Err(ExtractiveError::TooShort)
        ));
    }

    #[test]
    fn fallback_takes_first_three_sentences() {
        let text = "First one. Second one. Third one. Fourth one. Fifth one";
        assert_eq!(fallback_summary(text), "First one. Second one. Third one.");
    }

    #[tokio::test]
    async fn run_falls_back_when_extraction_refuses() {
        struct NeverModel;
        #[axum::async_trait]
        impl SummaryModel for NeverModel {
            async fn summarize(&self, _text: &str) -> anyhow::Result<String> {
                anyhow::bail!("should not be called in extractive mode")
            }
        }

        let text = "Tiny text. Not enough here. Really short";
        let summary = run(&NeverModel, SummaryMode::Extractive, text)
            .await
            .expect("summary");
        assert_eq!(summary, "Tiny text. Not enough here. Really short.");
    }

    #[tokio::test]
    async fn run_uses_model_for_abstractive() {
        struct CannedModel;
        #[axum::async_trait]
        impl SummaryModel for CannedModel {
            async fn summarize(&self, _text: &str) -> anyhow::Result<String> {
                Ok("canned".into())
            }
        }

        let summary = run(&CannedModel, SummaryMode::Abstractive, "whatever")
            .await
            .expect("summary");
        assert_eq!(summary, "canned");
    }
}
