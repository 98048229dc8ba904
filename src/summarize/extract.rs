use std::time::Duration;

use anyhow::Context;
use axum::async_trait;
use lazy_static::lazy_static;
use scraper::{Html, Selector};

const USER_AGENT_STRING: &str = "textdigest/0.1 (+article extraction)";

/// Article-extraction collaborator: URL in, plain text out.
#[async_trait]
pub trait ArticleFetcher: Send + Sync {
    async fn fetch_article(&self, url: &str) -> anyhow::Result<String>;
}

/// Fetches the page over HTTP and strips it down to paragraph text.
pub struct HttpArticleFetcher {
    client: reqwest::Client,
}

impl HttpArticleFetcher {
    pub fn new() -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT_STRING)
            .build()
            .context("build article http client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ArticleFetcher for HttpArticleFetcher {
    async fn fetch_article(&self, url: &str) -> anyhow::Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("fetch {url}"))?;
        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("fetch {url}: status {status}");
        }
        let html = response.text().await.context("read page body")?;
        Ok(article_text(&html))
    }
}

lazy_static! {
    static ref ARTICLE_PARAGRAPHS: Selector = Selector::parse("article p").unwrap();
    static ref ALL_PARAGRAPHS: Selector = Selector::parse("p").unwrap();
}

/// Paragraph text of the page, preferring `<article>` content when present.
pub(crate) fn article_text(html: &str) -> String {
    let doc = Html::parse_document(html);
    let mut paragraphs: Vec<String> = collect_paragraphs(&doc, &ARTICLE_PARAGRAPHS);
    if paragraphs.is_empty() {
        paragraphs = collect_paragraphs(&doc, &ALL_PARAGRAPHS);
    }
    paragraphs.join("\n")
}

fn collect_paragraphs(doc: &Html, selector: &Selector) -> Vec<String> {
    doc.select(selector)
        .map(|p| p.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// PDF-to-text collaborator.
pub fn pdf_text(bytes: &[u8]) -> anyhow::Result<String> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| anyhow::anyhow!("extract pdf text: {e}"))
}

/// DOCX-to-text collaborator; paragraph texts joined by newline.
pub fn docx_text(bytes: &[u8]) -> anyhow::Result<String> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| anyhow::anyhow!("read docx: {e:?}"))?;
    let mut paragraphs = Vec::new();
    for child in docx.document.children {
        if let docx_rs::DocumentChild::Paragraph(paragraph) = child {
            let mut line = String::new();
            for part in paragraph.children {
                if let docx_rs::ParagraphChild::Run(run) = part {
                    for piece in run.children {
                        if let docx_rs::RunChild::Text(text) = piece {
                            line.push_str(&text.text);
                        }
                    }
                }
            }
            paragraphs.push(line);
        }
    }
    Ok(paragraphs.join("\n"))
}
