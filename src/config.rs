use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

/// Where abstractive summaries come from: an HTTP inference endpoint speaking
/// the `{"inputs": ..., "parameters": ...}` convention.
#[derive(Debug, Clone, Deserialize)]
pub struct SummarizerConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub summarizer: SummarizerConfig,
    pub rate_limit_per_minute: u32,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "textdigest".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "textdigest-users".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60),
        };
        let summarizer = SummarizerConfig {
            endpoint: std::env::var("SUMMARIZER_ENDPOINT").unwrap_or_else(|_| {
                "https://api-inference.huggingface.co/models/facebook/bart-large-cnn".into()
            }),
            api_key: std::env::var("SUMMARIZER_API_KEY").ok(),
        };
        let rate_limit_per_minute = std::env::var("RATE_LIMIT_PER_MINUTE")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(5);
        Ok(Self {
            database_url,
            jwt,
            summarizer,
            rate_limit_per_minute,
        })
    }
}
