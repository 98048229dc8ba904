use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, DefaultBodyLimit, Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::jwt::AuthUser,
    error::{AppError, Result},
    state::AppState,
    summarize::{
        annotate,
        dto::{Pagination, SummarizeRequest, SummarizeResponse, SummaryDetails, SummaryListItem},
        engine::{self, SummaryMode},
        repo::Summary,
        resolver::DocumentSource,
    },
};

const MAX_KEYWORDS: usize = 5;

pub fn summarize_routes() -> Router<AppState> {
    Router::new()
        .route("/summarize", post(summarize))
        .route("/summaries", get(list_summaries))
        .route("/summaries/:id", get(get_summary))
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024)) // 20MB, room for base64 uploads
}

#[instrument(skip(state, payload))]
pub async fn summarize(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(payload): Json<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>> {
    // Rate limit gates everything downstream, right after auth.
    state.limiter.check(addr.ip()).map_err(AppError::RateLimited)?;

    let mode = SummaryMode::parse(payload.mode.as_deref())?;
    let source = DocumentSource::from_request(&payload)?;
    let text = source.extract(state.fetcher.as_ref()).await?;

    let summary = engine::run(state.model.as_ref(), mode, &text).await?;
    let sentiment = annotate::sentiment_polarity(&text);
    let keywords = annotate::keywords(&text, MAX_KEYWORDS);

    let record = Summary::create(&state.db, user_id, &text, &summary, mode.as_str()).await?;
    info!(
        user_id = %user_id,
        summary_id = %record.id,
        mode = mode.as_str(),
        "summary stored"
    );

    let word_count = summary.split_whitespace().count();
    let compression_ratio = summary.chars().count() as f64 / text.chars().count() as f64;
    Ok(Json(SummarizeResponse {
        summary,
        word_count,
        compression_ratio,
        sentiment,
        keywords,
    }))
}

#[instrument(skip(state))]
pub async fn list_summaries(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<SummaryListItem>>> {
    let rows = Summary::list_by_user(&state.db, user_id, p.limit, p.offset).await?;
    let items = rows
        .into_iter()
        .map(|s| SummaryListItem {
            id: s.id,
            mode: s.mode,
            summary: s.summary,
            created_at: s.created_at,
        })
        .collect();
    Ok(Json(items))
}

#[instrument(skip(state))]
pub async fn get_summary(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<SummaryDetails>> {
    let record = Summary::get_for_user(&state.db, user_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound("summary not found".into()))?;
    Ok(Json(SummaryDetails {
        id: record.id,
        mode: record.mode,
        content: record.content,
        summary: record.summary,
        created_at: record.created_at,
    }))
}
