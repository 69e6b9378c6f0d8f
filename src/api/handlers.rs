use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{
        GiftItem, GiftQuery, GiftRecommendation, Locale, QuizSubmission, ScoredGift, SearchParams,
    },
    services::recommendations,
};

use super::AppState;

/// Ranked recommendations returned by the quiz and search endpoints
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationsResponse {
    pub recommendations: Vec<GiftRecommendation>,
    pub total: usize,
    pub generated_at: DateTime<Utc>,
}

impl RecommendationsResponse {
    fn new(ranked: &[ScoredGift], locale: Locale) -> Self {
        let recommendations: Vec<GiftRecommendation> = ranked
            .iter()
            .map(|scored| GiftRecommendation::from_scored(scored, locale))
            .collect();
        Self {
            total: recommendations.len(),
            recommendations,
            generated_at: Utc::now(),
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Scores the catalog against quiz answers
pub async fn submit_quiz(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<QuizSubmission>, JsonRejection>,
) -> AppResult<Json<RecommendationsResponse>> {
    let Json(submission) = payload?;
    let limit = state.limits.resolve(submission.limit, state.limits.quiz);

    tracing::info!(
        request_id = %request_id,
        answer_count = submission.answers.len(),
        budget = submission.answers.budget(),
        limit,
        "Processing quiz submission"
    );
    if submission.answers.is_empty() {
        tracing::debug!(request_id = %request_id, "Quiz has no answers, ranking by quality only");
    }

    let ranked = recommendations::get_recommendations(
        state.catalog.clone(),
        GiftQuery::Answers(submission.answers),
        limit,
    )
    .await?;

    Ok(Json(RecommendationsResponse::new(&ranked, submission.locale)))
}

/// Free-text gift search with backfill
pub async fn search(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> AppResult<Json<RecommendationsResponse>> {
    let Query(params) = params?;
    let limit = state.limits.resolve(params.limit, state.limits.search);

    tracing::info!(
        request_id = %request_id,
        query = %params.q,
        budget = params.budget.as_deref(),
        limit,
        "Processing gift search"
    );

    let query = GiftQuery::Keywords {
        text: params.q,
        budget: params.budget,
    };
    let ranked = recommendations::get_recommendations(state.catalog.clone(), query, limit).await?;

    Ok(Json(RecommendationsResponse::new(&ranked, params.locale)))
}

/// Lists active catalog items
pub async fn list_gifts(State(state): State<AppState>) -> AppResult<Json<Vec<GiftItem>>> {
    let items = recommendations::list_active(state.catalog.clone()).await?;
    Ok(Json(items))
}

/// Returns a single active catalog item
pub async fn get_gift(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<GiftItem>> {
    let item = recommendations::find_gift(state.catalog.clone(), &id).await?;
    Ok(Json(item))
}
