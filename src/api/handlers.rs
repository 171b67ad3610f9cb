use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{StatusCode, Uri},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::str::FromStr;

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{RecommendationResponse, UserId},
};

use super::AppState;

/// Raw query parameters; values that do not parse fall back to their defaults
#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub user_id: Option<String>,
    pub weeks: Option<String>,
    pub top_n: Option<String>,
}

fn lenient<T: FromStr>(value: Option<&str>) -> Option<T> {
    value.and_then(|v| v.trim().parse().ok())
}

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Recommendations for a user, or popular titles when no user is given
pub async fn get_new_user_recommendation(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    query: Result<Query<RecommendationQuery>, QueryRejection>,
) -> AppResult<Json<RecommendationResponse>> {
    let Query(query) = query.map_err(|e| AppError::InvalidInput(e.body_text()))?;

    let user_id: Option<UserId> = lenient(query.user_id.as_deref());
    let weeks = lenient(query.weeks.as_deref()).unwrap_or(state.default_weeks);
    let top_n = lenient(query.top_n.as_deref()).unwrap_or(state.default_top_n);

    tracing::info!(
        request_id = %request_id,
        user_id = ?user_id,
        weeks,
        top_n,
        "Processing recommendation request"
    );

    // Scoring walks the whole catalog, keep it off the async workers
    let recommender = state.recommender.clone();
    let recommendation = tokio::task::spawn_blocking(move || {
        recommender.run_recommendations(user_id, weeks, top_n)
    })
    .await
    .map_err(|e| AppError::Internal(format!("recommendation task failed: {e}")))?;

    tracing::info!(
        request_id = %request_id,
        strategy = %recommendation.strategy,
        count = recommendation.titles.len(),
        "Recommendations completed"
    );

    Ok(Json(recommendation.into()))
}

/// Fallback for unknown routes
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("no route for {}", uri.path()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_parsing_falls_back_on_garbage() {
        assert_eq!(lenient::<u64>(Some("42")), Some(42));
        assert_eq!(lenient::<u64>(Some("")), None);
        assert_eq!(lenient::<usize>(Some("abc")), None);
        assert_eq!(lenient::<u32>(Some("-1")), None);
        assert_eq!(lenient::<u32>(None), None);
    }
}
