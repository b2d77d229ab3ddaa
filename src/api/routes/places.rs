//! Places Routes
//!
//! - GET / - All places in default order
//! - POST /history - All places ranked against a click history
//! - GET /place?id=<id> - The place with the given id, as a list

use axum::{
    body::Bytes,
    extract::{Query, State},
    Json,
};
use std::collections::HashMap;
use std::sync::Arc;

use crate::api::dto::HistoryRequest;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::place::Place;
use crate::ranker::Ranker;

/// Id looked up when the query has no usable `id`
const FALLBACK_PLACE_ID: i64 = 1;

/// GET /
///
/// Rank the whole catalog without history.
pub async fn default_ranking(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Place>>> {
    let places = run_ranking(&state, |ranker| ranker.rank()).await?;
    Ok(Json(places))
}

/// POST /history
///
/// Rank the whole catalog against the posted click history. The body is
/// read as JSON whatever the Content-Type says.
pub async fn history_ranking(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<Json<Vec<Place>>> {
    let request: HistoryRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::Validation(format!("Invalid history body: {}", e)))?;

    let history = request.history.unwrap_or_default();

    tracing::debug!(clicks = history.len(), "Ranking with history");

    let places = run_ranking(&state, move |ranker| ranker.rank_with_history(&history))
    .await?;
    Ok(Json(places))
}

/// GET /place?id=<id>
///
/// Look up a place. Always answers with a list: one element when found,
/// empty otherwise. A missing or non-integer id falls back to id 1.
pub async fn get_place(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Vec<Place>> {
    let id = parse_place_id(params.get("id").map(String::as_str));
    Json(state.ranker.get(id))
}

fn parse_place_id(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.trim().parse().ok())
        .unwrap_or(FALLBACK_PLACE_ID)
}

/// Run a ranking off the async runtime
async fn run_ranking<F>(state: &AppState, rank: F) -> ApiResult<Vec<Place>>
where
    F: FnOnce(&Ranker) -> Vec<Place> + Send + 'static,
{
    let ranker = Arc::clone(&state.ranker);
    tokio::task::spawn_blocking(move || rank(&ranker))
        .await
        .map_err(|e| ApiError::ServiceUnavailable(format!("Ranking task failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_place_id() {
        assert_eq!(parse_place_id(Some("42")), 42);
        assert_eq!(parse_place_id(Some(" 7 ")), 7);
        assert_eq!(parse_place_id(Some("-3")), -3);
        assert_eq!(parse_place_id(Some("abc")), FALLBACK_PLACE_ID);
        assert_eq!(parse_place_id(Some("")), FALLBACK_PLACE_ID);
        assert_eq!(parse_place_id(None), FALLBACK_PLACE_ID);
    }
}
