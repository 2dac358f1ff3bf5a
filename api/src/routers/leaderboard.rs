use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::get,
    Router,
};
use engine::{store, CoreState};
use models::params::leaderboard::LeaderboardQuery;
use models::schemas::leaderboard::LeaderboardSummary;

use crate::{extractor::Json, ApiError, ApiResponse};

#[utoipa::path(
    get,
    path = "/contests/{id}/leaderboard",
    params(
        ("id" = String, Path, description = "contest id"),
        LeaderboardQuery,
    ),
    responses((status = 200, description = "leaderboard snapshot", body = LeaderboardSummary)),
)]
pub async fn get_leaderboard(
    State(state): State<CoreState>,
    Path(contest_id): Path<String>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let summary = store::get_leaderboard(
        &state.conn,
        &contest_id,
        query.limit_or_default() as usize,
    )
    .await?;

    Ok(Json(ApiResponse::success(
        "leaderboard retrieved",
        Some(summary),
    )))
}

pub fn create_leaderboard_router() -> Router<CoreState> {
    Router::new().route("/contests/{id}/leaderboard", get(get_leaderboard))
}
