use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::post,
    Router,
};
use chrono::Utc;
use engine::{publisher, store, CoreState};
use models::schemas::session::{FinishPayload, FinishSessionResult, StartSessionResult};

use crate::{
    extractor::{CurrentUser, Json},
    ApiError, ApiResponse,
};

#[utoipa::path(
    post,
    path = "/contests/{id}/session",
    params(("id" = String, Path, description = "contest id")),
    responses((status = 200, description = "session started", body = StartSessionResult)),
)]
pub async fn start_session(
    State(state): State<CoreState>,
    Path(contest_id): Path<String>,
    CurrentUser(principal): CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    let result: StartSessionResult =
        store::start_session(&state.conn, &contest_id, &principal.user_id, Utc::now()).await?;

    tracing::info!(contest_id, session_id = %result.session_id, "session started");

    Ok(Json(ApiResponse::success("session started", Some(result))))
}

#[utoipa::path(
    post,
    path = "/sessions/{id}/finish",
    params(("id" = String, Path, description = "session id")),
    request_body = FinishPayload,
    responses((status = 200, description = "session finished", body = FinishSessionResult)),
)]
pub async fn finish_session(
    State(state): State<CoreState>,
    Path(session_id): Path<String>,
    CurrentUser(principal): CurrentUser,
    Json(payload): Json<FinishPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let result: FinishSessionResult =
        store::finish_session(&state.conn, &session_id, &principal.user_id, payload, Utc::now())
            .await?;

    tracing::info!(session_id, status = ?result.status, "session finished");

    if let Ok(snapshot) = store::get_leaderboard(&state.conn, &result.contest_id, 10).await {
        state
            .publisher
            .publish(&publisher::contest_channel(&result.contest_id), &snapshot)
            .await;
    }

    Ok(Json(ApiResponse::success("session finished", Some(result))))
}

pub fn create_session_router() -> Router<CoreState> {
    Router::new()
        .route("/contests/{id}/session", post(start_session))
        .route("/sessions/{id}/finish", post(finish_session))
}
