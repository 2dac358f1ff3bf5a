//! C6 — typing store (spec.md §5). The only component that touches the
//! database: wraps `startSession`/`finishSession`/`getLeaderboard` in
//! transactions, row-locking the entry/session being mutated so concurrent
//! attempts from the same participant serialize instead of racing.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionError, TransactionTrait,
};

use models::domains::{contest_prompts, contests, entries, keystrokes, prompts, sessions, users};
use models::schemas::leaderboard::{LeaderboardSession, LeaderboardSummary};
use models::schemas::prompt::PromptView;
use models::schemas::session::{FinishPayload, FinishSessionResult, StartSessionResult};

use crate::error::CoreError;
use crate::evaluator;
use crate::ids::new_session_id;
use crate::leaderboard;
use crate::policy;

fn unwrap_tx<T>(result: Result<T, TransactionError<CoreError>>) -> Result<T, CoreError> {
    result.map_err(|e| match e {
        TransactionError::Connection(db_err) => CoreError::from(db_err),
        TransactionError::Transaction(core_err) => core_err,
    })
}

/// `startSession(contestId, userId, now)`, spec.md §5: locks the caller's
/// entry row, validates the contest policy (C2), cyclically picks the next
/// prompt, and opens a new running session.
pub async fn start_session(
    conn: &DatabaseConnection,
    contest_id: &str,
    user_id: &str,
    now: DateTime<Utc>,
) -> Result<StartSessionResult, CoreError> {
    let result = conn
        .transaction::<_, StartSessionResult, CoreError>(|txn| {
            let contest_id = contest_id.to_string();
            let user_id = user_id.to_string();
            Box::pin(async move {
                let contest = contests::Entity::find_by_id(contest_id.clone())
                    .one(txn)
                    .await?
                    .ok_or_else(|| CoreError::not_found("contest not found"))?;

                let entry = entries::Entity::find()
                    .filter(entries::Column::ContestId.eq(contest_id.clone()))
                    .filter(entries::Column::UserId.eq(user_id.clone()))
                    .lock_exclusive()
                    .one(txn)
                    .await?;
                let entry = match entry {
                    Some(entry) => entry,
                    None => {
                        entries::ActiveModel {
                            user_id: Set(user_id.clone()),
                            contest_id: Set(contest_id.clone()),
                            attempts_used: Set(0),
                            ..Default::default()
                        }
                        .insert(txn)
                        .await?
                    }
                };

                policy::validate_session_start(&contest, Some(&entry), now)
                    .map_err(|rejection| CoreError::validation(rejection.reason_code()))?;

                let links = contest_prompts::Entity::find()
                    .filter(contest_prompts::Column::ContestId.eq(contest_id.clone()))
                    .order_by_asc(contest_prompts::Column::OrderIndex)
                    .all(txn)
                    .await?;
                if links.is_empty() {
                    return Err(CoreError::not_found("contest has no prompts configured"));
                }
                let chosen = &links[entry.attempts_used as usize % links.len()];
                let prompt = prompts::Entity::find_by_id(chosen.prompt_id.clone())
                    .one(txn)
                    .await?
                    .ok_or_else(|| CoreError::internal("contest prompt link points at a missing prompt"))?;

                let session_id = new_session_id();
                let session = sessions::ActiveModel {
                    id: Set(session_id.clone()),
                    user_id: Set(user_id.clone()),
                    contest_id: Set(contest_id.clone()),
                    prompt_id: Set(prompt.id.clone()),
                    started_at: Set(now.fixed_offset()),
                    ended_at: Set(None),
                    status: Set(models::domains::sea_orm_active_enums::SessionStatus::Running),
                    cpm: Set(None),
                    wpm: Set(None),
                    accuracy: Set(None),
                    errors: Set(None),
                    score: Set(None),
                    defocus_count: Set(0),
                    paste_blocked: Set(false),
                    anomaly_score: Set(None),
                    dq_reason: Set(None),
                };
                session.insert(txn).await?;

                let attempts_used = entry.attempts_used + 1;
                let mut entry_update: entries::ActiveModel = entry.into();
                entry_update.attempts_used = Set(attempts_used);
                entry_update.last_attempt_at = Set(Some(now.fixed_offset()));
                let entry = entry_update.update(txn).await?;

                Ok(StartSessionResult {
                    session_id,
                    prompt: PromptView::from(prompt),
                    started_at: now,
                    attempts_used,
                    attempts_remaining: policy::remaining_attempts(&contest, Some(&entry)),
                })
            })
        })
        .await;

    unwrap_tx(result)
}

/// `finishSession(sessionId, userId, payload, now)`, spec.md §5: locks the
/// session row, replays and scores it (C1/C3/C4), persists the verdict and
/// raw keylog, and updates the participant's personal best.
pub async fn finish_session(
    conn: &DatabaseConnection,
    session_id: &str,
    user_id: &str,
    payload: FinishPayload,
    now: DateTime<Utc>,
) -> Result<FinishSessionResult, CoreError> {
    let result = conn
        .transaction::<_, FinishSessionResult, CoreError>(|txn| {
            let session_id = session_id.to_string();
            let user_id = user_id.to_string();
            Box::pin(async move {
                let session = sessions::Entity::find_by_id(session_id.clone())
                    .lock_exclusive()
                    .one(txn)
                    .await?
                    .filter(|session| session.user_id == user_id)
                    .ok_or_else(|| CoreError::not_found("session not found"))?;

                if session.status != models::domains::sea_orm_active_enums::SessionStatus::Running {
                    return Err(CoreError::conflict("SESSION_ALREADY_FINISHED"));
                }

                let contest = contests::Entity::find_by_id(session.contest_id.clone())
                    .one(txn)
                    .await?
                    .ok_or_else(|| CoreError::internal("session references a missing contest"))?;
                let prompt = prompts::Entity::find_by_id(session.prompt_id.clone())
                    .one(txn)
                    .await?
                    .ok_or_else(|| CoreError::internal("session references a missing prompt"))?;
                let contest_id = session.contest_id.clone();
                let entry = entries::Entity::find()
                    .filter(entries::Column::ContestId.eq(contest_id.clone()))
                    .filter(entries::Column::UserId.eq(user_id.clone()))
                    .lock_exclusive()
                    .one(txn)
                    .await?;

                let outcome = evaluator::evaluate_session(
                    entry.as_ref(),
                    &prompt.typing_target,
                    contest.allow_backspace,
                    contest.time_limit_sec,
                    &payload,
                )?;

                keystrokes::Entity::delete_many()
                    .filter(keystrokes::Column::SessionId.eq(session_id.clone()))
                    .exec(txn)
                    .await?;
                for (idx, entry) in payload.keylog.iter().enumerate() {
                    keystrokes::ActiveModel {
                        session_id: Set(session_id.clone()),
                        idx: Set(idx as i32),
                        t_ms: Set(entry.t as i64),
                        key: Set(entry.k.clone()),
                        ok: Set(entry.ok.unwrap_or_else(|| entry.k.chars().count() == 1)),
                    }
                    .insert(txn)
                    .await?;
                }

                let flags = payload.client_flags.clone();
                let mut session_update: sessions::ActiveModel = session.into();
                session_update.ended_at = Set(Some(now.fixed_offset()));
                session_update.status = Set(outcome.verdict.as_status());
                session_update.cpm = Set(Some(outcome.stats.cpm));
                session_update.wpm = Set(Some(outcome.stats.wpm));
                session_update.accuracy = Set(Some(outcome.stats.accuracy));
                session_update.errors = Set(Some(outcome.mistakes as i32));
                session_update.score = Set(Some(outcome.stats.score));
                session_update.defocus_count = Set(flags.defocus.unwrap_or(0) as i32);
                session_update.paste_blocked = Set(flags.paste_blocked.unwrap_or(false));
                session_update.anomaly_score = Set(Some(outcome.anomaly.cv));
                session_update.dq_reason = Set(if outcome.verdict == models::schemas::session::Verdict::Dq {
                    Some(
                        outcome
                            .issues
                            .iter()
                            .map(|issue| issue.code())
                            .collect::<Vec<_>>()
                            .join(","),
                    )
                } else {
                    None
                });
                session_update.update(txn).await?;

                let attempts_used = entry.as_ref().map(|e| e.attempts_used).unwrap_or(0);

                let mut best_updated = false;
                if let Some(entry) = entry {
                    if outcome.verdict == models::schemas::session::Verdict::Finished
                        && evaluator::is_better(&outcome.stats, entry.best_score, entry.best_accuracy, entry.best_cpm)
                    {
                        let mut entry_update: entries::ActiveModel = entry.into();
                        entry_update.best_score = Set(Some(outcome.stats.score));
                        entry_update.best_accuracy = Set(Some(outcome.stats.accuracy));
                        entry_update.best_cpm = Set(Some(outcome.stats.cpm));
                        entry_update.update(txn).await?;
                        best_updated = true;
                    }
                }

                Ok(FinishSessionResult {
                    contest_id,
                    status: outcome.verdict,
                    stats: outcome.stats,
                    issues: outcome.issues,
                    anomaly: outcome.anomaly,
                    flags,
                    best_updated,
                    attempts_used,
                })
            })
        })
        .await;

    unwrap_tx(result)
}

/// `getLeaderboard(contestId, topN)`, spec.md §4.6/§5: read-only, no
/// locking needed since it only reads committed, finished sessions.
pub async fn get_leaderboard(
    conn: &DatabaseConnection,
    contest_id: &str,
    top_n: usize,
) -> Result<LeaderboardSummary, CoreError> {
    contests::Entity::find_by_id(contest_id.to_string())
        .one(conn)
        .await?
        .ok_or_else(|| CoreError::not_found("contest not found"))?;

    let finished = sessions::Entity::find()
        .filter(sessions::Column::ContestId.eq(contest_id.to_string()))
        .filter(sessions::Column::Status.eq(models::domains::sea_orm_active_enums::SessionStatus::Finished))
        .all(conn)
        .await?;

    let mut rows = Vec::with_capacity(finished.len());
    for session in finished {
        let username = users::Entity::find_by_id(session.user_id.clone())
            .one(conn)
            .await?
            .map(|u| u.username)
            .unwrap_or_else(|| "unknown".to_string());
        if let Some(row) = LeaderboardSession::from_model(session, username) {
            rows.push(row);
        }
    }

    Ok(leaderboard::build_leaderboard(rows, top_n))
}
