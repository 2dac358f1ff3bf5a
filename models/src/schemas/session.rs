use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domains::sea_orm_active_enums::SessionStatus;

/// Authoritative metrics recomputed by the scoring kernel (C1), spec.md §4.1.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct TypingStats {
    pub cpm: f64,
    pub wpm: f64,
    pub accuracy: f64,
    pub score: i64,
}

/// One submitted keystroke event, spec.md §6 payload `keylog[]`.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct KeylogEntry {
    pub t: f64,
    pub k: String,
    #[serde(default)]
    pub ok: Option<bool>,
}

/// Client-reported telemetry, never trusted for scoring (spec.md §4.4).
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientFlags {
    #[serde(default)]
    pub defocus: Option<u32>,
    #[serde(default)]
    pub paste_blocked: Option<bool>,
    #[serde(default)]
    pub anomaly_score: Option<f64>,
}

/// The inbound finish-session payload, spec.md §6.
#[derive(Clone, Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinishPayload {
    /// Reported metrics are `Option` because a client may omit or send a
    /// non-numeric value for any of them; the evaluator treats that the
    /// same as NaN (spec.md §4.1): an automatic mismatch on that field.
    #[serde(default)]
    pub cpm: Option<f64>,
    #[serde(default)]
    pub wpm: Option<f64>,
    #[serde(default)]
    pub accuracy: Option<f64>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub errors: Option<i64>,
    #[serde(default)]
    pub keylog: Vec<KeylogEntry>,
    #[serde(default)]
    pub client_flags: ClientFlags,
}

/// Issue codes raised by replay (C3) and the evaluator (C4). Some
/// disqualify by themselves (spec.md §4.4's priority list), some are
/// surfaced for operator review only.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Issue {
    InvalidTimestamp,
    NegativeTimestamp,
    TimestampNotSorted,
    KeyLimitExceeded,
    EntryNotFound,
    MetricMismatch,
    ErrorCountMismatch,
    PromptNotCompleted,
    BackspaceForbidden,
    TimeLimitExceeded,
    LowVarianceTyping,
}

impl Issue {
    /// The `SCREAMING_SNAKE_CASE` wire code, used verbatim in `dqReason`.
    pub fn code(&self) -> &'static str {
        match self {
            Issue::InvalidTimestamp => "INVALID_TIMESTAMP",
            Issue::NegativeTimestamp => "NEGATIVE_TIMESTAMP",
            Issue::TimestampNotSorted => "TIMESTAMP_NOT_SORTED",
            Issue::KeyLimitExceeded => "KEY_LIMIT_EXCEEDED",
            Issue::EntryNotFound => "ENTRY_NOT_FOUND",
            Issue::MetricMismatch => "METRIC_MISMATCH",
            Issue::ErrorCountMismatch => "ERROR_COUNT_MISMATCH",
            Issue::PromptNotCompleted => "PROMPT_NOT_COMPLETED",
            Issue::BackspaceForbidden => "BACKSPACE_FORBIDDEN",
            Issue::TimeLimitExceeded => "TIME_LIMIT_EXCEEDED",
            Issue::LowVarianceTyping => "LOW_VARIANCE_TYPING",
        }
    }
}

/// The three terminal states a session can reach (spec.md §4.4's verdict).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Finished,
    Expired,
    Dq,
}

impl Verdict {
    pub fn as_status(self) -> SessionStatus {
        match self {
            Verdict::Finished => SessionStatus::Finished,
            Verdict::Expired => SessionStatus::Expired,
            Verdict::Dq => SessionStatus::Dq,
        }
    }
}

/// Result of `startSession`, spec.md §6.
#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionResult {
    pub session_id: String,
    pub prompt: super::prompt::PromptView,
    pub started_at: DateTime<Utc>,
    pub attempts_used: i32,
    pub attempts_remaining: Option<i32>,
}

/// Result of `finishSession`, spec.md §6.
#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinishSessionResult {
    pub contest_id: String,
    pub status: Verdict,
    pub stats: TypingStats,
    pub issues: Vec<Issue>,
    pub anomaly: AnomalyReport,
    pub flags: ClientFlags,
    pub best_updated: bool,
    pub attempts_used: i32,
}

/// Keystroke-interval anomaly statistics, spec.md §4.3.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct AnomalyReport {
    pub mean: f64,
    pub stdev: f64,
    pub cv: f64,
    pub count: u32,
}
