use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domains::contests;
use crate::domains::sea_orm_active_enums::{ContestVisibility, LeaderboardVisibility, PromptLanguage};

/// The contest record as the policy/store components see it. Field names
/// mirror spec.md §3 exactly.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct ContestSchema {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub visibility: ContestVisibility,
    pub join_code: Option<String>,
    #[schema(value_type = String)]
    pub starts_at: DateTime<Utc>,
    #[schema(value_type = String)]
    pub ends_at: DateTime<Utc>,
    pub timezone: String,
    pub time_limit_sec: i32,
    pub allow_backspace: bool,
    pub leaderboard_visibility: LeaderboardVisibility,
    pub language: PromptLanguage,
    pub max_attempts: Option<i32>,
    pub created_by: String,
}

impl From<contests::Model> for ContestSchema {
    fn from(c: contests::Model) -> Self {
        Self {
            id: c.id,
            title: c.title,
            description: c.description,
            visibility: c.visibility,
            join_code: c.join_code,
            starts_at: c.starts_at.to_utc(),
            ends_at: c.ends_at.to_utc(),
            timezone: c.timezone,
            time_limit_sec: c.time_limit_sec,
            allow_backspace: c.allow_backspace,
            leaderboard_visibility: c.leaderboard_visibility,
            language: c.language,
            max_attempts: c.max_attempts,
            created_by: c.created_by,
        }
    }
}

/// Status of a contest at a point in time (spec.md §4.2).
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ContestStatus {
    Scheduled,
    Running,
    Finished,
}
