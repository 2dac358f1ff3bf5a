use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::domains::sea_orm_active_enums::{ContestVisibility, LeaderboardVisibility, PromptLanguage};

/// Administrator-authored contest definition. Creation/seeding of contests
/// sits outside the CORE (spec.md §1); this DTO exists only so tests and the
/// store's prerequisites can stand up a contest without hand-building
/// `ActiveModel`s everywhere, the way the teacher's
/// `CreateTournamentParams` does for its own domain.
#[derive(Deserialize, Validate, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateContestParams {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    pub visibility: ContestVisibility,
    pub join_code: Option<String>,
    #[schema(value_type = String)]
    pub starts_at: DateTime<FixedOffset>,
    #[schema(value_type = String)]
    pub ends_at: DateTime<FixedOffset>,
    pub timezone: String,
    #[validate(range(min = 10, max = 600))]
    pub time_limit_sec: i32,
    pub allow_backspace: bool,
    pub leaderboard_visibility: LeaderboardVisibility,
    pub language: PromptLanguage,
    pub max_attempts: Option<i32>,
}
