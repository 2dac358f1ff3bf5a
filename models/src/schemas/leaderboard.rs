use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domains::sessions;

/// One finished session as read by `getLeaderboard` (spec.md §4.6), joined
/// with the username for display.
#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardSession {
    pub session_id: String,
    pub user_id: String,
    pub username: String,
    pub score: i64,
    pub accuracy: f64,
    pub cpm: f64,
    #[schema(value_type = String)]
    pub ended_at: DateTime<Utc>,
}

impl LeaderboardSession {
    pub fn from_model(model: sessions::Model, username: String) -> Option<Self> {
        Some(Self {
            session_id: model.id,
            user_id: model.user_id,
            username,
            score: model.score?,
            accuracy: model.accuracy?,
            cpm: model.cpm?,
            ended_at: model.ended_at?.to_utc(),
        })
    }

}

/// A leaderboard row with its assigned competition rank (spec.md §4.5).
#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RankedSession {
    pub rank: usize,
    #[serde(flatten)]
    pub session: LeaderboardSession,
}

/// Output of `buildLeaderboard`: the full ranked list plus a top-10 summary.
#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardSummary {
    pub ranked: Vec<RankedSession>,
    pub top: Vec<RankedSession>,
    pub total: usize,
}
