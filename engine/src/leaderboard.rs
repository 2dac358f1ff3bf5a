//! C5 — leaderboard projector (spec.md §4.5). Pure: orders finished
//! sessions and assigns competition ranks (`1,2,2,4`).

use models::schemas::leaderboard::{LeaderboardSession, LeaderboardSummary, RankedSession};

/// `buildLeaderboard(sessions, topN)`: orders by `(score desc, accuracy
/// desc, cpm desc, endedAt asc)` and assigns competition ranks — rows with
/// an identical `(score, accuracy, cpm)` tuple share a rank, and the next
/// distinct row's rank accounts for every row ahead of it.
pub fn build_leaderboard(mut sessions: Vec<LeaderboardSession>, top_n: usize) -> LeaderboardSummary {
    sessions.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| b.accuracy.total_cmp(&a.accuracy))
            .then_with(|| b.cpm.total_cmp(&a.cpm))
            .then_with(|| a.ended_at.cmp(&b.ended_at))
    });

    let mut ranked = Vec::with_capacity(sessions.len());
    let mut current_rank = 0usize;
    let mut previous_key: Option<(i64, f64, f64)> = None;

    for (idx, session) in sessions.into_iter().enumerate() {
        let key = (session.score, session.accuracy, session.cpm);
        if previous_key != Some(key) {
            current_rank = idx + 1;
        }
        previous_key = Some(key);
        ranked.push(RankedSession {
            rank: current_rank,
            session,
        });
    }

    let total = ranked.len();
    let top = ranked.iter().take(top_n).cloned().collect();

    LeaderboardSummary { ranked, top, total }
}

/// Finds the caller's own row in an already-built leaderboard, spec.md
/// §4.6's `getLeaderboard` "personal rank" extension.
pub fn extract_personal_rank(summary: &LeaderboardSummary, user_id: &str) -> Option<RankedSession> {
    summary
        .ranked
        .iter()
        .find(|r| r.session.user_id == user_id)
        .cloned()
}
