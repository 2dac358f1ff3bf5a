use models::schemas::leaderboard::LeaderboardSummary;

/// The real-time fan-out collaborator (spec.md §6). A concrete
/// implementation (e.g. a socket.io/WebSocket broadcaster) lives outside
/// the core; `publish` is always called by the caller after a
/// `finish_session` transaction commits, never from within it (spec.md §5,
/// §9 "real-time publish placement").
#[async_trait::async_trait]
pub trait LeaderboardPublisher: Send + Sync {
    async fn publish(&self, channel: &str, snapshot: &LeaderboardSummary);
}

pub fn contest_channel(contest_id: &str) -> String {
    format!("contest:{contest_id}:leaderboard")
}

/// A publisher that drops every snapshot; used in tests and when no
/// real-time transport is wired up. Publish failures must never roll back
/// the DB write (spec.md §5), so a no-op implementation is a legitimate
/// collaborator, not a stub.
pub struct NullPublisher;

#[async_trait::async_trait]
impl LeaderboardPublisher for NullPublisher {
    async fn publish(&self, _channel: &str, _snapshot: &LeaderboardSummary) {}
}
