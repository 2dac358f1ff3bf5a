use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::Config;
use crate::publisher::LeaderboardPublisher;

/// Process-wide collaborators, held exactly once and passed around as a
/// cheap `Clone` the way the teacher's `AppState` does — the DB pool and
/// the fan-out handle are the only shared resources (spec.md §5).
#[derive(Clone)]
pub struct CoreState {
    pub conn: DatabaseConnection,
    pub config: Config,
    pub publisher: Arc<dyn LeaderboardPublisher>,
}

impl CoreState {
    pub fn new(conn: DatabaseConnection, config: Config, publisher: Arc<dyn LeaderboardPublisher>) -> Self {
        Self {
            conn,
            config,
            publisher,
        }
    }
}
