use axum::Router;

pub mod leaderboard;
pub mod session;

use engine::CoreState;
use leaderboard::create_leaderboard_router;
use session::create_session_router;

pub fn create_router(state: CoreState) -> Router {
    Router::new()
        .merge(create_session_router())
        .merge(create_leaderboard_router())
        .with_state(state)
}
