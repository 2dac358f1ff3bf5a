use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api::routers::leaderboard::get_leaderboard;
use api::routers::session::{finish_session, start_session};
use models::params::leaderboard::LeaderboardQuery;
use models::schemas::leaderboard::{LeaderboardSession, LeaderboardSummary, RankedSession};
use models::schemas::session::{
    AnomalyReport, ClientFlags, FinishPayload, FinishSessionResult, Issue, KeylogEntry,
    StartSessionResult, TypingStats, Verdict,
};
use models::schemas::prompt::PromptView;

#[derive(OpenApi)]
#[openapi(
    paths(start_session, finish_session, get_leaderboard),
    components(schemas(
        StartSessionResult,
        FinishSessionResult,
        FinishPayload,
        KeylogEntry,
        ClientFlags,
        TypingStats,
        Issue,
        Verdict,
        AnomalyReport,
        PromptView,
        LeaderboardQuery,
        LeaderboardSummary,
        RankedSession,
        LeaderboardSession,
    ))
)]
struct TypingContestApi;

/// Mounts the generated OpenAPI document under `/docs`, the Swagger UI the
/// teacher's own `doc` crate was set up for but never wired into a router.
pub fn swagger_router() -> SwaggerUi {
    SwaggerUi::new("/docs").url("/api-docs/openapi.json", TypingContestApi::openapi())
}
