use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, Debug, Clone, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LeaderboardQuery {
    pub limit: Option<u64>,
}

impl LeaderboardQuery {
    pub fn limit_or_default(&self) -> u64 {
        self.limit.unwrap_or(100).min(500)
    }
}
