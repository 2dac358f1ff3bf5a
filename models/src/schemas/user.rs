use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domains::sea_orm_active_enums::UserRole;

/// The verified principal a request carries. The core never decodes the
/// token that produced this — that is the auth subsystem's job (spec.md §6).
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Principal {
    pub user_id: String,
    pub role: UserRole,
}
