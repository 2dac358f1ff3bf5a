use serde::Serialize;
use utoipa::ToSchema;

use crate::domains::prompts;

/// The subset of a prompt a typing client needs: spec.md §6's
/// `prompt{id,displayText,typingTarget}`.
#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PromptView {
    pub id: String,
    pub display_text: String,
    pub typing_target: String,
}

impl From<prompts::Model> for PromptView {
    fn from(p: prompts::Model) -> Self {
        Self {
            id: p.id,
            display_text: p.display_text,
            typing_target: p.typing_target,
        }
    }
}
