pub mod contest_prompts;
pub mod contests;
pub mod entries;
pub mod keystrokes;
pub mod prompts;
pub mod refresh_tokens;
pub mod sea_orm_active_enums;
pub mod sessions;
pub mod users;
