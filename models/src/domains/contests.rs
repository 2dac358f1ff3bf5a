use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::{ContestVisibility, LeaderboardVisibility, PromptLanguage};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "contests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub visibility: ContestVisibility,
    pub join_code: Option<String>,
    pub starts_at: DateTimeWithTimeZone,
    pub ends_at: DateTimeWithTimeZone,
    pub timezone: String,
    pub time_limit_sec: i32,
    pub allow_backspace: bool,
    pub leaderboard_visibility: LeaderboardVisibility,
    pub language: PromptLanguage,
    /// `None` means the contest places no cap on attempts per participant.
    pub max_attempts: Option<i32>,
    pub created_by: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatedBy",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Users,
    #[sea_orm(has_many = "super::contest_prompts::Entity")]
    ContestPrompts,
    #[sea_orm(has_many = "super::entries::Entity")]
    Entries,
    #[sea_orm(has_many = "super::sessions::Entity")]
    Sessions,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::contest_prompts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContestPrompts.def()
    }
}

impl Related<super::entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Entries.def()
    }
}

impl Related<super::sessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sessions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
