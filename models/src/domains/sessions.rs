use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::SessionStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "sessions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub contest_id: String,
    pub prompt_id: String,
    pub started_at: DateTimeWithTimeZone,
    pub ended_at: Option<DateTimeWithTimeZone>,
    pub status: SessionStatus,
    pub cpm: Option<f64>,
    pub wpm: Option<f64>,
    pub accuracy: Option<f64>,
    pub errors: Option<i32>,
    pub score: Option<i64>,
    pub defocus_count: i32,
    pub paste_blocked: bool,
    pub anomaly_score: Option<f64>,
    pub dq_reason: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Users,
    #[sea_orm(
        belongs_to = "super::contests::Entity",
        from = "Column::ContestId",
        to = "super::contests::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Contests,
    #[sea_orm(
        belongs_to = "super::prompts::Entity",
        from = "Column::PromptId",
        to = "super::prompts::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Prompts,
    #[sea_orm(has_many = "super::keystrokes::Entity")]
    Keystrokes,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::contests::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contests.def()
    }
}

impl Related<super::prompts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Prompts.def()
    }
}

impl Related<super::keystrokes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Keystrokes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
