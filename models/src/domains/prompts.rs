use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::PromptLanguage;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "prompts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub language: PromptLanguage,
    pub display_text: String,
    pub typing_target: String,
    #[sea_orm(column_type = "Json")]
    pub tags: Json,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::contest_prompts::Entity")]
    ContestPrompts,
    #[sea_orm(has_many = "super::sessions::Entity")]
    Sessions,
}

impl Related<super::contest_prompts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContestPrompts.def()
    }
}

impl Related<super::sessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sessions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
