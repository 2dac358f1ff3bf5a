use sea_orm::entity::prelude::*;

/// One row per `(user_id, contest_id)`. A surrogate `id` is kept (rather than
/// a composite key) so `SELECT ... FOR UPDATE` on a single row is trivial,
/// matching the locking strategy spec.md §5 prescribes for `startSession`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: String,
    pub contest_id: String,
    pub attempts_used: i32,
    pub best_score: Option<i64>,
    pub best_cpm: Option<f64>,
    pub best_accuracy: Option<f64>,
    pub last_attempt_at: Option<DateTimeWithTimeZone>,
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

impl ActiveModelBehavior for ActiveModel {}
