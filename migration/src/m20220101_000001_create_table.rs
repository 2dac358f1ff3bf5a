use models::domains::sea_orm_active_enums::{
    ContestVisibilityEnum, ContestVisibilityVariant, LeaderboardVisibilityEnum,
    LeaderboardVisibilityVariant, PromptLanguageEnum, PromptLanguageVariant, SessionStatusEnum,
    SessionStatusVariant, UserRoleEnum, UserRoleVariant,
};
use models::domains::*;
use sea_orm_migration::{
    prelude::{extension::postgres::Type, *},
    sea_orm::{DbBackend, Iterable, Schema},
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Native enum types only exist on Postgres; sqlite/mysql get a
        // string column with an inline check constraint from `.enumeration`.
        if manager.get_database_backend() == DbBackend::Postgres {
            let schema = Schema::new(DbBackend::Postgres);
            manager
                .create_type(schema.create_enum_from_active_enum::<sea_orm_active_enums::UserRole>())
                .await?;
            manager
                .create_type(
                    schema.create_enum_from_active_enum::<sea_orm_active_enums::ContestVisibility>(),
                )
                .await?;
            manager
                .create_type(schema.create_enum_from_active_enum::<
                    sea_orm_active_enums::LeaderboardVisibility,
                >())
                .await?;
            manager
                .create_type(
                    schema.create_enum_from_active_enum::<sea_orm_active_enums::PromptLanguage>(),
                )
                .await?;
            manager
                .create_type(
                    schema.create_enum_from_active_enum::<sea_orm_active_enums::SessionStatus>(),
                )
                .await?;
        }

        manager
            .create_table(
                Table::create()
                    .table(users::Entity)
                    .if_not_exists()
                    .col(ColumnDef::new(users::Column::Id).string().primary_key())
                    .col(
                        ColumnDef::new(users::Column::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(users::Column::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(users::Column::PasswordHash)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(users::Column::Role)
                            .enumeration(UserRoleEnum, UserRoleVariant::iter())
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(users::Column::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(contests::Entity)
                    .if_not_exists()
                    .col(ColumnDef::new(contests::Column::Id).string().primary_key())
                    .col(
                        ColumnDef::new(contests::Column::Title)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(contests::Column::Description).text())
                    .col(
                        ColumnDef::new(contests::Column::Visibility)
                            .enumeration(ContestVisibilityEnum, ContestVisibilityVariant::iter())
                            .not_null(),
                    )
                    .col(ColumnDef::new(contests::Column::JoinCode).string())
                    .col(
                        ColumnDef::new(contests::Column::StartsAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(contests::Column::EndsAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(contests::Column::Timezone)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(contests::Column::TimeLimitSec)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(contests::Column::AllowBackspace)
                            .boolean()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(contests::Column::LeaderboardVisibility)
                            .enumeration(
                                LeaderboardVisibilityEnum,
                                LeaderboardVisibilityVariant::iter(),
                            )
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(contests::Column::Language)
                            .enumeration(PromptLanguageEnum, PromptLanguageVariant::iter())
                            .not_null(),
                    )
                    .col(ColumnDef::new(contests::Column::MaxAttempts).integer())
                    .col(
                        ColumnDef::new(contests::Column::CreatedBy)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(contests::Column::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-contests-created_by")
                            .from(contests::Entity, contests::Column::CreatedBy)
                            .to(users::Entity, users::Column::Id)
                            .on_delete(ForeignKeyAction::NoAction)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(prompts::Entity)
                    .if_not_exists()
                    .col(ColumnDef::new(prompts::Column::Id).string().primary_key())
                    .col(
                        ColumnDef::new(prompts::Column::Language)
                            .enumeration(PromptLanguageEnum, PromptLanguageVariant::iter())
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(prompts::Column::DisplayText)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(prompts::Column::TypingTarget)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(prompts::Column::Tags).json().not_null())
                    .col(
                        ColumnDef::new(prompts::Column::IsActive)
                            .boolean()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(prompts::Column::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(contest_prompts::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(contest_prompts::Column::ContestId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(contest_prompts::Column::PromptId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(contest_prompts::Column::OrderIndex)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(contest_prompts::Column::ContestId)
                            .col(contest_prompts::Column::PromptId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-contest_prompts-contest_id")
                            .from(contest_prompts::Entity, contest_prompts::Column::ContestId)
                            .to(contests::Entity, contests::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-contest_prompts-prompt_id")
                            .from(contest_prompts::Entity, contest_prompts::Column::PromptId)
                            .to(prompts::Entity, prompts::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(entries::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(entries::Column::Id)
                            .big_integer()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(entries::Column::UserId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(entries::Column::ContestId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(entries::Column::AttemptsUsed)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(entries::Column::BestScore).big_integer())
                    .col(ColumnDef::new(entries::Column::BestCpm).double())
                    .col(ColumnDef::new(entries::Column::BestAccuracy).double())
                    .col(ColumnDef::new(entries::Column::LastAttemptAt).timestamp_with_time_zone())
                    .index(
                        Index::create()
                            .name("idx-entries-user_contest")
                            .col(entries::Column::UserId)
                            .col(entries::Column::ContestId)
                            .unique(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-entries-user_id")
                            .from(entries::Entity, entries::Column::UserId)
                            .to(users::Entity, users::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-entries-contest_id")
                            .from(entries::Entity, entries::Column::ContestId)
                            .to(contests::Entity, contests::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(sessions::Entity)
                    .if_not_exists()
                    .col(ColumnDef::new(sessions::Column::Id).string().primary_key())
                    .col(
                        ColumnDef::new(sessions::Column::UserId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(sessions::Column::ContestId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(sessions::Column::PromptId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(sessions::Column::StartedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(sessions::Column::EndedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(sessions::Column::Status)
                            .enumeration(SessionStatusEnum, SessionStatusVariant::iter())
                            .not_null(),
                    )
                    .col(ColumnDef::new(sessions::Column::Cpm).double())
                    .col(ColumnDef::new(sessions::Column::Wpm).double())
                    .col(ColumnDef::new(sessions::Column::Accuracy).double())
                    .col(ColumnDef::new(sessions::Column::Errors).integer())
                    .col(ColumnDef::new(sessions::Column::Score).big_integer())
                    .col(
                        ColumnDef::new(sessions::Column::DefocusCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(sessions::Column::PasteBlocked)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(sessions::Column::AnomalyScore).double())
                    .col(ColumnDef::new(sessions::Column::DqReason).text())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-sessions-user_id")
                            .from(sessions::Entity, sessions::Column::UserId)
                            .to(users::Entity, users::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-sessions-contest_id")
                            .from(sessions::Entity, sessions::Column::ContestId)
                            .to(contests::Entity, contests::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-sessions-prompt_id")
                            .from(sessions::Entity, sessions::Column::PromptId)
                            .to(prompts::Entity, prompts::Column::Id)
                            .on_delete(ForeignKeyAction::NoAction)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(keystrokes::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(keystrokes::Column::SessionId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(keystrokes::Column::Idx)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(keystrokes::Column::TMs)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(keystrokes::Column::Key).string().not_null())
                    .col(ColumnDef::new(keystrokes::Column::Ok).boolean().not_null())
                    .primary_key(
                        Index::create()
                            .col(keystrokes::Column::SessionId)
                            .col(keystrokes::Column::Idx),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-keystrokes-session_id")
                            .from(keystrokes::Entity, keystrokes::Column::SessionId)
                            .to(sessions::Entity, sessions::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(refresh_tokens::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(refresh_tokens::Column::Id)
                            .string()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(refresh_tokens::Column::UserId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(refresh_tokens::Column::TokenHash)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(refresh_tokens::Column::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(refresh_tokens::Column::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-refresh_tokens-user_id")
                            .from(refresh_tokens::Entity, refresh_tokens::Column::UserId)
                            .to(users::Entity, users::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(refresh_tokens::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(keystrokes::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(sessions::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(entries::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(contest_prompts::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(prompts::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(contests::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(users::Entity).to_owned())
            .await?;

        if manager.get_database_backend() == DbBackend::Postgres {
            manager
                .drop_type(Type::drop().name(UserRoleEnum).if_exists().to_owned())
                .await?;
            manager
                .drop_type(Type::drop().name(ContestVisibilityEnum).if_exists().to_owned())
                .await?;
            manager
                .drop_type(
                    Type::drop()
                        .name(LeaderboardVisibilityEnum)
                        .if_exists()
                        .to_owned(),
                )
                .await?;
            manager
                .drop_type(Type::drop().name(PromptLanguageEnum).if_exists().to_owned())
                .await?;
            manager
                .drop_type(Type::drop().name(SessionStatusEnum).if_exists().to_owned())
                .await?;
        }

        Ok(())
    }
}
