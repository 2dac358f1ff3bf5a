use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Connects to `db_url` and brings the schema up to date. Called once at
/// startup; migrations are idempotent so re-running on an already-current
/// database is a no-op.
pub async fn connect_and_migrate(db_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(db_url);
    options.sqlx_logging(false);

    let conn = Database::connect(options).await?;
    Migrator::up(&conn, None).await?;
    tracing::info!("database connected and migrated");
    Ok(conn)
}
