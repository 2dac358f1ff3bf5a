use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

/// Stands up a fresh in-memory sqlite database with the full schema applied,
/// for integration tests. Each call gets its own isolated database.
pub async fn setup_test_db() -> DatabaseConnection {
    let conn = Database::connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory sqlite database");
    Migrator::up(&conn, None)
        .await
        .expect("failed to run migrations against the test database");
    conn
}
