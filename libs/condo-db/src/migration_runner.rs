use sea_orm_migration::{MigrationTrait, MigratorTrait, SchemaManager};

use crate::{Db, DbError};

/// Apply every pending migration of `M`, recording them in the migrator's
/// bookkeeping table.
///
/// # Errors
/// Returns [`DbError::Migration`] if any migration fails.
pub async fn run_migrations<M: MigratorTrait>(db: &Db) -> Result<(), DbError> {
    M::up(db.conn(), None)
        .await
        .map_err(|e| DbError::Migration(e.to_string()))?;
    tracing::info!("migrations applied");
    Ok(())
}

/// Apply `migrations` in order without bookkeeping. Meant for fresh
/// in-memory databases in tests.
///
/// # Errors
/// Returns [`DbError::Migration`] naming the migration that failed.
pub async fn run_migrations_for_testing(
    db: &Db,
    migrations: Vec<Box<dyn MigrationTrait>>,
) -> Result<(), DbError> {
    let manager = SchemaManager::new(db.conn());
    for migration in migrations {
        let name = migration.name().to_owned();
        tracing::debug!(migration = %name, "applying migration");
        migration
            .up(&manager)
            .await
            .map_err(|e| DbError::Migration(format!("{name}: {e}")))?;
    }
    Ok(())
}
