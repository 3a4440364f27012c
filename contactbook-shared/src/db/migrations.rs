/// Schema migrations
///
/// The SQL files in the workspace `migrations/` directory are embedded at
/// compile time with `sqlx::migrate!` and applied at startup. Applied
/// versions are tracked by sqlx in `_sqlx_migrations`, so running them again
/// is a no-op.

use sqlx::{
    migrate::{MigrateDatabase, MigrateError},
    postgres::PgPool,
    Postgres,
};
use tracing::{debug, info, warn};

/// Applies all pending migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    info!("Running database migrations");

    match sqlx::migrate!("../migrations").run(pool).await {
        Ok(()) => {
            info!("Database schema is up to date");
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, "Migration failed");
            Err(e)
        }
    }
}

/// Creates the database named in `database_url` if it does not exist yet
///
/// Convenient for local development; a production database is expected to
/// exist already.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), sqlx::Error> {
    if Postgres::database_exists(database_url).await? {
        debug!("Database already exists");
        return Ok(());
    }

    info!("Database does not exist, creating it");
    Postgres::create_database(database_url).await?;
    Ok(())
}
