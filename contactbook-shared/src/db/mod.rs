/// Database layer for Contactbook
///
/// - `pool`: PostgreSQL connection pool with a connectivity check
/// - `migrations`: applies the embedded schema from the workspace `migrations/` directory
///
/// # Example
///
/// ```no_run
/// use contactbook_shared::db::{migrations::run_migrations, pool::{create_pool, DatabaseConfig}};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let pool = create_pool(DatabaseConfig {
///         url: std::env::var("DATABASE_URL")?,
///         ..Default::default()
///     })
///     .await?;
///
///     run_migrations(&pool).await?;
///     Ok(())
/// }
/// ```

pub mod migrations;
pub mod pool;
