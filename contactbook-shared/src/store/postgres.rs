/// PostgreSQL record store
///
/// Implements [`UserStore`] over a `sqlx` connection pool. Queries use
/// `sqlx::query_as` with bound parameters; rows map onto [`User`] through
/// `sqlx::FromRow`.
///
/// Email uniqueness is enforced by the `users_email_key` constraint. A write
/// that trips it is reported as [`StoreError::DuplicateEmail`], which covers
/// concurrent writers that both passed the handler's existence check.
///
/// # Example
///
/// ```no_run
/// use contactbook_shared::db::pool::{create_pool, DatabaseConfig};
/// use contactbook_shared::store::{postgres::PgUserStore, UserStore};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig {
///     url: std::env::var("DATABASE_URL")?,
///     ..Default::default()
/// })
/// .await?;
///
/// let store = PgUserStore::new(pool);
/// let smiths = store.find_by_name_contains("smith").await?;
/// println!("Found {} users", smiths.len());
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;
use sqlx::PgPool;

use super::{StoreError, StoreResult, UserStore};
use crate::models::user::{User, UserPayload};

/// Record store backed by PostgreSQL
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Creates a store over an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns the underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Maps unique-constraint violations to [`StoreError::DuplicateEmail`]
fn map_write_error(err: sqlx::Error, email: &str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StoreError::DuplicateEmail(email.to_string());
        }
    }
    StoreError::Database(err)
}

/// Builds a `LIKE` pattern that matches `fragment` literally anywhere
fn contains_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, payload: UserPayload) -> StoreResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, address, email, telephone)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, address, email, telephone
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.address)
        .bind(&payload.email)
        .bind(&payload.telephone)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &payload.email))
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, address, email, telephone
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, address, email, telephone
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_name_contains(&self, fragment: &str) -> StoreResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, address, email, telephone
            FROM users
            WHERE name ILIKE $1 ESCAPE '\'
            ORDER BY id
            "#,
        )
        .bind(contains_pattern(fragment))
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn update(&self, id: i64, payload: UserPayload) -> StoreResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = $2, address = $3, email = $4, telephone = $5
            WHERE id = $1
            RETURNING id, name, address, email, telephone
            "#,
        )
        .bind(id)
        .bind(&payload.name)
        .bind(&payload.address)
        .bind(&payload.email)
        .bind(&payload.telephone)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &payload.email))?;

        user.ok_or(StoreError::NotFound(id))
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn list_all(&self) -> StoreResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, address, email, telephone
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn count(&self) -> StoreResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn ping(&self) -> StoreResult<()> {
        crate::db::pool::health_check(&self.pool).await?;
        Ok(())
    }
}
