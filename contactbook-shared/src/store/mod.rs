/// Record store for contact records
///
/// The [`UserStore`] trait is the only way the rest of the system touches
/// persisted users. Two implementations are provided:
///
/// - [`postgres::PgUserStore`]: production store backed by `sqlx` and PostgreSQL
/// - [`memory::InMemoryUserStore`]: same contract held in process memory, used by
///   tests and for running without a database
///
/// # Contract
///
/// - `insert` assigns a fresh id and returns the stored record
/// - `update` replaces all four fields and fails with [`StoreError::NotFound`]
///   when the id does not exist
/// - `delete` fails with [`StoreError::NotFound`] when the id does not exist
/// - email is unique; writes that would duplicate one fail with
///   [`StoreError::DuplicateEmail`]
/// - name search is a case-insensitive substring match; `%`, `_` and `\`
///   are matched literally and an empty fragment matches every record
/// - listings are ordered by id
///
/// # Example
///
/// ```
/// use contactbook_shared::models::user::UserPayload;
/// use contactbook_shared::store::{memory::InMemoryUserStore, UserStore};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), contactbook_shared::store::StoreError> {
/// let store = InMemoryUserStore::new();
/// let user = store
///     .insert(UserPayload {
///         name: "Grace Hopper".to_string(),
///         address: "1 Navy Way".to_string(),
///         email: "grace@example.com".to_string(),
///         telephone: "(555) 200-0000".to_string(),
///     })
///     .await?;
///
/// assert_eq!(store.find_by_id(user.id).await?, Some(user));
/// assert_eq!(store.count().await?, 1);
/// # Ok(())
/// # }
/// ```

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::models::user::{User, UserPayload};

/// Store error types
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No record with this id
    #[error("User {0} not found")]
    NotFound(i64),

    /// Another record already uses this email
    #[error("Email already exists: {0}")]
    DuplicateEmail(String),

    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence contract for contact records
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persists a new record and returns it with its assigned id
    async fn insert(&self, payload: UserPayload) -> StoreResult<User>;

    /// Looks a record up by id
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>>;

    /// Looks a record up by exact email
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Returns every record whose name contains `fragment`, ignoring case
    async fn find_by_name_contains(&self, fragment: &str) -> StoreResult<Vec<User>>;

    /// Replaces all fields of an existing record
    async fn update(&self, id: i64, payload: UserPayload) -> StoreResult<User>;

    /// Permanently removes a record
    async fn delete(&self, id: i64) -> StoreResult<()>;

    /// Returns every record
    async fn list_all(&self) -> StoreResult<Vec<User>>;

    /// Counts all records
    async fn count(&self) -> StoreResult<i64>;

    /// Checks that the backing storage is reachable
    async fn ping(&self) -> StoreResult<()>;
}
