/// Contact record endpoints
///
/// # Endpoints
///
/// - `GET    /users` - List all users
/// - `GET    /users/:id` - Get user by id
/// - `GET    /users/search?name=` - Case-insensitive name search
/// - `GET    /users/email/:email` - Get user by exact email
/// - `POST   /users` - Create user
/// - `PUT    /users/:id` - Replace all fields of a user
/// - `DELETE /users/:id` - Delete user
/// - `GET    /users/count` - Count users
///
/// # Record
///
/// ```json
/// {
///   "id": 1,
///   "name": "Test User",
///   "address": "123 Test St",
///   "email": "test@digg.com",
///   "telephone": "555-1234"
/// }
/// ```
///
/// Writes are validated before the store is touched. Email uniqueness is
/// checked up front to answer with 409; the schema constraint backs it up
/// for concurrent writers.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use contactbook_shared::{
    models::user::{User, UserPayload},
    validation::validate_user,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Query parameters for name search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Substring to look for in names
    pub name: Option<String>,
}

/// Count response
#[derive(Debug, Serialize, Deserialize)]
pub struct CountResponse {
    /// Total number of users
    pub count: i64,
}

/// List all users
///
/// `GET /users` → 200 with every record, ordered by id.
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    info!("Fetching all users");
    let users = state.store.list_all().await?;
    debug!(count = users.len(), "Found users");

    Ok(Json(users))
}

/// Get a user by id
///
/// # Errors
///
/// - `400 Bad Request`: id is not a number
/// - `404 Not Found`: `{"error": "User not found"}`
pub async fn get_user(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<User>> {
    let Path(id) = id?;
    info!(user_id = id, "Fetching user by id");

    let Some(user) = state.store.find_by_id(id).await? else {
        warn!(user_id = id, "User not found");
        return Err(ApiError::user_not_found());
    };

    debug!(user_id = id, name = %user.name, "Found user");
    Ok(Json(user))
}

/// Search users by name
///
/// Matches names containing the term, ignoring case. A missing or blank term
/// returns every user; otherwise the term is matched as given, surrounding
/// whitespace included.
///
/// # Errors
///
/// - `400 Bad Request`: malformed query string
pub async fn search_users(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> ApiResult<Json<Vec<User>>> {
    let Query(params) = params?;
    let term = params.name.as_deref().unwrap_or_default();

    if term.trim().is_empty() {
        debug!("Search called without a name, returning all users");
        return Ok(Json(state.store.list_all().await?));
    }

    info!(term, "Searching users by name");
    let users = state.store.find_by_name_contains(term).await?;

    if users.is_empty() {
        info!(term, "No users matched search term");
    } else {
        info!(term, count = users.len(), "Users matched search term");
    }

    Ok(Json(users))
}

/// Get a user by exact email
///
/// # Errors
///
/// - `404 Not Found`: `{"error": "User not found"}`
pub async fn get_user_by_email(
    State(state): State<AppState>,
    email: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<User>> {
    let Path(email) = email?;
    info!(email = %email, "Fetching user by email");

    let Some(user) = state.store.find_by_email(&email).await? else {
        warn!(email = %email, "User not found");
        return Err(ApiError::user_not_found());
    };

    debug!(user_id = user.id, email = %email, "Found user");
    Ok(Json(user))
}

/// Create a user
///
/// # Endpoint
///
/// ```text
/// POST /users
/// Content-Type: application/json
///
/// {
///   "name": "Test User",
///   "address": "123 Test St",
///   "email": "test@digg.com",
///   "telephone": "555-1234"
/// }
/// ```
///
/// Responds `201 Created` with the stored record, including its id.
///
/// # Errors
///
/// - `400 Bad Request`: malformed JSON or validation failed
/// - `409 Conflict`: `{"error": "Email already exists"}`
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let Json(payload) = payload?;
    info!(email = %payload.email, "Creating user");

    validate_user(&payload)?;

    if state.store.find_by_email(&payload.email).await?.is_some() {
        warn!(email = %payload.email, "Attempt to create user with existing email");
        return Err(ApiError::email_exists());
    }

    let user = state.store.insert(payload).await?;
    info!(user_id = user.id, email = %user.email, "Created user");

    Ok((StatusCode::CREATED, Json(user)))
}

/// Replace all fields of a user
///
/// The email is checked for conflicts only when it changes; keeping the
/// record's own email never conflicts.
///
/// # Errors
///
/// - `400 Bad Request`: non-numeric id, malformed JSON or validation failed
/// - `404 Not Found`: `{"error": "User not found"}`
/// - `409 Conflict`: `{"error": "Email already exists"}`
pub async fn update_user(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> ApiResult<Json<User>> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    info!(user_id = id, "Updating user");

    validate_user(&payload)?;

    let Some(current) = state.store.find_by_id(id).await? else {
        warn!(user_id = id, "Attempt to update non-existent user");
        return Err(ApiError::user_not_found());
    };

    if current.email != payload.email {
        debug!(user_id = id, from = %current.email, to = %payload.email, "Email change requested");

        if state.store.find_by_email(&payload.email).await?.is_some() {
            warn!(user_id = id, email = %payload.email, "Attempt to update user with existing email");
            return Err(ApiError::email_exists());
        }
    }

    debug!(
        user_id = id,
        name = %payload.name,
        address = %payload.address,
        telephone = %payload.telephone,
        "Replacing user fields"
    );

    let user = state.store.update(id, payload).await?;
    info!(user_id = id, name = %user.name, "Updated user");

    Ok(Json(user))
}

/// Delete a user
///
/// Responds `204 No Content`.
///
/// # Errors
///
/// - `404 Not Found`: `{"error": "User not found"}`
pub async fn delete_user(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    info!(user_id = id, "Deleting user");

    state.store.delete(id).await.map_err(|e| {
        warn!(user_id = id, error = %e, "Delete failed");
        ApiError::from(e)
    })?;

    info!(user_id = id, "Deleted user");
    Ok(StatusCode::NO_CONTENT)
}

/// Count users
///
/// `GET /users/count` → `{"count": N}`
pub async fn count_users(State(state): State<AppState>) -> ApiResult<Json<CountResponse>> {
    debug!("Fetching total user count");
    let count = state.store.count().await?;
    debug!(count, "Total user count");

    Ok(Json(CountResponse { count }))
}
