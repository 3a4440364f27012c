/// API route handlers
///
/// - `health`: liveness, readiness and database status
/// - `users`: contact record CRUD, search and count

pub mod health;
pub mod users;
