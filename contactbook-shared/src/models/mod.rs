/// Data models for Contactbook
///
/// Models are plain data records. Persistence lives behind the
/// [`UserStore`](crate::store::UserStore) trait, not on the models.
///
/// # Models
///
/// - `user`: contact record and the inbound payload used to create or replace one

pub mod user;
