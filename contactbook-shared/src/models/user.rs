/// Contact record model
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id BIGSERIAL PRIMARY KEY,
///     name VARCHAR(255) NOT NULL,
///     address VARCHAR(255) NOT NULL,
///     email VARCHAR(255) NOT NULL,
///     telephone VARCHAR(255) NOT NULL,
///     CONSTRAINT users_email_key UNIQUE (email)
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use contactbook_shared::models::user::UserPayload;
/// use contactbook_shared::store::{postgres::PgUserStore, UserStore};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let store = PgUserStore::new(pool);
///
/// let user = store
///     .insert(UserPayload {
///         name: "Ada Lovelace".to_string(),
///         address: "12 St James's Square, London".to_string(),
///         email: "ada@example.com".to_string(),
///         telephone: "(555) 010-0001".to_string(),
///     })
///     .await?;
///
/// println!("Created user: {}", user.id);
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::validation::{email_address, not_blank};

/// A persisted contact record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Store-assigned identifier, never reused
    pub id: i64,

    /// Full name
    pub name: String,

    /// Free-text postal address
    pub address: String,

    /// Email address, unique across all records
    pub email: String,

    /// Telephone number, format not enforced
    pub telephone: String,
}

/// Inbound record used to create a user or replace all of its fields
///
/// Missing or `null` JSON fields deserialize to empty strings so they surface
/// as validation errors rather than parse failures. An `id` in the body is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct UserPayload {
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(
        custom(function = "not_blank", message = "Name is required"),
        length(max = 255, message = "Name must be at most 255 characters")
    )]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(
        custom(function = "not_blank", message = "Address is required"),
        length(max = 255, message = "Address must be at most 255 characters")
    )]
    pub address: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(
        custom(function = "email_address"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    pub email: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(
        custom(function = "not_blank", message = "Telephone is required"),
        length(max = 255, message = "Telephone must be at most 255 characters")
    )]
    pub telephone: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl User {
    /// Builds a stored record from an id and the payload that was persisted
    pub fn from_payload(id: i64, payload: UserPayload) -> Self {
        Self {
            id,
            name: payload.name,
            address: payload.address,
            email: payload.email,
            telephone: payload.telephone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_missing_fields_default_to_empty() {
        let payload: UserPayload = serde_json::from_str(r#"{"name": "Test User"}"#).unwrap();

        assert_eq!(payload.name, "Test User");
        assert!(payload.address.is_empty());
        assert!(payload.email.is_empty());
        assert!(payload.telephone.is_empty());
    }

    #[test]
    fn test_payload_null_fields_become_empty() {
        let payload: UserPayload = serde_json::from_str(
            r#"{"name": null, "address": null, "email": "a@b.com", "telephone": "1"}"#,
        )
        .unwrap();

        assert!(payload.name.is_empty());
        assert!(payload.address.is_empty());
        assert_eq!(payload.email, "a@b.com");
    }

    #[test]
    fn test_payload_ignores_id() {
        let payload: UserPayload = serde_json::from_str(
            r#"{"id": 42, "name": "A", "address": "B", "email": "a@b.com", "telephone": "1"}"#,
        )
        .unwrap();

        assert_eq!(payload.email, "a@b.com");
    }

    #[test]
    fn test_user_serializes_with_id() {
        let user = User::from_payload(
            7,
            UserPayload {
                name: "Test User".to_string(),
                address: "123 Test St".to_string(),
                email: "test@digg.com".to_string(),
                telephone: "555-1234".to_string(),
            },
        );

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["name"], "Test User");
        assert_eq!(json["telephone"], "555-1234");
    }
}
