/// Field-level validation of inbound records
///
/// Every create and update runs [`validate_user`] before touching the store.
/// Rules are declared with `validator` derive attributes on
/// [`UserPayload`](crate::models::user::UserPayload); this module holds the
/// custom rules and flattens the result into a list of violations.
///
/// # Rules
///
/// - `name`, `address`, `telephone`: must not be blank
/// - `email`: must not be blank and must look like `local@domain.tld`
///
/// # Example
///
/// ```
/// use contactbook_shared::models::user::UserPayload;
/// use contactbook_shared::validation::validate_user;
///
/// let payload = UserPayload {
///     name: "Test User".to_string(),
///     address: "123 Test St".to_string(),
///     email: "not-an-email".to_string(),
///     telephone: "555-1234".to_string(),
/// };
///
/// let violations = validate_user(&payload).unwrap_err();
/// assert_eq!(violations[0].field, "email");
/// ```

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateEmail, ValidationError, ValidationErrors};

use crate::models::user::UserPayload;

/// A single violated rule on a single field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// Field that failed validation
    pub field: String,

    /// Human-readable message
    pub message: String,
}

/// Validates a record accepted from a create or update request
///
/// Returns every violation, sorted by field name.
pub fn validate_user(payload: &UserPayload) -> Result<(), Vec<FieldViolation>> {
    payload.validate().map_err(|errors| flatten(&errors))
}

fn flatten(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut violations: Vec<FieldViolation> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldViolation {
                field: field.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| default_message(field, &error.code)),
            })
        })
        .collect();

    violations.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));
    violations
}

fn default_message(field: &str, code: &str) -> String {
    let mut label = field.to_string();
    if let Some(first) = label.get_mut(0..1) {
        first.make_ascii_uppercase();
    }

    match code {
        "required" => format!("{} is required", label),
        _ => format!("{} is invalid", label),
    }
}

/// Rejects empty or whitespace-only values
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// Email rule: required, syntactically valid, and with a dotted domain
pub(crate) fn email_address(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some(Cow::Borrowed("Email is required"));
        return Err(error);
    }

    if !value.validate_email() || !has_dotted_domain(value) {
        let mut error = ValidationError::new("email");
        error.message = Some(Cow::Borrowed("Invalid email format"));
        return Err(error);
    }

    Ok(())
}

/// `validator` accepts single-label domains such as `user@localhost`;
/// records need at least one label plus a TLD-like suffix.
fn has_dotted_domain(value: &str) -> bool {
    let Some((_, domain)) = value.rsplit_once('@') else {
        return false;
    };

    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}
