//! # Validation Module
//!
//! Checkout form validation.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend form (required inputs, type="email")                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE, before the order is sent                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Order API (400 + { message } on bad customer data)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::CustomerDetails;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates that a field is present after trimming.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty
/// - Must contain `@` with something on both sides
///
/// ```rust
/// use bistro_core::validation::validate_email;
///
/// assert!(validate_email("ada@example.com").is_ok());
/// assert!(validate_email("ada.example.com").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    validate_required("email", email)?;

    match email.trim().split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must be an email address".to_string(),
        }),
    }
}

/// Validates every checkout field, reporting the first failure.
pub fn validate_customer(customer: &CustomerDetails) -> ValidationResult<()> {
    validate_required("name", &customer.name)?;
    validate_email(&customer.email)?;
    validate_required("street", &customer.street)?;
    validate_required("postal-code", &customer.postal_code)?;
    validate_required("city", &customer.city)?;
    Ok(())
}
