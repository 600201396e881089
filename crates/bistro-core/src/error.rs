//! # Error Types
//!
//! Domain-specific error types for bistro-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bistro-core errors (this file)                                        │
//! │  ├── CoreError        - Cart and checkout rule violations              │
//! │  └── ValidationError  - Checkout form input failures                   │
//! │                                                                         │
//! │  bistro-client errors (separate crate)                                 │
//! │  └── ClientError      - Config, transport and HTTP status failures     │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ClientError → RequestState.error  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Removal was requested for an item that is not in the cart.
    ///
    /// ## When This Occurs
    /// The UI only offers removal on rendered cart rows, so this means a
    /// caller dispatched `RemoveItem` with a stale or foreign id. It is a
    /// programming fault, not a user error: the cart is left unchanged and
    /// the error propagates to the caller untranslated.
    #[error("Item not in cart: {id}")]
    ItemNotInCart { id: String },

    /// Checkout was submitted with nothing in the cart.
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors for the checkout form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Invalid format (e.g., an email without `@`).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
