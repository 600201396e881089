//! # bistro-core: Pure Storefront Logic
//!
//! The cart reducer, the progress state machine and the money type for the
//! Bistro food-ordering storefront, as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Bistro Storefront Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Overlays (Cart / Checkout / Menu)               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ dispatch / observe                     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │      bistro-client: CartStore, ProgressController,              │   │
//! │  │                     RequestLifecycle, CheckoutFlow              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bistro-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │   cart    │  │ progress  │  │   money   │  │ validation│   │   │
//! │  │   │  reducer  │  │  machine  │  │   Money   │  │  checkout │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`cart`] - Cart items, the cart reducer and the cart total
//! - [`progress`] - Overlay progress state machine and overlay binding
//! - [`money`] - Money type with integer arithmetic
//! - [`types`] - Menu items and customer details
//! - [`validation`] - Checkout form rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use bistro_core::cart::{cart_reducer, cart_total, Cart, CartAction};
//! use bistro_core::{MenuItem, Money};
//!
//! let burger = MenuItem::new("m2", "Classic Burger", Money::from_cents(1299));
//! let cart = cart_reducer(&Cart::new(), CartAction::AddItem(burger)).unwrap();
//!
//! assert_eq!(cart_total(&cart).to_string(), "$12.99");
//! ```

pub mod cart;
pub mod error;
pub mod money;
pub mod progress;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{cart_reducer, cart_total, Cart, CartAction, CartItem};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use progress::{Overlay, ProgressAction, ProgressState};
pub use types::{CustomerDetails, MenuItem};
