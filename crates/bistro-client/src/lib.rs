//! # bistro-client: Request Lifecycles & Observable Stores
//!
//! The stateful half of the storefront core. It owns the shared cart and
//! progress stores and runs requests against the order API.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Storefront Session                              │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                 Storefront (storefront.rs)                       │  │
//! │  │   config + reqwest::Client + CartStore + ProgressController      │  │
//! │  └──────────┬──────────────────────┬───────────────────────┬────────┘  │
//! │             ▼                      ▼                       ▼           │
//! │  ┌──────────────────┐  ┌──────────────────────┐  ┌──────────────────┐  │
//! │  │ meals()          │  │ cart() / progress()  │  │ checkout()       │  │
//! │  │                  │  │                      │  │                  │  │
//! │  │ GET /meals       │  │ dispatch + subscribe │  │ POST /orders     │  │
//! │  │ auto-triggered   │  │ (state/)             │  │ on submit()      │  │
//! │  └────────┬─────────┘  └──────────────────────┘  └────────┬─────────┘  │
//! │           │                                               │            │
//! │           └──────────────► RequestLifecycle ◄─────────────┘            │
//! │                            (lifecycle.rs)                              │
//! │                     loading / data / error over watch                  │
//! │                                   │                                    │
//! │                                   ▼                                    │
//! │                          send_http_request (http.rs)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`config`] - API location (defaults, TOML file, environment)
//! - [`error`] - Client error types
//! - [`http`] - Request configuration and the single JSON request
//! - [`lifecycle`] - Observable request lifecycle
//! - [`state`] - Cart store and progress controller
//! - [`menu`] - Menu fetch
//! - [`checkout`] - Order submission flow
//! - [`storefront`] - Session wiring
//!
//! ## Usage
//! ```rust,no_run
//! use bistro_client::{Storefront, StorefrontConfig};
//!
//! # async fn run() -> bistro_client::ClientResult<()> {
//! let store = Storefront::new(StorefrontConfig::load_or_default(None))?;
//! let menu = store.meals()?.settled().await;
//!
//! if let Some(meal) = menu.data.first() {
//!     store.cart().add_item(meal.clone())?;
//! }
//! println!("Total: {}", store.cart().total());
//! # Ok(())
//! # }
//! ```

pub mod checkout;
pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod menu;
pub mod state;
pub mod storefront;

#[cfg(test)]
mod test_support;

// Re-exports
pub use checkout::{CheckoutFlow, CheckoutStatus, OrderReceipt, OrderSubmission, SubmissionLifecycle};
pub use config::{ApiSettings, StorefrontConfig};
pub use error::{ClientError, ClientResult};
pub use http::{send_http_request, HttpMethod, HttpRequest, RequestConfig};
pub use lifecycle::{RequestLifecycle, RequestState};
pub use menu::meals_lifecycle;
pub use state::{CartStore, ProgressController};
pub use storefront::Storefront;
