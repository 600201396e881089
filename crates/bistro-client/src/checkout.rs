//! # Checkout Flow
//!
//! Turns the cart plus the customer's details into a submitted order.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Checkout Sequence                                │
//! │                                                                         │
//! │  submit(customer)                                                      │
//! │    1. cart empty?          ──► Err(EmptyCart)                          │
//! │    2. validate_customer()  ──► Err(Validation)                         │
//! │    3. OrderSubmission { order: { items: cart.items, customer } }       │
//! │    4. fresh POST /orders lifecycle, triggered with the submission      │
//! │                                                                         │
//! │  status()   Idle ─► Sending ─► Succeeded(message) | Failed(error)      │
//! │                                                                         │
//! │  finish()   hide_checkout + clear_cart + clear lifecycle data          │
//! │  cancel()   hide_checkout (cart and submission kept)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use bistro_core::validation::validate_customer;
use bistro_core::{CartItem, CoreError, CustomerDetails};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::StorefrontConfig;
use crate::error::ClientResult;
use crate::http::RequestConfig;
use crate::lifecycle::{RequestLifecycle, RequestState};
use crate::state::{CartStore, ProgressController};

// =============================================================================
// Wire Types
// =============================================================================

/// Body of `POST /orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSubmission {
    pub order: Order,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub items: Vec<CartItem>,
    pub customer: CustomerDetails,
}

impl OrderSubmission {
    pub fn new(items: Vec<CartItem>, customer: CustomerDetails) -> Self {
        OrderSubmission {
            order: Order { items, customer },
        }
    }
}

/// What the order API answers on success.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderReceipt {
    #[serde(default)]
    pub message: Option<String>,
}

/// Lifecycle of one order submission. `data` is `None` until the API accepts
/// the order.
pub type SubmissionLifecycle = RequestLifecycle<Option<OrderReceipt>>;

// =============================================================================
// Checkout Status
// =============================================================================

/// What the checkout overlay should render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutStatus {
    /// The form is shown; nothing sent yet.
    Idle,
    /// "Sending order data..."
    Sending,
    /// The API accepted the order.
    Succeeded(OrderReceipt),
    /// The last attempt failed with this message. The form stays open.
    Failed(String),
}

impl CheckoutStatus {
    pub fn from_state(state: &RequestState<Option<OrderReceipt>>) -> Self {
        if state.is_loading {
            return CheckoutStatus::Sending;
        }
        match (&state.data, &state.error) {
            (Some(receipt), None) => CheckoutStatus::Succeeded(receipt.clone()),
            (_, Some(error)) => CheckoutStatus::Failed(error.clone()),
            (None, None) => CheckoutStatus::Idle,
        }
    }
}

// =============================================================================
// Checkout Flow
// =============================================================================

/// Drives one checkout form over the shared cart and progress stores.
pub struct CheckoutFlow {
    client: reqwest::Client,
    config: StorefrontConfig,
    cart: CartStore,
    progress: ProgressController,
    submission: Option<SubmissionLifecycle>,
}

impl CheckoutFlow {
    pub fn new(
        client: reqwest::Client,
        config: StorefrontConfig,
        cart: CartStore,
        progress: ProgressController,
    ) -> Self {
        CheckoutFlow {
            client,
            config,
            cart,
            progress,
            submission: None,
        }
    }

    /// Sends the current cart as an order for `customer`.
    ///
    /// Each call starts a fresh lifecycle; the returned handle shares state
    /// with the one kept by this flow.
    pub fn submit(&mut self, customer: &CustomerDetails) -> ClientResult<SubmissionLifecycle> {
        let items = self.cart.items();
        if items.is_empty() {
            return Err(CoreError::EmptyCart.into());
        }
        validate_customer(customer).map_err(CoreError::from)?;

        let submission = OrderSubmission::new(items, customer.clone());
        let payload = serde_json::to_value(&submission)?;

        let lifecycle = RequestLifecycle::new(
            self.client.clone(),
            self.config.orders_url(),
            RequestConfig::post_json(),
            None,
        )?;

        info!(
            items = submission.order.items.len(),
            total = %self.cart.total(),
            "Submitting order"
        );
        lifecycle.trigger(Some(payload));

        self.submission = Some(lifecycle.clone());
        Ok(lifecycle)
    }

    /// The most recent submission, if any.
    pub fn submission(&self) -> Option<&SubmissionLifecycle> {
        self.submission.as_ref()
    }

    pub fn status(&self) -> CheckoutStatus {
        self.submission
            .as_ref()
            .map(|s| CheckoutStatus::from_state(&s.state()))
            .unwrap_or(CheckoutStatus::Idle)
    }

    /// Closes checkout after a confirmed order: empties the cart and forgets
    /// the receipt.
    pub fn finish(&mut self) -> ClientResult<()> {
        self.progress.hide_checkout();
        self.cart.clear_cart()?;
        if let Some(submission) = &self.submission {
            submission.clear();
        }
        info!("Checkout finished");
        Ok(())
    }

    /// Closes the checkout form without touching the cart.
    pub fn cancel(&self) {
        self.progress.hide_checkout();
    }
}
