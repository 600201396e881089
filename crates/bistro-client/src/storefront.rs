//! # Storefront Session
//!
//! One shopping session: the shared stores plus everything needed to talk to
//! the order API.

use bistro_core::MenuItem;
use tracing::info;

use crate::checkout::CheckoutFlow;
use crate::config::StorefrontConfig;
use crate::error::ClientResult;
use crate::lifecycle::RequestLifecycle;
use crate::menu::meals_lifecycle;
use crate::state::{CartStore, ProgressController};

const USER_AGENT: &str = concat!("bistro-storefront/", env!("CARGO_PKG_VERSION"));

/// Wires one cart, one progress controller and one HTTP client together.
#[derive(Debug, Clone)]
pub struct Storefront {
    config: StorefrontConfig,
    client: reqwest::Client,
    cart: CartStore,
    progress: ProgressController,
}

impl Storefront {
    /// Creates a session against the API described by `config`.
    pub fn new(config: StorefrontConfig) -> ClientResult<Self> {
        config.validate()?;
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        info!(api = %config.api.base_url, "Storefront session started");

        Ok(Storefront {
            config,
            client,
            cart: CartStore::new(),
            progress: ProgressController::new(),
        })
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn progress(&self) -> &ProgressController {
        &self.progress
    }

    /// Starts fetching the menu.
    pub fn meals(&self) -> ClientResult<RequestLifecycle<Vec<MenuItem>>> {
        meals_lifecycle(&self.client, &self.config)
    }

    /// A checkout flow over this session's cart and progress.
    pub fn checkout(&self) -> CheckoutFlow {
        CheckoutFlow::new(
            self.client.clone(),
            self.config.clone(),
            self.cart.clone(),
            self.progress.clone(),
        )
    }
}
