//! # Bistro Storefront
//!
//! Opens a storefront session against the configured order API and logs the
//! menu.
//!
//! ```text
//! storefront [CONFIG_PATH]
//! ```

use std::path::PathBuf;

use bistro_client::{Storefront, StorefrontConfig};
use bistro_core::cart_total;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    info!("Starting Bistro storefront...");

    let config = StorefrontConfig::load_or_default(std::env::args().nth(1).map(PathBuf::from));
    info!(
        meals = %config.meals_url(),
        orders = %config.orders_url(),
        "Configuration loaded"
    );

    let store = Storefront::new(config)?;
    let menu = store.meals()?.settled().await;

    if let Some(error) = &menu.error {
        warn!(error = %error, "Could not load the menu");
        return Err(error.clone().into());
    }

    for meal in &menu.data {
        info!(id = %meal.id, price = %meal.price, "{}", meal.name);
        store.cart().add_item(meal.clone())?;
    }

    info!(
        meals = menu.data.len(),
        one_of_each = %cart_total(&store.cart().snapshot()),
        "Menu loaded"
    );

    Ok(())
}
