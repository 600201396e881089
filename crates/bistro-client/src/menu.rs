//! Menu fetch.

use bistro_core::MenuItem;

use crate::config::StorefrontConfig;
use crate::error::ClientResult;
use crate::http::RequestConfig;
use crate::lifecycle::RequestLifecycle;

/// Lifecycle for `GET {base_url}{meals_path}`, starting from an empty menu.
///
/// Being a read, the fetch starts as soon as this returns.
pub fn meals_lifecycle(
    client: &reqwest::Client,
    config: &StorefrontConfig,
) -> ClientResult<RequestLifecycle<Vec<MenuItem>>> {
    RequestLifecycle::new(client.clone(), config.meals_url(), RequestConfig::get(), Vec::new())
}

/// Absolute URL of a meal's image, if it has one.
pub fn image_url(config: &StorefrontConfig, item: &MenuItem) -> Option<String> {
    item.image.as_deref().map(|path| config.endpoint(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::spawn_order_api;
    use bistro_core::Money;

    #[tokio::test]
    async fn fetches_menu_on_creation() {
        let api = spawn_order_api().await.expect("spawn server");
        let config = StorefrontConfig::with_base_url(api.base_url());

        let meals = meals_lifecycle(&reqwest::Client::new(), &config).unwrap();
        let state = meals.settled().await;

        assert_eq!(state.error, None);
        let names: Vec<_> = state.data.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Mac & Cheese", "Burger"]);
        assert_eq!(state.data[0].price, Money::from_cents(899));
        assert_eq!(state.data[1].price.to_string(), "$12.99");
    }

    #[test]
    fn test_image_url() {
        let config = StorefrontConfig::with_base_url("http://localhost:3000");
        let mut item = MenuItem::new("m1", "Burger", Money::from_cents(1299));
        assert_eq!(image_url(&config, &item), None);

        item.image = Some("images/burger.jpg".into());
        assert_eq!(
            image_url(&config, &item).as_deref(),
            Some("http://localhost:3000/images/burger.jpg")
        );
    }
}
