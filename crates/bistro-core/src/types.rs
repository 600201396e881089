//! # Domain Types
//!
//! Wire-level types shared between the storefront core, the order API and
//! the web frontend (via generated TypeScript bindings).
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    MenuItem     │   │    CartItem     │   │ CustomerDetails │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │──►│  (menu fields)  │   │  name, email    │       │
//! │  │  name, price    │   │  quantity ≥ 1   │   │  street, city   │       │
//! │  │  description    │   │  (cart.rs)      │   │  postal-code    │       │
//! │  │  image          │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Menu Item
// =============================================================================

/// A meal offered by the backend, and the descriptor used to add it to the
/// cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MenuItem {
    /// Backend identifier (e.g. `"m1"`), the cart's identity key.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Unit price.
    #[ts(type = "number")]
    pub price: Money,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Image path relative to the API base URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl MenuItem {
    /// Creates a bare menu item (no description or image).
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Money) -> Self {
        MenuItem {
            id: id.into(),
            name: name.into(),
            price,
            description: None,
            image: None,
        }
    }
}

// =============================================================================
// Customer Details
// =============================================================================

/// Contact and delivery details collected by the checkout form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerDetails {
    pub name: String,
    pub email: String,
    pub street: String,
    #[serde(rename = "postal-code")]
    pub postal_code: String,
    pub city: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_item_accepts_string_price() {
        let json = r#"{
            "id": "m1",
            "name": "Mac & Cheese",
            "price": "8.99",
            "description": "Creamy cheddar cheese mixed with perfectly cooked macaroni.",
            "image": "images/mac-and-cheese.jpg"
        }"#;
        let item: MenuItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.price, Money::from_cents(899));
        assert_eq!(item.image.as_deref(), Some("images/mac-and-cheese.jpg"));
    }

    #[test]
    fn test_customer_postal_code_wire_name() {
        let customer = CustomerDetails {
            postal_code: "12345".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&customer).unwrap();
        assert_eq!(value["postal-code"], "12345");
        assert!(value.get("postal_code").is_none());
    }
}
