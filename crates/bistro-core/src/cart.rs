//! # Cart Reducer
//!
//! The shopping cart as a pure `(state, action) → state` function.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Transitions                               │
//! │                                                                         │
//! │  Action               Existing entry?        New state                 │
//! │  ──────               ───────────────        ─────────                 │
//! │                                                                         │
//! │  AddItem(meal) ──────► yes ─────────────────► items[i].quantity + 1    │
//! │                 └────► no  ─────────────────► items.push(qty = 1)      │
//! │                                                                         │
//! │  RemoveItem(id) ─────► quantity == 1 ───────► items.remove(i)          │
//! │                 ├────► quantity  > 1 ───────► items[i].quantity - 1    │
//! │                 └────► absent ──────────────► Err(ItemNotInCart)       │
//! │                                                                         │
//! │  ClearCart ──────────────────────────────────► items = []              │
//! │                                                                         │
//! │  The input state is never mutated: every action returns a new Cart.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Items are unique by `id` (adding the same meal increases quantity)
//! - Every quantity is ≥ 1 (an item at zero is not in the cart)
//! - Items keep insertion order; new items append at the end

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::MenuItem;

// =============================================================================
// Cart Item
// =============================================================================

/// An entry in the cart: a snapshot of the meal plus a quantity.
///
/// The meal fields are frozen when the entry is created. Adding the same id
/// again only bumps the quantity; it never overwrites name or price from the
/// newer descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartItem {
    pub id: String,
    pub name: String,
    #[ts(type = "number")]
    pub price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Always ≥ 1 while the item is in a cart.
    pub quantity: u32,
}

impl CartItem {
    /// Creates a cart entry with quantity 1, copying every descriptor field.
    pub fn from_menu_item(item: &MenuItem) -> Self {
        CartItem {
            id: item.id.clone(),
            name: item.name.clone(),
            price: item.price,
            description: item.description.clone(),
            image: item.image.clone(),
            quantity: 1,
        }
    }

    /// Returns the descriptor this entry was created from.
    ///
    /// Used by the cart overlay's "+" button, which re-adds the row itself.
    pub fn descriptor(&self) -> MenuItem {
        MenuItem {
            id: self.id.clone(),
            name: self.name.clone(),
            price: self.price,
            description: self.description.clone(),
            image: self.image.clone(),
        }
    }

    /// Calculates the line total (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart State
// =============================================================================

/// The cart state: an ordered, id-unique list of items.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Looks up an entry by id.
    pub fn get(&self, id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Returns the number of distinct entries.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity of all entries (the header badge count).
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|i| i.id == id)
    }
}

/// Sum of `price × quantity` over all items.
///
/// A projection, never stored: recompute it from the current state.
pub fn cart_total(cart: &Cart) -> Money {
    cart.items.iter().map(CartItem::line_total).sum()
}

// =============================================================================
// Actions & Reducer
// =============================================================================

/// Everything that can happen to a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Add one unit of a meal.
    AddItem(MenuItem),
    /// Remove one unit of the entry with this id.
    RemoveItem(String),
    /// Empty the cart.
    ClearCart,
}

/// Applies an action to a cart and returns the resulting cart.
///
/// Total and deterministic except for `RemoveItem` of an id that is not in
/// the cart, which is reported as [`CoreError::ItemNotInCart`].
///
/// ```rust
/// use bistro_core::cart::{cart_reducer, cart_total, Cart, CartAction};
/// use bistro_core::{MenuItem, Money};
///
/// let soup = MenuItem::new("m3", "Tomato Soup", Money::from_cents(500));
/// let cart = cart_reducer(&Cart::new(), CartAction::AddItem(soup.clone())).unwrap();
/// let cart = cart_reducer(&cart, CartAction::AddItem(soup)).unwrap();
///
/// assert_eq!(cart.items.len(), 1);
/// assert_eq!(cart.items[0].quantity, 2);
/// assert_eq!(cart_total(&cart), Money::from_cents(1000));
/// ```
pub fn cart_reducer(state: &Cart, action: CartAction) -> CoreResult<Cart> {
    match action {
        CartAction::AddItem(item) => {
            let mut items = state.items.clone();
            match state.position(&item.id) {
                Some(index) => items[index].quantity += 1,
                None => items.push(CartItem::from_menu_item(&item)),
            }
            Ok(Cart { items })
        }
        CartAction::RemoveItem(id) => {
            let index = state
                .position(&id)
                .ok_or_else(|| CoreError::ItemNotInCart { id: id.clone() })?;

            let mut items = state.items.clone();
            if items[index].quantity == 1 {
                items.remove(index);
            } else {
                items[index].quantity -= 1;
            }
            Ok(Cart { items })
        }
        CartAction::ClearCart => Ok(Cart { items: Vec::new() }),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
