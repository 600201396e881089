//! # Cart Store
//!
//! Shared handle over the cart state. Every change goes through
//! [`cart_reducer`], so the rules for adding and removing live in one place.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  UI Action               Store Method          Cart State Change        │
//! │  ─────────               ────────────          ─────────────────        │
//! │                                                                         │
//! │  "Add to Cart" ────────► add_item() ─────────► qty + 1 or append       │
//! │                                                                         │
//! │  "+" in cart ──────────► add_item() ─────────► qty + 1                 │
//! │                                                                         │
//! │  "−" in cart ──────────► remove_item() ──────► qty − 1 or delete       │
//! │                                                                         │
//! │  Order confirmed ──────► clear_cart() ───────► items = []              │
//! │                                                                         │
//! │  Badge / overlay ──────► snapshot() ─────────► (read only)             │
//! │                                                                         │
//! │  NOTE: Writes hold the lock for the whole reducer call, then notify    │
//! │        subscribers with the new snapshot.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bistro_core::{cart_reducer, cart_total, Cart, CartAction, CartItem, CoreResult, MenuItem, Money};
use tokio::sync::watch;
use tracing::{debug, warn};

/// Shared, observable cart.
///
/// Clones share the same cart.
#[derive(Debug, Clone)]
pub struct CartStore {
    cart: Arc<Mutex<Cart>>,
    changes: Arc<watch::Sender<Cart>>,
}

impl CartStore {
    /// Creates a store holding an empty cart.
    pub fn new() -> Self {
        Self::with_cart(Cart::new())
    }

    /// Creates a store holding `cart`, e.g. one restored from disk.
    pub fn with_cart(cart: Cart) -> Self {
        let (changes, _) = watch::channel(cart.clone());
        CartStore {
            cart: Arc::new(Mutex::new(cart)),
            changes: Arc::new(changes),
        }
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Adds one of `item`, or bumps the quantity if it is already in the cart.
    pub fn add_item(&self, item: MenuItem) -> CoreResult<Cart> {
        self.dispatch(CartAction::AddItem(item))
    }

    /// Takes one of `id` out of the cart.
    ///
    /// Fails with `ItemNotInCart` if the id is absent; the cart is unchanged.
    pub fn remove_item(&self, id: impl Into<String>) -> CoreResult<Cart> {
        self.dispatch(CartAction::RemoveItem(id.into()))
    }

    /// Empties the cart.
    pub fn clear_cart(&self) -> CoreResult<Cart> {
        self.dispatch(CartAction::ClearCart)
    }

    /// Runs one action through the reducer and publishes the result.
    pub fn dispatch(&self, action: CartAction) -> CoreResult<Cart> {
        let mut cart = self.lock();
        let label = action_label(&action);

        let next = cart_reducer(&cart, action).map_err(|e| {
            warn!(action = label, error = %e, "Cart action rejected");
            e
        })?;

        debug!(
            action = label,
            items = next.item_count(),
            quantity = next.total_quantity(),
            "Cart updated"
        );

        *cart = next.clone();
        self.changes.send_replace(next.clone());
        Ok(next)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Current cart.
    pub fn snapshot(&self) -> Cart {
        self.lock().clone()
    }

    pub fn items(&self) -> Vec<CartItem> {
        self.lock().items.clone()
    }

    /// Sum of price × quantity over the current items.
    pub fn total(&self) -> Money {
        cart_total(&self.lock())
    }

    pub fn item_count(&self) -> usize {
        self.lock().item_count()
    }

    /// Total quantity across all entries (the header badge).
    pub fn total_quantity(&self) -> u32 {
        self.lock().total_quantity()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Subscribes to cart changes. Every dispatch that succeeds notifies.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.changes.subscribe()
    }

    fn lock(&self) -> MutexGuard<'_, Cart> {
        // The reducer never panics halfway through a write, so a poisoned
        // cart still holds a complete state.
        self.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

fn action_label(action: &CartAction) -> &'static str {
    match action {
        CartAction::AddItem(_) => "add_item",
        CartAction::RemoveItem(_) => "remove_item",
        CartAction::ClearCart => "clear_cart",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bistro_core::CoreError;

    fn meal(id: &str, cents: i64) -> MenuItem {
        MenuItem::new(id, format!("Meal {}", id), Money::from_cents(cents))
    }

    #[test]
    fn test_store_add_and_total() {
        let store = CartStore::new();
        store.add_item(meal("a", 1000)).unwrap();
        store.add_item(meal("b", 300)).unwrap();
        store.add_item(meal("b", 300)).unwrap();

        assert_eq!(store.item_count(), 2);
        assert_eq!(store.total_quantity(), 3);
        assert_eq!(store.total(), Money::from_cents(1600));
        assert_eq!(store.total().to_string(), "$16.00");
    }

    #[test]
    fn test_clones_share_state() {
        let store = CartStore::new();
        let badge = store.clone();

        store.add_item(meal("a", 500)).unwrap();
        assert_eq!(badge.total_quantity(), 1);
    }

    #[test]
    fn test_remove_missing_leaves_state() {
        let store = CartStore::new();
        store.add_item(meal("a", 500)).unwrap();
        let mut rx = store.subscribe();
        rx.borrow_and_update();

        let err = store.remove_item("zzz").unwrap_err();
        assert_eq!(err, CoreError::ItemNotInCart { id: "zzz".into() });
        assert_eq!(store.snapshot().items.len(), 1);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_subscribers_see_every_dispatch() {
        let store = CartStore::new();
        let mut rx = store.subscribe();

        store.add_item(meal("a", 500)).unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().total_quantity(), 1);

        store.remove_item("a").unwrap();
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_empty());
    }

    #[test]
    fn test_clear_cart() {
        let store = CartStore::new();
        store.add_item(meal("a", 500)).unwrap();
        store.add_item(meal("b", 700)).unwrap();

        let cart = store.clear_cart().unwrap();
        assert!(cart.is_empty());
        assert!(store.is_empty());
        assert!(store.total().is_zero());
    }

    #[test]
    fn test_with_cart_restores_items() {
        let mut cart = Cart::new();
        cart.items.push(CartItem::from_menu_item(&meal("a", 250)));
        let store = CartStore::with_cart(cart.clone());

        assert_eq!(store.snapshot(), cart);
        assert_eq!(*store.subscribe().borrow(), cart);
    }

    #[test]
    fn test_concurrent_adds_are_serialized() {
        let store = CartStore::new();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        store.add_item(meal("a", 100)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.item_count(), 1);
        assert_eq!(store.total_quantity(), 200);
    }
}
