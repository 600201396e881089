//! # State Module
//!
//! Observable stores owning the storefront's shared state.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────┐        ┌──────────────────────────┐      │
//! │  │        CartStore         │        │   ProgressController     │      │
//! │  │                          │        │                          │      │
//! │  │  Arc<Mutex<Cart>>        │        │  Arc<Mutex<Progress>>    │      │
//! │  │  + watch::Sender<Cart>   │        │  + watch::Sender<..>     │      │
//! │  │                          │        │                          │      │
//! │  │  dispatch → cart_reducer │        │  dispatch → apply()      │      │
//! │  └────────────┬─────────────┘        └────────────┬─────────────┘      │
//! │               │ subscribe()                       │ subscribe()        │
//! │               ▼                                   ▼                    │
//! │        header badge, cart overlay,      cart overlay, checkout form    │
//! │        checkout flow                                                   │
//! │                                                                         │
//! │  Both stores are cheap Clone handles. A dispatch runs to completion    │
//! │  under the store's lock before the next one is processed.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod progress;

pub use cart::CartStore;
pub use progress::ProgressController;
