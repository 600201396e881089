//! # Progress State Machine
//!
//! Which overlay (if any) the storefront is showing.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Progress Transitions                             │
//! │                                                                         │
//! │                 ShowCart                  ShowCheckout                  │
//! │   ┌──────┐ ───────────────► ┌──────┐ ───────────────► ┌──────────┐     │
//! │   │ None │                  │ Cart │                  │ Checkout │     │
//! │   └──────┘ ◄─────────────── └──────┘                  └──────────┘     │
//! │      ▲          HideCart                                    │          │
//! │      └──────────────────────────────────────────────────────┘          │
//! │                          HideCheckout                                   │
//! │                                                                         │
//! │  Show* is accepted from any state. Hide* always lands on None.         │
//! │  A single enum value means two overlays can never be open together.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Progress State
// =============================================================================

/// The single active overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ProgressState {
    /// No overlay: the menu is in front.
    #[default]
    None,
    /// The cart overlay is open.
    Cart,
    /// The checkout form is open.
    Checkout,
}

/// The four progress operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressAction {
    ShowCart,
    HideCart,
    ShowCheckout,
    HideCheckout,
}

impl ProgressState {
    /// Returns the state after `action`.
    ///
    /// `HideCart` and `HideCheckout` are accepted from every state and always
    /// yield `None`. Guarding against one overlay closing another is the job
    /// of [`Overlay::on_close`], not of the state machine.
    pub fn apply(self, action: ProgressAction) -> ProgressState {
        match action {
            ProgressAction::ShowCart => ProgressState::Cart,
            ProgressAction::ShowCheckout => ProgressState::Checkout,
            ProgressAction::HideCart | ProgressAction::HideCheckout => ProgressState::None,
        }
    }
}

impl std::fmt::Display for ProgressState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProgressState::None => write!(f, "none"),
            ProgressState::Cart => write!(f, "cart"),
            ProgressState::Checkout => write!(f, "checkout"),
        }
    }
}

// =============================================================================
// Overlay Binding
// =============================================================================

/// An overlay whose visibility is derived from [`ProgressState`].
///
/// The overlay layer never owns its own open flag: it reads
/// [`Overlay::is_open`] and reports external dismissals (Escape, backdrop
/// click) through [`Overlay::on_close`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Overlay {
    Cart,
    Checkout,
}

impl Overlay {
    /// The progress value under which this overlay is shown.
    pub fn expected(self) -> ProgressState {
        match self {
            Overlay::Cart => ProgressState::Cart,
            Overlay::Checkout => ProgressState::Checkout,
        }
    }

    /// `open = (progress == expected)`.
    pub fn is_open(self, progress: ProgressState) -> bool {
        progress == self.expected()
    }

    /// The action a dismissal of this overlay maps to, if it is the one open.
    ///
    /// Returns `None` for a close signal from an overlay that is no longer
    /// active, e.g. the cart dialog closing because checkout just opened.
    pub fn on_close(self, progress: ProgressState) -> Option<ProgressAction> {
        if !self.is_open(progress) {
            return None;
        }
        match self {
            Overlay::Cart => Some(ProgressAction::HideCart),
            Overlay::Checkout => Some(ProgressAction::HideCheckout),
        }
    }
}
