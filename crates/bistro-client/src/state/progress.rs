//! # Progress Controller
//!
//! Holds which overlay is open and routes overlay close signals.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bistro_core::{Overlay, ProgressAction, ProgressState};
use tokio::sync::watch;
use tracing::debug;

/// Shared, observable progress state. Clones share the same state.
#[derive(Debug, Clone)]
pub struct ProgressController {
    progress: Arc<Mutex<ProgressState>>,
    changes: Arc<watch::Sender<ProgressState>>,
}

impl ProgressController {
    /// Starts with no overlay open.
    pub fn new() -> Self {
        let (changes, _) = watch::channel(ProgressState::None);
        ProgressController {
            progress: Arc::new(Mutex::new(ProgressState::None)),
            changes: Arc::new(changes),
        }
    }

    pub fn show_cart(&self) -> ProgressState {
        self.dispatch(ProgressAction::ShowCart)
    }

    /// Closes whatever is open, whichever overlay that is.
    pub fn hide_cart(&self) -> ProgressState {
        self.dispatch(ProgressAction::HideCart)
    }

    pub fn show_checkout(&self) -> ProgressState {
        self.dispatch(ProgressAction::ShowCheckout)
    }

    /// Closes whatever is open, whichever overlay that is.
    pub fn hide_checkout(&self) -> ProgressState {
        self.dispatch(ProgressAction::HideCheckout)
    }

    /// Handles a close signal coming from `overlay` itself (Escape key,
    /// backdrop click).
    ///
    /// Ignored unless `overlay` is the one currently open, so a dialog that
    /// closes because another one replaced it cannot close the replacement.
    /// Returns the progress afterwards.
    pub fn dismiss(&self, overlay: Overlay) -> ProgressState {
        let mut progress = self.lock();
        match overlay.on_close(*progress) {
            Some(action) => self.apply_locked(&mut progress, action),
            None => {
                debug!(?overlay, progress = %*progress, "Ignoring close from overlay that is not open");
                *progress
            }
        }
    }

    /// Applies one action and publishes the result.
    pub fn dispatch(&self, action: ProgressAction) -> ProgressState {
        let mut progress = self.lock();
        self.apply_locked(&mut progress, action)
    }

    /// Current progress.
    pub fn progress(&self) -> ProgressState {
        *self.lock()
    }

    /// Returns true if `overlay` should be shown.
    pub fn is_open(&self, overlay: Overlay) -> bool {
        overlay.is_open(self.progress())
    }

    pub fn subscribe(&self) -> watch::Receiver<ProgressState> {
        self.changes.subscribe()
    }

    fn apply_locked(&self, progress: &mut ProgressState, action: ProgressAction) -> ProgressState {
        let next = progress.apply(action);
        debug!(?action, from = %*progress, to = %next, "Progress changed");
        *progress = next;
        self.changes.send_replace(next);
        next
    }

    fn lock(&self) -> MutexGuard<'_, ProgressState> {
        self.progress.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ProgressController {
    fn default() -> Self {
        Self::new()
    }
}
