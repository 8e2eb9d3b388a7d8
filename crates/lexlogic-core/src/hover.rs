//! Shared "currently emphasized atom" signal.
//!
//! Anything that displays an atom (highlighted text, atom lists, graph nodes)
//! reads and writes the same [`HoverState`]. Handles are cheap to clone and are
//! passed to whoever needs them; there is no process-wide global. The last
//! write wins.

use std::sync::Arc;

use tokio::sync::watch;

use crate::models::AtomId;

/// Handle to the hovered-atom signal.
#[derive(Debug, Clone)]
pub struct HoverState {
    tx: Arc<watch::Sender<Option<AtomId>>>,
}

impl HoverState {
    /// Create a signal with nothing hovered.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    /// Set (or with `None`, clear) the hovered atom.
    ///
    /// Subscribers are only woken when the value actually changes.
    pub fn set(&self, atom_id: Option<AtomId>) {
        self.tx.send_if_modified(|current| {
            if *current == atom_id {
                false
            } else {
                *current = atom_id;
                true
            }
        });
    }

    pub fn clear(&self) {
        self.set(None);
    }

    pub fn current(&self) -> Option<AtomId> {
        *self.tx.borrow()
    }

    pub fn is_hovered(&self, atom_id: AtomId) -> bool {
        self.current() == Some(atom_id)
    }

    /// Watch for changes made through any handle.
    pub fn subscribe(&self) -> HoverSubscription {
        HoverSubscription {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for HoverState {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving side of a [`HoverState`].
#[derive(Debug, Clone)]
pub struct HoverSubscription {
    rx: watch::Receiver<Option<AtomId>>,
}

impl HoverSubscription {
    /// Wait for the next change and return the new value.
    ///
    /// Returns `None` once every [`HoverState`] handle has been dropped.
    pub async fn changed(&mut self) -> Option<Option<AtomId>> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }

    pub fn current(&self) -> Option<AtomId> {
        *self.rx.borrow()
    }
}
