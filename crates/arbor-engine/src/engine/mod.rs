//! The engine: ownership root and transaction surface.
//!
//! A [`LayoutEngine`] owns the scene tree, the render tree and the event
//! server. All mutation goes through a [`Transaction`], which holds the
//! engine lock for its lifetime — one writer at a time, and a render pass
//! always sees a consistent tree.

mod transaction;

pub use transaction::Transaction;

use core::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use log::debug;

use crate::event::{EventFilter, EventListener, EventServer};
use crate::render::RenderTree;
use crate::scene::SceneTree;

pub(crate) struct SceneState {
    pub(crate) tree: SceneTree,
    pub(crate) render_tree: RenderTree,
}

/// Owns a scene and publishes its changes.
///
/// Listeners and transactions hold weak references to the event server, so
/// observers never keep a dropped engine's machinery alive.
pub struct LayoutEngine {
    event_server: Arc<EventServer>,
    state: Mutex<SceneState>,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutEngine {
    pub fn new() -> Self {
        Self {
            event_server: Arc::new(EventServer::new()),
            state: Mutex::new(SceneState {
                tree: SceneTree::new(),
                render_tree: RenderTree::new(),
            }),
        }
    }

    /// Opens a transaction, blocking until any other transaction ends.
    pub fn transaction(&self) -> Transaction<'_> {
        let state = self
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        debug!("transaction opened");
        Transaction::new(state, Arc::downgrade(&self.event_server))
    }

    /// Registers an event listener; it may be moved to any thread.
    pub fn subscribe(&self, filter: EventFilter) -> EventListener {
        EventServer::subscribe(&self.event_server, filter)
    }
}

impl fmt::Display for LayoutEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        write!(f, "LayoutEngine:\n{}", state.tree)
    }
}
