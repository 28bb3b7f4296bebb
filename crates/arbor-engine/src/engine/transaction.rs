use std::sync::{MutexGuard, Weak};

use log::debug;

use crate::attr::AttributeMap;
use crate::element::Element;
use crate::engine::SceneState;
use crate::error::Result;
use crate::event::{Event, EventKind, EventServer};
use crate::path::Path;
use crate::render::{RenderDifference, RenderTree};
use crate::scene::{NodeId, SceneTree};

/// A unit of scene mutation plus render plus event emission.
///
/// Holds the engine lock for its lifetime. On construction the current
/// render tree is snapshotted and then invalidated, so [`Transaction::render`]
/// performs a full pass and diffs it against the pre-transaction state —
/// only real changes become events. Dropping a transaction without calling
/// `render` publishes nothing.
pub struct Transaction<'engine> {
    state: MutexGuard<'engine, SceneState>,
    snapshot: RenderTree,
    event_server: Weak<EventServer>,
}

impl<'engine> Transaction<'engine> {
    pub(crate) fn new(
        mut state: MutexGuard<'engine, SceneState>,
        event_server: Weak<EventServer>,
    ) -> Self {
        let snapshot = state.render_tree.clone();
        let root = Path::root();
        state.render_tree.invalidate_parent_and_child_pos(&root);
        Self {
            state,
            snapshot,
            event_server,
        }
    }

    // ── tree access ───────────────────────────────────────────────────────

    pub fn tree(&self) -> &SceneTree {
        &self.state.tree
    }

    pub fn root(&self) -> NodeId {
        self.state.tree.root()
    }

    pub fn path_of(&self, id: NodeId) -> Path {
        self.state.tree.path_of(id)
    }

    pub fn find_descendant(&self, path: &Path) -> Option<NodeId> {
        self.state.tree.find_descendant(path)
    }

    pub fn try_get_child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.state.tree.try_get_child(parent, name)
    }

    pub fn element(&self, id: NodeId) -> &Element {
        self.state.tree.element(id)
    }

    // ── mutation ──────────────────────────────────────────────────────────

    pub fn construct_child(
        &mut self,
        parent: NodeId,
        name: &str,
        element: impl Into<Element>,
    ) -> Result<NodeId> {
        let child = self.state.tree.construct_child(parent, name, element.into())?;
        self.invalidate(parent);
        Ok(child)
    }

    pub fn remove_child(&mut self, parent: NodeId, name: &str) {
        self.state.tree.remove_child(parent, name);
        self.invalidate(parent);
    }

    pub fn set_element(&mut self, id: NodeId, element: impl Into<Element>) {
        self.state.tree.set_element(id, element.into());
        self.invalidate(id);
    }

    /// Mutable element access; assumes the caller changes something.
    pub fn element_mut(&mut self, id: NodeId) -> &mut Element {
        self.invalidate(id);
        self.state.tree.element_mut(id)
    }

    /// Applies a string attribute bag to the node's element.
    pub fn update_attributes(&mut self, id: NodeId, attributes: &AttributeMap) -> Result<()> {
        self.invalidate(id);
        self.state.tree.element_mut(id).update_from_attributes(attributes)
    }

    pub fn construct_template(
        &mut self,
        parent: NodeId,
        name: &str,
        element: impl Into<Element>,
    ) -> Result<NodeId> {
        self.state.tree.construct_template(parent, name, element.into())
    }

    pub fn try_get_template(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.state.tree.try_get_template(parent, name)
    }

    pub fn try_make_template(
        &mut self,
        parent: NodeId,
        template_name: &str,
        new_name: &str,
    ) -> Result<NodeId> {
        let instance = self
            .state
            .tree
            .try_make_template(parent, template_name, new_name)?;
        self.invalidate(parent);
        Ok(instance)
    }

    pub fn try_get_child_or_make_template(
        &mut self,
        parent: NodeId,
        template_name: &str,
        new_name: &str,
    ) -> Result<NodeId> {
        match self.state.tree.try_get_child(parent, new_name) {
            Some(child) => Ok(child),
            None => self.try_make_template(parent, template_name, new_name),
        }
    }

    fn invalidate(&mut self, id: NodeId) {
        let path = self.state.tree.path_of(id);
        self.state.render_tree.invalidate_parent_and_child_pos(&path);
    }

    // ── render ────────────────────────────────────────────────────────────

    /// Renders the scene, diffs against the pre-transaction snapshot and
    /// publishes one event per change.
    ///
    /// Returns `false` when the event server has been dropped; the render
    /// tree is still consistent in that case. Attribute-evaluation errors
    /// abort the pass and surface here.
    pub fn render(&mut self) -> Result<bool> {
        let SceneState { tree, render_tree } = &mut *self.state;
        tree.render(render_tree)?;

        let differences = render_tree.differences_from(&self.snapshot);
        debug!("render produced {} differences", differences.len());

        let Some(server) = self.event_server.upgrade() else {
            return Ok(false);
        };

        let mut events = Vec::with_capacity(differences.len());
        for (path, difference) in differences {
            let (kind, geometry) = match difference {
                RenderDifference::FirstMissing => (EventKind::Remove, self.snapshot.get(&path)),
                RenderDifference::SecondMissing => (EventKind::Add, render_tree.get(&path)),
                RenderDifference::Pos => (EventKind::Move, render_tree.get(&path)),
                RenderDifference::Bounds => (EventKind::Resize, render_tree.get(&path)),
                RenderDifference::Color => (EventKind::Recolor, render_tree.get(&path)),
                RenderDifference::Text => (EventKind::Retext, render_tree.get(&path)),
            };
            if let Some(geometry) = geometry {
                events.push(Event {
                    path,
                    geometry: geometry.clone(),
                    kind,
                });
            }
        }
        server.push_events(events);

        // Later renders in the same transaction diff against this state.
        self.snapshot = render_tree.clone();
        Ok(true)
    }
}
