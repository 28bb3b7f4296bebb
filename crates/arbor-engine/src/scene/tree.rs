use core::fmt;

use crate::attr::{AncestorValue, AncestorValues};
use crate::coords::Bounds;
use crate::element::Element;
use crate::error::{Error, Result};
use crate::geometry::Geometry;
use crate::path::{is_valid_path_part, Path};
use crate::render::RenderTree;

/// Handle to a node in a [`SceneTree`]'s arena.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Node {
    name: String,
    element: Element,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    templates: Vec<NodeId>,
    // Per template: the child position instances insert at. Kept in step
    // with child insertions/removals so declaration order is preserved.
    template_insertion_indexes: Vec<usize>,
}

impl Node {
    fn new(name: String, element: Element, parent: Option<NodeId>) -> Self {
        Self {
            name,
            element,
            parent,
            children: Vec::new(),
            templates: Vec::new(),
            template_insertion_indexes: Vec::new(),
        }
    }
}

/// Arena of named nodes rooted at an unnamed Nop node.
#[derive(Debug, Clone)]
pub struct SceneTree {
    nodes: Vec<Option<Node>>,
    free: Vec<usize>,
    root: NodeId,
}

impl Default for SceneTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![Some(Node::new(String::new(), Element::Nop, None))],
            free: Vec::new(),
            root: NodeId(0),
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.0].as_ref().expect("stale node id")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.0].as_mut().expect("stale node id")
    }

    fn allocate(&mut self, node: Node) -> NodeId {
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = Some(node);
                NodeId(slot)
            }
            None => {
                self.nodes.push(Some(node));
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    // ── accessors ─────────────────────────────────────────────────────────

    pub fn name(&self, id: NodeId) -> &str {
        &self.node(id).name
    }

    pub fn element(&self, id: NodeId) -> &Element {
        &self.node(id).element
    }

    pub fn element_mut(&mut self, id: NodeId) -> &mut Element {
        &mut self.node_mut(id).element
    }

    pub fn set_element(&mut self, id: NodeId, element: Element) {
        self.node_mut(id).element = element;
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// The node's name chain from the root; the root's path is empty.
    pub fn path_of(&self, id: NodeId) -> Path {
        let mut parts = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.node(node_id);
            if node.parent.is_some() {
                parts.push(node.name.clone());
            }
            current = node.parent;
        }
        parts.reverse();
        Path::new(parts).expect("node names are validated on insertion")
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub fn children_names(&self, id: NodeId) -> Vec<String> {
        self.node(id)
            .children
            .iter()
            .map(|child| self.node(*child).name.clone())
            .collect()
    }

    pub fn has_child(&self, id: NodeId, name: &str) -> bool {
        self.try_get_child(id, name).is_some()
    }

    pub fn try_get_child(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.node(id)
            .children
            .iter()
            .copied()
            .find(|child| self.node(*child).name == name)
    }

    /// Walks `path` down from the root.
    pub fn find_descendant(&self, path: &Path) -> Option<NodeId> {
        let mut current = self.root;
        for part in path.parts() {
            current = self.try_get_child(current, part)?;
        }
        Some(current)
    }

    // ── children ──────────────────────────────────────────────────────────

    /// Adds a child; the name must be a valid path part and unique among
    /// the parent's children.
    pub fn construct_child(&mut self, parent: NodeId, name: &str, element: Element) -> Result<NodeId> {
        self.check_insertable(parent, name)?;
        let child = self.allocate(Node::new(name.to_owned(), element, Some(parent)));
        self.node_mut(parent).children.push(child);
        Ok(child)
    }

    /// Removes the named child and its whole subtree. Removing an absent
    /// name is a no-op.
    pub fn remove_child(&mut self, parent: NodeId, name: &str) {
        let Some(position) = self
            .node(parent)
            .children
            .iter()
            .position(|child| self.node(*child).name == name)
        else {
            return;
        };

        let child = self.node_mut(parent).children.remove(position);
        for index in &mut self.node_mut(parent).template_insertion_indexes {
            if *index > position {
                *index -= 1;
            }
        }
        self.free_subtree(child);
    }

    fn free_subtree(&mut self, id: NodeId) {
        let node = self.nodes[id.0].take().expect("stale node id");
        self.free.push(id.0);
        for child in node.children.iter().chain(&node.templates) {
            self.free_subtree(*child);
        }
    }

    fn check_insertable(&self, parent: NodeId, name: &str) -> Result<()> {
        if !is_valid_path_part(name) {
            return Err(Error::InvalidPath(format!(
                "'{name}' is not a valid node name"
            )));
        }
        if self.has_child(parent, name) {
            return Err(Error::DuplicateChildName(name.to_owned()));
        }
        Ok(())
    }

    // ── templates ─────────────────────────────────────────────────────────

    /// Registers a template under `parent`. The current child count is
    /// recorded so instances later insert at this declaration position.
    pub fn construct_template(&mut self, parent: NodeId, name: &str, element: Element) -> Result<NodeId> {
        if !is_valid_path_part(name) {
            return Err(Error::InvalidPath(format!(
                "'{name}' is not a valid template name"
            )));
        }
        if self.try_get_template(parent, name).is_some() {
            return Err(Error::DuplicateChildName(name.to_owned()));
        }

        let template = self.allocate(Node::new(name.to_owned(), element, Some(parent)));
        let insertion_index = self.node(parent).children.len();
        let parent_node = self.node_mut(parent);
        parent_node.templates.push(template);
        parent_node.template_insertion_indexes.push(insertion_index);
        Ok(template)
    }

    pub fn try_get_template(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.node(id)
            .templates
            .iter()
            .copied()
            .find(|template| self.node(*template).name == name)
    }

    pub fn template_names(&self, id: NodeId) -> Vec<String> {
        self.node(id)
            .templates
            .iter()
            .map(|template| self.node(*template).name.clone())
            .collect()
    }

    /// Instantiates the named template as a child called `new_name`,
    /// inserted at the template's recorded position.
    pub fn try_make_template(
        &mut self,
        parent: NodeId,
        template_name: &str,
        new_name: &str,
    ) -> Result<NodeId> {
        let template = self
            .try_get_template(parent, template_name)
            .ok_or_else(|| Error::NotFound(template_name.to_owned()))?;
        self.check_insertable(parent, new_name)?;

        let slot = self
            .node(parent)
            .templates
            .iter()
            .position(|candidate| *candidate == template)
            .expect("template found above");
        let insertion_index = self.node(parent).template_insertion_indexes[slot];

        let instance = self.clone_subtree(template, new_name.to_owned(), parent);
        let parent_node = self.node_mut(parent);
        parent_node.children.insert(insertion_index, instance);
        for index in &mut parent_node.template_insertion_indexes {
            if *index >= insertion_index {
                *index += 1;
            }
        }
        Ok(instance)
    }

    /// Returns the existing child, or instantiates the template.
    pub fn try_get_child_or_make_template(
        &mut self,
        parent: NodeId,
        template_name: &str,
        new_name: &str,
    ) -> Result<NodeId> {
        match self.try_get_child(parent, new_name) {
            Some(child) => Ok(child),
            None => self.try_make_template(parent, template_name, new_name),
        }
    }

    /// Deep copy: element, children and templates, with parents rebound.
    fn clone_subtree(&mut self, source: NodeId, new_name: String, new_parent: NodeId) -> NodeId {
        let element = self.node(source).element.clone();
        let id = self.allocate(Node::new(new_name, element, Some(new_parent)));

        let children = self.node(source).children.clone();
        for child in children {
            let child_name = self.node(child).name.clone();
            let cloned = self.clone_subtree(child, child_name, id);
            self.node_mut(id).children.push(cloned);
        }

        let templates = self.node(source).templates.clone();
        for template in templates {
            let template_name = self.node(template).name.clone();
            let cloned = self.clone_subtree(template, template_name, id);
            self.node_mut(id).templates.push(cloned);
        }
        let indexes = self.node(source).template_insertion_indexes.clone();
        self.node_mut(id).template_insertion_indexes = indexes;

        id
    }

    // ── rendering ─────────────────────────────────────────────────────────

    /// Depth-first render: ancestor values accumulate on the way down, each
    /// element renders after its children on the way back up. Nodes whose
    /// element produced nothing get a non-drawable geometry summarising
    /// their children's bounds so ancestors can measure them.
    pub(crate) fn render(&mut self, render_tree: &mut RenderTree) -> Result<()> {
        let mut ancestors = AncestorValues::new();
        self.render_node(self.root, &mut ancestors, render_tree)
    }

    fn render_node(
        &mut self,
        id: NodeId,
        ancestors: &mut AncestorValues,
        render_tree: &mut RenderTree,
    ) -> Result<()> {
        let sibling_count = match self.node(id).parent {
            Some(parent) => self.node(parent).children.len(),
            None => 0,
        };
        ancestors.insert("children", "n", AncestorValue::Float(sibling_count as f32));
        let equal = if sibling_count > 0 {
            100.0 / sibling_count as f32
        } else {
            0.0
        };
        ancestors.insert("equal", "eq", AncestorValue::Float(equal));

        self.node_mut(id).element.update_ancestor_values(ancestors)?;

        let children = self.node(id).children.clone();
        for child in children {
            // Each child gets its own copy so siblings cannot see each
            // other's exports.
            let mut child_ancestors = ancestors.clone();
            self.render_node(child, &mut child_ancestors, render_tree)?;
        }

        let path = self.path_of(id);
        self.node(id).element.render(&path, render_tree)?;

        if render_tree.needs_updating(&path) {
            let mut bounds = Bounds::default();
            for (_, geometry) in render_tree.children_of(&path) {
                bounds += geometry.positioned_bounds();
            }
            render_tree.update(&path, Geometry::empty(bounds.base(), bounds.strip_pos()));
        }
        Ok(())
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId, indent: usize) -> fmt::Result {
        let node = self.node(id);
        let pad = "  ".repeat(indent);
        let name = if node.parent.is_none() { "." } else { node.name.as_str() };
        writeln!(f, "{pad}'{name}'")?;
        for template in &node.templates {
            writeln!(f, "{pad}  <template>")?;
            self.fmt_node(f, *template, indent + 2)?;
        }
        for child in &node.children {
            self.fmt_node(f, *child, indent + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for SceneTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(f, self.root, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::BoxElement;

    fn nop() -> Element {
        Element::Nop
    }

    #[test]
    fn paths_follow_the_name_chain() {
        let mut tree = SceneTree::new();
        let a = tree.construct_child(tree.root(), "a", nop()).unwrap();
        let b = tree.construct_child(a, "b", nop()).unwrap();
        assert_eq!(tree.path_of(tree.root()), Path::root());
        assert_eq!(tree.path_of(b), Path::parse(".a.b").unwrap());
    }

    #[test]
    fn duplicate_child_names_are_rejected() {
        let mut tree = SceneTree::new();
        tree.construct_child(tree.root(), "a", nop()).unwrap();
        assert!(matches!(
            tree.construct_child(tree.root(), "a", nop()),
            Err(Error::DuplicateChildName(_))
        ));
    }

    #[test]
    fn invalid_node_names_are_rejected() {
        let mut tree = SceneTree::new();
        assert!(matches!(
            tree.construct_child(tree.root(), "not ok", nop()),
            Err(Error::InvalidPath(_))
        ));
    }

    #[test]
    fn find_descendant_walks_from_the_root() {
        let mut tree = SceneTree::new();
        let a = tree.construct_child(tree.root(), "a", nop()).unwrap();
        let b = tree.construct_child(a, "b", nop()).unwrap();
        assert_eq!(tree.find_descendant(&Path::parse(".a.b").unwrap()), Some(b));
        assert_eq!(tree.find_descendant(&Path::root()), Some(tree.root()));
        assert_eq!(tree.find_descendant(&Path::parse(".a.x").unwrap()), None);
    }

    #[test]
    fn template_instances_keep_declaration_order() {
        let mut tree = SceneTree::new();
        let root = tree.root();
        tree.construct_child(root, "first", nop()).unwrap();
        tree.construct_template(root, "T", nop()).unwrap();
        tree.construct_child(root, "third", nop()).unwrap();
        tree.try_make_template(root, "T", "second_first").unwrap();

        assert_eq!(tree.children_names(root), vec!["first", "second_first", "third"]);
    }

    #[test]
    fn repeated_instantiation_stays_grouped_at_the_declaration_point() {
        let mut tree = SceneTree::new();
        let root = tree.root();
        tree.construct_child(root, "first", nop()).unwrap();
        tree.construct_template(root, "T", nop()).unwrap();
        tree.construct_child(root, "third", nop()).unwrap();
        tree.try_make_template(root, "T", "t1").unwrap();
        tree.try_make_template(root, "T", "t2").unwrap();

        assert_eq!(tree.children_names(root), vec!["first", "t1", "t2", "third"]);
    }

    #[test]
    fn removal_shifts_template_insertion_points() {
        let mut tree = SceneTree::new();
        let root = tree.root();
        tree.construct_child(root, "first", nop()).unwrap();
        tree.construct_template(root, "T", nop()).unwrap();
        tree.remove_child(root, "first");
        tree.try_make_template(root, "T", "instance").unwrap();
        assert_eq!(tree.children_names(root), vec!["instance"]);
    }

    #[test]
    fn unknown_template_is_not_found() {
        let mut tree = SceneTree::new();
        let root = tree.root();
        assert!(matches!(
            tree.try_make_template(root, "missing", "x"),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn templates_are_not_children() {
        let mut tree = SceneTree::new();
        let root = tree.root();
        tree.construct_template(root, "T", nop()).unwrap();
        assert!(tree.children_names(root).is_empty());
        assert_eq!(tree.template_names(root), vec!["T"]);
        assert!(tree.try_get_child(root, "T").is_none());
    }

    #[test]
    fn instantiation_clones_the_whole_subtree() {
        let mut tree = SceneTree::new();
        let root = tree.root();
        let template = tree
            .construct_template(root, "house", BoxElement::new().into())
            .unwrap();
        tree.construct_child(template, "door", nop()).unwrap();

        let instance = tree.try_make_template(root, "house", "house1").unwrap();
        assert!(tree.has_child(instance, "door"));
        assert_eq!(
            tree.path_of(tree.try_get_child(instance, "door").unwrap()),
            Path::parse(".house1.door").unwrap()
        );
        // The clone is independent of the template.
        assert!(matches!(tree.element(instance), Element::Box(_)));
    }

    #[test]
    fn get_or_make_reuses_existing_instances() {
        let mut tree = SceneTree::new();
        let root = tree.root();
        tree.construct_template(root, "T", nop()).unwrap();
        let first = tree.try_get_child_or_make_template(root, "T", "a").unwrap();
        let second = tree.try_get_child_or_make_template(root, "T", "a").unwrap();
        assert_eq!(first, second);
        assert_eq!(tree.children_names(root).len(), 1);
    }

    #[test]
    fn removing_a_child_frees_its_subtree() {
        let mut tree = SceneTree::new();
        let root = tree.root();
        let a = tree.construct_child(root, "a", nop()).unwrap();
        tree.construct_child(a, "b", nop()).unwrap();
        tree.remove_child(root, "a");
        assert!(tree.find_descendant(&Path::parse(".a").unwrap()).is_none());
        // Slots are reused.
        let again = tree.construct_child(root, "again", nop()).unwrap();
        assert_eq!(tree.path_of(again), Path::parse(".again").unwrap());
    }
}
