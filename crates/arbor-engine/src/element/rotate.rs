use crate::attr::{AncestorValues, AttributeMap};
use crate::error::Result;
use crate::feature::{Feature, RotateFeature};
use crate::path::Path;
use crate::render::RenderTree;

/// Rotates its subtree around the subtree's centre, keeping the bottom-left
/// corner of the subtree's bounds where it was.
#[derive(Debug, Clone, Default)]
pub struct RotateElement {
    pub rotate: RotateFeature,
}

impl RotateElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_attributes(attributes: &AttributeMap) -> Result<Self> {
        let mut element = Self::new();
        element.update_from_attributes(attributes)?;
        Ok(element)
    }

    pub fn render(&self, path: &Path, tree: &mut RenderTree) -> Result<()> {
        tree.rotate_parent_and_descendants_in_place(path, &self.rotate.rotation());
        Ok(())
    }

    pub fn update_from_attributes(&mut self, attributes: &AttributeMap) -> Result<()> {
        self.rotate.update_from_attributes(attributes)
    }

    pub fn attributes(&self) -> AttributeMap {
        self.rotate.attributes()
    }

    pub fn update_ancestor_values(&mut self, ancestors: &mut AncestorValues) -> Result<()> {
        self.rotate.update_ancestor_values(ancestors)
    }
}
