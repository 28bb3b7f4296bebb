use crate::attr::{AncestorValues, AttributeMap};
use crate::coords::{Bounds, Vec3};
use crate::error::Result;
use crate::feature::{Feature, PaddingFeature, SizeFeature};
use crate::geometry::Geometry;
use crate::path::Path;
use crate::render::RenderTree;

/// A non-drawable spacer. Axes left at their default adopt the children's
/// extent; explicitly-set axes use the given length. The padding value is
/// exported for descendants to reference.
#[derive(Debug, Clone, Default)]
pub struct PaddingElement {
    pub padding: PaddingFeature,
    pub size: SizeFeature,
}

impl PaddingElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_attributes(attributes: &AttributeMap) -> Result<Self> {
        let mut element = Self::new();
        element.update_from_attributes(attributes)?;
        Ok(element)
    }

    pub fn render(&self, path: &Path, tree: &mut RenderTree) -> Result<()> {
        let children_bounds = tree.positioned_bounds_of(path);
        let (children_width, children_height, children_depth) = children_bounds.lengths();

        let (mut width, mut height, mut depth) = self.size.lengths();
        if self.size.width_is_defaulted() {
            width = children_width;
        }
        if self.size.height_is_defaulted() {
            height = children_height;
        }
        if self.size.depth_is_defaulted() {
            depth = children_depth;
        }

        let bounds = Bounds::new(Vec3::zero(), Vec3::new(width, height, depth));
        tree.update(path, Geometry::empty(children_bounds.base(), bounds));
        Ok(())
    }

    pub fn update_from_attributes(&mut self, attributes: &AttributeMap) -> Result<()> {
        self.padding.update_from_attributes(attributes)?;
        self.size.update_from_attributes(attributes)
    }

    pub fn attributes(&self) -> AttributeMap {
        let mut attributes = self.padding.attributes();
        attributes.extend(self.size.attributes());
        attributes
    }

    pub fn update_ancestor_values(&mut self, ancestors: &mut AncestorValues) -> Result<()> {
        self.padding.update_ancestor_values(ancestors)?;
        self.size.update_ancestor_values(ancestors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaulted_axes_adopt_children_extent() {
        let mut element = PaddingElement::new();
        element.size.set_height(5.0);

        let mut tree = RenderTree::new();
        let path = Path::parse(".pad").unwrap();
        tree.update(
            &path.join("child"),
            Geometry::new(
                vec![Vec3::zero(), Vec3::new(3.0, 1.0, 2.0)],
                Vec::new(),
                Vec3::zero(),
            ),
        );

        element.render(&path, &mut tree).unwrap();
        let spacer = tree.get(&path).unwrap();
        assert!(!spacer.should_draw());
        assert_eq!(spacer.bounds().lengths(), (3.0, 5.0, 2.0));
    }
}
