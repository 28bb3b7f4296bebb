use crate::attr::{AncestorValues, AttributeMap};
use crate::error::Result;
use crate::feature::{Feature, ScaleFeatures};
use crate::path::Path;
use crate::render::RenderTree;

/// Uniformly scales its subtree to fit the constrained target lengths.
#[derive(Debug, Clone, Default)]
pub struct ScaleElement {
    pub features: ScaleFeatures,
}

impl ScaleElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_attributes(attributes: &AttributeMap) -> Result<Self> {
        let mut element = Self::new();
        element.update_from_attributes(attributes)?;
        Ok(element)
    }

    pub fn render(&self, path: &Path, tree: &mut RenderTree) -> Result<()> {
        let (width, height, depth) = tree.positioned_bounds_of(path).lengths();
        let factor = self.features.compute_scale_factor(width, height, depth);
        tree.scale_parent_and_descendants_by(path, factor);
        Ok(())
    }

    pub fn update_from_attributes(&mut self, attributes: &AttributeMap) -> Result<()> {
        self.features.update_from_attributes(attributes)
    }

    pub fn attributes(&self) -> AttributeMap {
        self.features.attributes()
    }

    pub fn update_ancestor_values(&mut self, ancestors: &mut AncestorValues) -> Result<()> {
        self.features.update_ancestor_values(ancestors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec3;
    use crate::geometry::Geometry;

    #[test]
    fn shrinks_subtree_to_target_width() {
        let mut element = ScaleElement::new();
        element.features.size.set_width(2.0);

        let mut tree = RenderTree::new();
        let path = Path::parse(".scaled").unwrap();
        let child = path.join("child");
        tree.update(
            &child,
            Geometry::new(
                vec![Vec3::zero(), Vec3::new(4.0, 1.0, 1.0)],
                Vec::new(),
                Vec3::zero(),
            ),
        );

        element.render(&path, &mut tree).unwrap();
        assert_eq!(tree.get(&child).unwrap().bounds().width(), 2.0);
    }
}
