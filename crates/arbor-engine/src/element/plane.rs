use crate::attr::{AncestorValues, AttributeMap};
use crate::coords::{Bounds, Vec3};
use crate::element::box_primitive::box_geometry;
use crate::error::Result;
use crate::feature::{Feature, MeshFeatures, PaddingFeature, SizeFeature};
use crate::path::Path;
use crate::render::RenderTree;

/// A box that grows to fit its children and seats them on its top face,
/// inset by the padding.
#[derive(Debug, Clone, Default)]
pub struct PlaneElement {
    pub size: SizeFeature,
    pub padding: PaddingFeature,
    pub mesh: MeshFeatures,
}

impl PlaneElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_attributes(attributes: &AttributeMap) -> Result<Self> {
        let mut element = Self::new();
        element.update_from_attributes(attributes)?;
        Ok(element)
    }

    pub fn render(&self, path: &Path, tree: &mut RenderTree) -> Result<()> {
        let mut children_bounds = Bounds::default();
        for (_, geometry) in tree.children_of(path) {
            children_bounds += geometry.positioned_bounds();
        }
        let (children_width, _, children_depth) = children_bounds.lengths();

        let padding = self.padding.padding();
        let width = self.size.width().max(children_width) + padding * 2.0;
        let depth = self.size.depth().max(children_depth) + padding * 2.0;
        let height = self.size.height();
        tree.update(path, box_geometry(&self.mesh, width, height, depth, Vec3::zero()));

        tree.move_descendants_by(path, Vec3::new(padding, height, padding));
        Ok(())
    }

    pub fn update_from_attributes(&mut self, attributes: &AttributeMap) -> Result<()> {
        self.size.update_from_attributes(attributes)?;
        self.padding.update_from_attributes(attributes)?;
        self.mesh.update_from_attributes(attributes)
    }

    pub fn attributes(&self) -> AttributeMap {
        let mut attributes = self.size.attributes();
        attributes.extend(self.padding.attributes());
        attributes.extend(self.mesh.attributes());
        attributes
    }

    pub fn update_ancestor_values(&mut self, ancestors: &mut AncestorValues) -> Result<()> {
        self.size.update_ancestor_values(ancestors)?;
        self.padding.update_ancestor_values(ancestors)?;
        self.mesh.update_ancestor_values(ancestors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Geometry;

    #[test]
    fn plane_pads_around_children_and_lifts_them() {
        let mut element = PlaneElement::new();
        element.padding.set_padding(1.0);
        element.size.set_height(0.5);

        let mut tree = RenderTree::new();
        let path = Path::parse(".plane").unwrap();
        let child = Path::parse(".plane.child").unwrap();
        tree.update(
            &child,
            Geometry::new(
                vec![Vec3::zero(), Vec3::new(3.0, 1.0, 2.0)],
                Vec::new(),
                Vec3::zero(),
            ),
        );

        element.render(&path, &mut tree).unwrap();

        let plane = tree.get(&path).unwrap();
        // 3x2 child footprint plus padding on both sides.
        assert_eq!(plane.bounds().width(), 5.0);
        assert_eq!(plane.bounds().depth(), 4.0);
        assert_eq!(plane.bounds().height(), 0.5);
        // The child sits on top of the plane, inset by the padding.
        assert_eq!(tree.get(&child).unwrap().pos(), Vec3::new(1.0, 0.5, 1.0));
    }
}
