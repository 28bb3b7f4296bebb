use crate::attr::{AncestorValues, AttributeMap};
use crate::error::Result;
use crate::feature::{Feature, HideShowFeature};
use crate::path::Path;
use crate::render::RenderTree;

/// Raises descendants' hide/show distances up to its own, per the clamp
/// flags. Descendants keep larger distances they already have.
#[derive(Debug, Clone, Default)]
pub struct HideShowElement {
    pub hide_show: HideShowFeature,
}

impl HideShowElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_attributes(attributes: &AttributeMap) -> Result<Self> {
        let mut element = Self::new();
        element.update_from_attributes(attributes)?;
        Ok(element)
    }

    pub fn render(&self, path: &Path, tree: &mut RenderTree) -> Result<()> {
        let (hide_distance, show_distance) = self.hide_show.hide_and_show_distances();
        let clamp_hide = self.hide_show.clamp_descendant_hide_distances();
        let clamp_show = self.hide_show.clamp_descendant_show_distances();

        for (descendant_path, mut geometry) in tree.descendants_of(path, false) {
            if clamp_hide && geometry.hide_distance() < hide_distance {
                geometry.set_hide_distance(hide_distance);
            }
            if clamp_show && geometry.show_distance() < show_distance {
                geometry.set_show_distance(show_distance);
            }
            tree.update(&descendant_path, geometry);
        }
        Ok(())
    }

    pub fn update_from_attributes(&mut self, attributes: &AttributeMap) -> Result<()> {
        self.hide_show.update_from_attributes(attributes)
    }

    pub fn attributes(&self) -> AttributeMap {
        self.hide_show.attributes()
    }

    pub fn update_ancestor_values(&mut self, ancestors: &mut AncestorValues) -> Result<()> {
        self.hide_show.update_ancestor_values(ancestors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec3;
    use crate::geometry::Geometry;

    #[test]
    fn clamps_only_when_enabled_and_below() {
        let mut element = HideShowElement::new();
        element.hide_show.set_hide_distance(10.0);
        element.hide_show.set_clamp_descendant_hide_distances(true);

        let mut tree = RenderTree::new();
        let path = Path::parse(".group").unwrap();
        let near = path.join("near");
        let far = path.join("far");

        let mut near_geometry = Geometry::new(vec![Vec3::zero()], Vec::new(), Vec3::zero());
        near_geometry.set_hide_distance(2.0);
        tree.update(&near, near_geometry);

        let mut far_geometry = Geometry::new(vec![Vec3::zero()], Vec::new(), Vec3::zero());
        far_geometry.set_hide_distance(50.0);
        tree.update(&far, far_geometry);

        element.render(&path, &mut tree).unwrap();
        assert_eq!(tree.get(&near).unwrap().hide_distance(), 10.0);
        assert_eq!(tree.get(&far).unwrap().hide_distance(), 50.0);

        // Show distances stay untouched without the matching flag.
        assert_eq!(tree.get(&near).unwrap().show_distance(), f32::INFINITY);
    }
}
