use crate::attr::{AncestorValues, AttributeMap};
use crate::error::Result;
use crate::feature::{ColorFeature, Feature, HideShowFeature, OpticsFeature, TextFeature};
use crate::geometry::{Geometry, Triangle};
use crate::coords::Vec3;

/// The features shared by every mesh-producing element: label, colour,
/// opacity and visibility distances.
#[derive(Debug, Clone, Default)]
pub struct MeshFeatures {
    pub text: TextFeature,
    pub color: ColorFeature,
    pub optics: OpticsFeature,
    pub hide_show: HideShowFeature,
}

impl MeshFeatures {
    /// Stamps a produced mesh with this bundle's draw metadata.
    pub fn construct_geometry(
        &self,
        vertices: Vec<Vec3>,
        triangles: Vec<Triangle>,
        pos: Vec3,
    ) -> Geometry {
        let mut geometry = Geometry::new(vertices, triangles, pos);
        geometry.set_color(self.color.compute_color(self.optics.opacity()));
        geometry.set_hide_distance(self.hide_show.hide_distance());
        geometry.set_show_distance(self.hide_show.show_distance());
        geometry.set_text(self.text.text());
        geometry
    }
}

impl Feature for MeshFeatures {
    fn update_from_attributes(&mut self, attributes: &AttributeMap) -> Result<()> {
        self.text.update_from_attributes(attributes)?;
        self.color.update_from_attributes(attributes)?;
        self.optics.update_from_attributes(attributes)?;
        self.hide_show.update_from_attributes(attributes)
    }

    fn attributes(&self) -> AttributeMap {
        let mut attributes = self.text.attributes();
        attributes.extend(self.color.attributes());
        attributes.extend(self.optics.attributes());
        attributes.extend(self.hide_show.attributes());
        attributes
    }

    fn update_ancestor_values(&mut self, ancestors: &mut AncestorValues) -> Result<()> {
        self.text.update_ancestor_values(ancestors)?;
        self.color.update_ancestor_values(ancestors)?;
        self.optics.update_ancestor_values(ancestors)?;
        self.hide_show.update_ancestor_values(ancestors)
    }
}
