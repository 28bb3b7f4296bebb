use core::fmt;
use std::sync::Arc;

use crate::attr::{AncestorValues, AttributeMap};
use crate::coords::Vec3;
use crate::error::Result;
use crate::feature::{CircularFeature, Feature, MeshFeatures, SizeFeature};
use crate::mesh::{convert_raw_mesh, MeshBuilder};
use crate::path::Path;
use crate::render::RenderTree;

/// A tessellated upright cylinder; the height comes from the size feature,
/// the radius and tessellation from the circular feature.
#[derive(Clone)]
pub struct CylinderElement {
    pub circular: CircularFeature,
    pub size: SizeFeature,
    pub mesh: MeshFeatures,
    builder: Arc<dyn MeshBuilder>,
}

impl CylinderElement {
    pub fn new(builder: Arc<dyn MeshBuilder>) -> Self {
        Self {
            circular: CircularFeature::default(),
            size: SizeFeature::default(),
            mesh: MeshFeatures::default(),
            builder,
        }
    }

    pub fn from_attributes(builder: Arc<dyn MeshBuilder>, attributes: &AttributeMap) -> Result<Self> {
        let mut element = Self::new(builder);
        element.update_from_attributes(attributes)?;
        Ok(element)
    }

    pub fn render(&self, path: &Path, tree: &mut RenderTree) -> Result<()> {
        let radius = self.circular.radius();
        let raw = self
            .builder
            .cylinder(radius, self.size.height(), self.circular.num_slices())?;
        let (vertices, triangles) = convert_raw_mesh(&raw, Vec3::new(radius, 0.0, radius));
        tree.update(path, self.mesh.construct_geometry(vertices, triangles, Vec3::zero()));
        Ok(())
    }

    pub fn update_from_attributes(&mut self, attributes: &AttributeMap) -> Result<()> {
        self.circular.update_from_attributes(attributes)?;
        self.size.update_from_attributes(attributes)?;
        self.mesh.update_from_attributes(attributes)
    }

    pub fn attributes(&self) -> AttributeMap {
        let mut attributes = self.circular.attributes();
        attributes.extend(self.size.attributes());
        attributes.extend(self.mesh.attributes());
        attributes
    }

    pub fn update_ancestor_values(&mut self, ancestors: &mut AncestorValues) -> Result<()> {
        self.circular.update_ancestor_values(ancestors)?;
        self.size.update_ancestor_values(ancestors)?;
        self.mesh.update_ancestor_values(ancestors)
    }
}

impl fmt::Debug for CylinderElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CylinderElement")
            .field("circular", &self.circular)
            .field("size", &self.size)
            .field("mesh", &self.mesh)
            .finish_non_exhaustive()
    }
}
