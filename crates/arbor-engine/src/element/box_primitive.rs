use crate::attr::{AncestorValues, AttributeMap};
use crate::coords::Vec3;
use crate::error::Result;
use crate::feature::{Feature, MeshFeatures, SizeFeature};
use crate::geometry::{Geometry, Triangle};
use crate::path::Path;
use crate::render::RenderTree;

/// An axis-aligned cuboid spanning `(0,0,0)` to `(w,h,d)`.
#[derive(Debug, Clone, Default)]
pub struct BoxElement {
    pub size: SizeFeature,
    pub mesh: MeshFeatures,
}

impl BoxElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_attributes(attributes: &AttributeMap) -> Result<Self> {
        let mut element = Self::new();
        element.update_from_attributes(attributes)?;
        Ok(element)
    }

    pub fn render(&self, path: &Path, tree: &mut RenderTree) -> Result<()> {
        let (width, height, depth) = self.size.lengths();
        tree.update(path, box_geometry(&self.mesh, width, height, depth, Vec3::zero()));
        Ok(())
    }

    pub fn update_from_attributes(&mut self, attributes: &AttributeMap) -> Result<()> {
        self.size.update_from_attributes(attributes)?;
        self.mesh.update_from_attributes(attributes)
    }

    pub fn attributes(&self) -> AttributeMap {
        let mut attributes = self.size.attributes();
        attributes.extend(self.mesh.attributes());
        attributes
    }

    pub fn update_ancestor_values(&mut self, ancestors: &mut AncestorValues) -> Result<()> {
        self.size.update_ancestor_values(ancestors)?;
        self.mesh.update_ancestor_values(ancestors)
    }
}

/// The cuboid's fixed triangle winding. The order within each triple is part
/// of the output contract; renderers rely on it for face orientation.
const BOX_TRIANGLES: [Triangle; 12] = [
    [1, 2, 0], // bottom
    [1, 3, 2],
    [0, 4, 1], // left side
    [4, 5, 1],
    [4, 6, 5], // top
    [6, 7, 5],
    [3, 6, 2], // right side
    [3, 7, 6],
    [2, 4, 0], // front
    [2, 6, 4],
    [1, 5, 3], // back
    [5, 7, 3],
];

/// Builds the cuboid mesh stamped with the bundle's draw metadata.
pub(crate) fn box_geometry(
    mesh: &MeshFeatures,
    width: f32,
    height: f32,
    depth: f32,
    pos: Vec3,
) -> Geometry {
    let vertices = vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(0.0, height, 0.0),
        Vec3::new(width, 0.0, 0.0),
        Vec3::new(width, height, 0.0),
        Vec3::new(0.0, 0.0, depth),
        Vec3::new(0.0, height, depth),
        Vec3::new(width, 0.0, depth),
        Vec3::new(width, height, depth),
    ];
    mesh.construct_geometry(vertices, BOX_TRIANGLES.to_vec(), pos)
}
