use core::fmt;
use std::sync::Arc;

use crate::attr::{AncestorValues, AttributeMap};
use crate::coords::Vec3;
use crate::error::{Error, Result};
use crate::feature::{Feature, MeshFeatures, ScaleFeatures};
use crate::mesh::{convert_raw_mesh, MeshBuilder};
use crate::path::Path;
use crate::render::RenderTree;

/// An imported model, re-based into the positive octant and scaled to the
/// size constraints.
#[derive(Clone)]
pub struct ObjElement {
    pub scale: ScaleFeatures,
    pub mesh: MeshFeatures,
    filepath: String,
    builder: Arc<dyn MeshBuilder>,
}

impl ObjElement {
    pub fn new(builder: Arc<dyn MeshBuilder>, filepath: impl Into<String>) -> Self {
        Self {
            scale: ScaleFeatures::default(),
            mesh: MeshFeatures::default(),
            filepath: filepath.into(),
            builder,
        }
    }

    /// Requires a `path` attribute naming the model file.
    pub fn from_attributes(builder: Arc<dyn MeshBuilder>, attributes: &AttributeMap) -> Result<Self> {
        let filepath = attributes.get("path").ok_or_else(|| {
            Error::InvalidAttributeValue("obj elements require a 'path' attribute".to_owned())
        })?;
        let mut element = Self::new(builder, filepath);
        element.update_from_attributes(attributes)?;
        Ok(element)
    }

    pub fn filepath(&self) -> &str {
        &self.filepath
    }

    pub fn render(&self, path: &Path, tree: &mut RenderTree) -> Result<()> {
        let raw = self.builder.load_obj(&self.filepath)?;

        // Offset by the (converted) minimum corner so the model's bounds
        // start at the origin.
        let mut min = Vec3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY);
        for vertex in &raw.vertices {
            min = min.min(*vertex);
        }
        let fixup = if raw.vertices.is_empty() {
            Vec3::zero()
        } else {
            crate::mesh::swap_yz(-min)
        };

        let (vertices, triangles) = convert_raw_mesh(&raw, fixup);
        let mut geometry = self.mesh.construct_geometry(vertices, triangles, Vec3::zero());

        let (width, height, depth) = geometry.bounds().lengths();
        geometry.scale_by(self.scale.compute_scale_factor(width, height, depth));

        tree.update(path, geometry);
        Ok(())
    }

    pub fn update_from_attributes(&mut self, attributes: &AttributeMap) -> Result<()> {
        if let Some(filepath) = attributes.get("path") {
            self.filepath = filepath.clone();
        }
        self.scale.update_from_attributes(attributes)?;
        self.mesh.update_from_attributes(attributes)
    }

    pub fn attributes(&self) -> AttributeMap {
        let mut attributes = self.scale.attributes();
        attributes.extend(self.mesh.attributes());
        attributes.insert("path".to_owned(), self.filepath.clone());
        attributes
    }

    pub fn update_ancestor_values(&mut self, ancestors: &mut AncestorValues) -> Result<()> {
        self.scale.update_ancestor_values(ancestors)?;
        self.mesh.update_ancestor_values(ancestors)
    }
}

impl fmt::Debug for ObjElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjElement")
            .field("filepath", &self.filepath)
            .field("scale", &self.scale)
            .field("mesh", &self.mesh)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::RawMesh;

    /// A stand-in importer that hands back a fixed 2x1x1 wedge based away
    /// from the origin.
    struct FixedModel;

    impl MeshBuilder for FixedModel {
        fn sphere(&self, _radius: f32, _slices: usize) -> Result<RawMesh> {
            Err(Error::MeshUnavailable("spheres not supported".into()))
        }

        fn cylinder(&self, _radius: f32, _height: f32, _slices: usize) -> Result<RawMesh> {
            Err(Error::MeshUnavailable("cylinders not supported".into()))
        }

        fn load_obj(&self, _path: &str) -> Result<RawMesh> {
            Ok(RawMesh {
                vertices: vec![
                    Vec3::new(5.0, 5.0, 5.0),
                    Vec3::new(7.0, 5.0, 5.0),
                    Vec3::new(5.0, 6.0, 6.0),
                ],
                faces: vec![vec![0, 1, 2]],
            })
        }
    }

    #[test]
    fn model_is_rebased_and_scaled_to_fit() {
        let mut element = ObjElement::new(Arc::new(FixedModel), "wedge.obj");
        element.scale.size.set_width(1.0);

        let mut tree = RenderTree::new();
        let path = Path::parse(".model").unwrap();
        element.render(&path, &mut tree).unwrap();

        let bounds = tree.get(&path).unwrap().bounds();
        assert_eq!(bounds.base(), Vec3::zero());
        // 2 wide scaled into a width-1 target.
        assert!((bounds.width() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn missing_path_attribute_is_an_error() {
        let attributes = AttributeMap::new();
        assert!(ObjElement::from_attributes(Arc::new(FixedModel), &attributes).is_err());
    }
}
