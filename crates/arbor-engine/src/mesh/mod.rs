//! The mesh-builder boundary.
//!
//! Round and imported meshes come from a [`MeshBuilder`] plug-in that
//! returns raw vertices and faces of arbitrary arity in its own convention
//! (Z as the vertical axis). The engine owns the conversion: fan-triangulate
//! every face in circular order, swap Y and Z into the engine's Y-up
//! convention, and offset the result into place.

mod builtin;
mod convert;

pub use builtin::BuiltinMeshes;
pub use convert::{convert_raw_mesh, swap_yz};

use crate::coords::Vec3;
use crate::error::Result;

/// An untriangulated mesh as produced by a builder: faces index into
/// `vertices` and may have any arity ≥ 3.
#[derive(Debug, Clone, Default)]
pub struct RawMesh {
    pub vertices: Vec<Vec3>,
    pub faces: Vec<Vec<u32>>,
}

/// Produces raw meshes for the round/imported element kinds.
///
/// Implementations supply the concrete mesh math; the engine only relies on
/// the face lists being in circular vertex order.
pub trait MeshBuilder: Send + Sync {
    /// A sphere of the given radius centred on the origin.
    fn sphere(&self, radius: f32, slices: usize) -> Result<RawMesh>;

    /// An upright cylinder with its base disc on the ground plane.
    fn cylinder(&self, radius: f32, height: f32, slices: usize) -> Result<RawMesh>;

    /// A mesh loaded from a model file.
    fn load_obj(&self, path: &str) -> Result<RawMesh>;
}
