use std::f32::consts::TAU;

use crate::coords::Vec3;
use crate::error::{Error, Result};
use crate::mesh::{MeshBuilder, RawMesh};

/// The stock tessellator: UV spheres and capped cylinders.
///
/// Meshes are produced in the builder convention (Z vertical, centred on the
/// origin in X/Y); the engine swaps and offsets them. Model files are not
/// supported here — wire up a real importer to use `Obj` elements.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinMeshes;

impl MeshBuilder for BuiltinMeshes {
    fn sphere(&self, radius: f32, slices: usize) -> Result<RawMesh> {
        let slices = slices.max(3);
        let stacks = slices;

        let mut vertices = Vec::with_capacity(slices * (stacks - 1) + 2);
        // Poles sit on the vertical (Z) axis.
        vertices.push(Vec3::new(0.0, 0.0, radius));
        for stack in 1..stacks {
            let polar = std::f32::consts::PI * stack as f32 / stacks as f32;
            let (ring_sin, ring_cos) = polar.sin_cos();
            for slice in 0..slices {
                let azimuth = TAU * slice as f32 / slices as f32;
                vertices.push(Vec3::new(
                    radius * ring_sin * azimuth.cos(),
                    radius * ring_sin * azimuth.sin(),
                    radius * ring_cos,
                ));
            }
        }
        vertices.push(Vec3::new(0.0, 0.0, -radius));
        let south = (vertices.len() - 1) as u32;

        let ring = |stack: usize, slice: usize| 1 + ((stack - 1) * slices + slice % slices) as u32;

        let mut faces = Vec::new();
        for slice in 0..slices {
            faces.push(vec![0, ring(1, slice), ring(1, slice + 1)]);
        }
        for stack in 1..stacks - 1 {
            for slice in 0..slices {
                faces.push(vec![
                    ring(stack, slice),
                    ring(stack + 1, slice),
                    ring(stack + 1, slice + 1),
                    ring(stack, slice + 1),
                ]);
            }
        }
        for slice in 0..slices {
            faces.push(vec![south, ring(stacks - 1, slice + 1), ring(stacks - 1, slice)]);
        }

        Ok(RawMesh { vertices, faces })
    }

    fn cylinder(&self, radius: f32, height: f32, slices: usize) -> Result<RawMesh> {
        let slices = slices.max(3);

        let mut vertices = Vec::with_capacity(slices * 2);
        for level in [0.0, height] {
            for slice in 0..slices {
                let azimuth = TAU * slice as f32 / slices as f32;
                vertices.push(Vec3::new(
                    radius * azimuth.cos(),
                    radius * azimuth.sin(),
                    level,
                ));
            }
        }

        let bottom = |slice: usize| (slice % slices) as u32;
        let top = |slice: usize| (slices + slice % slices) as u32;

        let mut faces = Vec::new();
        for slice in 0..slices {
            faces.push(vec![
                bottom(slice),
                bottom(slice + 1),
                top(slice + 1),
                top(slice),
            ]);
        }
        // Caps as single n-gons; the engine fans them.
        faces.push((0..slices).rev().map(|s| bottom(s)).collect());
        faces.push((0..slices).map(|s| top(s)).collect());

        Ok(RawMesh { vertices, faces })
    }

    fn load_obj(&self, path: &str) -> Result<RawMesh> {
        Err(Error::MeshUnavailable(format!(
            "the builtin mesh builder cannot load model files ('{path}')"
        )))
    }
}
