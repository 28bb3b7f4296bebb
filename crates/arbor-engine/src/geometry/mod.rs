//! Mesh records.
//!
//! A [`Geometry`] is what a render pass produces per path: vertices and
//! triangles in local space, an AABB, and a position that is kept separate
//! from the vertices so that moving a whole subtree only touches positions.
//! A geometry with no vertices is a pure layout carrier and is never drawn.

use core::fmt;

use crate::coords::{Axis, Bounds, Rotation, Vec3};
use crate::paint::Rgba;

/// Triangle as three indices into the vertex list. Winding matters to
/// consumers; the engine never reorders it.
pub type Triangle = [u32; 3];

/// A positioned mesh plus its draw metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    vertices: Vec<Vec3>,
    triangles: Vec<Triangle>,
    bounds: Bounds,
    pos: Vec3,
    color: Rgba,
    hide_distance: f32,
    show_distance: f32,
    text: String,
}

impl Geometry {
    /// A mesh at `pos`; bounds are computed from the vertices.
    pub fn new(vertices: Vec<Vec3>, triangles: Vec<Triangle>, pos: Vec3) -> Self {
        let bounds = compute_bounds(&vertices);
        Self {
            vertices,
            triangles,
            bounds,
            pos,
            color: Rgba::BLACK,
            hide_distance: 0.0,
            show_distance: f32::INFINITY,
            text: String::new(),
        }
    }

    /// A vertex-less layout carrier with explicit bounds.
    pub fn empty(pos: Vec3, bounds: Bounds) -> Self {
        let mut geometry = Self::new(Vec::new(), Vec::new(), pos);
        geometry.bounds = bounds;
        geometry
    }

    /// Drawable iff there is at least one vertex.
    #[inline]
    pub fn should_draw(&self) -> bool {
        !self.vertices.is_empty()
    }

    #[inline]
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    #[inline]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Bounds translated to the geometry's position.
    pub fn positioned_bounds(&self) -> Bounds {
        self.bounds + self.pos
    }

    #[inline]
    pub fn pos(&self) -> Vec3 {
        self.pos
    }

    #[inline]
    pub fn set_pos(&mut self, pos: Vec3) {
        self.pos = pos;
    }

    #[inline]
    pub fn offset_pos(&mut self, offset: Vec3) {
        self.pos += offset;
    }

    #[inline]
    pub fn color(&self) -> Rgba {
        self.color
    }

    #[inline]
    pub fn set_color(&mut self, color: Rgba) {
        self.color = color;
    }

    #[inline]
    pub fn hide_distance(&self) -> f32 {
        self.hide_distance
    }

    #[inline]
    pub fn set_hide_distance(&mut self, distance: f32) {
        self.hide_distance = distance;
    }

    #[inline]
    pub fn show_distance(&self) -> f32 {
        self.show_distance
    }

    #[inline]
    pub fn set_show_distance(&mut self, distance: f32) {
        self.show_distance = distance;
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Uniformly scales the mesh, its position, and its view distances.
    pub fn scale_by(&mut self, factor: f32) {
        self.pos *= factor;
        for vertex in &mut self.vertices {
            *vertex *= factor;
        }
        self.bounds *= factor;
        self.show_distance *= factor;
        self.hide_distance *= factor;
    }

    /// Elongates the mesh along `axis` by moving every vertex past the mean
    /// of the distinct axis values outward by `amount`.
    ///
    /// Mean-of-distinct-values keeps lopsided meshes (a road with many
    /// segments on one end) from classifying everything as "far side".
    pub fn stretch_by(&mut self, axis: Axis, amount: f32) {
        if self.vertices.is_empty() {
            return;
        }

        let mut axis_values: Vec<f32> = self.vertices.iter().map(|v| (*v)[axis]).collect();
        axis_values.sort_by(f32::total_cmp);
        axis_values.dedup();
        let average = axis_values.iter().sum::<f32>() / axis_values.len() as f32;

        for vertex in &mut self.vertices {
            if vertex[axis] > average {
                vertex[axis] += amount;
            }
        }

        let mut offset = Vec3::zero();
        offset[axis] = amount;
        self.bounds = Bounds::new(self.bounds.base(), self.bounds.end() + offset);
    }

    /// Rotates position, bounds and vertices around `around`.
    pub fn rotate_around(&mut self, around: Vec3, rotation: &Rotation) {
        self.pos = rotation.rotate_around(around, self.pos);
        self.bounds = self.bounds.rotate_around(around, rotation);
        for vertex in &mut self.vertices {
            *vertex = rotation.rotate_around(around, *vertex);
        }
    }

    /// Merges two geometries into one based at the union of their
    /// positioned bounds; the other mesh's triangle indices are re-based
    /// past this mesh's vertices.
    pub fn combine_with(&self, other: &Geometry) -> Geometry {
        let new_pos = (self.positioned_bounds() + other.positioned_bounds()).base();
        let offset = self.pos - new_pos;
        let other_offset = other.pos - new_pos;

        let base_index = self.vertices.len() as u32;
        let mut vertices = Vec::with_capacity(self.vertices.len() + other.vertices.len());
        vertices.extend(self.vertices.iter().map(|v| *v + offset));
        vertices.extend(other.vertices.iter().map(|v| *v + other_offset));

        let mut triangles = self.triangles.clone();
        triangles.extend(
            other
                .triangles
                .iter()
                .map(|[a, b, c]| [a + base_index, b + base_index, c + base_index]),
        );

        let mut combined = Geometry::new(vertices, triangles, new_pos);
        combined.color = self.color;
        combined.hide_distance = self.hide_distance;
        combined.show_distance = self.show_distance;
        combined.text = self.text.clone();
        combined
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Geometry({} vertices, {} triangles, pos {}, bounds {})",
            self.vertices.len(),
            self.triangles.len(),
            self.pos,
            self.bounds
        )
    }
}

fn compute_bounds(vertices: &[Vec3]) -> Bounds {
    let Some((first, rest)) = vertices.split_first() else {
        return Bounds::default();
    };
    let mut min = *first;
    let mut max = *first;
    for vertex in rest {
        min = min.min(*vertex);
        max = max.max(*vertex);
    }
    Bounds::new(min, max)
}
