use log::warn;

use crate::attr::{AncestorValues, AttributeMap};
use crate::coords::{Axis, Bounds, Rotation, Vec3};
use crate::error::Result;
use crate::feature::{AxisFeature, Feature, SpacingFeature};
use crate::path::Path;
use crate::render::RenderTree;

/// Lays houses along both sides of a street.
///
/// The last child is the street; the preceding children are houses, placed
/// in rows of two, alternating sides in child order. Rows advance along the
/// layout axis with the spacing between them; the three lanes (near houses,
/// street, far houses) sit side by side across it. The street is stretched
/// along its axis to span every row, and far-side houses are turned 180° so
/// they face the street.
#[derive(Debug, Clone, Default)]
pub struct StreetElement {
    pub spacing: SpacingFeature,
    pub axis: AxisFeature,
}

impl StreetElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_attributes(attributes: &AttributeMap) -> Result<Self> {
        let mut element = Self::new();
        element.update_from_attributes(attributes)?;
        Ok(element)
    }

    pub fn render(&self, path: &Path, tree: &mut RenderTree) -> Result<()> {
        let children = tree.children_of(path);
        // Needs both a street and at least one house.
        if children.len() <= 1 {
            return Ok(());
        }

        let axis = match self.axis.axis() {
            Axis::Y => {
                warn!("street at {path} cannot run along y; using x");
                Axis::X
            }
            axis => axis,
        };
        let cross = axis.opposite();

        let (street_path, street_geometry) = children[children.len() - 1].clone();
        let houses = &children[..children.len() - 1];

        // Lane extents across the street: near houses, street, far houses.
        // Row extents along the street: the larger of the row's two houses.
        let mut lane_lengths = [0.0f32; 3];
        lane_lengths[1] = street_geometry.bounds().axis_length(cross);
        let mut row_lengths = vec![0.0f32; houses.len().div_ceil(2)];
        for (i, (_, geometry)) in houses.iter().enumerate() {
            let lane = (i % 2) * 2;
            let row = i / 2;
            lane_lengths[lane] = lane_lengths[lane].max(geometry.bounds().axis_length(cross));
            row_lengths[row] = row_lengths[row].max(geometry.bounds().axis_length(axis));
        }

        let spacing = self.spacing.spacing();
        let mut house_bounds = Bounds::default();
        for (i, (house_path, _)) in houses.iter().enumerate() {
            let lane = (i % 2) * 2;
            let row = i / 2;

            let mut offset = Vec3::zero();
            offset[axis] = row_lengths[..row].iter().sum::<f32>() + spacing * row as f32;
            offset[cross] = lane_lengths[..lane].iter().sum::<f32>();
            tree.move_parent_and_descendants_by(house_path, offset);

            // Far-side houses turn to face the street.
            if lane == 2 {
                tree.rotate_parent_and_descendants_in_place(house_path, &Rotation::from_yaw(180.0));
            }

            house_bounds += tree.positioned_bounds_of(house_path);
        }

        self.stretch_street(&street_path, street_geometry, &house_bounds, axis, tree);

        let mut street_offset = Vec3::zero();
        street_offset[cross] = lane_lengths[0];
        tree.move_parent_and_descendants_by(&street_path, street_offset);
        Ok(())
    }

    /// Elongates the street along the axis until it spans all houses plus a
    /// trailing gap; a street that is already long enough is left alone.
    fn stretch_street(
        &self,
        street_path: &Path,
        mut street_geometry: crate::geometry::Geometry,
        house_bounds: &Bounds,
        axis: Axis,
        tree: &mut RenderTree,
    ) {
        let current_length = street_geometry.bounds().axis_length(axis);
        let wanted_length = house_bounds.axis_length(axis) + self.spacing.spacing();
        let stretch = (wanted_length - current_length).max(0.0);
        street_geometry.stretch_by(axis, stretch);
        tree.update(street_path, street_geometry);
    }

    pub fn update_from_attributes(&mut self, attributes: &AttributeMap) -> Result<()> {
        self.spacing.update_from_attributes(attributes)?;
        self.axis.update_from_attributes(attributes)
    }

    pub fn attributes(&self) -> AttributeMap {
        let mut attributes = self.spacing.attributes();
        attributes.extend(self.axis.attributes());
        attributes
    }

    pub fn update_ancestor_values(&mut self, ancestors: &mut AncestorValues) -> Result<()> {
        self.spacing.update_ancestor_values(ancestors)?;
        self.axis.update_ancestor_values(ancestors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Geometry;

    fn box_geometry(w: f32, h: f32, d: f32) -> Geometry {
        let vertices = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, h, 0.0),
            Vec3::new(w, 0.0, 0.0),
            Vec3::new(w, h, 0.0),
            Vec3::new(0.0, 0.0, d),
            Vec3::new(0.0, h, d),
            Vec3::new(w, 0.0, d),
            Vec3::new(w, h, d),
        ];
        Geometry::new(vertices, Vec::new(), Vec3::zero())
    }

    fn street_scene(houses: usize) -> (StreetElement, RenderTree, Path) {
        let element = StreetElement::new();
        let mut tree = RenderTree::new();
        let path = Path::parse(".street").unwrap();
        for i in 0..houses {
            tree.update(&path.join(&format!("house{i}")), box_geometry(1.0, 1.0, 1.0));
        }
        tree.update(&path.join("road"), box_geometry(1.0, 0.1, 2.0));
        (element, tree, path)
    }

    #[test]
    fn too_few_children_is_a_no_op() {
        let (element, mut tree, path) = street_scene(0);
        element.render(&path, &mut tree).unwrap();
        assert_eq!(tree.get(&path.join("road")).unwrap().pos(), Vec3::zero());
    }

    #[test]
    fn houses_alternate_sides_of_the_street() {
        let (element, mut tree, path) = street_scene(4);
        element.render(&path, &mut tree).unwrap();

        // Near lane at z 0; street lane starts past the 1-deep houses;
        // far lane past the 2-deep street.
        assert_eq!(tree.get(&path.join("house0")).unwrap().pos(), Vec3::zero());
        let far = tree.get(&path.join("house1")).unwrap().positioned_bounds();
        assert!((far.base().z - 3.0).abs() < 1e-3);
        // Second row advances along x.
        let second_row = tree.get(&path.join("house2")).unwrap().positioned_bounds();
        assert!((second_row.base().x - 1.0).abs() < 1e-3);

        let road = tree.get(&path.join("road")).unwrap();
        assert!((road.positioned_bounds().base().z - 1.0).abs() < 1e-3);
    }

    #[test]
    fn street_is_stretched_to_span_houses() {
        let (element, mut tree, path) = street_scene(4);
        element.render(&path, &mut tree).unwrap();
        // Two rows of unit houses span 2 along x; the road grows to match.
        let road = tree.get(&path.join("road")).unwrap();
        assert!(road.bounds().width() >= 2.0);
    }

    #[test]
    fn far_side_houses_face_inwards() {
        let (element, mut tree, path) = street_scene(2);
        element.render(&path, &mut tree).unwrap();
        // An in-place half-turn keeps the footprint in the same place.
        let far = tree.get(&path.join("house1")).unwrap().positioned_bounds();
        assert!((far.width() - 1.0).abs() < 1e-3);
        assert!((far.base().z - 3.0).abs() < 1e-3);
    }
}
