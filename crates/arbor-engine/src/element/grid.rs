use crate::attr::{AncestorValues, AttributeMap};
use crate::coords::Vec3;
use crate::error::Result;
use crate::feature::{Feature, SpacingFeature};
use crate::path::Path;
use crate::render::RenderTree;

/// Arranges children in a square on the ground plane, preserving their
/// order: consecutive children advance along Z, each block of `diameter`
/// children starts a new lane along X.
///
/// Lanes are as wide as their widest member and Z slots as deep as their
/// deepest, so irregular children stay aligned.
#[derive(Debug, Clone, Default)]
pub struct GridElement {
    pub spacing: SpacingFeature,
}

impl GridElement {
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
        if children.is_empty() {
            return Ok(());
        }

        let diameter = (children.len() as f32).sqrt().ceil() as usize;
        // The outer grid index (i / diameter) groups widths and drives the
        // x advance; the inner index (i % diameter) groups depths and
        // drives the z advance.
        let mut x_lengths = vec![0.0f32; diameter];
        let mut z_lengths = vec![0.0f32; diameter];
        for (i, (_, geometry)) in children.iter().enumerate() {
            let (width, _, depth) = geometry.bounds().lengths();
            let outer = i / diameter;
            let inner = i % diameter;
            x_lengths[outer] = x_lengths[outer].max(width);
            z_lengths[inner] = z_lengths[inner].max(depth);
        }

        let spacing = self.spacing.spacing();
        let advance =
            |lengths: &[f32], count: usize| lengths[..count].iter().map(|l| l + spacing).sum::<f32>();

        for (i, (child_path, _)) in children.iter().enumerate() {
            let x = advance(&x_lengths, i / diameter);
            let z = advance(&z_lengths, i % diameter);
            tree.move_parent_and_descendants_by(child_path, Vec3::new(x, 0.0, z));
        }
        Ok(())
    }

    pub fn update_from_attributes(&mut self, attributes: &AttributeMap) -> Result<()> {
        self.spacing.update_from_attributes(attributes)
    }

    pub fn attributes(&self) -> AttributeMap {
        self.spacing.attributes()
    }

    pub fn update_ancestor_values(&mut self, ancestors: &mut AncestorValues) -> Result<()> {
        self.spacing.update_ancestor_values(ancestors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Geometry;

    fn box_geometry(w: f32, h: f32, d: f32) -> Geometry {
        Geometry::new(
            vec![Vec3::zero(), Vec3::new(w, h, d)],
            Vec::new(),
            Vec3::zero(),
        )
    }

    #[test]
    fn four_unit_boxes_with_spacing() {
        let mut grid = GridElement::new();
        grid.spacing.set_spacing(1.0);

        let mut tree = RenderTree::new();
        let path = Path::parse(".grid").unwrap();
        for name in ["a", "b", "c", "d"] {
            tree.update(&path.join(name), box_geometry(1.0, 1.0, 1.0));
        }

        grid.render(&path, &mut tree).unwrap();

        let positions: Vec<Vec3> = ["a", "b", "c", "d"]
            .iter()
            .map(|name| tree.get(&path.join(name)).unwrap().pos())
            .collect();
        assert_eq!(
            positions,
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 2.0),
                Vec3::new(2.0, 0.0, 0.0),
                Vec3::new(2.0, 0.0, 2.0),
            ]
        );
    }

    #[test]
    fn irregular_children_stay_in_lanes() {
        let grid = GridElement::new();
        let mut tree = RenderTree::new();
        let path = Path::parse(".grid").unwrap();
        tree.update(&path.join("wide"), box_geometry(4.0, 1.0, 1.0));
        tree.update(&path.join("b"), box_geometry(1.0, 1.0, 1.0));
        tree.update(&path.join("deep"), box_geometry(1.0, 1.0, 3.0));
        tree.update(&path.join("d"), box_geometry(1.0, 1.0, 1.0));

        grid.render(&path, &mut tree).unwrap();

        // The first lane is 4 wide (from "wide"); the first z slot is 3
        // deep (from "deep"), pushing its successor out along z.
        assert_eq!(tree.get(&path.join("b")).unwrap().pos(), Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(tree.get(&path.join("deep")).unwrap().pos(), Vec3::new(4.0, 0.0, 0.0));
        assert_eq!(tree.get(&path.join("d")).unwrap().pos(), Vec3::new(4.0, 0.0, 3.0));
    }
}
