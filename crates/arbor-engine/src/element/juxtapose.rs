use crate::attr::{AncestorValues, AttributeMap};
use crate::coords::{Alignment, Axis, Bounds, Vec3};
use crate::error::Result;
use crate::feature::{AlignFeature, AxisFeature, Feature, SizeFeature, SpacingFeature};
use crate::geometry::Geometry;
use crate::path::Path;
use crate::render::RenderTree;

/// Lays children out one after another along the axis.
///
/// After the chain is built: if the axis length of the size is set, the
/// chain is centred within that length; if the alignment is set, children
/// are aligned across the perpendicular axes against the chain's measured
/// bounds (explicitly-set size lengths override the measured extents).
/// Emits a non-drawable geometry summarising the bounds.
#[derive(Debug, Clone, Default)]
pub struct JuxtaposeElement {
    pub size: SizeFeature,
    pub axis: AxisFeature,
    pub spacing: SpacingFeature,
    pub align: AlignFeature,
}

impl JuxtaposeElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_attributes(attributes: &AttributeMap) -> Result<Self> {
        let mut element = Self::new();
        element.update_from_attributes(attributes)?;
        Ok(element)
    }

    pub fn render(&self, path: &Path, tree: &mut RenderTree) -> Result<()> {
        let children: Vec<Path> = tree
            .children_of(path)
            .into_iter()
            .map(|(child_path, _)| child_path)
            .collect();
        if children.is_empty() {
            return Ok(());
        }

        self.juxtapose(&children, tree);

        let axis = self.axis.axis();
        if !self.size.axis_length_is_defaulted(axis) {
            self.center_within_axis_length(&children, tree, axis);
        }

        let summary_bounds = self.bounds_with_provided_lengths(&children, tree);
        if !self.align.alignment_is_defaulted() {
            self.align_children(&children, tree, axis, &summary_bounds);
        }

        tree.update(
            path,
            Geometry::empty(summary_bounds.base(), summary_bounds.strip_pos()),
        );
        Ok(())
    }

    /// Chains children along the axis: each child's bottom-left lands on the
    /// running offset, which then advances by the child's extent plus the
    /// spacing (no trailing spacing after the last child).
    fn juxtapose(&self, children: &[Path], tree: &mut RenderTree) {
        let axis = self.axis.axis();
        let spacing = self.spacing.spacing();
        let mut offset = Vec3::zero();

        for (i, child) in children.iter().enumerate() {
            let bounds = tree.positioned_bounds_of(child).strip_pos();
            tree.move_parent_and_descendants_by(child, offset);

            let gap = if i + 1 == children.len() { 0.0 } else { spacing };
            offset[axis] += bounds.axis_length(axis) + gap;
        }
    }

    /// Centres the whole chain within the explicit axis length.
    fn center_within_axis_length(&self, children: &[Path], tree: &mut RenderTree, axis: Axis) {
        if children.is_empty() {
            return;
        }
        let mut total = Bounds::default();
        for child in children {
            total += tree.positioned_bounds_of(child);
        }

        let remaining = self.size.axis_length(axis) - total.axis_length(axis);
        let mut offset = Vec3::zero();
        offset[axis] = remaining / 2.0;
        for child in children {
            tree.move_parent_and_descendants_by(child, offset);
        }
    }

    /// Aligns children across the axes perpendicular to the layout axis,
    /// against the same bounds the summary geometry reports: the measured
    /// extent of the chain, overridden by explicitly-set size lengths.
    fn align_children(
        &self,
        children: &[Path],
        tree: &mut RenderTree,
        axis: Axis,
        reference: &Bounds,
    ) {
        let perpendicular: &[Axis] = match axis {
            Axis::X => &[Axis::Z],
            Axis::Y => &[Axis::X, Axis::Z],
            Axis::Z => &[Axis::X],
        };
        let alignment = self.align.alignment();

        for child in children {
            let child_bounds = tree.positioned_bounds_of(child);
            let mut offset = Vec3::zero();
            for &perp in perpendicular {
                offset[perp] = alignment_offset(
                    alignment,
                    reference.base()[perp],
                    reference.axis_length(perp),
                    child_bounds.base()[perp],
                    child_bounds.axis_length(perp),
                );
            }
            tree.move_parent_and_descendants_by(child, offset);
        }
    }

    /// Union of the children's own geometries, with explicitly-set size
    /// lengths overriding the measured extents.
    fn bounds_with_provided_lengths(&self, children: &[Path], tree: &mut RenderTree) -> Bounds {
        let mut total = Bounds::default();
        for child in children {
            if let Some(geometry) = tree.get(child) {
                total += geometry.positioned_bounds();
            }
        }

        let base = total.base();
        let mut end = total.end();
        if !self.size.width_is_defaulted() {
            end.x = base.x + self.size.width();
        }
        if !self.size.height_is_defaulted() {
            end.y = base.y + self.size.height();
        }
        if !self.size.depth_is_defaulted() {
            end.z = base.z + self.size.depth();
        }
        Bounds::new(base, end)
    }

    pub fn update_from_attributes(&mut self, attributes: &AttributeMap) -> Result<()> {
        self.size.update_from_attributes(attributes)?;
        self.axis.update_from_attributes(attributes)?;
        self.spacing.update_from_attributes(attributes)?;
        self.align.update_from_attributes(attributes)
    }

    pub fn attributes(&self) -> AttributeMap {
        let mut attributes = self.size.attributes();
        attributes.extend(self.axis.attributes());
        attributes.extend(self.spacing.attributes());
        attributes.extend(self.align.attributes());
        attributes
    }

    pub fn update_ancestor_values(&mut self, ancestors: &mut AncestorValues) -> Result<()> {
        self.size.update_ancestor_values(ancestors)?;
        self.axis.update_ancestor_values(ancestors)?;
        self.spacing.update_ancestor_values(ancestors)?;
        self.align.update_ancestor_values(ancestors)
    }
}

fn alignment_offset(
    alignment: Alignment,
    reference_base: f32,
    reference_length: f32,
    child_base: f32,
    child_length: f32,
) -> f32 {
    match alignment {
        Alignment::Left => reference_base - child_base,
        Alignment::Center => {
            (reference_base + reference_length / 2.0) - (child_base + child_length / 2.0)
        }
        Alignment::Right => (reference_base + reference_length) - (child_base + child_length),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn box_geometry(w: f32, h: f32, d: f32) -> Geometry {
        Geometry::new(
            vec![Vec3::zero(), Vec3::new(w, h, d)],
            Vec::new(),
            Vec3::zero(),
        )
    }

    fn three_boxes(tree: &mut RenderTree, path: &Path) {
        tree.update(&path.join("a"), box_geometry(1.0, 1.0, 1.0));
        tree.update(&path.join("b"), box_geometry(2.0, 2.0, 2.0));
        tree.update(&path.join("c"), box_geometry(1.0, 1.0, 1.0));
    }

    #[test]
    fn chains_children_along_x_with_center_align() {
        let mut element = JuxtaposeElement::new();
        element.axis.set_axis(Axis::X);
        element.align.set_alignment(Alignment::Center);

        let mut tree = RenderTree::new();
        let path = Path::parse(".row").unwrap();
        three_boxes(&mut tree, &path);

        element.render(&path, &mut tree).unwrap();

        // The chain's z extent is 0..2 (from the middle box); the small
        // boxes move to share its centre line.
        assert_eq!(tree.get(&path.join("a")).unwrap().pos(), Vec3::new(0.0, 0.0, 0.5));
        assert_eq!(tree.get(&path.join("b")).unwrap().pos(), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(tree.get(&path.join("c")).unwrap().pos(), Vec3::new(3.0, 0.0, 0.5));
        for name in ["a", "b", "c"] {
            let bounds = tree.get(&path.join(name)).unwrap().positioned_bounds();
            assert_eq!(bounds.center().z, 1.0);
        }
    }

    #[test]
    fn center_align_uses_the_measured_extent() {
        let mut element = JuxtaposeElement::new();
        element.axis.set_axis(Axis::Z);
        element.align.set_alignment(Alignment::Center);

        let mut tree = RenderTree::new();
        let path = Path::parse(".column").unwrap();
        tree.update(&path.join("narrow"), box_geometry(1.0, 1.0, 1.0));
        tree.update(&path.join("wide"), box_geometry(3.0, 1.0, 1.0));

        element.render(&path, &mut tree).unwrap();

        // Centring is against the chain's measured 3-wide extent, not the
        // defaulted unit size.
        assert_eq!(tree.get(&path.join("narrow")).unwrap().pos(), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(tree.get(&path.join("wide")).unwrap().pos(), Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn spacing_separates_children() {
        let mut element = JuxtaposeElement::new();
        element.spacing.set_spacing(0.5);

        let mut tree = RenderTree::new();
        let path = Path::parse(".row").unwrap();
        tree.update(&path.join("a"), box_geometry(1.0, 1.0, 1.0));
        tree.update(&path.join("b"), box_geometry(1.0, 1.0, 1.0));

        element.render(&path, &mut tree).unwrap();
        assert_eq!(tree.get(&path.join("b")).unwrap().pos().x, 1.5);
    }

    #[test]
    fn summary_geometry_is_not_drawable() {
        let element = JuxtaposeElement::new();
        let mut tree = RenderTree::new();
        let path = Path::parse(".row").unwrap();
        tree.update(&path.join("a"), box_geometry(1.0, 1.0, 1.0));

        element.render(&path, &mut tree).unwrap();
        let summary = tree.get(&path).unwrap();
        assert!(!summary.should_draw());
        assert_eq!(summary.bounds().lengths(), (1.0, 1.0, 1.0));
    }

    #[test]
    fn chain_centres_within_explicit_axis_length() {
        let mut element = JuxtaposeElement::new();
        element.size.set_width(10.0);

        let mut tree = RenderTree::new();
        let path = Path::parse(".row").unwrap();
        tree.update(&path.join("a"), box_geometry(2.0, 1.0, 1.0));
        tree.update(&path.join("b"), box_geometry(2.0, 1.0, 1.0));

        element.render(&path, &mut tree).unwrap();
        // 4 of content centred in 10 leaves 3 on each side.
        assert_eq!(tree.get(&path.join("a")).unwrap().pos().x, 3.0);
        assert_eq!(tree.get(&path.join("b")).unwrap().pos().x, 5.0);
        // The summary spans the provided width.
        assert_eq!(tree.get(&path).unwrap().bounds().width(), 10.0);
    }

    #[test]
    fn vertical_axis_aligns_both_ground_axes() {
        let mut element = JuxtaposeElement::new();
        element.axis.set_axis(Axis::Y);
        element.align.set_alignment(Alignment::Left);

        let mut tree = RenderTree::new();
        let path = Path::parse(".stack").unwrap();
        let mut shifted = box_geometry(1.0, 1.0, 1.0);
        shifted.set_pos(Vec3::new(4.0, 0.0, 4.0));
        tree.update(&path.join("a"), shifted);
        tree.update(&path.join("b"), box_geometry(1.0, 1.0, 1.0));

        element.render(&path, &mut tree).unwrap();
        // Left-align pulls both children to the union base on X and Z.
        let a = tree.get(&path.join("a")).unwrap().pos();
        let b = tree.get(&path.join("b")).unwrap().pos();
        assert_eq!((a.x, a.z), (0.0, 0.0));
        assert_eq!((b.x, b.z), (0.0, 0.0));
        assert_eq!(b.y, 1.0);
    }
}
