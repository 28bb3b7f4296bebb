use crate::attr::{AncestorValues, AttributeMap};
use crate::coords::Axis;
use crate::error::Result;
use crate::feature::{AxisFeature, Feature, SizeFeature};

/// Size constraints plus an optional axis pick, shared by the elements that
/// scale a subtree to fit a target size.
#[derive(Debug, Clone, Default)]
pub struct ScaleFeatures {
    pub size: SizeFeature,
    pub axis: AxisFeature,
}

impl ScaleFeatures {
    /// The uniform factor that fits an actual extent into the constrained
    /// target lengths.
    ///
    /// Axes left at their default are unconstrained and do not limit the
    /// factor; degenerate actual extents are skipped the same way. With an
    /// explicit axis only that axis's factor is used, otherwise the minimum
    /// across constrained axes wins. An entirely unconstrained target keeps
    /// the subtree at scale 1.
    pub fn compute_scale_factor(&self, width: f32, height: f32, depth: f32) -> f32 {
        let unconstrained_width = self.size.width_is_defaulted();
        let unconstrained_height = self.size.height_is_defaulted();
        let unconstrained_depth = self.size.depth_is_defaulted();
        if unconstrained_width && unconstrained_height && unconstrained_depth {
            return 1.0;
        }

        let (target_width, target_height, target_depth) = self.size.lengths();
        let width_factor = if unconstrained_width || !width.is_normal() {
            f32::INFINITY
        } else {
            target_width / width
        };
        let height_factor = if unconstrained_height || !height.is_normal() {
            f32::INFINITY
        } else {
            target_height / height
        };
        let depth_factor = if unconstrained_depth || !depth.is_normal() {
            f32::INFINITY
        } else {
            target_depth / depth
        };

        if self.axis.axis_is_defaulted() {
            let factor = width_factor.min(height_factor).min(depth_factor);
            return if factor == f32::INFINITY { 1.0 } else { factor };
        }

        match self.axis.axis() {
            Axis::X => width_factor,
            Axis::Y => height_factor,
            Axis::Z => depth_factor,
        }
    }
}

impl Feature for ScaleFeatures {
    fn update_from_attributes(&mut self, attributes: &AttributeMap) -> Result<()> {
        self.size.update_from_attributes(attributes)?;
        self.axis.update_from_attributes(attributes)
    }

    fn attributes(&self) -> AttributeMap {
        let mut attributes = self.size.attributes();
        attributes.extend(self.axis.attributes());
        attributes
    }

    fn update_ancestor_values(&mut self, ancestors: &mut AncestorValues) -> Result<()> {
        self.size.update_ancestor_values(ancestors)?;
        self.axis.update_ancestor_values(ancestors)
    }
}
