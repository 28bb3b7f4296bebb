use crate::attr::cell::UnitIntervalCell;
use crate::attr::{
    parse_float_attribute, AncestorValue, AncestorValues, AttributeMap, RelativeFloat,
};
use crate::coords::UnitInterval;
use crate::error::Result;
use crate::feature::Feature;

pub const DEFAULT_DETAIL: f32 = 0.5;

/// Radius and tessellation detail for round meshes.
#[derive(Debug, Clone)]
pub struct CircularFeature {
    radius: RelativeFloat,
    detail: UnitIntervalCell,
}

impl Default for CircularFeature {
    fn default() -> Self {
        Self {
            radius: RelativeFloat::new("radius", "r", 1.0),
            detail: UnitIntervalCell::new("detail", "detail", UnitInterval::new(DEFAULT_DETAIL)),
        }
    }
}

impl CircularFeature {
    pub fn set_radius(&mut self, radius: f32) {
        self.radius.set(radius);
    }

    pub fn radius(&self) -> f32 {
        self.radius.value()
    }

    pub fn set_detail(&mut self, detail: f32) {
        self.detail.set(UnitInterval::new(detail));
    }

    pub fn detail(&self) -> f32 {
        self.detail.value().value()
    }

    /// Slice count for the tessellator.
    ///
    /// `log10(sqrt(detail + 1)) * radius + 10`: grows gently with radius so
    /// maximum detail cannot blow up the slice count, and never drops below
    /// the 10 slices needed to still read as round.
    pub fn num_slices(&self) -> usize {
        ((self.detail() + 1.0).sqrt().log10() * self.radius() + 10.0) as usize
    }
}

impl Feature for CircularFeature {
    fn update_from_attributes(&mut self, attributes: &AttributeMap) -> Result<()> {
        for (name, text) in attributes {
            if self.radius.matches(name) {
                self.radius.parse_from(text)?;
            } else if self.detail.matches(name) {
                self.detail
                    .set(UnitInterval::new(parse_float_attribute(name, text)?));
            }
        }
        Ok(())
    }

    fn attributes(&self) -> AttributeMap {
        AttributeMap::from([
            ("radius".to_owned(), self.radius.display_string()),
            ("detail".to_owned(), self.detail().to_string()),
        ])
    }

    fn update_ancestor_values(&mut self, ancestors: &mut AncestorValues) -> Result<()> {
        self.radius.update_ancestor_values(ancestors)?;
        ancestors.insert_cell(&self.detail, AncestorValue::UnitInterval);
        Ok(())
    }
}
