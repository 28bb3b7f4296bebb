use crate::attr::cell::UnitIntervalCell;
use crate::attr::{parse_float_attribute, AncestorValue, AncestorValues, AttributeMap};
use crate::coords::UnitInterval;
use crate::error::Result;
use crate::feature::Feature;

/// Opacity in `[0, 1]`.
#[derive(Debug, Clone)]
pub struct OpticsFeature {
    opacity: UnitIntervalCell,
}

impl Default for OpticsFeature {
    fn default() -> Self {
        Self {
            opacity: UnitIntervalCell::new("opacity", "o", UnitInterval::new(1.0)),
        }
    }
}

impl OpticsFeature {
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity.set(UnitInterval::new(opacity));
    }

    pub fn opacity(&self) -> f32 {
        self.opacity.value().value()
    }
}

impl Feature for OpticsFeature {
    fn update_from_attributes(&mut self, attributes: &AttributeMap) -> Result<()> {
        for (name, text) in attributes {
            if self.opacity.matches(name) {
                self.opacity
                    .set(UnitInterval::new(parse_float_attribute(name, text)?));
            }
        }
        Ok(())
    }

    fn attributes(&self) -> AttributeMap {
        AttributeMap::from([("opacity".to_owned(), self.opacity().to_string())])
    }

    fn update_ancestor_values(&mut self, ancestors: &mut AncestorValues) -> Result<()> {
        ancestors.insert_cell(&self.opacity, AncestorValue::UnitInterval);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opacity_clamps() {
        let mut optics = OpticsFeature::default();
        optics.set_opacity(1.5);
        assert_eq!(optics.opacity(), 1.0);
    }
}
