use crate::attr::{AncestorValues, AttributeMap, RelativeFloat};
use crate::error::Result;
use crate::feature::Feature;

/// Gap inserted between children by layout elements.
#[derive(Debug, Clone)]
pub struct SpacingFeature {
    spacing: RelativeFloat,
}

impl Default for SpacingFeature {
    fn default() -> Self {
        Self {
            spacing: RelativeFloat::new("spacing", "s", 0.0),
        }
    }
}

impl SpacingFeature {
    pub fn set_spacing(&mut self, spacing: f32) {
        self.spacing.set(spacing);
    }

    pub fn spacing(&self) -> f32 {
        self.spacing.value()
    }
}

impl Feature for SpacingFeature {
    fn update_from_attributes(&mut self, attributes: &AttributeMap) -> Result<()> {
        for (name, text) in attributes {
            if self.spacing.matches(name) {
                self.spacing.parse_from(text)?;
            }
        }
        Ok(())
    }

    fn attributes(&self) -> AttributeMap {
        AttributeMap::from([("spacing".to_owned(), self.spacing.display_string())])
    }

    fn update_ancestor_values(&mut self, ancestors: &mut AncestorValues) -> Result<()> {
        self.spacing.update_ancestor_values(ancestors)
    }
}
