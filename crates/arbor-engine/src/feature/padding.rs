use crate::attr::{AncestorValues, AttributeMap, RelativeFloat};
use crate::error::Result;
use crate::feature::Feature;

/// Padding added around children.
#[derive(Debug, Clone)]
pub struct PaddingFeature {
    padding: RelativeFloat,
}

impl Default for PaddingFeature {
    fn default() -> Self {
        Self {
            padding: RelativeFloat::new("padding", "p", 0.0),
        }
    }
}

impl PaddingFeature {
    pub fn set_padding(&mut self, padding: f32) {
        self.padding.set(padding);
    }

    pub fn padding(&self) -> f32 {
        self.padding.value()
    }
}

impl Feature for PaddingFeature {
    fn update_from_attributes(&mut self, attributes: &AttributeMap) -> Result<()> {
        for (name, text) in attributes {
            if self.padding.matches(name) {
                self.padding.parse_from(text)?;
            }
        }
        Ok(())
    }

    fn attributes(&self) -> AttributeMap {
        AttributeMap::from([("padding".to_owned(), self.padding.display_string())])
    }

    fn update_ancestor_values(&mut self, ancestors: &mut AncestorValues) -> Result<()> {
        self.padding.update_ancestor_values(ancestors)
    }
}
