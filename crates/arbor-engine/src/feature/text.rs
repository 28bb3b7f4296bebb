use crate::attr::cell::StringCell;
use crate::attr::{AncestorValue, AncestorValues, AttributeMap};
use crate::error::Result;
use crate::feature::Feature;

/// A text label carried on the geometry.
#[derive(Debug, Clone)]
pub struct TextFeature {
    text: StringCell,
}

impl Default for TextFeature {
    fn default() -> Self {
        Self {
            text: StringCell::new("text", "text", String::new()),
        }
    }
}

impl TextFeature {
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text.set(text.into());
    }

    pub fn text(&self) -> &str {
        self.text.get()
    }
}

impl Feature for TextFeature {
    fn update_from_attributes(&mut self, attributes: &AttributeMap) -> Result<()> {
        if let Some(text) = attributes.get("text") {
            self.text.set(text.clone());
        }
        Ok(())
    }

    fn attributes(&self) -> AttributeMap {
        AttributeMap::from([("text".to_owned(), self.text().to_owned())])
    }

    fn update_ancestor_values(&mut self, ancestors: &mut AncestorValues) -> Result<()> {
        ancestors.insert_cell(&self.text, AncestorValue::String);
        Ok(())
    }
}
