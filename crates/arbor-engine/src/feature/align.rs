use crate::attr::cell::AlignmentCell;
use crate::attr::{AncestorValue, AncestorValues, AttributeMap};
use crate::coords::Alignment;
use crate::error::Result;
use crate::feature::Feature;

/// Cross-axis alignment for layout elements.
#[derive(Debug, Clone)]
pub struct AlignFeature {
    alignment: AlignmentCell,
}

impl Default for AlignFeature {
    fn default() -> Self {
        Self {
            alignment: AlignmentCell::new("align", "align", Alignment::Center),
        }
    }
}

impl AlignFeature {
    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment.set(alignment);
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment.value()
    }

    pub fn alignment_is_defaulted(&self) -> bool {
        self.alignment.is_defaulted()
    }
}

impl Feature for AlignFeature {
    fn update_from_attributes(&mut self, attributes: &AttributeMap) -> Result<()> {
        if let Some(text) = attributes.get("align") {
            self.alignment.set(Alignment::parse(text)?);
        }
        Ok(())
    }

    fn attributes(&self) -> AttributeMap {
        AttributeMap::from([("align".to_owned(), self.alignment().to_string())])
    }

    fn update_ancestor_values(&mut self, ancestors: &mut AncestorValues) -> Result<()> {
        ancestors.insert_cell(&self.alignment, AncestorValue::Alignment);
        Ok(())
    }
}
