use crate::attr::{AncestorValues, AttributeMap};
use crate::error::Result;
use crate::feature::{Feature, SizeFeature};

/// Carries a size for ancestors to reference but renders nothing and leaves
/// its children where they are.
#[derive(Debug, Clone, Default)]
pub struct NoLayoutElement {
    pub size: SizeFeature,
}

impl NoLayoutElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_attributes(attributes: &AttributeMap) -> Result<Self> {
        let mut element = Self::new();
        element.update_from_attributes(attributes)?;
        Ok(element)
    }

    pub fn update_from_attributes(&mut self, attributes: &AttributeMap) -> Result<()> {
        self.size.update_from_attributes(attributes)
    }

    pub fn attributes(&self) -> AttributeMap {
        self.size.attributes()
    }

    pub fn update_ancestor_values(&mut self, ancestors: &mut AncestorValues) -> Result<()> {
        self.size.update_ancestor_values(ancestors)
    }
}
