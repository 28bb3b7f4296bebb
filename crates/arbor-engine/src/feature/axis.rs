use crate::attr::cell::AxisCell;
use crate::attr::{AncestorValue, AncestorValues, AttributeMap};
use crate::coords::Axis;
use crate::error::Result;
use crate::feature::Feature;

/// The axis a layout runs along.
#[derive(Debug, Clone)]
pub struct AxisFeature {
    axis: AxisCell,
}

impl Default for AxisFeature {
    fn default() -> Self {
        Self {
            axis: AxisCell::new("axis", "axis", Axis::X),
        }
    }
}

impl AxisFeature {
    pub fn set_axis(&mut self, axis: Axis) {
        self.axis.set(axis);
    }

    pub fn axis(&self) -> Axis {
        self.axis.value()
    }

    pub fn axis_is_defaulted(&self) -> bool {
        self.axis.is_defaulted()
    }
}

impl Feature for AxisFeature {
    fn update_from_attributes(&mut self, attributes: &AttributeMap) -> Result<()> {
        if let Some(text) = attributes.get("axis") {
            self.axis.set(Axis::parse(text)?);
        }
        Ok(())
    }

    fn attributes(&self) -> AttributeMap {
        AttributeMap::from([("axis".to_owned(), self.axis().to_string())])
    }

    fn update_ancestor_values(&mut self, ancestors: &mut AncestorValues) -> Result<()> {
        ancestors.insert_cell(&self.axis, AncestorValue::Axis);
        Ok(())
    }
}
