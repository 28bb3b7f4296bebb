use crate::attr::cell::RotationCell;
use crate::attr::{parse_float_attribute, AncestorValue, AncestorValues, AttributeMap};
use crate::coords::Rotation;
use crate::error::Result;
use crate::feature::Feature;

/// A rotation, settable as a flat `angle`/`degrees` (yaw only) or as
/// explicit `yaw`/`pitch`/`roll` components.
#[derive(Debug, Clone)]
pub struct RotateFeature {
    rotation: RotationCell,
}

impl Default for RotateFeature {
    fn default() -> Self {
        Self {
            rotation: RotationCell::new("rotation", "rotation", Rotation::none()),
        }
    }
}

impl RotateFeature {
    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation.set(rotation);
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation.value()
    }
}

impl Feature for RotateFeature {
    fn update_from_attributes(&mut self, attributes: &AttributeMap) -> Result<()> {
        // `angle`/`degrees` wins and means a flat yaw rotation.
        for key in ["angle", "degrees"] {
            if let Some(text) = attributes.get(key) {
                let degrees = parse_float_attribute(key, text)?;
                self.rotation.set(Rotation::from_yaw(degrees));
                return Ok(());
            }
        }

        let current = self.rotation.value();
        let mut yaw = current.yaw();
        let mut pitch = current.pitch();
        let mut roll = current.roll();
        let mut any = false;
        for (slot, key) in [(&mut yaw, "yaw"), (&mut pitch, "pitch"), (&mut roll, "roll")] {
            if let Some(text) = attributes.get(key) {
                *slot = parse_float_attribute(key, text)?;
                any = true;
            }
        }
        if any {
            self.rotation.set(Rotation::new(yaw, pitch, roll));
        }
        Ok(())
    }

    fn attributes(&self) -> AttributeMap {
        let rotation = self.rotation();
        let mut attributes = AttributeMap::new();
        if rotation.yaw() != 0.0 {
            attributes.insert("yaw".to_owned(), rotation.yaw().to_string());
        }
        if rotation.pitch() != 0.0 {
            attributes.insert("pitch".to_owned(), rotation.pitch().to_string());
        }
        if rotation.roll() != 0.0 {
            attributes.insert("roll".to_owned(), rotation.roll().to_string());
        }
        attributes
    }

    fn update_ancestor_values(&mut self, ancestors: &mut AncestorValues) -> Result<()> {
        ancestors.insert_cell(&self.rotation, AncestorValue::Rotation);
        Ok(())
    }
}
