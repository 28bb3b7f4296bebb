use std::collections::BTreeMap;

use crate::attr::{
    topological_sort_with_aliases, AncestorValues, AttributeMap, RelativeFloat,
};
use crate::coords::Axis;
use crate::error::Result;
use crate::feature::Feature;

pub const DEFAULT_WIDTH: f32 = 1.0;
pub const DEFAULT_HEIGHT: f32 = 1.0;
pub const DEFAULT_DEPTH: f32 = 1.0;

/// Width/height/depth, each a [`RelativeFloat`] so one axis can reference
/// another (`height="0.5width"`) or an ancestor's value.
#[derive(Debug, Clone)]
pub struct SizeFeature {
    width: RelativeFloat,
    height: RelativeFloat,
    depth: RelativeFloat,
}

impl Default for SizeFeature {
    fn default() -> Self {
        Self {
            width: RelativeFloat::new("width", "w", DEFAULT_WIDTH),
            height: RelativeFloat::new("height", "h", DEFAULT_HEIGHT),
            depth: RelativeFloat::new("depth", "d", DEFAULT_DEPTH),
        }
    }
}

impl SizeFeature {
    pub fn set_width(&mut self, width: f32) {
        self.width.set(width.max(0.0));
    }

    pub fn width(&self) -> f32 {
        self.width.value()
    }

    pub fn width_is_defaulted(&self) -> bool {
        self.width.is_defaulted()
    }

    pub fn set_height(&mut self, height: f32) {
        self.height.set(height.max(0.0));
    }

    pub fn height(&self) -> f32 {
        self.height.value()
    }

    pub fn height_is_defaulted(&self) -> bool {
        self.height.is_defaulted()
    }

    pub fn set_depth(&mut self, depth: f32) {
        self.depth.set(depth.max(0.0));
    }

    pub fn depth(&self) -> f32 {
        self.depth.value()
    }

    pub fn depth_is_defaulted(&self) -> bool {
        self.depth.is_defaulted()
    }

    pub fn lengths(&self) -> (f32, f32, f32) {
        (self.width(), self.height(), self.depth())
    }

    pub fn axis_length(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.width(),
            Axis::Y => self.height(),
            Axis::Z => self.depth(),
        }
    }

    pub fn axis_length_is_defaulted(&self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.width_is_defaulted(),
            Axis::Y => self.height_is_defaulted(),
            Axis::Z => self.depth_is_defaulted(),
        }
    }

    fn values_mut(&mut self) -> [&mut RelativeFloat; 3] {
        [&mut self.width, &mut self.height, &mut self.depth]
    }
}

impl Feature for SizeFeature {
    fn update_from_attributes(&mut self, attributes: &AttributeMap) -> Result<()> {
        for (name, text) in attributes {
            for value in self.values_mut() {
                if value.matches(name) {
                    value.parse_from(text)?;
                }
            }
        }
        Ok(())
    }

    fn attributes(&self) -> AttributeMap {
        AttributeMap::from([
            ("width".to_owned(), self.width.display_string()),
            ("height".to_owned(), self.height.display_string()),
            ("depth".to_owned(), self.depth.display_string()),
        ])
    }

    fn update_ancestor_values(&mut self, ancestors: &mut AncestorValues) -> Result<()> {
        // The three axes may reference each other; resolve in dependency
        // order so `width="2height"` sees the computed height.
        let values = [&self.width, &self.height, &self.depth];
        let dependencies: BTreeMap<String, Option<String>> = values
            .iter()
            .map(|v| (v.name().to_owned(), v.relative_name().map(str::to_owned)))
            .collect();
        let aliases: BTreeMap<String, String> = values
            .iter()
            .map(|v| (v.abbreviation().to_owned(), v.name().to_owned()))
            .collect();

        let ordered = topological_sort_with_aliases(&dependencies, &aliases)?;
        for name in &ordered {
            for value in self.values_mut() {
                if value.name() == name {
                    value.update_ancestor_values(ancestors)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::AncestorValue;
    use crate::error::Error;

    fn attrs(pairs: &[(&str, &str)]) -> AttributeMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn abbreviations_are_accepted() {
        let mut size = SizeFeature::default();
        size.update_from_attributes(&attrs(&[("w", "4"), ("h", "2"), ("d", "0.5")]))
            .unwrap();
        assert_eq!(size.lengths(), (4.0, 2.0, 0.5));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut size = SizeFeature::default();
        size.update_from_attributes(&attrs(&[("color", "red5"), ("width", "3")]))
            .unwrap();
        assert_eq!(size.width(), 3.0);
        assert!(size.height_is_defaulted());
    }

    #[test]
    fn cross_reference_resolves_in_dependency_order() {
        let mut size = SizeFeature::default();
        size.update_from_attributes(&attrs(&[("height", "6"), ("width", "0.5height")]))
            .unwrap();
        let mut av = AncestorValues::new();
        size.update_ancestor_values(&mut av).unwrap();
        assert_eq!(size.width(), 3.0);
        assert_eq!(av.get_float("width").unwrap(), 3.0);
    }

    #[test]
    fn cross_reference_through_abbreviation() {
        let mut size = SizeFeature::default();
        size.update_from_attributes(&attrs(&[("height", "6"), ("width", "0.5h")]))
            .unwrap();
        let mut av = AncestorValues::new();
        size.update_ancestor_values(&mut av).unwrap();
        assert_eq!(size.width(), 3.0);
    }

    #[test]
    fn cycle_is_detected() {
        let mut size = SizeFeature::default();
        size.update_from_attributes(&attrs(&[("width", "height"), ("height", "width")]))
            .unwrap();
        let mut av = AncestorValues::new();
        assert!(matches!(
            size.update_ancestor_values(&mut av),
            Err(Error::AttributeCycle(_))
        ));
    }

    #[test]
    fn percentage_of_ancestor() {
        let mut size = SizeFeature::default();
        size.update_from_attributes(&attrs(&[("width", "90%")])).unwrap();
        let mut av = AncestorValues::new();
        av.insert("width", "w", AncestorValue::Float(200.0));
        size.update_ancestor_values(&mut av).unwrap();
        assert_eq!(size.width(), 180.0);
    }

    #[test]
    fn setters_clamp_to_zero() {
        let mut size = SizeFeature::default();
        size.set_width(-3.0);
        assert_eq!(size.width(), 0.0);
        assert!(!size.width_is_defaulted());
    }
}
