use crate::attr::cell::{BoolCell, FloatCell};
use crate::attr::{parse_float_attribute, AncestorValue, AncestorValues, AttributeMap};
use crate::error::Result;
use crate::feature::Feature;

/// Camera-distance visibility window, plus flags that let an element clamp
/// its descendants' distances up to its own.
#[derive(Debug, Clone)]
pub struct HideShowFeature {
    hide_distance: FloatCell,
    show_distance: FloatCell,
    clamp_descendant_hide_distances: BoolCell,
    clamp_descendant_show_distances: BoolCell,
}

impl Default for HideShowFeature {
    fn default() -> Self {
        Self {
            hide_distance: FloatCell::new("hide_distance", "hide_distance", 0.0),
            show_distance: FloatCell::new("show_distance", "show_distance", f32::INFINITY),
            clamp_descendant_hide_distances: BoolCell::new(
                "clamp_descendant_hide_distances",
                "clamp_descendant_hide_distances",
                false,
            ),
            clamp_descendant_show_distances: BoolCell::new(
                "clamp_descendant_show_distances",
                "clamp_descendant_show_distances",
                false,
            ),
        }
    }
}

impl HideShowFeature {
    pub fn set_hide_distance(&mut self, distance: f32) {
        self.hide_distance.set(distance);
    }

    pub fn hide_distance(&self) -> f32 {
        self.hide_distance.value()
    }

    pub fn set_show_distance(&mut self, distance: f32) {
        self.show_distance.set(distance);
    }

    pub fn show_distance(&self) -> f32 {
        self.show_distance.value()
    }

    pub fn hide_and_show_distances(&self) -> (f32, f32) {
        (self.hide_distance(), self.show_distance())
    }

    pub fn set_clamp_descendant_hide_distances(&mut self, clamp: bool) {
        self.clamp_descendant_hide_distances.set(clamp);
    }

    pub fn clamp_descendant_hide_distances(&self) -> bool {
        self.clamp_descendant_hide_distances.value()
    }

    pub fn set_clamp_descendant_show_distances(&mut self, clamp: bool) {
        self.clamp_descendant_show_distances.set(clamp);
    }

    pub fn clamp_descendant_show_distances(&self) -> bool {
        self.clamp_descendant_show_distances.value()
    }
}

impl Feature for HideShowFeature {
    fn update_from_attributes(&mut self, attributes: &AttributeMap) -> Result<()> {
        for (name, text) in attributes {
            if self.hide_distance.matches(name) {
                self.hide_distance.set(parse_float_attribute(name, text)?);
            } else if self.show_distance.matches(name) {
                self.show_distance.set(parse_float_attribute(name, text)?);
            } else if self.clamp_descendant_hide_distances.matches(name) {
                self.clamp_descendant_hide_distances.set(text == "true");
            } else if self.clamp_descendant_show_distances.matches(name) {
                self.clamp_descendant_show_distances.set(text == "true");
            }
        }
        Ok(())
    }

    fn attributes(&self) -> AttributeMap {
        AttributeMap::from([
            ("hide_distance".to_owned(), self.hide_distance().to_string()),
            ("show_distance".to_owned(), self.show_distance().to_string()),
        ])
    }

    fn update_ancestor_values(&mut self, ancestors: &mut AncestorValues) -> Result<()> {
        ancestors.insert_cell(&self.hide_distance, AncestorValue::Float);
        ancestors.insert_cell(&self.show_distance, AncestorValue::Float);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_keep_everything_visible() {
        let feature = HideShowFeature::default();
        assert_eq!(feature.hide_distance(), 0.0);
        assert_eq!(feature.show_distance(), f32::INFINITY);
        assert!(!feature.clamp_descendant_hide_distances());
    }

    #[test]
    fn parses_distances_and_flags() {
        let mut feature = HideShowFeature::default();
        let attrs = AttributeMap::from([
            ("hide_distance".to_owned(), "10".to_owned()),
            ("clamp_descendant_hide_distances".to_owned(), "true".to_owned()),
        ]);
        feature.update_from_attributes(&attrs).unwrap();
        assert_eq!(feature.hide_distance(), 10.0);
        assert!(feature.clamp_descendant_hide_distances());
    }
}
