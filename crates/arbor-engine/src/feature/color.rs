use crate::attr::cell::{ColorCell, UnitIntervalCell};
use crate::attr::{parse_float_attribute, AncestorValue, AncestorValues, AttributeMap};
use crate::coords::UnitInterval;
use crate::error::Result;
use crate::feature::Feature;
use crate::paint::Rgba;

/// Base colour plus a darkening factor.
#[derive(Debug, Clone)]
pub struct ColorFeature {
    color: ColorCell,
    darkness: UnitIntervalCell,
}

impl Default for ColorFeature {
    fn default() -> Self {
        Self {
            color: ColorCell::new("color", "c", Rgba::BLACK),
            darkness: UnitIntervalCell::new("darkness", "darkness", UnitInterval::new(0.0)),
        }
    }
}

impl ColorFeature {
    pub fn set_color(&mut self, color: Rgba) {
        self.color.set(color);
    }

    pub fn color(&self) -> Rgba {
        self.color.value()
    }

    pub fn set_darkness(&mut self, darkness: f32) {
        self.darkness.set(UnitInterval::new(darkness));
    }

    pub fn darkness(&self) -> f32 {
        self.darkness.value().value()
    }

    /// The colour as drawn: base colour at `opacity`, darkened by the
    /// darkness factor.
    pub fn compute_color(&self, opacity: f32) -> Rgba {
        let mut color = self.color();
        color.set_opacity(opacity);
        color.darken_by(self.darkness());
        color
    }
}

impl Feature for ColorFeature {
    fn update_from_attributes(&mut self, attributes: &AttributeMap) -> Result<()> {
        for (name, text) in attributes {
            if self.color.matches(name) {
                self.color.set(Rgba::parse(text)?);
            } else if self.darkness.matches(name) {
                self.darkness
                    .set(UnitInterval::new(parse_float_attribute(name, text)?));
            }
        }
        Ok(())
    }

    fn attributes(&self) -> AttributeMap {
        AttributeMap::from([
            ("color".to_owned(), self.color().to_string()),
            ("darkness".to_owned(), self.darkness().to_string()),
        ])
    }

    fn update_ancestor_values(&mut self, ancestors: &mut AncestorValues) -> Result<()> {
        ancestors.insert_cell(&self.color, AncestorValue::Color);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compute_color_applies_opacity_then_darkness() {
        let mut feature = ColorFeature::default();
        feature.set_color(Rgba::opaque(200, 100, 50));
        feature.set_darkness(0.5);
        let color = feature.compute_color(0.5);
        assert_eq!((color.r, color.g, color.b), (100, 50, 25));
        assert_eq!(color.a, 127);
    }

    #[test]
    fn parses_palette_and_darkness() {
        let mut feature = ColorFeature::default();
        let attrs = AttributeMap::from([
            ("c".to_owned(), "blue4".to_owned()),
            ("darkness".to_owned(), "0.25".to_owned()),
        ]);
        feature.update_from_attributes(&attrs).unwrap();
        assert_eq!(feature.color(), Rgba::opaque(77, 171, 247));
        assert_eq!(feature.darkness(), 0.25);
    }

    #[test]
    fn bad_color_is_an_error() {
        let mut feature = ColorFeature::default();
        let attrs = AttributeMap::from([("color".to_owned(), "nope".to_owned())]);
        assert!(feature.update_from_attributes(&attrs).is_err());
    }
}
