use core::fmt;

use crate::coords::UnitInterval;
use crate::error::{Error, Result};
use crate::paint::palette;

/// 8-bit RGBA colour.
///
/// Opacity is exposed as a float in `[0, 1]` and stored as the alpha byte.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);
    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);

    #[inline]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[inline]
    pub fn with_opacity(r: u8, g: u8, b: u8, opacity: f32) -> Self {
        Self { r, g, b, a: opacity_to_byte(opacity) }
    }

    #[inline]
    pub fn opacity(&self) -> f32 {
        f32::from(self.a) / 255.0
    }

    #[inline]
    pub fn set_opacity(&mut self, opacity: f32) {
        self.a = opacity_to_byte(opacity);
    }

    /// Scales the RGB channels by `1 - darkness`.
    pub fn darken_by(&mut self, darkness: f32) {
        let keep = 1.0 - UnitInterval::new(darkness).value();
        self.r = (f32::from(self.r) * keep) as u8;
        self.g = (f32::from(self.g) * keep) as u8;
        self.b = (f32::from(self.b) * keep) as u8;
    }

    /// Parses a colour literal: a palette name (`"teal3"`), or channel form
    /// `RGBA(r, g, b[, a])` / `(r, g, b[, a])` with 0–255 integer channels
    /// and a float alpha.
    pub fn parse(text: &str) -> Result<Rgba> {
        Self::parse_with_opacity(text, 1.0)
    }

    /// Like [`Rgba::parse`] but applies `opacity` when the literal does not
    /// carry its own alpha.
    pub fn parse_with_opacity(text: &str, opacity: f32) -> Result<Rgba> {
        if let Some((r, g, b)) = palette::lookup(text) {
            return Ok(Rgba::with_opacity(r, g, b, opacity));
        }

        let invalid = || Error::InvalidColor(format!("not a palette name or RGBA literal: '{text}'"));

        let inner = text
            .strip_prefix("RGBA")
            .unwrap_or(text)
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(invalid)?;

        let channels: Vec<&str> = inner.split(',').map(str::trim).collect();
        if channels.len() != 3 && channels.len() != 4 {
            return Err(invalid());
        }

        let mut rgb = [0u8; 3];
        for (slot, channel) in rgb.iter_mut().zip(&channels) {
            *slot = channel.parse::<u8>().map_err(|_| invalid())?;
        }

        let opacity = match channels.get(3) {
            Some(alpha) => alpha.parse::<f32>().map_err(|_| invalid())?,
            None => opacity,
        };
        Ok(Rgba::with_opacity(rgb[0], rgb[1], rgb[2], opacity))
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Rgba::BLACK
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.r, self.g, self.b, self.opacity())
    }
}

#[inline]
fn opacity_to_byte(opacity: f32) -> u8 {
    (UnitInterval::new(opacity).value() * 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_palette_name() {
        assert_eq!(Rgba::parse("red5").unwrap(), Rgba::opaque(255, 107, 107));
    }

    #[test]
    fn parse_rgba_literal() {
        assert_eq!(Rgba::parse("RGBA(1, 2, 3)").unwrap(), Rgba::opaque(1, 2, 3));
        assert_eq!(
            Rgba::parse("(10,20,30, 0.5)").unwrap(),
            Rgba::with_opacity(10, 20, 30, 0.5)
        );
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Rgba::parse("bleu5").is_err());
        assert!(Rgba::parse("RGBA(1, 2)").is_err());
        assert!(Rgba::parse("(256, 0, 0)").is_err());
        assert!(Rgba::parse("(1, 2, 3").is_err());
    }

    #[test]
    fn darken_scales_rgb_only() {
        let mut c = Rgba::opaque(200, 100, 50);
        c.darken_by(0.5);
        assert_eq!(c, Rgba::opaque(100, 50, 25));
    }

    #[test]
    fn opacity_round_trip() {
        let mut c = Rgba::BLACK;
        c.set_opacity(0.0);
        assert_eq!(c.a, 0);
        c.set_opacity(2.0); // clamped
        assert_eq!(c.a, 255);
    }
}
