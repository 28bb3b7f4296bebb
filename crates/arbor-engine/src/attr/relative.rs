use crate::attr::ancestors::{AncestorValue, AncestorValues};
use crate::attr::cell::FloatCell;
use crate::error::{Error, Result};

/// A float attribute that may be literal, a percentage of an ancestor value,
/// or a multiple of another named value.
///
/// The attribute grammar is `[+-]?[0-9]+(\.[0-9]+)?`, optionally followed by
/// a symbolic name, optionally suffixed by `%`:
///
/// - `10` — literal ten
/// - `2width` — twice the ancestor value `width`
/// - `90%` — 90% of the ancestor value with this attribute's own name
/// - `0.5height%` — half of `height`, as a percentage of the own value
#[derive(Debug, Clone, PartialEq)]
pub struct RelativeFloat {
    cell: FloatCell,
    multiplier: f32,
    is_percentage: bool,
    relative_name: Option<String>,
}

impl RelativeFloat {
    pub fn new(name: &'static str, abbreviation: &'static str, default: f32) -> Self {
        Self {
            cell: FloatCell::new(name, abbreviation, default),
            multiplier: 1.0,
            is_percentage: false,
            relative_name: None,
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.cell.name()
    }

    #[inline]
    pub fn abbreviation(&self) -> &'static str {
        self.cell.abbreviation()
    }

    /// The current (possibly cached-computed) value.
    #[inline]
    pub fn value(&self) -> f32 {
        self.cell.value()
    }

    #[inline]
    pub fn is_defaulted(&self) -> bool {
        self.cell.is_defaulted()
    }

    #[inline]
    pub fn is_relative(&self) -> bool {
        self.relative_name.is_some()
    }

    #[inline]
    pub fn relative_name(&self) -> Option<&str> {
        self.relative_name.as_deref()
    }

    #[inline]
    pub fn multiplier(&self) -> f32 {
        self.multiplier
    }

    #[inline]
    pub fn is_percentage(&self) -> bool {
        self.is_percentage
    }

    #[inline]
    pub fn matches(&self, attribute: &str) -> bool {
        self.cell.matches(attribute)
    }

    /// Sets a literal value, dropping any percentage/multiplier state.
    pub fn set(&mut self, value: f32) {
        self.cell.set(value);
        self.is_percentage = false;
        self.multiplier = 1.0;
    }

    /// Parses an attribute string per the grammar above.
    ///
    /// All-or-nothing: on error no state changes. Empty input is a no-op.
    pub fn parse_from(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }

        let (body, is_percentage) = match text.strip_suffix('%') {
            Some("") => {
                return Err(Error::InvalidAttributeValue(format!(
                    "percentage given without amount: '{text}'"
                )))
            }
            Some(stripped) => (stripped, true),
            None => (text, false),
        };

        let mut multiplier = 1.0f32;
        let mut rest = body;
        if body.starts_with(|c: char| c.is_ascii_digit() || c == '+' || c == '-') {
            let split = numeric_prefix_len(body);
            let number = body[..split].parse::<f32>().map_err(|_| {
                Error::InvalidAttributeValue(format!("expected a number in '{text}'"))
            })?;
            multiplier = number;
            rest = &body[split..];
        }

        if !rest.is_empty() {
            self.relative_name = Some(rest.to_owned());
            self.is_percentage = is_percentage;
            self.multiplier = multiplier;
            self.cell.mark_set();
        } else if is_percentage {
            self.is_percentage = true;
            self.multiplier = multiplier;
            self.cell.mark_set();
        } else {
            // A bare number is a literal.
            self.set(multiplier);
        }
        Ok(())
    }

    /// Evaluates against the ancestor values seen at this point of the
    /// render pass.
    pub fn resolve(&self, ancestors: &AncestorValues) -> Result<f32> {
        let mut value = match &self.relative_name {
            Some(name) => ancestors.get_float(name)? * self.multiplier,
            None if self.is_percentage => self.multiplier,
            None => self.cell.value() * self.multiplier,
        };

        if self.is_percentage {
            let own = ancestors.get_float(self.cell.name())?;
            value = own * (value / 100.0);
        }
        Ok(value)
    }

    /// Resolves, caches the computed value, and exports it (as a plain
    /// float) when this attribute has been explicitly set.
    pub fn update_ancestor_values(&mut self, ancestors: &mut AncestorValues) -> Result<()> {
        let computed = self.resolve(ancestors)?;
        self.cell.store_computed(computed);

        if self.cell.is_defaulted() {
            return Ok(());
        }
        ancestors.insert(
            self.cell.name(),
            self.cell.abbreviation(),
            AncestorValue::Float(computed),
        );
        Ok(())
    }

    /// The attribute-string form, parseable back by [`RelativeFloat::parse_from`].
    pub fn display_string(&self) -> String {
        let mut out = String::new();
        if let Some(name) = &self.relative_name {
            if self.multiplier != 1.0 {
                out.push_str(&self.multiplier.to_string());
            }
            out.push_str(name);
            if self.is_percentage {
                out.push('%');
            }
        } else if self.is_percentage {
            out.push_str(&self.multiplier.to_string());
            out.push('%');
        } else {
            out.push_str(&self.cell.value().to_string());
        }
        out
    }
}

/// Length of the leading `[+-]?[0-9]+(\.[0-9]+)?` run.
fn numeric_prefix_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        let mut j = i + 1;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > i + 1 {
            i = j;
        }
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    fn width() -> RelativeFloat {
        RelativeFloat::new("width", "w", 1.0)
    }

    // ── parsing ───────────────────────────────────────────────────────────

    #[test]
    fn literal_number() {
        let mut value = width();
        value.parse_from("10").unwrap();
        assert!(!value.is_relative());
        assert!(!value.is_percentage());
        assert_eq!(value.value(), 10.0);
        assert_eq!(value.resolve(&AncestorValues::new()).unwrap(), 10.0);
    }

    #[test]
    fn multiplier_and_name() {
        let mut value = width();
        value.parse_from("2width").unwrap();
        assert_eq!(value.multiplier(), 2.0);
        assert_eq!(value.relative_name(), Some("width"));
    }

    #[test]
    fn bare_name() {
        let mut value = width();
        value.parse_from("height").unwrap();
        assert_eq!(value.multiplier(), 1.0);
        assert_eq!(value.relative_name(), Some("height"));
    }

    #[test]
    fn percentage() {
        let mut value = width();
        value.parse_from("90%").unwrap();
        assert!(value.is_percentage());
        assert!(!value.is_relative());
        assert_eq!(value.multiplier(), 90.0);
    }

    #[test]
    fn percentage_without_amount_fails() {
        let mut value = width();
        assert!(matches!(
            value.parse_from("%"),
            Err(Error::InvalidAttributeValue(_))
        ));
        // Failed parse leaves the cell untouched.
        assert!(value.is_defaulted());
    }

    #[test]
    fn sign_without_digits_fails() {
        let mut value = width();
        assert!(value.parse_from("-abc").is_err());
        assert!(value.is_defaulted());
    }

    #[test]
    fn empty_input_is_a_no_op() {
        let mut value = width();
        value.parse_from("").unwrap();
        assert!(value.is_defaulted());
    }

    // ── resolution ────────────────────────────────────────────────────────

    fn ancestors(pairs: &[(&str, &str, f32)]) -> AncestorValues {
        let mut av = AncestorValues::new();
        for (name, abbr, v) in pairs {
            av.insert(name, abbr, AncestorValue::Float(*v));
        }
        av
    }

    #[test]
    fn resolve_multiple_of_ancestor() {
        let mut value = width();
        value.parse_from("2width").unwrap();
        let av = ancestors(&[("width", "w", 5.0)]);
        assert_eq!(value.resolve(&av).unwrap(), 10.0);
    }

    #[test]
    fn resolve_percentage_of_own_name() {
        let mut value = width();
        value.parse_from("90%").unwrap();
        let av = ancestors(&[("width", "w", 200.0)]);
        assert_eq!(value.resolve(&av).unwrap(), 180.0);
    }

    #[test]
    fn resolve_relative_percentage() {
        let mut value = width();
        value.parse_from("0.5height%").unwrap();
        let av = ancestors(&[("width", "w", 100.0), ("height", "h", 40.0)]);
        assert_eq!(value.resolve(&av).unwrap(), 20.0);
    }

    #[test]
    fn resolve_missing_ancestor_fails() {
        let mut value = width();
        value.parse_from("2height").unwrap();
        assert!(matches!(
            value.resolve(&AncestorValues::new()),
            Err(Error::MissingAncestor(_))
        ));
    }

    #[test]
    fn update_caches_computed_value() {
        let mut value = width();
        value.parse_from("2width").unwrap();
        let mut av = ancestors(&[("width", "w", 5.0)]);
        value.update_ancestor_values(&mut av).unwrap();
        assert_eq!(value.value(), 10.0);
        // The exported value shadows the ancestor's.
        assert_eq!(av.get_float("width").unwrap(), 10.0);
    }

    // ── display ───────────────────────────────────────────────────────────

    #[test]
    fn display_round_trips() {
        for text in ["10", "2width", "90%", "0.5height%"] {
            let mut value = width();
            value.parse_from(text).unwrap();
            assert_eq!(value.display_string(), text);
        }
    }
}
