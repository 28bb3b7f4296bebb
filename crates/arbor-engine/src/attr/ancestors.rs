use std::collections::BTreeMap;

use crate::attr::cell::Cell;
use crate::coords::{Alignment, Axis, Rotation, UnitInterval};
use crate::error::{Error, Result};
use crate::paint::Rgba;

/// A value exported by an ancestor element during the downward pass.
#[derive(Debug, Clone, PartialEq)]
pub enum AncestorValue {
    Float(f32),
    UnitInterval(UnitInterval),
    Bool(bool),
    Int(i32),
    String(String),
    Color(Rgba),
    Rotation(Rotation),
    Axis(Axis),
    Alignment(Alignment),
}

impl AncestorValue {
    fn type_name(&self) -> &'static str {
        match self {
            AncestorValue::Float(_) => "float",
            AncestorValue::UnitInterval(_) => "unit_interval",
            AncestorValue::Bool(_) => "bool",
            AncestorValue::Int(_) => "int",
            AncestorValue::String(_) => "string",
            AncestorValue::Color(_) => "color",
            AncestorValue::Rotation(_) => "rotation",
            AncestorValue::Axis(_) => "axis",
            AncestorValue::Alignment(_) => "alignment",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    abbreviation: String,
    value: AncestorValue,
}

/// Named values accumulated top-down along one branch of a render pass.
///
/// Each node sees the values of its ancestors (plus the synthesised
/// `children`/`equal` pair) and overlays its own explicitly-set values before
/// recursing. Lookups accept either the full name or the abbreviation.
#[derive(Debug, Clone, Default)]
pub struct AncestorValues {
    values: BTreeMap<String, Entry>,
}

impl AncestorValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or overwrites) a value under its full name.
    pub fn insert(&mut self, name: &str, abbreviation: &str, value: AncestorValue) {
        self.values.insert(
            name.to_owned(),
            Entry {
                abbreviation: abbreviation.to_owned(),
                value,
            },
        );
    }

    /// Registers a cell's current value if it has been explicitly set.
    pub fn insert_cell<T, F>(&mut self, cell: &Cell<T>, wrap: F)
    where
        T: Clone,
        F: FnOnce(T) -> AncestorValue,
    {
        if cell.is_defaulted() {
            return;
        }
        self.insert(cell.name(), cell.abbreviation(), wrap(cell.get().clone()));
    }

    fn entry(&self, name: &str) -> Option<&Entry> {
        if let Some(entry) = self.values.get(name) {
            return Some(entry);
        }
        self.values.values().find(|entry| entry.abbreviation == name)
    }

    fn get(&self, name: &str, expected: &'static str) -> Result<&AncestorValue> {
        match self.entry(name) {
            Some(entry) if entry.value.type_name() == expected => Ok(&entry.value),
            Some(_) => Err(Error::TypeMismatch {
                name: name.to_owned(),
                expected,
            }),
            None => Err(Error::MissingAncestor(name.to_owned())),
        }
    }

    pub fn get_float(&self, name: &str) -> Result<f32> {
        match self.get(name, "float")? {
            AncestorValue::Float(v) => Ok(*v),
            _ => unreachable!(),
        }
    }

    pub fn get_unit_interval(&self, name: &str) -> Result<UnitInterval> {
        match self.get(name, "unit_interval")? {
            AncestorValue::UnitInterval(v) => Ok(*v),
            _ => unreachable!(),
        }
    }

    pub fn get_bool(&self, name: &str) -> Result<bool> {
        match self.get(name, "bool")? {
            AncestorValue::Bool(v) => Ok(*v),
            _ => unreachable!(),
        }
    }

    pub fn get_int(&self, name: &str) -> Result<i32> {
        match self.get(name, "int")? {
            AncestorValue::Int(v) => Ok(*v),
            _ => unreachable!(),
        }
    }

    pub fn get_string(&self, name: &str) -> Result<&str> {
        match self.get(name, "string")? {
            AncestorValue::String(v) => Ok(v),
            _ => unreachable!(),
        }
    }

    pub fn get_color(&self, name: &str) -> Result<Rgba> {
        match self.get(name, "color")? {
            AncestorValue::Color(v) => Ok(*v),
            _ => unreachable!(),
        }
    }

    pub fn get_rotation(&self, name: &str) -> Result<Rotation> {
        match self.get(name, "rotation")? {
            AncestorValue::Rotation(v) => Ok(*v),
            _ => unreachable!(),
        }
    }

    pub fn get_axis(&self, name: &str) -> Result<Axis> {
        match self.get(name, "axis")? {
            AncestorValue::Axis(v) => Ok(*v),
            _ => unreachable!(),
        }
    }

    pub fn get_alignment(&self, name: &str) -> Result<Alignment> {
        match self.get(name, "alignment")? {
            AncestorValue::Alignment(v) => Ok(*v),
            _ => unreachable!(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::cell::FloatCell;

    #[test]
    fn lookup_by_name_or_abbreviation() {
        let mut av = AncestorValues::new();
        av.insert("width", "w", AncestorValue::Float(5.0));
        assert_eq!(av.get_float("width").unwrap(), 5.0);
        assert_eq!(av.get_float("w").unwrap(), 5.0);
    }

    #[test]
    fn missing_name_errors() {
        let av = AncestorValues::new();
        assert_eq!(
            av.get_float("width"),
            Err(Error::MissingAncestor("width".into()))
        );
    }

    #[test]
    fn wrong_type_errors() {
        let mut av = AncestorValues::new();
        av.insert("axis", "axis", AncestorValue::Axis(Axis::Z));
        assert!(matches!(
            av.get_float("axis"),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn defaulted_cells_are_not_exported() {
        let mut av = AncestorValues::new();
        let mut cell = FloatCell::new("width", "w", 1.0);
        av.insert_cell(&cell, AncestorValue::Float);
        assert!(av.get_float("width").is_err());

        cell.set(2.0);
        av.insert_cell(&cell, AncestorValue::Float);
        assert_eq!(av.get_float("width").unwrap(), 2.0);
    }

    #[test]
    fn later_insert_overwrites() {
        let mut av = AncestorValues::new();
        av.insert("width", "w", AncestorValue::Float(1.0));
        av.insert("width", "w", AncestorValue::Float(2.0));
        assert_eq!(av.get_float("width").unwrap(), 2.0);
    }
}
