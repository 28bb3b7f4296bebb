//! Typed attribute cells and relative-value resolution.
//!
//! Responsibilities:
//! - typed cells with a defaulted/set state ([`cell::Cell`])
//! - the relative-float grammar and its evaluation ([`RelativeFloat`])
//! - the per-branch map of values exported by ancestors ([`AncestorValues`])
//! - dependency ordering for values that reference each other
//!   ([`topological_sort_with_aliases`])

pub mod cell;

mod ancestors;
mod relative;
mod topo;

pub use ancestors::{AncestorValue, AncestorValues};
pub use relative::RelativeFloat;
pub use topo::topological_sort_with_aliases;

use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// String attribute bag, the boundary form of all element configuration.
///
/// Unknown keys are ignored by every feature so one bag can feed several
/// features on the same element.
pub type AttributeMap = BTreeMap<String, String>;

/// Parses a plain float attribute, mapping failures to
/// [`Error::InvalidAttributeValue`].
pub(crate) fn parse_float_attribute(name: &str, text: &str) -> Result<f32> {
    text.trim().parse::<f32>().map_err(|_| {
        Error::InvalidAttributeValue(format!("'{name}' expects a number, got '{text}'"))
    })
}
