use std::fmt;

/// Errors surfaced by the engine.
///
/// All variants are recoverable by the caller; a failed operation leaves the
/// scene tree and render tree in a consistent state.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A path string was malformed (`..`, or a part with invalid characters).
    InvalidPath(String),
    /// A colour literal matched neither the palette nor the `(r, g, b[, a])` form.
    InvalidColor(String),
    /// An attribute string could not be parsed into its typed value.
    InvalidAttributeValue(String),
    /// Relative attributes form a dependency cycle. The message lists the
    /// offending `name -> dependency` pairs.
    AttributeCycle(String),
    /// A relative value referenced an ancestor value that was never exported.
    MissingAncestor(String),
    /// A relative value referenced an ancestor value of a different type.
    TypeMismatch {
        name: String,
        expected: &'static str,
    },
    /// A child with the same name already exists under the parent node.
    DuplicateChildName(String),
    /// A template (or node) with the given name does not exist.
    NotFound(String),
    /// The mesh builder could not produce the requested mesh.
    MeshUnavailable(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidPath(msg) => write!(f, "invalid path: {msg}"),
            Error::InvalidColor(msg) => write!(f, "invalid color: {msg}"),
            Error::InvalidAttributeValue(msg) => write!(f, "invalid attribute value: {msg}"),
            Error::AttributeCycle(msg) => write!(f, "attributes form a cycle: {msg}"),
            Error::MissingAncestor(name) => {
                write!(f, "relative value '{name}' not found in ancestor values")
            }
            Error::TypeMismatch { name, expected } => {
                write!(f, "ancestor value '{name}' does not have type {expected}")
            }
            Error::DuplicateChildName(name) => {
                write!(f, "a child named '{name}' already exists")
            }
            Error::NotFound(name) => write!(f, "no template or node named '{name}'"),
            Error::MeshUnavailable(msg) => write!(f, "mesh builder failed: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
