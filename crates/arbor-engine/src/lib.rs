//! # arbor-engine
//!
//! A reactive 3D scene-layout engine. Clients build a tree of declarative
//! elements (boxes, spheres, grids, rows, spacers, …), mutate attributes
//! over time, and consume a stream of fine-grained geometry-change events
//! that a renderer can apply incrementally.
//!
//! Each element both produces its own mesh and positions the meshes its
//! children produced: a render pass walks the tree depth-first, carrying
//! ancestor attribute values down and geometry back up into a flat
//! path-keyed [`render::RenderTree`]. A [`engine::Transaction`] diffs that
//! tree against the previous snapshot and publishes one typed event per
//! change.
//!
//! # Quick start
//!
//! ```rust
//! use arbor_engine::prelude::*;
//!
//! let engine = LayoutEngine::new();
//! let listener = engine.subscribe(EventFilter::SkipNonDrawable);
//!
//! let mut tx = engine.transaction();
//! let root = tx.root();
//! let row = tx.construct_child(root, "row", JuxtaposeElement::new()).unwrap();
//! for name in ["a", "b", "c"] {
//!     tx.construct_child(row, name, BoxElement::new()).unwrap();
//! }
//! assert!(tx.render().unwrap());
//! drop(tx);
//!
//! // One Add event per box, in path order.
//! while let Ok(Some(event)) = listener.poll() {
//!     println!("{:?} {}", event.kind, event.path);
//! }
//! ```
//!
//! Attributes are strings at the boundary (the form a markup front end or
//! scripting shim hands over); they can be literal, a percentage of an
//! ancestor value, or a reference to another attribute:
//!
//! ```rust
//! use arbor_engine::attr::AttributeMap;
//! use arbor_engine::element::BoxElement;
//!
//! let attributes = AttributeMap::from([
//!     ("width".to_owned(), "90%".to_owned()),
//!     ("height".to_owned(), "0.5width".to_owned()),
//!     ("color".to_owned(), "teal4".to_owned()),
//! ]);
//! let tower = BoxElement::from_attributes(&attributes).unwrap();
//! ```

pub mod attr;
pub mod coords;
pub mod element;
pub mod engine;
pub mod error;
pub mod event;
pub mod feature;
pub mod geometry;
pub mod logging;
pub mod mesh;
pub mod paint;
pub mod path;
pub mod render;
pub mod scene;

// Top-level re-exports for the common entry points.
pub use engine::{LayoutEngine, Transaction};
pub use error::{Error, Result};
pub use path::Path;

/// Everything needed to build and observe scenes.
pub mod prelude {
    pub use crate::attr::AttributeMap;
    pub use crate::coords::{Alignment, Axis, Bounds, Rotation, UnitInterval, Vec3};
    pub use crate::element::{
        BoxElement, CylinderElement, Element, GridElement, HideShowElement, JuxtaposeElement,
        NoLayoutElement, ObjElement, PaddingElement, PlaneElement, RotateElement, ScaleElement,
        SphereElement, StreetElement,
    };
    pub use crate::engine::{LayoutEngine, Transaction};
    pub use crate::error::{Error, Result};
    pub use crate::event::{Event, EventFilter, EventKind, EventListener};
    pub use crate::geometry::Geometry;
    pub use crate::mesh::{BuiltinMeshes, MeshBuilder, RawMesh};
    pub use crate::paint::Rgba;
    pub use crate::path::Path;
    pub use crate::render::RenderTree;
    pub use crate::scene::{NodeId, SceneTree};
}
