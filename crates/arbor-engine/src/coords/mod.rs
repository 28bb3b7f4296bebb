//! Coordinate primitives.
//!
//! Responsibilities:
//! - scene-space points and offsets ([`Vec3`])
//! - axis-aligned bounding boxes with the absorbing-empty union ([`Bounds`])
//! - composable Tait-Bryan rotations ([`Rotation`])
//! - the small semantic value types layouts speak in ([`Axis`],
//!   [`Alignment`], [`UnitInterval`])

mod axis;
mod bounds;
mod rotation;
mod vec3;

pub use axis::{Alignment, Axis, UnitInterval};
pub use bounds::Bounds;
pub use rotation::{degrees_to_radians, radians_to_degrees, Rotation};
pub use vec3::Vec3;
