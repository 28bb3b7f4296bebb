//! Element kinds.
//!
//! An element is the behaviour carried by a scene-tree node. During a render
//! pass each element, visited after its children, may produce a mesh for its
//! own path and reposition the geometries its descendants already produced.
//!
//! Extending the engine:
//! - add a new element module here with its feature composition
//! - add a variant to [`Element`] and arms to the four dispatch methods
//!
//! The set is deliberately closed: layouts dispatch on the variant, there is
//! no open class hierarchy to subclass.

mod box_primitive;
mod cylinder;
mod grid;
mod hide_show;
mod juxtapose;
mod no_layout;
mod obj;
mod padding;
mod plane;
mod rotate;
mod scale;
mod sphere;
mod street;

pub use box_primitive::BoxElement;
pub use cylinder::CylinderElement;
pub use grid::GridElement;
pub use hide_show::HideShowElement;
pub use juxtapose::JuxtaposeElement;
pub use no_layout::NoLayoutElement;
pub use obj::ObjElement;
pub use padding::PaddingElement;
pub use plane::PlaneElement;
pub use rotate::RotateElement;
pub use scale::ScaleElement;
pub use sphere::SphereElement;
pub use street::StreetElement;

use crate::attr::{AncestorValues, AttributeMap};
use crate::error::Result;
use crate::path::Path;
use crate::render::RenderTree;

/// The closed sum of element kinds.
#[derive(Debug, Clone)]
pub enum Element {
    Box(BoxElement),
    Plane(PlaneElement),
    Sphere(SphereElement),
    Cylinder(CylinderElement),
    Obj(ObjElement),
    Grid(GridElement),
    Scale(ScaleElement),
    HideShow(HideShowElement),
    Rotate(RotateElement),
    Juxtapose(JuxtaposeElement),
    Padding(PaddingElement),
    Street(StreetElement),
    NoLayout(NoLayoutElement),
    /// Renders nothing and carries no attributes; useful as the root and
    /// wherever a node only exists to group children.
    Nop,
}

impl Element {
    /// Produces/repositions geometry for `path`. Children of `path` have
    /// already rendered.
    pub fn render(&self, path: &Path, tree: &mut RenderTree) -> Result<()> {
        match self {
            Element::Box(element) => element.render(path, tree),
            Element::Plane(element) => element.render(path, tree),
            Element::Sphere(element) => element.render(path, tree),
            Element::Cylinder(element) => element.render(path, tree),
            Element::Obj(element) => element.render(path, tree),
            Element::Grid(element) => element.render(path, tree),
            Element::Scale(element) => element.render(path, tree),
            Element::HideShow(element) => element.render(path, tree),
            Element::Rotate(element) => element.render(path, tree),
            Element::Juxtapose(element) => element.render(path, tree),
            Element::Padding(element) => element.render(path, tree),
            Element::Street(element) => element.render(path, tree),
            Element::NoLayout(_) | Element::Nop => Ok(()),
        }
    }

    /// Feeds the shared attribute bag to every feature of this element.
    pub fn update_from_attributes(&mut self, attributes: &AttributeMap) -> Result<()> {
        match self {
            Element::Box(element) => element.update_from_attributes(attributes),
            Element::Plane(element) => element.update_from_attributes(attributes),
            Element::Sphere(element) => element.update_from_attributes(attributes),
            Element::Cylinder(element) => element.update_from_attributes(attributes),
            Element::Obj(element) => element.update_from_attributes(attributes),
            Element::Grid(element) => element.update_from_attributes(attributes),
            Element::Scale(element) => element.update_from_attributes(attributes),
            Element::HideShow(element) => element.update_from_attributes(attributes),
            Element::Rotate(element) => element.update_from_attributes(attributes),
            Element::Juxtapose(element) => element.update_from_attributes(attributes),
            Element::Padding(element) => element.update_from_attributes(attributes),
            Element::Street(element) => element.update_from_attributes(attributes),
            Element::NoLayout(element) => element.update_from_attributes(attributes),
            Element::Nop => Ok(()),
        }
    }

    /// The element's attributes in string form.
    pub fn attributes(&self) -> AttributeMap {
        match self {
            Element::Box(element) => element.attributes(),
            Element::Plane(element) => element.attributes(),
            Element::Sphere(element) => element.attributes(),
            Element::Cylinder(element) => element.attributes(),
            Element::Obj(element) => element.attributes(),
            Element::Grid(element) => element.attributes(),
            Element::Scale(element) => element.attributes(),
            Element::HideShow(element) => element.attributes(),
            Element::Rotate(element) => element.attributes(),
            Element::Juxtapose(element) => element.attributes(),
            Element::Padding(element) => element.attributes(),
            Element::Street(element) => element.attributes(),
            Element::NoLayout(element) => element.attributes(),
            Element::Nop => AttributeMap::new(),
        }
    }

    /// Resolves relative values and exports explicitly-set ones to the
    /// branch's ancestor values. Runs top-down, before children render.
    pub fn update_ancestor_values(&mut self, ancestors: &mut AncestorValues) -> Result<()> {
        match self {
            Element::Box(element) => element.update_ancestor_values(ancestors),
            Element::Plane(element) => element.update_ancestor_values(ancestors),
            Element::Sphere(element) => element.update_ancestor_values(ancestors),
            Element::Cylinder(element) => element.update_ancestor_values(ancestors),
            Element::Obj(element) => element.update_ancestor_values(ancestors),
            Element::Grid(element) => element.update_ancestor_values(ancestors),
            Element::Scale(element) => element.update_ancestor_values(ancestors),
            Element::HideShow(element) => element.update_ancestor_values(ancestors),
            Element::Rotate(element) => element.update_ancestor_values(ancestors),
            Element::Juxtapose(element) => element.update_ancestor_values(ancestors),
            Element::Padding(element) => element.update_ancestor_values(ancestors),
            Element::Street(element) => element.update_ancestor_values(ancestors),
            Element::NoLayout(element) => element.update_ancestor_values(ancestors),
            Element::Nop => Ok(()),
        }
    }
}

macro_rules! element_from {
    ($($variant:ident($kind:ty)),+ $(,)?) => {
        $(impl From<$kind> for Element {
            fn from(element: $kind) -> Element {
                Element::$variant(element)
            }
        })+
    };
}

element_from!(
    Box(BoxElement),
    Plane(PlaneElement),
    Sphere(SphereElement),
    Cylinder(CylinderElement),
    Obj(ObjElement),
    Grid(GridElement),
    Scale(ScaleElement),
    HideShow(HideShowElement),
    Rotate(RotateElement),
    Juxtapose(JuxtaposeElement),
    Padding(PaddingElement),
    Street(StreetElement),
    NoLayout(NoLayoutElement),
);
