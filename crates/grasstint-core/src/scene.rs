//! Host scene interface.
//!
//! The tint pipeline never walks a scene graph itself. It asks a
//! [`SceneQuery`] implementation for the few things it needs: color map
//! modifiers on a body's surface, the loaded materials, and a handful of
//! named scene objects.

use std::fmt;

use crate::color::Color;
use crate::color_map::ColorMap;

/// Reference to a celestial body, by name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BodyId(pub String);

impl BodyId {
    /// Build a body reference from its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque handle to a render material owned by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MaterialHandle(pub usize);

/// Opaque handle to a scene object owned by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectHandle(pub usize);

/// Surface modifier kinds that can carry a color map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModifierKind {
    /// Blended vertex color map.
    VertexColorMapBlend,
    /// Plain vertex color map.
    VertexColorMap,
}

impl ModifierKind {
    /// Name of the surface child node that hosts this modifier.
    pub const fn node_name(self) -> &'static str {
        match self {
            Self::VertexColorMapBlend => "VertexColorMapBlend",
            Self::VertexColorMap => "VertexColorMap",
        }
    }
}

/// A loaded blend modifier, as seen by a global scan.
#[derive(Clone, Copy)]
pub struct BlendModifier<'a> {
    /// Body of the sphere that owns the modifier, if any.
    pub body: Option<&'a BodyId>,
    /// Bound color map, if any.
    pub color_map: Option<&'a dyn ColorMap>,
}

/// A loaded material and the name of its shader.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaterialInfo {
    /// Material handle.
    pub handle: MaterialHandle,
    /// Material name.
    pub name: String,
    /// Shader name.
    pub shader: String,
}

/// Queries and mutations the tint pipeline needs from the host engine.
pub trait SceneQuery {
    /// Color map bound to the `kind` modifier attached to the child `node` of
    /// `body`'s surface controller.
    ///
    /// Returns `None` if the body, child, modifier, or bound map is missing.
    fn surface_color_map(
        &self,
        body: &BodyId,
        node: &str,
        kind: ModifierKind,
    ) -> Option<&dyn ColorMap>;

    /// Every loaded blend modifier, in the host's enumeration order.
    fn blend_modifiers(&self) -> Vec<BlendModifier<'_>>;

    /// Every loaded material.
    fn loaded_materials(&self) -> Vec<MaterialInfo>;

    /// Set a color shader property on a material.
    fn set_material_color(&mut self, material: MaterialHandle, property: &str, color: Color);

    /// First scene object with the given name.
    fn find_object(&self, name: &str) -> Option<ObjectHandle>;

    /// First descendant of `parent` with the given name.
    fn find_child(&self, parent: ObjectHandle, name: &str) -> Option<ObjectHandle>;

    /// Shared material of the object's renderer.
    fn shared_material(&self, object: ObjectHandle) -> Option<MaterialHandle>;

    /// Set a material's base color.
    fn set_base_color(&mut self, material: MaterialHandle, color: Color);
}
