//! Ground tint resolution for a home site: pick an override color from the
//! site's configuration or sample the home body's color map, then push the
//! result into the scene's grass materials.
//!
//! Everything that touches the host engine goes through [`SceneQuery`], so
//! the decision logic and coordinate math run without a live scene.
//! [`MemoryScene`] is a self-contained implementation for hosts and tests.

mod color;
mod color_map;
mod editor;
mod memory;
mod resolver;
mod sampler;
mod scene;
mod tinter;

pub use color::Color;
pub use color_map::{ColorMap, ColorMapError, ImageColorMap};
pub use editor::EditorGrassFixer;
pub use memory::MemoryScene;
pub use resolver::ColorResolver;
pub use sampler::{MapSampler, pixel_coords};
pub use scene::{
    BlendModifier, BodyId, MaterialHandle, MaterialInfo, ModifierKind, ObjectHandle, SceneQuery,
};
pub use tinter::MaterialTinter;
