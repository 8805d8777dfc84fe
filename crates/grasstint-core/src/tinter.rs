//! Applies a grass color to every material whose shader matches a filter.

use grasstint_config::TintConfig;
use tracing::{debug, info};

use crate::color::Color;
use crate::scene::{MaterialHandle, SceneQuery};

/// Tints the scene's grass materials.
///
/// The material set is discovered on the first [`apply_color`](Self::apply_color)
/// and reused for the lifetime of the tinter.
#[derive(Debug)]
pub struct MaterialTinter {
    shader_filter: String,
    property: String,
    materials: Option<Vec<MaterialHandle>>,
}

impl MaterialTinter {
    /// Tinter matching shaders that contain `shader_filter` and writing the
    /// color to `property`.
    pub fn new(shader_filter: impl Into<String>, property: impl Into<String>) -> Self {
        Self {
            shader_filter: shader_filter.into(),
            property: property.into(),
            materials: None,
        }
    }

    /// Tinter built from the tint settings.
    pub fn from_config(tint: &TintConfig) -> Self {
        Self::new(&tint.shader_filter, &tint.grass_color_property)
    }

    /// Whether the material set has been discovered yet.
    pub fn is_discovered(&self) -> bool {
        self.materials.is_some()
    }

    /// Cached material set, empty before discovery.
    pub fn materials(&self) -> &[MaterialHandle] {
        self.materials.as_deref().unwrap_or(&[])
    }

    /// Set the grass color property on every matching material.
    pub fn apply_color<S: SceneQuery + ?Sized>(&mut self, scene: &mut S, color: Color) {
        let filter = &self.shader_filter;
        let materials = self.materials.get_or_insert_with(|| {
            let found: Vec<MaterialHandle> = scene
                .loaded_materials()
                .into_iter()
                .filter(|m| m.shader.contains(filter.as_str()))
                .map(|m| m.handle)
                .collect();
            debug!("discovered {} materials matching {:?}", found.len(), filter);
            found
        });

        for &material in materials.iter() {
            scene.set_material_color(material, &self.property, color);
        }
        info!("applied grass color {} to {} materials", color, materials.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryScene;

    #[test]
    fn test_only_matching_shaders_are_tinted() {
        let mut scene = MemoryScene::new();
        let grass = scene.add_material("grass", "KSC/Grass");
        let rock = scene.add_material("rock", "Terrain/Rock");
        let mut tinter = MaterialTinter::new("KSC", "_GrassColor");

        tinter.apply_color(&mut scene, Color::WHITE);

        assert_eq!(scene.material_color(grass, "_GrassColor"), Some(Color::WHITE));
        assert_eq!(scene.material_color(rock, "_GrassColor"), None);
        assert_eq!(tinter.materials(), &[grass]);
    }

    #[test]
    fn test_not_discovered_before_first_apply() {
        let tinter = MaterialTinter::from_config(&TintConfig::default());
        assert!(!tinter.is_discovered());
        assert!(tinter.materials().is_empty());
    }
}
