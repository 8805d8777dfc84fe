//! Scene-start hook for the editor buildings: recolors the terrain visible
//! through the hangar doors to match the site's grass.

use grasstint_config::{Config, TintConfig};
use tracing::{debug, info};

use crate::resolver::ColorResolver;
use crate::scene::{MaterialHandle, SceneQuery};

/// Editor scenery terrain fixer.
#[derive(Clone, Debug)]
pub struct EditorGrassFixer {
    scenery: Vec<String>,
    terrain: String,
    color_multiplier: f32,
    resolver: ColorResolver,
}

impl EditorGrassFixer {
    /// Fixer built from the tint settings.
    pub fn from_config(tint: &TintConfig) -> Self {
        Self {
            scenery: tint.editor_scenery.clone(),
            terrain: tint.editor_terrain.clone(),
            color_multiplier: tint.editor_color_multiplier,
            resolver: ColorResolver::from_config(tint),
        }
    }

    /// Run the hook once at scene start.
    ///
    /// Finds the first scenery object present, its terrain child and that
    /// child's material, then sets the material's base color to the active
    /// site's ground color times the editor multiplier. Does nothing if any
    /// piece is missing or the color is black. Returns whether the material
    /// was changed.
    pub fn start<S: SceneQuery + ?Sized>(&self, scene: &mut S, config: &Config) -> bool {
        debug!("editor grass fixer start");

        let Some(material) = self.terrain_material(&*scene) else {
            return false;
        };

        let Some(color) = self.resolver.ground_color(&*scene, config) else {
            return false;
        };
        if color.max_color_component() == 0.0 {
            return false;
        }

        let tinted = color * self.color_multiplier;
        scene.set_base_color(material, tinted);
        info!("editor terrain color set to {}", tinted);
        true
    }

    fn terrain_material<S: SceneQuery + ?Sized>(&self, scene: &S) -> Option<MaterialHandle> {
        let scenery = self
            .scenery
            .iter()
            .find_map(|name| scene.find_object(name))?;
        let terrain = scene.find_child(scenery, &self.terrain)?;
        scene.shared_material(terrain)
    }
}
