//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::site::SiteRegistry;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Name of the home body whose color map is sampled.
    pub home_body: String,
    /// Site definitions and the active site.
    pub sites: SiteRegistry,
    /// Tinting pipeline settings.
    pub tint: TintConfig,
    /// Color map asset binding for hosts that load maps from disk.
    pub color_map: ColorMapConfig,
    /// Scene contents for headless hosts.
    pub scene: SceneConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Tinting pipeline settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TintConfig {
    /// Substring a material's shader name must contain to be tinted.
    pub shader_filter: String,
    /// Shader property receiving the grass color.
    pub grass_color_property: String,
    /// Multiplier applied to colors sampled from the color map.
    pub sampled_color_multiplier: f32,
    /// Multiplier applied to the editor terrain base color.
    pub editor_color_multiplier: f32,
    /// Editor scenery object names, tried in order.
    pub editor_scenery: Vec<String>,
    /// Name of the terrain child under the editor scenery.
    pub editor_terrain: String,
}

/// Which surface modifier node a file-backed color map is attached to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ColorMapNode {
    /// The blended color map node (preferred lookup).
    #[default]
    VertexColorMapBlend,
    /// The plain color map node.
    VertexColorMap,
}

/// Color map asset binding.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorMapConfig {
    /// Image file holding the home body's color map. Relative paths are
    /// resolved against the config directory.
    pub path: Option<PathBuf>,
    /// Modifier node the map is bound to.
    pub node: ColorMapNode,
}

/// A material a headless host registers in its scene.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MaterialDecl {
    /// Material name.
    pub name: String,
    /// Shader name, matched against [`TintConfig::shader_filter`].
    pub shader: String,
}

/// Scene contents for hosts without a live engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Loaded materials, in enumeration order.
    pub materials: Vec<MaterialDecl>,
    /// Editor scenery object to create, with a terrain child named
    /// [`TintConfig::editor_terrain`]. `None` models a non-editor scene.
    pub editor_scenery: Option<String>,
    /// Shader of the editor terrain material.
    pub editor_terrain_shader: String,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for Config {
    fn default() -> Self {
        Self {
            home_body: "Kerbin".to_string(),
            sites: SiteRegistry::default(),
            tint: TintConfig::default(),
            color_map: ColorMapConfig::default(),
            scene: SceneConfig::default(),
            debug: DebugConfig::default(),
        }
    }
}

impl Default for TintConfig {
    fn default() -> Self {
        Self {
            shader_filter: "KSC".to_string(),
            grass_color_property: "_GrassColor".to_string(),
            sampled_color_multiplier: 2.0,
            editor_color_multiplier: 1.5,
            editor_scenery: vec!["VABscenery".to_string(), "SPHscenery".to_string()],
            editor_terrain: "ksc_terrain".to_string(),
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        let material = |name: &str, shader: &str| MaterialDecl {
            name: name.to_string(),
            shader: shader.to_string(),
        };
        Self {
            materials: vec![
                material("ksc_exterior_terrain_grass", "KSC/Scenery/Diffuse Ground KSC"),
                material("ksc_exterior_terrain_grass_02", "KSC/Scenery/Diffuse Multiply"),
                material("runway_asphalt", "Legacy Shaders/Diffuse"),
            ],
            editor_scenery: Some("VABscenery".to_string()),
            editor_terrain_shader: "Legacy Shaders/Diffuse".to_string(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save ---

impl Config {
    /// Default config directory (`<platform config dir>/grasstint`).
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("grasstint"))
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Resolve the color map path against `config_dir` if it is relative.
    pub fn color_map_path(&self, config_dir: &Path) -> Option<PathBuf> {
        self.color_map.path.as_ref().map(|p| {
            if p.is_relative() {
                config_dir.join(p)
            } else {
                p.clone()
            }
        })
    }
}
