//! Headless host: builds a [`MemoryScene`] from the config (color map bound
//! to the home body, materials, editor scenery), applies resolved colors to
//! it, and writes them back to the config.

use std::path::Path;
use std::sync::Arc;

use grasstint_config::{ColorMapNode, Config};
use grasstint_core::{
    BodyId, Color, EditorGrassFixer, ImageColorMap, MaterialHandle, MaterialTinter, MemoryScene,
    ModifierKind,
};
use tracing::{info, warn};

/// Build the host scene described by the config.
///
/// A color map that fails to load is skipped; the rest of the scene is still
/// built so explicit grass colors keep working.
pub(crate) fn build_scene(config: &Config, config_dir: &Path) -> MemoryScene {
    let mut scene = MemoryScene::new();

    for decl in &config.scene.materials {
        scene.add_material(&decl.name, &decl.shader);
    }

    if let Some(scenery) = &config.scene.editor_scenery {
        let terrain = scene.add_material(
            &config.tint.editor_terrain,
            &config.scene.editor_terrain_shader,
        );
        let root = scene.add_object(scenery, None, None);
        scene.add_object(&config.tint.editor_terrain, Some(root), Some(terrain));
    }

    let Some(path) = config.color_map_path(config_dir) else {
        info!("No color map configured; only explicit grass colors resolve");
        return scene;
    };

    match ImageColorMap::open(&path) {
        Ok(map) => {
            let kind = modifier_kind(config.color_map.node);
            scene.add_surface_modifier(
                &BodyId::new(config.home_body.clone()),
                kind.node_name(),
                kind,
                Some(Arc::new(map)),
            );
            info!("Bound {} to {} ({:?})", path.display(), config.home_body, kind);
        }
        Err(e) => warn!("Color map {} unavailable: {}", path.display(), e),
    }

    scene
}

fn modifier_kind(node: ColorMapNode) -> ModifierKind {
    match node {
        ColorMapNode::VertexColorMapBlend => ModifierKind::VertexColorMapBlend,
        ColorMapNode::VertexColorMap => ModifierKind::VertexColorMap,
    }
}

/// What [`tint_scene`] changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TintReport {
    /// Materials that received the grass color.
    pub tinted: Vec<MaterialHandle>,
    /// Whether the editor terrain material was recolored.
    pub editor_fixed: bool,
}

/// Push `color` into the scene's grass materials, then run the editor hook.
pub(crate) fn tint_scene(scene: &mut MemoryScene, config: &Config, color: Color) -> TintReport {
    let mut tinter = MaterialTinter::from_config(&config.tint);
    tinter.apply_color(scene, color);

    let editor_fixed = EditorGrassFixer::from_config(&config.tint).start(scene, config);

    TintReport {
        tinted: tinter.materials().to_vec(),
        editor_fixed,
    }
}

/// Describe where the config came from, for logging once the subscriber is up.
pub(crate) fn config_origin(config_dir: &Path, existed: bool) -> String {
    let path = config_dir.join("config.ron");
    if existed {
        format!("Loaded config from {}", path.display())
    } else {
        format!("Created default config at {}", path.display())
    }
}

/// Format a color the way `grassColor` entries are written.
pub(crate) fn format_color(color: Color) -> String {
    format!(
        "{:.4}, {:.4}, {:.4}, {:.4}",
        color.r, color.g, color.b, color.a
    )
}

/// Store `color` as the active site's explicit grass color.
///
/// Returns `false` if there is no active site to write to.
pub(crate) fn bake_color(config: &mut Config, color: Color) -> bool {
    let last = config.sites.last_site.clone();
    let Some(site) = config.sites.sites.iter_mut().find(|s| s.name == last) else {
        return false;
    };
    let node = site.pqs_city.get_or_insert_with(Default::default);
    node.set("changeGrassColor", "true");
    node.set("grassColor", format_color(color));
    true
}
