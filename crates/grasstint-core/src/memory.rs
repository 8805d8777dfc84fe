//! In-memory [`SceneQuery`] implementation.
//!
//! Holds just enough scene state for the tint pipeline: per-body surface
//! modifiers, a global list of loaded blend modifiers, materials with their
//! color properties, and a flat object tree.

use std::cell::Cell;
use std::collections::HashMap;
use std::sync::Arc;

use crate::color::Color;
use crate::color_map::ColorMap;
use crate::scene::{
    BlendModifier, BodyId, MaterialHandle, MaterialInfo, ModifierKind, ObjectHandle, SceneQuery,
};

struct SurfaceModifier {
    node: String,
    kind: ModifierKind,
    color_map: Option<Arc<dyn ColorMap>>,
}

struct LoadedBlend {
    body: Option<BodyId>,
    color_map: Option<Arc<dyn ColorMap>>,
}

struct MaterialRecord {
    name: String,
    shader: String,
    base_color: Color,
    properties: HashMap<String, Color>,
}

struct ObjectRecord {
    name: String,
    parent: Option<ObjectHandle>,
    material: Option<MaterialHandle>,
}

/// Scene state held entirely in memory.
#[derive(Default)]
pub struct MemoryScene {
    surfaces: HashMap<BodyId, Vec<SurfaceModifier>>,
    blends: Vec<LoadedBlend>,
    materials: Vec<MaterialRecord>,
    objects: Vec<ObjectRecord>,
    material_scans: Cell<usize>,
}

impl MemoryScene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a modifier to the child `node` of `body`'s surface controller.
    ///
    /// Blend modifiers are also registered as globally loaded, the way a
    /// live scene would report them.
    pub fn add_surface_modifier(
        &mut self,
        body: &BodyId,
        node: impl Into<String>,
        kind: ModifierKind,
        color_map: Option<Arc<dyn ColorMap>>,
    ) {
        if kind == ModifierKind::VertexColorMapBlend {
            self.blends.push(LoadedBlend {
                body: Some(body.clone()),
                color_map: color_map.clone(),
            });
        }
        self.surfaces
            .entry(body.clone())
            .or_default()
            .push(SurfaceModifier {
                node: node.into(),
                kind,
                color_map,
            });
    }

    /// Register a loaded blend modifier that is not attached to any surface
    /// controller node.
    pub fn add_loaded_blend(
        &mut self,
        body: Option<BodyId>,
        color_map: Option<Arc<dyn ColorMap>>,
    ) {
        self.blends.push(LoadedBlend { body, color_map });
    }

    /// Add a material with the given name and shader.
    pub fn add_material(
        &mut self,
        name: impl Into<String>,
        shader: impl Into<String>,
    ) -> MaterialHandle {
        self.materials.push(MaterialRecord {
            name: name.into(),
            shader: shader.into(),
            base_color: Color::WHITE,
            properties: HashMap::new(),
        });
        MaterialHandle(self.materials.len() - 1)
    }

    /// Add a scene object, optionally under a parent and with a renderer material.
    pub fn add_object(
        &mut self,
        name: impl Into<String>,
        parent: Option<ObjectHandle>,
        material: Option<MaterialHandle>,
    ) -> ObjectHandle {
        self.objects.push(ObjectRecord {
            name: name.into(),
            parent,
            material,
        });
        ObjectHandle(self.objects.len() - 1)
    }

    /// Current value of a material color property.
    pub fn material_color(&self, material: MaterialHandle, property: &str) -> Option<Color> {
        self.materials
            .get(material.0)
            .and_then(|m| m.properties.get(property).copied())
    }

    /// Current base color of a material.
    pub fn base_color(&self, material: MaterialHandle) -> Option<Color> {
        self.materials.get(material.0).map(|m| m.base_color)
    }

    /// Number of times [`SceneQuery::loaded_materials`] has been called.
    pub fn material_scans(&self) -> usize {
        self.material_scans.get()
    }

    fn children(&self, parent: ObjectHandle) -> impl Iterator<Item = ObjectHandle> + '_ {
        self.objects
            .iter()
            .enumerate()
            .filter(move |(_, o)| o.parent == Some(parent))
            .map(|(i, _)| ObjectHandle(i))
    }
}

impl SceneQuery for MemoryScene {
    fn surface_color_map(
        &self,
        body: &BodyId,
        node: &str,
        kind: ModifierKind,
    ) -> Option<&dyn ColorMap> {
        self.surfaces
            .get(body)?
            .iter()
            .find(|m| m.node == node && m.kind == kind)?
            .color_map
            .as_deref()
    }

    fn blend_modifiers(&self) -> Vec<BlendModifier<'_>> {
        self.blends
            .iter()
            .map(|b| BlendModifier {
                body: b.body.as_ref(),
                color_map: b.color_map.as_deref(),
            })
            .collect()
    }

    fn loaded_materials(&self) -> Vec<MaterialInfo> {
        self.material_scans.set(self.material_scans.get() + 1);
        self.materials
            .iter()
            .enumerate()
            .map(|(i, m)| MaterialInfo {
                handle: MaterialHandle(i),
                name: m.name.clone(),
                shader: m.shader.clone(),
            })
            .collect()
    }

    fn set_material_color(&mut self, material: MaterialHandle, property: &str, color: Color) {
        if let Some(m) = self.materials.get_mut(material.0) {
            m.properties.insert(property.to_string(), color);
        }
    }

    fn find_object(&self, name: &str) -> Option<ObjectHandle> {
        self.objects
            .iter()
            .position(|o| o.name == name)
            .map(ObjectHandle)
    }

    fn find_child(&self, parent: ObjectHandle, name: &str) -> Option<ObjectHandle> {
        // Depth-first, direct children before grandchildren of the same branch.
        for child in self.children(parent) {
            if self.objects[child.0].name == name {
                return Some(child);
            }
            if let Some(found) = self.find_child(child, name) {
                return Some(found);
            }
        }
        None
    }

    fn shared_material(&self, object: ObjectHandle) -> Option<MaterialHandle> {
        self.objects.get(object.0)?.material
    }

    fn set_base_color(&mut self, material: MaterialHandle, color: Color) {
        if let Some(m) = self.materials.get_mut(material.0) {
            m.base_color = color;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color_map::ImageColorMap;
    use image::{Rgba, RgbaImage};

    fn solid(rgba: [u8; 4]) -> Arc<dyn ColorMap> {
        Arc::new(ImageColorMap::from_image(RgbaImage::from_pixel(4, 4, Rgba(rgba))).unwrap())
    }

    #[test]
    fn test_surface_lookup_requires_node_and_kind() {
        let mut scene = MemoryScene::new();
        let kerbin = BodyId::new("Kerbin");
        scene.add_surface_modifier(
            &kerbin,
            "VertexColorMap",
            ModifierKind::VertexColorMap,
            Some(solid([255, 0, 0, 255])),
        );

        assert!(
            scene
                .surface_color_map(&kerbin, "VertexColorMap", ModifierKind::VertexColorMap)
                .is_some()
        );
        assert!(
            scene
                .surface_color_map(&kerbin, "VertexColorMap", ModifierKind::VertexColorMapBlend)
                .is_none()
        );
        assert!(
            scene
                .surface_color_map(&BodyId::new("Mun"), "VertexColorMap", ModifierKind::VertexColorMap)
                .is_none()
        );
    }

    #[test]
    fn test_surface_blend_is_globally_loaded() {
        let mut scene = MemoryScene::new();
        let kerbin = BodyId::new("Kerbin");
        scene.add_surface_modifier(&kerbin, "Blend", ModifierKind::VertexColorMapBlend, None);
        scene.add_loaded_blend(None, None);

        let blends = scene.blend_modifiers();
        assert_eq!(blends.len(), 2);
        assert_eq!(blends[0].body, Some(&kerbin));
        assert!(blends[1].body.is_none());
    }

    #[test]
    fn test_find_child_searches_descendants() {
        let mut scene = MemoryScene::new();
        let mat = scene.add_material("terrain", "KSC/Terrain");
        let root = scene.add_object("VABscenery", None, None);
        let mid = scene.add_object("ground", Some(root), None);
        let leaf = scene.add_object("ksc_terrain", Some(mid), Some(mat));
        scene.add_object("ksc_terrain", None, None);

        assert_eq!(scene.find_object("VABscenery"), Some(root));
        assert_eq!(scene.find_child(root, "ksc_terrain"), Some(leaf));
        assert_eq!(scene.find_child(mid, "ground"), None);
        assert_eq!(scene.shared_material(leaf), Some(mat));
    }

    #[test]
    fn test_material_mutation_and_scan_count() {
        let mut scene = MemoryScene::new();
        let mat = scene.add_material("grass", "KSC/Grass");
        assert_eq!(scene.material_scans(), 0);
        assert_eq!(scene.loaded_materials().len(), 1);
        assert_eq!(scene.material_scans(), 1);

        scene.set_material_color(mat, "_GrassColor", Color::BLACK);
        scene.set_base_color(mat, Color::new(0.5, 0.5, 0.5, 1.0));
        assert_eq!(scene.material_color(mat, "_GrassColor"), Some(Color::BLACK));
        assert_eq!(scene.base_color(mat), Some(Color::new(0.5, 0.5, 0.5, 1.0)));
        assert_eq!(scene.material_color(mat, "_Other"), None);
    }
}
