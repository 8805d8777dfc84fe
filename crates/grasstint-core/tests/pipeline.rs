//! End-to-end checks of the tint pipeline against an in-memory scene.

use std::sync::Arc;

use grasstint_config::{Config, Site, SiteNode};
use grasstint_core::{
    BodyId, Color, ColorMap, ColorResolver, ImageColorMap, MapSampler, MaterialTinter,
    MemoryScene, ModifierKind,
};
use image::{Rgba, RgbaImage};

fn solid_map(rgba: [u8; 4]) -> Arc<dyn ColorMap> {
    Arc::new(ImageColorMap::from_image(RgbaImage::from_pixel(8, 4, Rgba(rgba))).unwrap())
}

fn kerbin() -> BodyId {
    BodyId::new("Kerbin")
}

fn sampled_site() -> SiteNode {
    SiteNode::new()
        .with("changeGrassColor", "true")
        .with("latitude", "-0.0972")
        .with("longitude", "-74.5577")
}

fn sampled_color(scene: &MemoryScene) -> Option<Color> {
    MapSampler::new(scene).sample(&kerbin(), 0.0, 0.0, 1.0)
}

#[test]
fn blend_node_wins_over_plain_node() {
    let mut scene = MemoryScene::new();
    scene.add_surface_modifier(
        &kerbin(),
        "VertexColorMap",
        ModifierKind::VertexColorMap,
        Some(solid_map([255, 0, 0, 255])),
    );
    scene.add_surface_modifier(
        &kerbin(),
        "VertexColorMapBlend",
        ModifierKind::VertexColorMapBlend,
        Some(solid_map([0, 255, 0, 255])),
    );

    assert_eq!(sampled_color(&scene), Some(Color::new(0.0, 1.0, 0.0, 1.0)));
}

#[test]
fn unbound_blend_node_falls_back_to_plain_node() {
    let mut scene = MemoryScene::new();
    scene.add_surface_modifier(
        &kerbin(),
        "VertexColorMapBlend",
        ModifierKind::VertexColorMapBlend,
        None,
    );
    scene.add_surface_modifier(
        &kerbin(),
        "VertexColorMap",
        ModifierKind::VertexColorMap,
        Some(solid_map([255, 0, 0, 255])),
    );

    assert_eq!(sampled_color(&scene), Some(Color::new(1.0, 0.0, 0.0, 1.0)));
}

#[test]
fn global_scan_matches_by_body() {
    let mut scene = MemoryScene::new();
    scene.add_loaded_blend(Some(BodyId::new("Mun")), Some(solid_map([255, 0, 0, 255])));
    scene.add_loaded_blend(None, Some(solid_map([0, 255, 0, 255])));
    // Blend attached under a renamed node is only reachable through the scan.
    scene.add_surface_modifier(
        &kerbin(),
        "VertexColorMapBlend (legacy)",
        ModifierKind::VertexColorMapBlend,
        Some(solid_map([0, 0, 255, 255])),
    );
    scene.add_loaded_blend(Some(kerbin()), Some(solid_map([255, 255, 255, 255])));

    assert_eq!(sampled_color(&scene), Some(Color::new(0.0, 0.0, 1.0, 1.0)));
}

#[test]
fn global_scan_first_match_without_map_is_not_found() {
    let mut scene = MemoryScene::new();
    scene.add_loaded_blend(Some(kerbin()), None);
    scene.add_loaded_blend(Some(kerbin()), Some(solid_map([255, 255, 255, 255])));

    assert_eq!(sampled_color(&scene), None);
}

#[test]
fn no_map_anywhere_is_not_found() {
    let mut scene = MemoryScene::new();
    scene.add_loaded_blend(Some(BodyId::new("Duna")), Some(solid_map([255, 0, 0, 255])));
    assert_eq!(sampled_color(&scene), None);
}

#[test]
fn sampled_color_is_doubled_with_opaque_alpha() {
    let mut scene = MemoryScene::new();
    scene.add_surface_modifier(
        &kerbin(),
        "VertexColorMap",
        ModifierKind::VertexColorMap,
        Some(solid_map([51, 102, 0, 0])),
    );

    let color = ColorResolver::default()
        .resolve(&scene, &kerbin(), Some(&sampled_site()))
        .unwrap();

    let pixel = Color::from_rgba8([51, 102, 0, 0]);
    assert_eq!(color, Color::new(pixel.r * 2.0, pixel.g * 2.0, 0.0, 1.0));
}

#[test]
fn sample_reads_the_mapped_pixel() {
    // Each column gets its own red value so the x coordinate is observable.
    let image = RgbaImage::from_fn(8, 4, |x, _| Rgba([x as u8 * 10, 0, 0, 255]));
    let mut scene = MemoryScene::new();
    scene.add_surface_modifier(
        &kerbin(),
        "VertexColorMap",
        ModifierKind::VertexColorMap,
        Some(Arc::new(ImageColorMap::from_image(image).unwrap())),
    );

    // lat 0 / lon 0 -> x = W/4 = 2.
    let color = MapSampler::new(&scene)
        .sample(&kerbin(), 0.0, 0.0, 1.0)
        .unwrap();
    assert_eq!(color, Color::from_rgba8([20, 0, 0, 255]));

    // lon 180 -> x = -2, wrapped to 6.
    let color = MapSampler::new(&scene)
        .sample(&kerbin(), 0.0, 180.0, 1.0)
        .unwrap();
    assert_eq!(color, Color::from_rgba8([60, 0, 0, 255]));
}

#[test]
fn unparseable_grass_color_does_not_fall_back_to_sampling() {
    let mut scene = MemoryScene::new();
    scene.add_surface_modifier(
        &kerbin(),
        "VertexColorMap",
        ModifierKind::VertexColorMap,
        Some(solid_map([255, 255, 255, 255])),
    );
    let node = sampled_site().with("grassColor", "grassy");

    assert_eq!(ColorResolver::default().resolve(&scene, &kerbin(), Some(&node)), None);
}

#[test]
fn ground_color_uses_the_active_site() {
    let scene = MemoryScene::new();
    let mut config = Config::default();
    config.sites.last_site = "Island".to_string();
    config.sites.sites = vec![
        Site {
            name: "KSC".into(),
            pqs_city: Some(
                SiteNode::new()
                    .with("changeGrassColor", "true")
                    .with("grassColor", "1, 0, 0, 1"),
            ),
        },
        Site {
            name: "Island".into(),
            pqs_city: Some(
                SiteNode::new()
                    .with("changeGrassColor", "true")
                    .with("grassColor", "0, 0, 1, 1"),
            ),
        },
    ];

    let resolver = ColorResolver::from_config(&config.tint);
    assert_eq!(
        resolver.ground_color(&scene, &config),
        Some(Color::new(0.0, 0.0, 1.0, 1.0))
    );

    config.sites.last_site = "Nowhere".to_string();
    assert_eq!(resolver.ground_color(&scene, &config), None);
}

#[test]
fn tinter_discovers_once_and_reuses_the_set() {
    let mut scene = MemoryScene::new();
    let grass_a = scene.add_material("grass_a", "KSC/Scenery/Diffuse Ground KSC");
    let grass_b = scene.add_material("grass_b", "KSC/Scenery/Diffuse Multiply");
    let mut tinter = MaterialTinter::new("KSC", "_GrassColor");

    let first = Color::new(0.2, 0.5, 0.1, 1.0);
    tinter.apply_color(&mut scene, first);
    assert_eq!(scene.material_scans(), 1);

    // Added after discovery, so never tinted.
    let late = scene.add_material("late_grass", "KSC/Late");

    let second = Color::new(0.6, 0.4, 0.2, 1.0);
    tinter.apply_color(&mut scene, second);
    assert_eq!(scene.material_scans(), 1);
    assert_eq!(tinter.materials(), &[grass_a, grass_b]);

    assert_eq!(scene.material_color(grass_a, "_GrassColor"), Some(second));
    assert_eq!(scene.material_color(grass_b, "_GrassColor"), Some(second));
    assert_eq!(scene.material_color(late, "_GrassColor"), None);
}
