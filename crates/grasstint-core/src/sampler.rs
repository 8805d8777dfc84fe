//! Color map lookup and latitude/longitude sampling.
//!
//! Color maps use the host's mirrored equirectangular layout: `(0, 0)` is the
//! bottom-right corner, `(width, height)` the top-left one, and longitude
//! carries a quarter-width phase offset:
//!
//! | latitude | y          |   | longitude | x           |
//! |----------|------------|---|-----------|-------------|
//! | +90      | height     |   | -180      | 3/4 width   |
//! | 0        | height / 2 |   | -90       | 1/2 width   |
//! | -90      | 0          |   | 0         | 1/4 width   |
//! |          |            |   | +90       | 0           |
//! |          |            |   | +180      | 3/4 width   |

use tracing::info;

use crate::color::Color;
use crate::color_map::ColorMap;
use crate::scene::{BodyId, ModifierKind, SceneQuery};

/// Map geographic coordinates to color map pixel coordinates.
///
/// Halfway cases round to even. A non-positive `x` wraps once by adding the
/// width; both axes are then clamped to `[0, width]` and `[0, height]`.
pub fn pixel_coords(latitude: f64, longitude: f64, width: u32, height: u32) -> (u32, u32) {
    let w = i64::from(width);
    let h = i64::from(height);

    let mut x = ((90.0 - longitude) / 360.0 * w as f64).round_ties_even() as i64;
    let y = ((90.0 + latitude) / 180.0 * h as f64).round_ties_even() as i64;

    if x <= 0 {
        x += w;
    }

    // Both clamped values fit in u32 since the bounds came from u32.
    (x.clamp(0, w) as u32, y.clamp(0, h) as u32)
}

/// Samples a body's color map at geographic coordinates.
pub struct MapSampler<'s, S: SceneQuery + ?Sized> {
    scene: &'s S,
}

impl<'s, S: SceneQuery + ?Sized> MapSampler<'s, S> {
    /// Create a sampler over the given scene.
    pub fn new(scene: &'s S) -> Self {
        Self { scene }
    }

    /// Locate the color map of `body`.
    ///
    /// Tried in order, first hit wins:
    /// 1. the blend modifier on the surface child `VertexColorMapBlend`;
    /// 2. the plain modifier on the surface child `VertexColorMap`;
    /// 3. the first loaded blend modifier whose sphere belongs to `body`.
    ///
    /// A hit in step 3 whose map is unbound still ends the search.
    pub fn find_color_map(&self, body: &BodyId) -> Option<&'s dyn ColorMap> {
        for kind in [ModifierKind::VertexColorMapBlend, ModifierKind::VertexColorMap] {
            if let Some(map) = self.scene.surface_color_map(body, kind.node_name(), kind) {
                return Some(map);
            }
        }

        // Enumeration order is whatever the host reports.
        self.scene
            .blend_modifiers()
            .into_iter()
            .find(|m| m.body == Some(body))
            .and_then(|m| m.color_map)
    }

    /// Sample the color of `body` at `latitude`/`longitude` (degrees).
    ///
    /// The pixel color is scaled by `color_multiplier` and its alpha forced
    /// to 1. Returns `None` if the body has no color map.
    pub fn sample(
        &self,
        body: &BodyId,
        latitude: f64,
        longitude: f64,
        color_multiplier: f32,
    ) -> Option<Color> {
        let map = self.find_color_map(body)?;
        let (x, y) = pixel_coords(latitude, longitude, map.width(), map.height());

        let color = map.pixel_color(x, y);
        info!("parsed {} from color map of {} at {}, {}", color, body, x, y);

        Some((color * color_multiplier).with_alpha(1.0))
    }
}
