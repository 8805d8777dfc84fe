//! Grass color resolution: explicit override from site config, or a sample
//! of the home body's color map at the site's coordinates.
//!
//! Every failure (missing key, bad value, missing map) resolves to `None`.
//! A bad grass color entry must never keep a scene from loading.

use grasstint_config::{Config, SiteNode, TintConfig};
use tracing::{debug, info};

use crate::color::Color;
use crate::sampler::MapSampler;
use crate::scene::{BodyId, SceneQuery};

const CHANGE_GRASS_COLOR: &str = "changeGrassColor";
const GRASS_COLOR: &str = "grassColor";
const LATITUDE: &str = "latitude";
const LONGITUDE: &str = "longitude";

/// Decides the grass color for a site.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorResolver {
    sampled_color_multiplier: f32,
}

impl Default for ColorResolver {
    fn default() -> Self {
        Self {
            sampled_color_multiplier: 2.0,
        }
    }
}

impl ColorResolver {
    /// Resolver using the multiplier from the tint settings.
    pub fn from_config(tint: &TintConfig) -> Self {
        Self {
            sampled_color_multiplier: tint.sampled_color_multiplier,
        }
    }

    /// Resolve the grass color described by `site` on `body`.
    ///
    /// - `changeGrassColor` must parse as `true`, otherwise `None`.
    /// - A `grassColor` entry wins when present; if it does not parse the
    ///   result is `None`, the coordinates are not consulted.
    /// - Otherwise `latitude` and `longitude` are sampled from the body's
    ///   color map, scaled by the sampled-color multiplier.
    pub fn resolve<S: SceneQuery + ?Sized>(
        &self,
        scene: &S,
        body: &BodyId,
        site: Option<&SiteNode>,
    ) -> Option<Color> {
        let site = site?;
        if !site.get_bool(CHANGE_GRASS_COLOR).unwrap_or(false) {
            return None;
        }

        if site.has_value(GRASS_COLOR) {
            return match site.get_color(GRASS_COLOR) {
                Ok(rgba) => {
                    let color = Color::from(rgba);
                    info!("found grass color {} from config", color);
                    Some(color)
                }
                Err(e) => {
                    debug!("ignoring grass color: {}", e);
                    None
                }
            };
        }

        let latitude = site.get_f64(LATITUDE).ok()?;
        let longitude = site.get_f64(LONGITUDE).ok()?;

        MapSampler::new(scene).sample(body, latitude, longitude, self.sampled_color_multiplier)
    }

    /// Grass color of the active site on the configured home body.
    ///
    /// The active site is the one named by `last_site`; its `PQSCity` node
    /// carries the grass keys.
    pub fn ground_color<S: SceneQuery + ?Sized>(
        &self,
        scene: &S,
        config: &Config,
    ) -> Option<Color> {
        let site = config.sites.active_site()?;
        let body = BodyId::new(config.home_body.clone());
        self.resolve(scene, &body, site.pqs_city.as_ref())
    }
}
