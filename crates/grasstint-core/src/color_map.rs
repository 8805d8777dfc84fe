//! Color map textures: the [`ColorMap`] read interface and an image-backed
//! implementation.

use std::path::Path;

use image::RgbaImage;
use thiserror::Error;

use crate::color::Color;

/// Read-only access to a body's equirectangular color map.
///
/// Pixel `(0, 0)` is the bottom-right corner and `(width, height)` the
/// top-left one. Implementations must accept coordinates up to and including
/// `width` and `height`, since the sampler clamps into that closed range.
pub trait ColorMap {
    /// Width in pixels.
    fn width(&self) -> u32;
    /// Height in pixels.
    fn height(&self) -> u32;
    /// Color of the pixel at `(x, y)`.
    fn pixel_color(&self, x: u32, y: u32) -> Color;
}

/// Errors returned when building an [`ImageColorMap`].
#[derive(Debug, Error)]
pub enum ColorMapError {
    /// The image could not be opened or decoded.
    #[error("failed to load color map: {0}")]
    Image(#[from] image::ImageError),

    /// The image has no pixels.
    #[error("color map has zero size ({width}x{height})")]
    Empty {
        /// Image width.
        width: u32,
        /// Image height.
        height: u32,
    },
}

/// Color map backed by an 8-bit RGBA image.
///
/// Rows are stored bottom-up: map row `y` reads image row `height - 1 - y`.
/// Columns are read left to right unchanged, so for `(0, 0)` to be the
/// bottom-right corner the image must already be stored horizontally
/// mirrored, as the game's own color maps are. A plain north-up, west-left
/// map has to be flipped horizontally before loading.
/// Coordinates past the last pixel read the edge pixel.
#[derive(Clone, Debug)]
pub struct ImageColorMap {
    image: RgbaImage,
}

impl ImageColorMap {
    /// Wrap an in-memory image.
    ///
    /// # Errors
    ///
    /// Returns [`ColorMapError::Empty`] if either dimension is zero.
    pub fn from_image(image: RgbaImage) -> Result<Self, ColorMapError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(ColorMapError::Empty { width, height });
        }
        Ok(Self { image })
    }

    /// Load a color map from an image file (PNG or JPEG).
    ///
    /// # Errors
    ///
    /// Returns [`ColorMapError`] if the file cannot be decoded or is empty.
    pub fn open(path: &Path) -> Result<Self, ColorMapError> {
        let image = image::open(path)?.to_rgba8();
        let map = Self::from_image(image)?;
        tracing::debug!(
            "Loaded color map {} ({}x{})",
            path.display(),
            map.width(),
            map.height()
        );
        Ok(map)
    }
}

impl ColorMap for ImageColorMap {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn pixel_color(&self, x: u32, y: u32) -> Color {
        let (width, height) = self.image.dimensions();
        let col = x.min(width - 1);
        let row = height - 1 - y.min(height - 1);
        Color::from_rgba8(self.image.get_pixel(col, row).0)
    }
}
