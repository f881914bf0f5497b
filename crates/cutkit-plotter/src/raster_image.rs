//! Raster images and their laser intensity.
//!
//! A raster cut burns darker and more opaque pixels longer and harder. Each
//! supported pixel encoding has a rule mapping one pixel to a power weight in
//! `[0, 1]`:
//!
//! | mode | weight |
//! |---|---|
//! | bilevel (`1`) | `(255 - p) / 255` |
//! | palette (`P`) | `1 - (r + g + b) / 765` of the palette entry |
//! | gray (`L`) | `(255 - p) / 255` |
//! | RGB | `1 - (r + g + b) / 765` |
//! | RGBA | `(1 - (r + g + b) / 765) * a / 255` |
//!
//! Any other encoding is converted to RGBA first.

use cutkit_core::{RasterError, RasterResult};
use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};

/// Pixel encoding of a raster image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// One bit per pixel, stored as 0 (black) or 255 (white)
    Bilevel,
    /// One palette index per pixel
    Palette,
    /// 8-bit grayscale
    Gray,
    /// 8-bit RGB
    Rgb,
    /// 8-bit RGB with alpha
    Rgba,
    /// Any other encoding `image` supports
    Other(image::ColorType),
}

impl std::fmt::Display for ColorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bilevel => write!(f, "1"),
            Self::Palette => write!(f, "P"),
            Self::Gray => write!(f, "L"),
            Self::Rgb => write!(f, "RGB"),
            Self::Rgba => write!(f, "RGBA"),
            Self::Other(color) => write!(f, "{:?}", color),
        }
    }
}

/// An image buffer handed over by upstream parsing.
#[derive(Debug, Clone)]
pub enum RasterImage {
    /// Bilevel pixels (0 or 255), one byte each
    Bilevel(GrayImage),
    /// Palette indices with `[r, g, b]` entries
    Palette {
        indices: GrayImage,
        palette: Vec<[u8; 3]>,
    },
    /// Any image decoded by `image`
    Dynamic(DynamicImage),
}

impl RasterImage {
    /// Bilevel image from one byte per pixel, row-major.
    pub fn bilevel(width: u32, height: u32, pixels: Vec<u8>) -> RasterResult<Self> {
        Ok(Self::Bilevel(gray_buffer(width, height, pixels)?))
    }

    /// Palette-indexed image from one index byte per pixel, row-major.
    pub fn palette(
        width: u32,
        height: u32,
        indices: Vec<u8>,
        palette: Vec<[u8; 3]>,
    ) -> RasterResult<Self> {
        Ok(Self::Palette {
            indices: gray_buffer(width, height, indices)?,
            palette,
        })
    }

    pub fn width(&self) -> u32 {
        self.dimensions().0
    }

    pub fn height(&self) -> u32 {
        self.dimensions().1
    }

    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Self::Bilevel(img) => img.dimensions(),
            Self::Palette { indices, .. } => indices.dimensions(),
            Self::Dynamic(img) => (img.width(), img.height()),
        }
    }

    pub fn mode(&self) -> ColorMode {
        match self {
            Self::Bilevel(_) => ColorMode::Bilevel,
            Self::Palette { .. } => ColorMode::Palette,
            Self::Dynamic(DynamicImage::ImageLuma8(_)) => ColorMode::Gray,
            Self::Dynamic(DynamicImage::ImageRgb8(_)) => ColorMode::Rgb,
            Self::Dynamic(DynamicImage::ImageRgba8(_)) => ColorMode::Rgba,
            Self::Dynamic(img) => ColorMode::Other(img.color()),
        }
    }
}

impl From<DynamicImage> for RasterImage {
    fn from(image: DynamicImage) -> Self {
        Self::Dynamic(image)
    }
}

fn gray_buffer(width: u32, height: u32, pixels: Vec<u8>) -> RasterResult<GrayImage> {
    let expected = width as usize * height as usize;
    let actual = pixels.len();
    GrayImage::from_raw(width, height, pixels).ok_or(RasterError::BufferSize {
        width,
        height,
        expected,
        actual,
    })
}

/// Pixel buffer paired with the intensity rule for its encoding.
///
/// Built once per raster plan; encodings without a rule have already been
/// converted to RGBA.
#[derive(Debug, Clone)]
pub enum IntensityMap {
    Bilevel(GrayImage),
    Palette {
        indices: GrayImage,
        palette: Vec<[u8; 3]>,
    },
    Gray(GrayImage),
    Rgb(RgbImage),
    Rgba(RgbaImage),
}

impl IntensityMap {
    /// Select the intensity rule for `image`, converting it to RGBA when its
    /// encoding has no rule of its own.
    pub fn new(image: RasterImage) -> RasterResult<Self> {
        match image {
            RasterImage::Bilevel(pixels) => Ok(Self::Bilevel(pixels)),
            RasterImage::Palette { indices, palette } => {
                if palette.is_empty() {
                    return Err(RasterError::MissingPalette);
                }
                if let Some(&index) = indices.as_raw().iter().find(|&&i| i as usize >= palette.len()) {
                    return Err(RasterError::PaletteIndexOutOfRange {
                        index,
                        entries: palette.len(),
                    });
                }
                Ok(Self::Palette { indices, palette })
            }
            RasterImage::Dynamic(image) => {
                let image = match image {
                    DynamicImage::ImageLuma8(_)
                    | DynamicImage::ImageRgb8(_)
                    | DynamicImage::ImageRgba8(_) => image,
                    other => DynamicImage::ImageRgba8(other.to_rgba8()),
                };
                match image {
                    DynamicImage::ImageLuma8(pixels) => Ok(Self::Gray(pixels)),
                    DynamicImage::ImageRgb8(pixels) => Ok(Self::Rgb(pixels)),
                    DynamicImage::ImageRgba8(pixels) => Ok(Self::Rgba(pixels)),
                    other => Err(RasterError::UnsupportedColorMode(format!(
                        "{:?}",
                        other.color()
                    ))),
                }
            }
        }
    }

    pub fn mode(&self) -> ColorMode {
        match self {
            Self::Bilevel(_) => ColorMode::Bilevel,
            Self::Palette { .. } => ColorMode::Palette,
            Self::Gray(_) => ColorMode::Gray,
            Self::Rgb(_) => ColorMode::Rgb,
            Self::Rgba(_) => ColorMode::Rgba,
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Self::Bilevel(img) | Self::Gray(img) => img.dimensions(),
            Self::Palette { indices, .. } => indices.dimensions(),
            Self::Rgb(img) => img.dimensions(),
            Self::Rgba(img) => img.dimensions(),
        }
    }

    /// Laser power weight of the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the image.
    pub fn weight(&self, x: u32, y: u32) -> f64 {
        match self {
            Self::Bilevel(img) => bilevel_weight(img.get_pixel(x, y).0[0]),
            Self::Palette { indices, palette } => {
                rgb_weight(palette[indices.get_pixel(x, y).0[0] as usize])
            }
            Self::Gray(img) => gray_weight(img.get_pixel(x, y).0[0]),
            Self::Rgb(img) => rgb_weight(img.get_pixel(x, y).0),
            Self::Rgba(img) => rgba_weight(img.get_pixel(x, y).0),
        }
    }
}

pub fn bilevel_weight(pixel: u8) -> f64 {
    (255.0 - pixel as f64) / 255.0
}

pub fn gray_weight(pixel: u8) -> f64 {
    (255.0 - pixel as f64) / 255.0
}

pub fn rgb_weight([r, g, b]: [u8; 3]) -> f64 {
    1.0 - (r as f64 + g as f64 + b as f64) / 765.0
}

/// Fully transparent pixels weigh nothing, whatever their color.
pub fn rgba_weight([r, g, b, a]: [u8; 4]) -> f64 {
    rgb_weight([r, g, b]) * a as f64 / 255.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, LumaA, Rgba};

    #[test]
    fn test_bilevel_weights() {
        assert_eq!(bilevel_weight(0), 1.0);
        assert_eq!(bilevel_weight(255), 0.0);
    }

    #[test]
    fn test_rgba_transparent_is_zero() {
        assert_eq!(rgba_weight([0, 0, 0, 0]), 0.0);
        assert_eq!(rgba_weight([255, 10, 99, 0]), 0.0);
        assert_eq!(rgba_weight([0, 0, 0, 255]), 1.0);
    }

    #[test]
    fn test_rgb_weight() {
        assert_eq!(rgb_weight([0, 0, 0]), 1.0);
        assert_eq!(rgb_weight([255, 255, 255]), 0.0);
        assert!((rgb_weight([255, 0, 0]) - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_palette_lookup() {
        let image = RasterImage::palette(2, 1, vec![0, 1], vec![[0, 0, 0], [255, 255, 255]]).unwrap();
        let map = IntensityMap::new(image).unwrap();
        assert_eq!(map.mode(), ColorMode::Palette);
        assert_eq!(map.weight(0, 0), 1.0);
        assert_eq!(map.weight(1, 0), 0.0);
    }

    #[test]
    fn test_palette_index_out_of_range() {
        let image = RasterImage::palette(2, 1, vec![0, 3], vec![[0, 0, 0]]).unwrap();
        assert_eq!(
            IntensityMap::new(image).unwrap_err(),
            RasterError::PaletteIndexOutOfRange {
                index: 3,
                entries: 1
            }
        );
    }

    #[test]
    fn test_missing_palette() {
        let image = RasterImage::palette(1, 1, vec![0], Vec::new()).unwrap();
        assert_eq!(
            IntensityMap::new(image).unwrap_err(),
            RasterError::MissingPalette
        );
    }

    #[test]
    fn test_buffer_size_checked() {
        let err = RasterImage::bilevel(3, 2, vec![0; 5]).unwrap_err();
        assert!(matches!(
            err,
            RasterError::BufferSize {
                expected: 6,
                actual: 5,
                ..
            }
        ));
    }

    #[test]
    fn test_gray_alpha_converted_to_rgba() {
        let buffer: ImageBuffer<LumaA<u8>, Vec<u8>> =
            ImageBuffer::from_pixel(2, 2, LumaA([0, 0]));
        let image = RasterImage::from(DynamicImage::ImageLumaA8(buffer));
        assert_eq!(image.mode(), ColorMode::Other(image::ColorType::La8));

        let map = IntensityMap::new(image).unwrap();
        assert_eq!(map.mode(), ColorMode::Rgba);
        // black but transparent
        assert_eq!(map.weight(1, 1), 0.0);
    }

    #[test]
    fn test_rgba_used_directly() {
        let buffer = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]));
        let map = IntensityMap::new(DynamicImage::ImageRgba8(buffer).into()).unwrap();
        assert_eq!(map.mode(), ColorMode::Rgba);
        assert_eq!(map.weight(0, 0), 1.0);
    }
}
