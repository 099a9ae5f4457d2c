use image::{DynamicImage, RgbImage, RgbaImage};
use ndarray::{s, Array3, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::error::{DocfixError, Result};

/// Interleaved 8-bit pixel layout of a [`Raster`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PixelFormat {
    Rgb8,
    Rgba8,
}

impl PixelFormat {
    pub fn channels(self) -> usize {
        match self {
            Self::Rgb8 => 3,
            Self::Rgba8 => 4,
        }
    }

    pub fn has_alpha(self) -> bool {
        matches!(self, Self::Rgba8)
    }
}

impl std::fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rgb8 => write!(f, "RGB 8-bit"),
            Self::Rgba8 => write!(f, "RGBA 8-bit"),
        }
    }
}

/// A decoded page image.
///
/// Pixels are stored row-major as an `(height, width, channels)` array.
/// A raster is never modified after construction; rotation and
/// rectification produce new rasters.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    data: Array3<u8>,
    format: PixelFormat,
}

impl Raster {
    /// Build a raster from an `(height, width, channels)` array.
    pub fn from_array(data: Array3<u8>, format: PixelFormat) -> Result<Self> {
        let (h, w, c) = data.dim();
        if w == 0 || h == 0 {
            return Err(DocfixError::InvalidDimensions {
                width: w as u32,
                height: h as u32,
            });
        }
        if c != format.channels() {
            return Err(DocfixError::UnsupportedPixelFormat(format!(
                "{c} channels for {format}"
            )));
        }
        Ok(Self { data, format })
    }

    /// Shape must already be nonzero with `format.channels()` channels.
    pub(crate) fn from_parts(data: Array3<u8>, format: PixelFormat) -> Self {
        debug_assert_eq!(data.dim().2, format.channels());
        Self { data, format }
    }

    /// Build a raster from an interleaved byte buffer.
    pub fn from_raw(width: u32, height: u32, format: PixelFormat, pixels: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(DocfixError::InvalidDimensions { width, height });
        }
        let shape = (height as usize, width as usize, format.channels());
        let expected = byte_len(width, height, format)?;
        if pixels.len() != expected {
            return Err(DocfixError::BufferSize {
                expected,
                actual: pixels.len(),
            });
        }
        let data = Array3::from_shape_vec(shape, pixels).map_err(|_| DocfixError::BufferSize {
            expected,
            actual: expected,
        })?;
        Ok(Self { data, format })
    }

    /// A raster with every pixel set to `fill` (one value per channel).
    pub fn filled(width: u32, height: u32, format: PixelFormat, fill: &[u8]) -> Result<Self> {
        if fill.len() != format.channels() {
            return Err(DocfixError::UnsupportedPixelFormat(format!(
                "{} fill values for {format}",
                fill.len()
            )));
        }
        let pixels = fill
            .iter()
            .copied()
            .cycle()
            .take(byte_len(width, height, format)?)
            .collect();
        Self::from_raw(width, height, format, pixels)
    }

    pub fn width(&self) -> u32 {
        self.data.dim().1 as u32
    }

    pub fn height(&self) -> u32 {
        self.data.dim().0 as u32
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn channels(&self) -> usize {
        self.format.channels()
    }

    /// Underlying `(height, width, channels)` array.
    pub fn data(&self) -> &Array3<u8> {
        &self.data
    }

    /// Channel values of the pixel at column `x`, row `y`.
    pub fn pixel(&self, x: u32, y: u32) -> ArrayView1<'_, u8> {
        self.data.slice(s![y as usize, x as usize, ..])
    }

    /// Interleaved copy of the pixel buffer, row-major.
    pub fn to_raw(&self) -> Vec<u8> {
        self.data.iter().copied().collect()
    }

    /// Convert to an `image` buffer for display or encoding.
    pub fn to_dynamic(&self) -> Result<DynamicImage> {
        let (w, h) = (self.width(), self.height());
        let raw = self.to_raw();
        let actual = raw.len();
        let image = match self.format {
            PixelFormat::Rgb8 => RgbImage::from_raw(w, h, raw).map(DynamicImage::ImageRgb8),
            PixelFormat::Rgba8 => RgbaImage::from_raw(w, h, raw).map(DynamicImage::ImageRgba8),
        };
        image.ok_or(DocfixError::BufferSize {
            expected: byte_len(w, h, self.format)?,
            actual,
        })
    }

    /// Convert a decoded image, keeping an alpha channel only if the source
    /// has one. Higher bit depths are reduced to 8 bits per channel.
    pub fn from_dynamic(img: &DynamicImage) -> Result<Self> {
        if img.color().has_alpha() {
            Self::try_from(img.to_rgba8())
        } else {
            Self::try_from(img.to_rgb8())
        }
    }
}

impl TryFrom<RgbImage> for Raster {
    type Error = DocfixError;

    fn try_from(img: RgbImage) -> Result<Self> {
        let (w, h) = img.dimensions();
        Self::from_raw(w, h, PixelFormat::Rgb8, img.into_raw())
    }
}

impl TryFrom<RgbaImage> for Raster {
    type Error = DocfixError;

    fn try_from(img: RgbaImage) -> Result<Self> {
        let (w, h) = img.dimensions();
        Self::from_raw(w, h, PixelFormat::Rgba8, img.into_raw())
    }
}

/// Bytes needed for a `width x height` buffer, or `InvalidDimensions` when
/// that does not fit in memory addressing.
fn byte_len(width: u32, height: u32, format: PixelFormat) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(format.channels()))
        .ok_or(DocfixError::InvalidDimensions { width, height })
}
