use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_MARKER_RADIUS, DEFAULT_VIEWPORT_MARGIN, DEFAULT_ZOOM_SNAP_TOLERANCE};
use crate::error::{DocfixError, Result};
use crate::raster::PixelFormat;

/// Everything a document session needs, passed in at construction.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub rectify: RectifyConfig,
    #[serde(default)]
    pub overlay: OverlayConfig,
}

impl SessionConfig {
    /// Reject values that would make view or overlay math meaningless.
    pub fn validate(&self) -> Result<()> {
        self.view.validate()?;
        self.overlay.validate()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Total margin in screen pixels around the fitted image (default: 10).
    pub margin: f64,
    /// Optional lower bound on the zoom scale (default: unbounded).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_scale: Option<f64>,
    /// Optional upper bound on the zoom scale (default: unbounded).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_scale: Option<f64>,
    /// Scales this close to an integer snap to it (default: 0.001).
    pub zoom_snap_tolerance: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            margin: DEFAULT_VIEWPORT_MARGIN,
            min_scale: None,
            max_scale: None,
            zoom_snap_tolerance: DEFAULT_ZOOM_SNAP_TOLERANCE,
        }
    }
}

impl ViewConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.margin.is_finite() && self.margin >= 0.0) {
            return Err(invalid(format!("view.margin must be >= 0, got {}", self.margin)));
        }
        if !(self.zoom_snap_tolerance >= 0.0 && self.zoom_snap_tolerance < 0.5) {
            return Err(invalid(format!(
                "view.zoom_snap_tolerance must be in [0, 0.5), got {}",
                self.zoom_snap_tolerance
            )));
        }
        for (name, bound) in [("min_scale", self.min_scale), ("max_scale", self.max_scale)] {
            if let Some(v) = bound {
                if !(v.is_finite() && v > 0.0) {
                    return Err(invalid(format!("view.{name} must be positive, got {v}")));
                }
            }
        }
        if let (Some(lo), Some(hi)) = (self.min_scale, self.max_scale) {
            if lo > hi {
                return Err(invalid(format!(
                    "view.min_scale ({lo}) exceeds view.max_scale ({hi})"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RectifyConfig {
    pub interpolation: Interpolation,
    pub background: Background,
    pub corner_strategy: CornerStrategy,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Marker radius in screen pixels, constant at every zoom level.
    pub marker_radius: f64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            marker_radius: DEFAULT_MARKER_RADIUS,
        }
    }
}

impl OverlayConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.marker_radius.is_finite() && self.marker_radius >= 0.0) {
            return Err(invalid(format!(
                "overlay.marker_radius must be >= 0, got {}",
                self.marker_radius
            )));
        }
        Ok(())
    }
}

fn invalid(msg: String) -> DocfixError {
    DocfixError::InvalidConfig(msg)
}

/// Sampling kernel used when resampling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interpolation {
    Nearest,
    Bilinear,
    #[default]
    Bicubic,
}

impl std::fmt::Display for Interpolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nearest => write!(f, "Nearest"),
            Self::Bilinear => write!(f, "Bilinear"),
            Self::Bicubic => write!(f, "Bicubic"),
        }
    }
}

/// Fill for output pixels whose source location lies outside the image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Background {
    /// All channels zero. On RGB rasters this is black.
    #[default]
    Transparent,
    Black,
    White,
    /// RGBA value; the alpha is dropped for RGB rasters.
    Color([u8; 4]),
}

impl Background {
    /// Channel values for a raster of the given format.
    pub fn fill(self, format: PixelFormat) -> Vec<u8> {
        let rgba = match self {
            Self::Transparent => [0, 0, 0, 0],
            Self::Black => [0, 0, 0, 255],
            Self::White => [255, 255, 255, 255],
            Self::Color(c) => c,
        };
        rgba[..format.channels()].to_vec()
    }
}

impl std::fmt::Display for Background {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transparent => write!(f, "Transparent"),
            Self::Black => write!(f, "Black"),
            Self::White => write!(f, "White"),
            Self::Color([r, g, b, a]) => write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}"),
        }
    }
}

/// How four clicked points are labelled as page corners.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CornerStrategy {
    /// Quadrant relative to the centroid; fails on strongly skewed input.
    #[default]
    Quadrant,
    /// Angular order around the centroid, starting from the top-left-most point.
    Angular,
}

impl std::fmt::Display for CornerStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Quadrant => write!(f, "Quadrant"),
            Self::Angular => write!(f, "Angular"),
        }
    }
}
