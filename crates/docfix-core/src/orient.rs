//! Lossless quarter-turn rotations.
//!
//! These are pure pixel permutations built from axis flips and a transpose
//! of the `(row, col, channel)` array; no resampling is involved.

use ndarray::Axis;
use serde::{Deserialize, Serialize};

use crate::raster::Raster;

/// A quarter-turn orientation change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rotation {
    /// 90° counter-clockwise.
    Left,
    /// 90° clockwise.
    Right,
    /// 180°.
    Half,
}

impl Rotation {
    pub fn apply(self, raster: &Raster) -> Raster {
        match self {
            Self::Left => rotate_left(raster),
            Self::Right => rotate_right(raster),
            Self::Half => rotate_180(raster),
        }
    }
}

impl std::fmt::Display for Rotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Left => write!(f, "Left (90° CCW)"),
            Self::Right => write!(f, "Right (90° CW)"),
            Self::Half => write!(f, "180°"),
        }
    }
}

/// Rotate 90° counter-clockwise: `out[r][c] = in[c][w-1-r]`, `(w,h) → (h,w)`.
pub fn rotate_left(raster: &Raster) -> Raster {
    let mut view = raster.data().view();
    view.invert_axis(Axis(1));
    rebuild(raster, view.permuted_axes([1, 0, 2]))
}

/// Rotate 90° clockwise: `out[r][c] = in[h-1-c][r]`.
///
/// Pixel-identical to three successive [`rotate_left`] calls.
pub fn rotate_right(raster: &Raster) -> Raster {
    let mut view = raster.data().view();
    view.invert_axis(Axis(0));
    rebuild(raster, view.permuted_axes([1, 0, 2]))
}

/// Rotate 180°. Pixel-identical to two successive [`rotate_left`] calls.
pub fn rotate_180(raster: &Raster) -> Raster {
    let mut view = raster.data().view();
    view.invert_axis(Axis(0));
    view.invert_axis(Axis(1));
    rebuild(raster, view)
}

fn rebuild(source: &Raster, view: ndarray::ArrayView3<'_, u8>) -> Raster {
    Raster::from_parts(view.as_standard_layout().into_owned(), source.format())
}
