pub mod estimate;
pub mod resample;

pub use estimate::{estimate_homography, estimate_rectification, target_size, Rectification};
pub use resample::{resample, ResampleOptions};

use tracing::info;

use crate::corners::CornerAssignment;
use crate::error::Result;
use crate::raster::Raster;

/// A corrected page and the geometry that produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct Rectified {
    pub raster: Raster,
    pub rectification: Rectification,
    pub corners: CornerAssignment,
}

/// Estimate the perspective correction for `corners` and resample `source`
/// into the upright output.
pub fn rectify(
    source: &Raster,
    corners: &CornerAssignment,
    options: &ResampleOptions,
) -> Result<Rectified> {
    let rectification = estimate_rectification(corners)?;
    info!(
        width = rectification.width,
        height = rectification.height,
        interpolation = %options.interpolation,
        "Rectifying page"
    );
    let raster = resample(
        source,
        &rectification.inverse,
        rectification.width,
        rectification.height,
        options,
    )?;
    Ok(Rectified {
        raster,
        rectification,
        corners: *corners,
    })
}
