use std::path::Path;

use anyhow::{bail, Context, Result};
use docfix_core::config::SessionConfig;
use docfix_core::geometry::ImagePoint;
use docfix_core::raster::Raster;
use image::{DynamicImage, ImageFormat};

/// Decode an image file into a raster.
pub fn load_raster(path: &Path) -> Result<Raster> {
    let img = image::open(path).with_context(|| format!("Failed to load {}", path.display()))?;
    let raster = Raster::from_dynamic(&img)?;
    tracing::debug!(
        path = %path.display(),
        width = raster.width(),
        height = raster.height(),
        "Image decoded"
    );
    Ok(raster)
}

/// Encode a raster, choosing the format from the file extension.
///
/// JPEG has no alpha channel, so RGBA rasters are flattened to RGB for it.
pub fn save_raster(raster: &Raster, path: &Path) -> Result<()> {
    let format = ImageFormat::from_path(path)
        .with_context(|| format!("Unknown image format for {}", path.display()))?;
    let img = match (format, raster.to_dynamic()?) {
        (ImageFormat::Jpeg, img) => DynamicImage::ImageRgb8(img.to_rgb8()),
        (_, img) => img,
    };
    img.save_with_format(path, format)?;
    Ok(())
}

/// Read a session configuration from a TOML file. Missing sections and
/// fields take their defaults.
pub fn load_config(path: &Path) -> Result<SessionConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: SessionConfig = toml::from_str(&text)
        .with_context(|| format!("Invalid config {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config {}", path.display()))?;
    Ok(config)
}

/// Parse `"x,y x,y ..."` into image points.
pub fn parse_points(s: &str) -> Result<Vec<ImagePoint>> {
    s.split_whitespace()
        .map(|pair| {
            let Some((x, y)) = pair.split_once(',') else {
                bail!("Invalid point '{pair}', expected x,y");
            };
            let x: f64 = x
                .trim()
                .parse()
                .with_context(|| format!("Invalid x coordinate in '{pair}'"))?;
            let y: f64 = y
                .trim()
                .parse()
                .with_context(|| format!("Invalid y coordinate in '{pair}'"))?;
            Ok(ImagePoint::new(x, y))
        })
        .collect()
}
