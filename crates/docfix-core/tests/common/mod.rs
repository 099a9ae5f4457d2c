use docfix_core::geometry::ImagePoint;
use docfix_core::raster::{PixelFormat, Raster};

pub fn pt(x: f64, y: f64) -> ImagePoint {
    ImagePoint::new(x, y)
}

/// RGB raster whose pixel at (x, y) is `(x, y, x + y)` modulo 256, so every
/// pixel of a small image is distinguishable.
pub fn gradient_raster(width: u32, height: u32) -> Raster {
    let mut pixels = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            pixels.push((x % 256) as u8);
            pixels.push((y % 256) as u8);
            pixels.push(((x + y) % 256) as u8);
        }
    }
    Raster::from_raw(width, height, PixelFormat::Rgb8, pixels).unwrap()
}

/// RGBA variant of [`gradient_raster`] with alpha set to `(x * 7 + y) % 256`.
pub fn gradient_raster_rgba(width: u32, height: u32) -> Raster {
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            pixels.push((x % 256) as u8);
            pixels.push((y % 256) as u8);
            pixels.push(((x + y) % 256) as u8);
            pixels.push(((x * 7 + y) % 256) as u8);
        }
    }
    Raster::from_raw(width, height, PixelFormat::Rgba8, pixels).unwrap()
}

pub fn solid_raster(width: u32, height: u32, format: PixelFormat, value: &[u8]) -> Raster {
    Raster::filled(width, height, format, value).unwrap()
}

pub fn pixel(raster: &Raster, x: u32, y: u32) -> Vec<u8> {
    raster.pixel(x, y).to_vec()
}

/// Axis-aligned square corners in click order TL, TR, BR, BL.
pub fn square(x0: f64, y0: f64, size: f64) -> [ImagePoint; 4] {
    [
        pt(x0, y0),
        pt(x0 + size, y0),
        pt(x0 + size, y0 + size),
        pt(x0, y0 + size),
    ]
}

pub fn assert_near(actual: (f64, f64), expected: (f64, f64), tol: f64) {
    assert!(
        (actual.0 - expected.0).abs() < tol && (actual.1 - expected.1).abs() < tol,
        "expected ({}, {}), got ({}, {})",
        expected.0,
        expected.1,
        actual.0,
        actual.1
    );
}
