use rayon::prelude::*;

use crate::config::{Background, Interpolation, RectifyConfig};
use crate::consts::{CUBIC_A, MAX_OUTPUT_PIXELS, PARALLEL_PIXEL_THRESHOLD};
use crate::error::{DocfixError, Result};
use crate::geometry::Homography;
use crate::raster::Raster;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResampleOptions {
    pub interpolation: Interpolation,
    pub background: Background,
}

impl From<&RectifyConfig> for ResampleOptions {
    fn from(config: &RectifyConfig) -> Self {
        Self {
            interpolation: config.interpolation,
            background: config.background,
        }
    }
}

/// Produce a `width x height` raster by inverse mapping.
///
/// `dst_to_src` maps output coordinates to source coordinates. Pixel centres
/// sit at half-integer positions in both spaces. Output pixels whose source
/// location falls outside the source raster (or at infinity) get the
/// background fill; samples near the border replicate edge pixels.
///
/// Outputs larger than [`MAX_OUTPUT_PIXELS`] are refused with
/// `OutputTooLarge` before anything is allocated.
pub fn resample(
    source: &Raster,
    dst_to_src: &Homography,
    width: u32,
    height: u32,
    options: &ResampleOptions,
) -> Result<Raster> {
    if width == 0 || height == 0 {
        return Err(DocfixError::InvalidDimensions { width, height });
    }
    let pixels = width as u64 * height as u64;
    if pixels > MAX_OUTPUT_PIXELS {
        return Err(DocfixError::OutputTooLarge {
            width: width as u64,
            height: height as u64,
            limit: MAX_OUTPUT_PIXELS,
        });
    }

    let channels = source.channels();
    let fill = options.background.fill(source.format());
    let row_len = width as usize * channels;
    let mut buffer = vec![0u8; row_len * height as usize];

    let render_row = |y: usize, row: &mut [u8]| {
        let cy = y as f64 + 0.5;
        for (x, px) in row.chunks_exact_mut(channels).enumerate() {
            match dst_to_src.apply(x as f64 + 0.5, cy) {
                Some((sx, sy)) => {
                    sample_into(source, sx - 0.5, sy - 0.5, options.interpolation, &fill, px)
                }
                None => px.copy_from_slice(&fill),
            }
        }
    };

    if pixels as usize >= PARALLEL_PIXEL_THRESHOLD {
        buffer
            .par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(y, row)| render_row(y, row));
    } else {
        for (y, row) in buffer.chunks_mut(row_len).enumerate() {
            render_row(y, row);
        }
    }

    Raster::from_raw(width, height, source.format(), buffer)
}

/// Write the interpolated value at pixel-centre coordinates `(x, y)` into `out`.
pub(crate) fn sample_into(
    source: &Raster,
    x: f64,
    y: f64,
    interpolation: Interpolation,
    fill: &[u8],
    out: &mut [u8],
) {
    let w = source.width() as f64;
    let h = source.height() as f64;
    // Negated form so NaN coordinates also take the background.
    if !(x >= -0.5 && x < w - 0.5 && y >= -0.5 && y < h - 0.5) {
        out.copy_from_slice(fill);
        return;
    }

    match interpolation {
        Interpolation::Nearest => {
            let col = clamp_index((x + 0.5).floor() as i64, source.width());
            let row = clamp_index((y + 0.5).floor() as i64, source.height());
            for (ch, v) in out.iter_mut().enumerate() {
                *v = source.data()[[row, col, ch]];
            }
        }
        Interpolation::Bilinear => {
            let x0 = x.floor();
            let y0 = y.floor();
            let fx = x - x0;
            let fy = y - y0;
            let weights_x = [1.0 - fx, fx];
            let weights_y = [1.0 - fy, fy];
            convolve(source, x0 as i64, y0 as i64, &weights_x, &weights_y, 0, out);
        }
        Interpolation::Bicubic => {
            let x0 = x.floor();
            let y0 = y.floor();
            let dx = x - x0;
            let dy = y - y0;
            let weights_x = [
                cubic_kernel(dx + 1.0),
                cubic_kernel(dx),
                cubic_kernel(dx - 1.0),
                cubic_kernel(dx - 2.0),
            ];
            let weights_y = [
                cubic_kernel(dy + 1.0),
                cubic_kernel(dy),
                cubic_kernel(dy - 1.0),
                cubic_kernel(dy - 2.0),
            ];
            convolve(source, x0 as i64, y0 as i64, &weights_x, &weights_y, 1, out);
        }
    }
}

/// Separable weighted sum over the neighbourhood whose first tap sits
/// `lead` pixels before `(x0, y0)`, with edge replication.
fn convolve(
    source: &Raster,
    x0: i64,
    y0: i64,
    weights_x: &[f64],
    weights_y: &[f64],
    lead: i64,
    out: &mut [u8],
) {
    let data = source.data();
    for (ch, v) in out.iter_mut().enumerate() {
        let mut acc = 0.0;
        for (j, wy) in weights_y.iter().enumerate() {
            let row = clamp_index(y0 - lead + j as i64, source.height());
            let mut row_acc = 0.0;
            for (i, wx) in weights_x.iter().enumerate() {
                let col = clamp_index(x0 - lead + i as i64, source.width());
                row_acc += wx * data[[row, col, ch]] as f64;
            }
            acc += wy * row_acc;
        }
        *v = acc.round().clamp(0.0, 255.0) as u8;
    }
}

#[inline]
fn clamp_index(i: i64, len: u32) -> usize {
    i.clamp(0, len as i64 - 1) as usize
}

/// Cubic convolution kernel (Keys, `a = -0.5`).
#[inline]
fn cubic_kernel(t: f64) -> f64 {
    let t = t.abs();
    if t <= 1.0 {
        (CUBIC_A + 2.0) * t * t * t - (CUBIC_A + 3.0) * t * t + 1.0
    } else if t < 2.0 {
        CUBIC_A * t * t * t - 5.0 * CUBIC_A * t * t + 8.0 * CUBIC_A * t - 4.0 * CUBIC_A
    } else {
        0.0
    }
}
