use ndarray::{Array1, Array2};
use tracing::debug;

use crate::consts::{CORNER_COUNT, MAX_OUTPUT_PIXELS};
use crate::corners::CornerAssignment;
use crate::error::{DocfixError, Result};
use crate::geometry::linalg::solve_least_squares;
use crate::geometry::{Affine2, Homography, ImagePoint};

/// Perspective correction for one page: the transform between the clicked
/// quadrilateral and an upright `width x height` rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rectification {
    /// Source image → rectified output.
    pub forward: Homography,
    /// Rectified output → source image; what the resampler walks.
    pub inverse: Homography,
    pub width: u32,
    pub height: u32,
}

impl Rectification {
    /// Where a source image point lands in the rectified output.
    pub fn to_output(&self, p: ImagePoint) -> Option<(f64, f64)> {
        self.forward.apply(p.x, p.y)
    }

    /// Where an output position comes from in the source image.
    pub fn to_source(&self, x: f64, y: f64) -> Option<ImagePoint> {
        self.inverse
            .apply(x, y)
            .map(|(sx, sy)| ImagePoint::new(sx, sy))
    }
}

/// Output size implied by the corners: the mean of the top and bottom edge
/// widths and the mean of the left and right edge heights, each measured
/// along its axis and rounded half-to-even.
///
/// A non-positive size is `DegenerateQuad`; a size whose pixel count exceeds
/// [`MAX_OUTPUT_PIXELS`] is `OutputTooLarge`.
pub fn target_size(corners: &CornerAssignment) -> Result<(u32, u32)> {
    let CornerAssignment {
        top_left: tl,
        top_right: tr,
        bottom_right: br,
        bottom_left: bl,
    } = *corners;

    let width = (((tr.x - tl.x) + (br.x - bl.x)) / 2.0).round_ties_even();
    let height = (((bl.y - tl.y) + (br.y - tr.y)) / 2.0).round_ties_even();

    if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
        return Err(DocfixError::DegenerateQuad {
            width: width as i64,
            height: height as i64,
        });
    }
    let too_large = width > u32::MAX as f64
        || height > u32::MAX as f64
        || width * height > MAX_OUTPUT_PIXELS as f64;
    if too_large {
        return Err(DocfixError::OutputTooLarge {
            width: width as u64,
            height: height as u64,
            limit: MAX_OUTPUT_PIXELS,
        });
    }
    Ok((width as u32, height as u32))
}

/// Compute the rectification that maps the corners TL, TR, BR, BL onto
/// `(0,0)`, `(W,0)`, `(W,H)`, `(0,H)`.
pub fn estimate_rectification(corners: &CornerAssignment) -> Result<Rectification> {
    let (width, height) = target_size(corners)?;
    let (w, h) = (width as f64, height as f64);

    let src = corners.ordered().map(|p| (p.x, p.y));
    let dst = [(0.0, 0.0), (w, 0.0), (w, h), (0.0, h)];

    let forward = estimate_homography(&src, &dst)?;
    let inverse = forward.inverse()?;

    debug!(width, height, "Rectification estimated");
    Ok(Rectification {
        forward,
        inverse,
        width,
        height,
    })
}

/// Least-squares homography mapping each `src[i]` onto `dst[i]`.
///
/// Needs at least four correspondences. Coordinates are Hartley-normalised
/// before solving the 8-unknown linear system (`h33` fixed to 1), then the
/// normalisation is undone.
pub fn estimate_homography(src: &[(f64, f64)], dst: &[(f64, f64)]) -> Result<Homography> {
    if src.len() < CORNER_COUNT || src.len() != dst.len() {
        return Err(DocfixError::WrongPointCount { count: src.len() });
    }

    let (src_n, t_src, _) = normalize_points(src);
    let (dst_n, _, t_dst_inv) = normalize_points(dst);

    let n = src.len();
    let mut a = Array2::<f64>::zeros((2 * n, 8));
    let mut b = Array1::<f64>::zeros(2 * n);
    for (k, (&(x, y), &(u, v))) in src_n.iter().zip(dst_n.iter()).enumerate() {
        let r = 2 * k;
        a[[r, 0]] = x;
        a[[r, 1]] = y;
        a[[r, 2]] = 1.0;
        a[[r, 6]] = -u * x;
        a[[r, 7]] = -u * y;
        b[r] = u;

        a[[r + 1, 3]] = x;
        a[[r + 1, 4]] = y;
        a[[r + 1, 5]] = 1.0;
        a[[r + 1, 6]] = -v * x;
        a[[r + 1, 7]] = -v * y;
        b[r + 1] = v;
    }

    let p = solve_least_squares(&a, &b)?;
    let hn = Homography::from_coeffs([p[0], p[1], p[2], p[3], p[4], p[5], p[6], p[7]]);

    // H = T_dst⁻¹ · Hn · T_src
    let h = Homography::from_affine(&t_dst_inv)
        .multiply(&hn)
        .multiply(&Homography::from_affine(&t_src));

    let coeffs = h.coeffs().ok_or(DocfixError::SingularMatrix)?;
    Ok(Homography::from_coeffs(coeffs))
}

/// Translate to the centroid and scale so the mean distance from it is √2.
///
/// Returns the normalised points, the normalising transform and its inverse.
fn normalize_points(pts: &[(f64, f64)]) -> (Vec<(f64, f64)>, Affine2, Affine2) {
    let n = pts.len() as f64;
    let (cx, cy) = pts
        .iter()
        .fold((0.0, 0.0), |(sx, sy), &(x, y)| (sx + x, sy + y));
    let (cx, cy) = (cx / n, cy / n);

    let mean_dist = pts
        .iter()
        .map(|&(x, y)| (x - cx).hypot(y - cy))
        .sum::<f64>()
        / n;
    let s = if mean_dist > 1e-12 {
        std::f64::consts::SQRT_2 / mean_dist
    } else {
        1.0
    };

    let t = Affine2::scale(s).multiply(&Affine2::translation(-cx, -cy));
    let t_inv = Affine2::translation(cx, cy).multiply(&Affine2::scale(1.0 / s));
    let out = pts.iter().map(|&(x, y)| t.apply(x, y)).collect();
    (out, t, t_inv)
}
