use crate::consts::{PROJECTIVE_W_EPSILON, SINGULAR_EPSILON};
use crate::error::{DocfixError, Result};
use crate::geometry::affine::Affine2;

/// Planar projective transform (homography), column-vector convention.
///
/// Stored as a row-major 3x3 matrix. The usual 8-coefficient form
/// `[a, b, c, d, e, f, g, h]` fixes the last element to 1:
///
/// ```text
/// x' = (a*x + b*y + c) / (g*x + h*y + 1)
/// y' = (d*x + e*y + f) / (g*x + h*y + 1)
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Homography {
    m: [f64; 9],
}

impl Default for Homography {
    fn default() -> Self {
        Self::identity()
    }
}

impl Homography {
    pub const fn identity() -> Self {
        Self {
            m: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
        }
    }

    pub const fn from_coeffs(c: [f64; 8]) -> Self {
        Self {
            m: [c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7], 1.0],
        }
    }

    pub const fn from_matrix(m: [f64; 9]) -> Self {
        Self { m }
    }

    pub fn from_affine(t: &Affine2) -> Self {
        Self::from_coeffs([t.a, t.b, t.c, t.d, t.e, t.f, 0.0, 0.0])
    }

    /// Row-major 3x3 matrix.
    pub fn matrix(&self) -> [f64; 9] {
        self.m
    }

    /// The 8 coefficients after scaling the last element to 1.
    ///
    /// `None` when the last element is zero, i.e. the origin maps to
    /// infinity and the 8-coefficient form cannot represent the transform.
    pub fn coeffs(&self) -> Option<[f64; 8]> {
        let s = self.m[8];
        if s.abs() < PROJECTIVE_W_EPSILON {
            return None;
        }
        let m = &self.m;
        Some([
            m[0] / s,
            m[1] / s,
            m[2] / s,
            m[3] / s,
            m[4] / s,
            m[5] / s,
            m[6] / s,
            m[7] / s,
        ])
    }

    /// Matrix product `self * other`: the result applies `other` first,
    /// then `self`.
    pub fn multiply(&self, other: &Homography) -> Homography {
        let a = &self.m;
        let b = &other.m;
        let mut m = [0.0; 9];
        for row in 0..3 {
            for col in 0..3 {
                m[row * 3 + col] = (0..3).map(|k| a[row * 3 + k] * b[k * 3 + col]).sum();
            }
        }
        Homography { m }
    }

    pub fn determinant(&self) -> f64 {
        let m = &self.m;
        m[0] * (m[4] * m[8] - m[5] * m[7]) - m[1] * (m[3] * m[8] - m[5] * m[6])
            + m[2] * (m[3] * m[7] - m[4] * m[6])
    }

    /// Inverse transform via the adjugate, rescaled so the last element is 1
    /// whenever possible.
    ///
    /// The determinant is compared against the magnitude of the terms that
    /// produce it, so the test does not depend on the pixel scale of the
    /// coordinates involved.
    pub fn inverse(&self) -> Result<Homography> {
        let m = &self.m;
        let adj = [
            m[4] * m[8] - m[5] * m[7],
            m[2] * m[7] - m[1] * m[8],
            m[1] * m[5] - m[2] * m[4],
            m[5] * m[6] - m[3] * m[8],
            m[0] * m[8] - m[2] * m[6],
            m[2] * m[3] - m[0] * m[5],
            m[3] * m[7] - m[4] * m[6],
            m[1] * m[6] - m[0] * m[7],
            m[0] * m[4] - m[1] * m[3],
        ];

        let terms = [m[0] * adj[0], m[1] * adj[3], m[2] * adj[6]];
        let det: f64 = terms.iter().sum();
        let magnitude: f64 = terms.iter().map(|t| t.abs()).sum();
        if !det.is_finite() || magnitude == 0.0 || det.abs() < SINGULAR_EPSILON * magnitude {
            return Err(DocfixError::SingularMatrix);
        }
        let norm = m.iter().fold(0.0f64, |acc, v| acc.max(v.abs()));

        // Any nonzero multiple is the same homography; prefer h33 = 1.
        let scale = if adj[8].abs() > PROJECTIVE_W_EPSILON * norm.powi(2) {
            adj[8]
        } else {
            det
        };
        let mut inv = [0.0; 9];
        for (dst, src) in inv.iter_mut().zip(adj.iter()) {
            *dst = src / scale;
        }
        if inv.iter().any(|v| !v.is_finite()) {
            return Err(DocfixError::SingularMatrix);
        }
        Ok(Homography { m: inv })
    }

    /// Map a point. `None` when it lands on the line at infinity.
    pub fn apply(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let m = &self.m;
        let w = m[6] * x + m[7] * y + m[8];
        if w.abs() < PROJECTIVE_W_EPSILON {
            return None;
        }
        Some((
            (m[0] * x + m[1] * y + m[2]) / w,
            (m[3] * x + m[4] * y + m[5]) / w,
        ))
    }

    /// True when the projective row is zero, i.e. the map is affine.
    pub fn is_affine(&self) -> bool {
        self.m[6].abs() < PROJECTIVE_W_EPSILON && self.m[7].abs() < PROJECTIVE_W_EPSILON
    }
}
