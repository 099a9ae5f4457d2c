use crate::consts::SINGULAR_EPSILON;
use crate::error::{DocfixError, Result};

/// 2D affine transform using the column-vector convention:
///
/// ```text
/// | a  b  c |   | x |
/// | d  e  f | * | y |
/// | 0  0  1 |   | 1 |
/// ```
///
/// `x' = a*x + b*y + c`, `y' = d*x + e*y + f`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine2 {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Affine2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Affine2 {
    pub const fn identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 0.0,
            e: 1.0,
            f: 0.0,
        }
    }

    pub const fn from_coeffs(coeffs: [f64; 6]) -> Self {
        Self {
            a: coeffs[0],
            b: coeffs[1],
            c: coeffs[2],
            d: coeffs[3],
            e: coeffs[4],
            f: coeffs[5],
        }
    }

    /// Coefficients in `[a, b, c, d, e, f]` order.
    pub fn coeffs(&self) -> [f64; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }

    pub fn translation(tx: f64, ty: f64) -> Self {
        Self {
            c: tx,
            f: ty,
            ..Self::identity()
        }
    }

    /// Uniform scale about the origin.
    pub fn scale(s: f64) -> Self {
        Self::scale_xy(s, s)
    }

    pub fn scale_xy(sx: f64, sy: f64) -> Self {
        Self {
            a: sx,
            e: sy,
            ..Self::identity()
        }
    }

    /// Rotation about the origin. Positive angles turn +x toward +y, which
    /// is clockwise on screen since y grows downward.
    pub fn rotation(radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self {
            a: cos,
            b: -sin,
            c: 0.0,
            d: sin,
            e: cos,
            f: 0.0,
        }
    }

    /// Matrix product `self * other`: the result applies `other` first,
    /// then `self`.
    pub fn multiply(&self, other: &Affine2) -> Affine2 {
        Affine2 {
            a: self.a * other.a + self.b * other.d,
            b: self.a * other.b + self.b * other.e,
            c: self.a * other.c + self.b * other.f + self.c,
            d: self.d * other.a + self.e * other.d,
            e: self.d * other.b + self.e * other.e,
            f: self.d * other.c + self.e * other.f + self.f,
        }
    }

    pub fn determinant(&self) -> f64 {
        self.a * self.e - self.b * self.d
    }

    pub fn inverse(&self) -> Result<Affine2> {
        let det = self.determinant();
        let magnitude = (self.a * self.e).abs() + (self.b * self.d).abs();
        if !det.is_finite() || magnitude == 0.0 || det.abs() < SINGULAR_EPSILON * magnitude {
            return Err(DocfixError::SingularMatrix);
        }
        let inv_det = 1.0 / det;
        let a = self.e * inv_det;
        let b = -self.b * inv_det;
        let d = -self.d * inv_det;
        let e = self.a * inv_det;
        Ok(Affine2 {
            a,
            b,
            c: -(a * self.c + b * self.f),
            d,
            e,
            f: -(d * self.c + e * self.f),
        })
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.b * y + self.c,
            self.d * x + self.e * y + self.f,
        )
    }
}
