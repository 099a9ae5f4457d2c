use ndarray::{Array1, Array2};

use crate::consts::SINGULAR_EPSILON;
use crate::error::{DocfixError, Result};

/// Least-squares solution of `A·x = b` through the normal equations
/// `(AᵀA)·x = Aᵀb`.
///
/// `A` must have at least as many rows as columns. Rank-deficient systems
/// fail with [`DocfixError::SingularMatrix`].
pub fn solve_least_squares(a: &Array2<f64>, b: &Array1<f64>) -> Result<Array1<f64>> {
    let (rows, cols) = a.dim();
    if rows < cols || b.len() != rows {
        return Err(DocfixError::SingularMatrix);
    }
    let ata = a.t().dot(a);
    let atb = a.t().dot(b);
    solve_square(ata, atb)
}

/// Solve a square system by Gaussian elimination with partial pivoting.
///
/// A pivot smaller than `SINGULAR_EPSILON` times the largest entry of the
/// input matrix is treated as zero.
pub fn solve_square(mut m: Array2<f64>, mut rhs: Array1<f64>) -> Result<Array1<f64>> {
    let n = m.nrows();
    if m.ncols() != n || rhs.len() != n {
        return Err(DocfixError::SingularMatrix);
    }

    let norm = m.iter().fold(0.0f64, |acc, v| acc.max(v.abs()));
    if norm == 0.0 || !norm.is_finite() {
        return Err(DocfixError::SingularMatrix);
    }
    let tolerance = SINGULAR_EPSILON * norm;

    for col in 0..n {
        let mut pivot_row = col;
        let mut pivot_val = m[[col, col]].abs();
        for row in (col + 1)..n {
            let val = m[[row, col]].abs();
            if val > pivot_val {
                pivot_val = val;
                pivot_row = row;
            }
        }

        if pivot_val < tolerance {
            return Err(DocfixError::SingularMatrix);
        }

        if pivot_row != col {
            for j in 0..n {
                m.swap([col, j], [pivot_row, j]);
            }
            rhs.swap(col, pivot_row);
        }

        let pivot = m[[col, col]];
        for row in (col + 1)..n {
            let factor = m[[row, col]] / pivot;
            if factor == 0.0 {
                continue;
            }
            for j in col..n {
                m[[row, j]] -= factor * m[[col, j]];
            }
            rhs[row] -= factor * rhs[col];
        }
    }

    let mut x = Array1::<f64>::zeros(n);
    for row in (0..n).rev() {
        let tail: f64 = ((row + 1)..n).map(|j| m[[row, j]] * x[j]).sum();
        x[row] = (rhs[row] - tail) / m[[row, row]];
    }

    if x.iter().all(|v| v.is_finite()) {
        Ok(x)
    } else {
        Err(DocfixError::SingularMatrix)
    }
}
