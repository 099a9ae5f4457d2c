//! Labelling four clicked points as the corners of a page.
//!
//! The default quadrant heuristic splits the points around their centroid.
//! It expects a roughly axis-aligned quadrilateral and refuses to guess for
//! strongly rotated or skewed input; the angular strategy handles those by
//! walking the points clockwise instead.

use tracing::debug;

use crate::config::CornerStrategy;
use crate::consts::{CORNER_COUNT, SINGULAR_EPSILON};
use crate::error::{DocfixError, Result};
use crate::geometry::{centroid, ImagePoint};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    /// Clockwise order starting at the top-left.
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
        Corner::BottomLeft,
    ];

    pub fn short_name(self) -> &'static str {
        match self {
            Self::TopLeft => "TL",
            Self::TopRight => "TR",
            Self::BottomRight => "BR",
            Self::BottomLeft => "BL",
        }
    }
}

impl std::fmt::Display for Corner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.short_name())
    }
}

/// One image point per page corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CornerAssignment {
    pub top_left: ImagePoint,
    pub top_right: ImagePoint,
    pub bottom_right: ImagePoint,
    pub bottom_left: ImagePoint,
}

impl CornerAssignment {
    /// Build from points already in TL, TR, BR, BL order.
    pub fn from_ordered(points: [ImagePoint; 4]) -> Self {
        Self {
            top_left: points[0],
            top_right: points[1],
            bottom_right: points[2],
            bottom_left: points[3],
        }
    }

    /// Points in TL, TR, BR, BL order.
    pub fn ordered(&self) -> [ImagePoint; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    pub fn get(&self, corner: Corner) -> ImagePoint {
        match corner {
            Corner::TopLeft => self.top_left,
            Corner::TopRight => self.top_right,
            Corner::BottomRight => self.bottom_right,
            Corner::BottomLeft => self.bottom_left,
        }
    }
}

/// Label the points using the given strategy.
pub fn classify(points: &[ImagePoint], strategy: CornerStrategy) -> Result<CornerAssignment> {
    match strategy {
        CornerStrategy::Quadrant => classify_by_quadrant(points),
        CornerStrategy::Angular => classify_by_angle(points),
    }
}

/// Assign each point to the quadrant it occupies relative to the centroid.
///
/// Comparisons are strict, so a point lying on either centroid axis belongs
/// to no quadrant. Every quadrant must end up with exactly one point.
pub fn classify_by_quadrant(points: &[ImagePoint]) -> Result<CornerAssignment> {
    let mid = require_four(points)?;

    let mut buckets: [Vec<ImagePoint>; 4] = Default::default();
    for &p in points {
        let slot = match (p.x < mid.x, p.x > mid.x, p.y < mid.y, p.y > mid.y) {
            (true, _, true, _) => Some(0),
            (_, true, true, _) => Some(1),
            (_, true, _, true) => Some(2),
            (true, _, _, true) => Some(3),
            _ => None,
        };
        if let Some(slot) = slot {
            buckets[slot].push(p);
        }
    }

    if buckets.iter().any(|b| b.len() != 1) {
        let detail = Corner::ALL
            .iter()
            .zip(buckets.iter())
            .filter(|(_, b)| b.len() != 1)
            .map(|(corner, b)| format!("{corner} has {} candidate(s)", b.len()))
            .collect::<Vec<_>>()
            .join(", ");
        debug!(centroid = %mid, %detail, "Quadrant corner assignment failed");
        return Err(DocfixError::AmbiguousCorners(detail));
    }

    Ok(CornerAssignment::from_ordered([
        buckets[0][0],
        buckets[1][0],
        buckets[2][0],
        buckets[3][0],
    ]))
}

/// Walk the points clockwise around their centroid, starting from the one
/// closest to the image origin (smallest `x + y`).
///
/// Fails on coincident points or when all four are collinear.
pub fn classify_by_angle(points: &[ImagePoint]) -> Result<CornerAssignment> {
    let mid = require_four(points)?;

    for (i, a) in points.iter().enumerate() {
        if points[i + 1..].iter().any(|b| a.distance_to(*b) < SINGULAR_EPSILON) {
            return Err(DocfixError::AmbiguousCorners(format!("coincident points at {a}")));
        }
    }

    let mut sorted: Vec<ImagePoint> = points.to_vec();
    // y grows downward, so increasing atan2 is clockwise on screen.
    sorted.sort_by(|a, b| {
        let ta = (a.y - mid.y).atan2(a.x - mid.x);
        let tb = (b.y - mid.y).atan2(b.x - mid.x);
        ta.total_cmp(&tb)
    });

    let area = shoelace_area(&sorted);
    let extent = sorted
        .iter()
        .map(|p| p.distance_to(mid))
        .fold(0.0f64, f64::max);
    if area.abs() < SINGULAR_EPSILON * extent * extent {
        debug!(area, "Angular corner assignment failed: collinear points");
        return Err(DocfixError::AmbiguousCorners("points are collinear".into()));
    }

    let start = sorted
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| (a.x + a.y).total_cmp(&(b.x + b.y)))
        .map(|(i, _)| i)
        .unwrap_or(0);
    sorted.rotate_left(start);

    Ok(CornerAssignment::from_ordered([
        sorted[0], sorted[1], sorted[2], sorted[3],
    ]))
}

fn require_four(points: &[ImagePoint]) -> Result<ImagePoint> {
    if points.len() != CORNER_COUNT {
        return Err(DocfixError::WrongPointCount {
            count: points.len(),
        });
    }
    centroid(points).ok_or(DocfixError::WrongPointCount { count: 0 })
}

/// Signed area of a polygon given in vertex order.
fn shoelace_area(points: &[ImagePoint]) -> f64 {
    let n = points.len();
    let twice: f64 = (0..n)
        .map(|i| {
            let p = points[i];
            let q = points[(i + 1) % n];
            p.x * q.y - q.x * p.y
        })
        .sum();
    twice / 2.0
}
