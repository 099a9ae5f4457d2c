use crate::consts::CORNER_COUNT;
use crate::geometry::ImagePoint;

/// The corners clicked so far, in click order.
///
/// Holds at most four points. Pushing onto a full set starts a new
/// selection containing only the new point.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointSet {
    points: [ImagePoint; CORNER_COUNT],
    len: usize,
}

impl PointSet {
    pub const CAPACITY: usize = CORNER_COUNT;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, point: ImagePoint) {
        if self.len == Self::CAPACITY {
            self.len = 0;
        }
        self.points[self.len] = point;
        self.len += 1;
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == Self::CAPACITY
    }

    pub fn as_slice(&self) -> &[ImagePoint] {
        &self.points[..self.len]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImagePoint> {
        self.as_slice().iter()
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a ImagePoint;
    type IntoIter = std::slice::Iter<'a, ImagePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}
