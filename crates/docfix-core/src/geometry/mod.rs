pub mod affine;
pub mod homography;
pub mod linalg;
pub mod point;

pub use affine::Affine2;
pub use homography::Homography;
pub use point::{centroid, ImagePoint, ScreenPoint};
