/// Minimum output pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Largest output raster (w*h) the resampler will allocate.
pub const MAX_OUTPUT_PIXELS: u64 = 1 << 28;

/// Determinants and pivots below this magnitude are treated as singular.
pub const SINGULAR_EPSILON: f64 = 1e-10;

/// Homogeneous `w` below this magnitude maps a point to infinity.
pub const PROJECTIVE_W_EPSILON: f64 = 1e-12;

/// Total margin (in screen pixels) left around the image when fitting it
/// into a viewport. Split evenly between both sides.
pub const DEFAULT_VIEWPORT_MARGIN: f64 = 10.0;

/// View scales within this distance of an integer snap to it.
pub const DEFAULT_ZOOM_SNAP_TOLERANCE: f64 = 0.001;

/// Radius of a selected-point marker, in screen pixels.
pub const DEFAULT_MARKER_RADIUS: f64 = 10.0;

/// Catmull-Rom cubic convolution coefficient.
pub const CUBIC_A: f64 = -0.5;

/// Number of corner points that define a page quadrilateral.
pub const CORNER_COUNT: usize = 4;
