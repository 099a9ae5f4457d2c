use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocfixError {
    #[error("Expected exactly 4 corner points, got {count}")]
    WrongPointCount { count: usize },

    #[error("Cannot allocate points to corners: {0}")]
    AmbiguousCorners(String),

    #[error("Degenerate quadrilateral: target size {width}x{height}")]
    DegenerateQuad { width: i64, height: i64 },

    #[error("Output of {width}x{height} pixels exceeds the {limit} pixel limit")]
    OutputTooLarge { width: u64, height: u64, limit: u64 },

    #[error("Singular transformation matrix")]
    SingularMatrix,

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("Zoom factor must be finite and positive, got {0}")]
    InvalidZoomFactor(f64),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("No image loaded")]
    NoImage,

    #[error("Unsupported pixel format: {0}")]
    UnsupportedPixelFormat(String),
}

pub type Result<T> = std::result::Result<T, DocfixError>;
