#[allow(dead_code)]
mod common;

use common::{gradient_raster, gradient_raster_rgba, pixel};
use docfix_core::orient::{rotate_180, rotate_left, rotate_right, Rotation};
use docfix_core::raster::{PixelFormat, Raster};

fn small() -> Raster {
    // 3 wide, 2 tall.
    Raster::from_raw(
        3,
        2,
        PixelFormat::Rgb8,
        vec![
            1, 1, 1, 2, 2, 2, 3, 3, 3, //
            4, 4, 4, 5, 5, 5, 6, 6, 6,
        ],
    )
    .unwrap()
}

#[test]
fn test_rotate_left_exact_permutation() {
    let src = small();
    let out = rotate_left(&src);
    assert_eq!((out.width(), out.height()), (2, 3));

    // out[r][c] = in[c][w-1-r]
    let w = src.width();
    for r in 0..out.height() {
        for c in 0..out.width() {
            assert_eq!(pixel(&out, c, r), pixel(&src, w - 1 - r, c), "at ({c}, {r})");
        }
    }
    // Top row after a counter-clockwise turn is the old right column.
    assert_eq!(pixel(&out, 0, 0), vec![3, 3, 3]);
    assert_eq!(pixel(&out, 1, 0), vec![6, 6, 6]);
}

#[test]
fn test_rotate_left_four_times_is_identity() {
    let src = gradient_raster(17, 9);
    let mut r = src.clone();
    for _ in 0..4 {
        r = rotate_left(&r);
    }
    assert_eq!(r, src);
}

#[test]
fn test_rotate_right_equals_three_lefts() {
    let src = gradient_raster(13, 7);
    let three = rotate_left(&rotate_left(&rotate_left(&src)));
    assert_eq!(rotate_right(&src), three);
}

#[test]
fn test_rotate_right_undoes_left() {
    let src = gradient_raster(8, 5);
    assert_eq!(rotate_right(&rotate_left(&src)), src);
}

#[test]
fn test_rotate_180_equals_two_lefts() {
    let src = gradient_raster(6, 11);
    assert_eq!(rotate_180(&src), rotate_left(&rotate_left(&src)));
}

#[test]
fn test_rotation_preserves_format() {
    let src = gradient_raster_rgba(5, 3);
    let out = Rotation::Right.apply(&src);
    assert_eq!(out.format(), PixelFormat::Rgba8);
    assert_eq!((out.width(), out.height()), (3, 5));
    assert_eq!(pixel(&out, 2, 0), pixel(&src, 0, 0));
}

#[test]
fn test_rotation_display() {
    assert_eq!(format!("{}", Rotation::Left), "Left (90° CCW)");
    assert_eq!(format!("{}", Rotation::Right), "Right (90° CW)");
    assert_eq!(format!("{}", Rotation::Half), "180°");
}
