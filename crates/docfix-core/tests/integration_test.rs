#[allow(dead_code)]
mod common;

use common::{gradient_raster, pixel, pt, square};
use docfix_core::config::{Background, CornerStrategy, Interpolation};
use docfix_core::corners::{classify, CornerAssignment};
use docfix_core::orient::rotate_left;
use docfix_core::raster::PixelFormat;
use docfix_core::rectify::{rectify, ResampleOptions};

#[test]
fn test_axis_aligned_quad_is_exact_crop() {
    let src = gradient_raster(200, 200);
    let corners = classify(&square(0.0, 0.0, 100.0), CornerStrategy::Quadrant).unwrap();
    let out = rectify(&src, &corners, &ResampleOptions::default()).unwrap();

    assert_eq!((out.raster.width(), out.raster.height()), (100, 100));
    for y in 0..100 {
        for x in 0..100 {
            assert_eq!(pixel(&out.raster, x, y), pixel(&src, x, y), "at ({x}, {y})");
        }
    }
}

#[test]
fn test_offset_quad_is_exact_crop() {
    let src = gradient_raster(200, 200);
    let corners = CornerAssignment::from_ordered(square(37.0, 52.0, 80.0));
    let out = rectify(&src, &corners, &ResampleOptions::default()).unwrap();

    assert_eq!((out.raster.width(), out.raster.height()), (80, 80));
    assert_eq!(pixel(&out.raster, 0, 0), pixel(&src, 37, 52));
    assert_eq!(pixel(&out.raster, 79, 79), pixel(&src, 116, 131));
}

#[test]
fn test_skewed_quad_end_to_end() {
    let src = gradient_raster(200, 200);
    let clicks = [
        pt(190.0, 170.0),
        pt(10.0, 190.0),
        pt(20.0, 30.0),
        pt(180.0, 10.0),
    ];
    let corners = classify(&clicks, CornerStrategy::Quadrant).unwrap();
    let options = ResampleOptions {
        interpolation: Interpolation::Bicubic,
        background: Background::White,
    };
    let out = rectify(&src, &corners, &options).unwrap();

    // Width ((180 - 20) + (190 - 10)) / 2, height ((190 - 30) + (170 - 10)) / 2.
    assert_eq!((out.raster.width(), out.raster.height()), (170, 160));
    assert_eq!(out.raster.format(), PixelFormat::Rgb8);

    // The output's top-left pixel comes from just inside the TL corner.
    let top_left = pixel(&out.raster, 0, 0);
    assert!(
        (top_left[0] as i32 - 20).abs() <= 2 && (top_left[1] as i32 - 30).abs() <= 2,
        "got {top_left:?}"
    );
    let centre = out.rectification.to_source(85.0, 80.0).unwrap();
    assert!(centre.x > 90.0 && centre.x < 110.0, "centre {centre}");
    assert!(centre.y > 90.0 && centre.y < 110.0, "centre {centre}");
}

#[test]
fn test_rotate_then_rectify() {
    let src = rotate_left(&gradient_raster(120, 80));
    assert_eq!((src.width(), src.height()), (80, 120));

    let corners = CornerAssignment::from_ordered(square(0.0, 0.0, 80.0));
    let out = rectify(&src, &corners, &ResampleOptions::default()).unwrap();
    assert_eq!(pixel(&out.raster, 0, 0), pixel(&src, 0, 0));
    assert_eq!(pixel(&out.raster, 10, 70), pixel(&src, 10, 70));
}
