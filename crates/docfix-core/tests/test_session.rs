#[allow(dead_code)]
mod common;

use approx::assert_abs_diff_eq;

use common::{gradient_raster, pt};
use docfix_core::config::{CornerStrategy, SessionConfig};
use docfix_core::error::DocfixError;
use docfix_core::geometry::ScreenPoint;
use docfix_core::session::Session;
use docfix_core::view::Viewport;

const VIEWPORT: Viewport = Viewport {
    width: 410.0,
    height: 410.0,
};

/// Screen position of an image point for a 200x200 image in `VIEWPORT` at
/// unit zoom (fit scale 2, offset 5).
fn screen(x: f64, y: f64) -> ScreenPoint {
    ScreenPoint::new(5.0 + 2.0 * x, 5.0 + 2.0 * y)
}

fn session_with_image() -> Session {
    let mut s = Session::default();
    s.load(gradient_raster(200, 200));
    s
}

#[test]
fn test_click_without_image_is_noop() {
    let mut s = Session::default();
    s.click(ScreenPoint::new(10.0, 10.0), VIEWPORT).unwrap();
    assert!(s.points().is_empty());
    assert_eq!(s.process().unwrap_err(), DocfixError::NoImage);
}

#[test]
fn test_click_maps_to_image_space() {
    let mut s = session_with_image();
    s.click(screen(40.0, 60.0), VIEWPORT).unwrap();
    let p = s.points().as_slice()[0];
    assert_abs_diff_eq!(p.x, 40.0, epsilon = 1e-9);
    assert_abs_diff_eq!(p.y, 60.0, epsilon = 1e-9);
}

#[test]
fn test_fifth_click_starts_new_selection() {
    let mut s = session_with_image();
    for (x, y) in [(10.0, 10.0), (190.0, 10.0), (190.0, 190.0), (10.0, 190.0)] {
        s.click(screen(x, y), VIEWPORT).unwrap();
    }
    assert!(s.points().is_full());
    s.click(screen(50.0, 50.0), VIEWPORT).unwrap();
    assert_eq!(s.points().len(), 1);
}

#[test]
fn test_process_from_clicks() {
    let mut s = session_with_image();
    for (x, y) in [(150.0, 20.0), (20.0, 20.0), (20.0, 150.0), (150.0, 150.0)] {
        s.click(screen(x, y), VIEWPORT).unwrap();
    }
    let result = s.process().unwrap();
    assert_eq!((result.raster.width(), result.raster.height()), (130, 130));
    assert_abs_diff_eq!(result.corners.top_left.x, 20.0, epsilon = 1e-9);
    assert_abs_diff_eq!(result.corners.bottom_right.y, 150.0, epsilon = 1e-9);
    assert!(s.result().is_some());
}

#[test]
fn test_failed_process_leaves_state_unchanged() {
    let mut s = session_with_image();
    s.zoom_at(pt(50.0, 50.0), 2.0).unwrap();
    for p in [pt(10.0, 10.0), pt(190.0, 10.0), pt(190.0, 190.0)] {
        s.add_point(p);
    }
    let image = s.image().cloned();
    let view = s.view().clone();
    let points = *s.points();

    assert_eq!(
        s.process().unwrap_err(),
        DocfixError::WrongPointCount { count: 3 }
    );
    assert_eq!(s.image().cloned(), image);
    assert_eq!(s.view(), &view);
    assert_eq!(s.points(), &points);
    assert!(s.result().is_none());
}

#[test]
fn test_failed_process_keeps_previous_result() {
    let mut s = session_with_image();
    for p in [pt(10.0, 10.0), pt(110.0, 10.0), pt(110.0, 60.0), pt(10.0, 60.0)] {
        s.add_point(p);
    }
    let first = s.process().unwrap().clone();

    s.clear_points();
    for p in [pt(0.0, 0.0), pt(10.0, 10.0), pt(20.0, 20.0), pt(30.0, 30.0)] {
        s.add_point(p);
    }
    assert!(matches!(
        s.process(),
        Err(DocfixError::AmbiguousCorners(_))
    ));
    assert_eq!(s.result(), Some(&first));
}

#[test]
fn test_rotation_clears_points_and_resets_view() {
    let mut s = Session::default();
    s.load(gradient_raster(300, 120));
    s.add_point(pt(1.0, 1.0));
    s.zoom_at(pt(20.0, 20.0), 3.0).unwrap();

    s.rotate_left();
    let image = s.image().unwrap();
    assert_eq!((image.width(), image.height()), (120, 300));
    assert!(s.points().is_empty());
    assert_eq!(s.view().scale(), 1.0);
    assert_eq!(s.view().center(), pt(60.0, 150.0));

    s.rotate_right();
    assert_eq!(s.image(), Some(&gradient_raster(300, 120)));
}

#[test]
fn test_load_discards_previous_document() {
    let mut s = session_with_image();
    for p in [pt(10.0, 10.0), pt(110.0, 10.0), pt(110.0, 60.0), pt(10.0, 60.0)] {
        s.add_point(p);
    }
    s.process().unwrap();

    s.load(gradient_raster(50, 40));
    assert!(s.points().is_empty());
    assert!(s.result().is_none());
    assert_eq!(s.view().image_size(), Some((50, 40)));
}

#[test]
fn test_huge_selection_fails_without_allocating() {
    let mut s = session_with_image();
    for p in [pt(0.0, 0.0), pt(4e9, 0.0), pt(4e9, 4e9), pt(0.0, 4e9)] {
        s.add_point(p);
    }
    assert!(matches!(
        s.process(),
        Err(DocfixError::OutputTooLarge { .. })
    ));
    assert!(s.result().is_none());
    assert_eq!(s.points().len(), 4);
}

#[test]
fn test_new_rejects_invalid_config() {
    let mut config = SessionConfig::default();
    config.view.min_scale = Some(10.0);
    config.view.max_scale = Some(2.0);
    assert!(matches!(
        Session::new(config),
        Err(DocfixError::InvalidConfig(_))
    ));
}

#[test]
fn test_angular_strategy_from_config() {
    let mut config = SessionConfig::default();
    config.rectify.corner_strategy = CornerStrategy::Angular;
    let mut s = Session::new(config).unwrap();
    s.load(gradient_raster(200, 200));

    // A diamond has no points strictly inside the centroid quadrants.
    for p in [pt(100.0, 10.0), pt(190.0, 100.0), pt(100.0, 190.0), pt(10.0, 100.0)] {
        s.add_point(p);
    }
    let result = s.process().unwrap();
    assert_eq!(result.corners.top_left, pt(100.0, 10.0));
}

#[test]
fn test_overlay_and_preview_follow_session() {
    let mut s = session_with_image();
    s.add_point(pt(10.0, 10.0));
    s.add_point(pt(20.0, 10.0));
    let o = s.overlay(VIEWPORT);
    assert_eq!(o.markers.len(), 2);
    assert_eq!(o.segments.len(), 1);

    let preview = s.preview(VIEWPORT).unwrap();
    assert_eq!((preview.width(), preview.height()), (410, 410));
}
