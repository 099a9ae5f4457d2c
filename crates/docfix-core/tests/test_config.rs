use docfix_core::config::{
    Background, CornerStrategy, Interpolation, OverlayConfig, RectifyConfig, SessionConfig,
    ViewConfig,
};
use docfix_core::error::DocfixError;
use docfix_core::raster::PixelFormat;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

#[test]
fn test_view_config_defaults() {
    let c = ViewConfig::default();
    assert_eq!(c.margin, 10.0);
    assert_eq!(c.zoom_snap_tolerance, 0.001);
    assert_eq!(c.min_scale, None);
    assert_eq!(c.max_scale, None);
}

#[test]
fn test_rectify_config_defaults() {
    let c = RectifyConfig::default();
    assert_eq!(c.interpolation, Interpolation::Bicubic);
    assert_eq!(c.background, Background::Transparent);
    assert_eq!(c.corner_strategy, CornerStrategy::Quadrant);
}

#[test]
fn test_overlay_config_default_radius() {
    assert_eq!(OverlayConfig::default().marker_radius, 10.0);
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn test_default_config_validates() {
    assert_eq!(SessionConfig::default().validate(), Ok(()));
}

#[test]
fn test_validate_rejects_inverted_zoom_bounds() {
    let mut c = SessionConfig::default();
    c.view.min_scale = Some(10.0);
    c.view.max_scale = Some(2.0);
    assert!(matches!(c.validate(), Err(DocfixError::InvalidConfig(_))));

    c.view.max_scale = Some(10.0);
    assert_eq!(c.validate(), Ok(()));
}

#[test]
fn test_validate_rejects_bad_numbers() {
    let cases: [fn(&mut SessionConfig); 5] = [
        |c| c.view.margin = -1.0,
        |c| c.view.min_scale = Some(f64::NAN),
        |c| c.view.max_scale = Some(0.0),
        |c| c.view.zoom_snap_tolerance = 0.5,
        |c| c.overlay.marker_radius = f64::INFINITY,
    ];
    for (i, break_config) in cases.iter().enumerate() {
        let mut c = SessionConfig::default();
        break_config(&mut c);
        assert!(
            matches!(c.validate(), Err(DocfixError::InvalidConfig(_))),
            "case {i}"
        );
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

#[test]
fn test_interpolation_display() {
    assert_eq!(format!("{}", Interpolation::Nearest), "Nearest");
    assert_eq!(format!("{}", Interpolation::Bilinear), "Bilinear");
    assert_eq!(format!("{}", Interpolation::Bicubic), "Bicubic");
}

#[test]
fn test_background_display() {
    assert_eq!(format!("{}", Background::Transparent), "Transparent");
    assert_eq!(format!("{}", Background::White), "White");
    let s = format!("{}", Background::Color([255, 0, 16, 128]));
    assert_eq!(s, "#ff001080");
}

#[test]
fn test_corner_strategy_display() {
    assert_eq!(format!("{}", CornerStrategy::Quadrant), "Quadrant");
    assert_eq!(format!("{}", CornerStrategy::Angular), "Angular");
}

// ---------------------------------------------------------------------------
// Background fill
// ---------------------------------------------------------------------------

#[test]
fn test_background_fill_per_format() {
    assert_eq!(Background::Transparent.fill(PixelFormat::Rgb8), vec![0, 0, 0]);
    assert_eq!(Background::Transparent.fill(PixelFormat::Rgba8), vec![0, 0, 0, 0]);
    assert_eq!(Background::Black.fill(PixelFormat::Rgba8), vec![0, 0, 0, 255]);
    assert_eq!(Background::White.fill(PixelFormat::Rgb8), vec![255, 255, 255]);
    assert_eq!(
        Background::Color([1, 2, 3, 4]).fill(PixelFormat::Rgb8),
        vec![1, 2, 3]
    );
}

// ---------------------------------------------------------------------------
// Serde
// ---------------------------------------------------------------------------

#[test]
fn test_session_config_empty_json_is_default() {
    let c: SessionConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(c, SessionConfig::default());
}

#[test]
fn test_session_config_partial_section() {
    let c: SessionConfig = serde_json::from_str(r#"{"view": {"margin": 20.0}}"#).unwrap();
    assert_eq!(c.view.margin, 20.0);
    assert_eq!(c.view.max_scale, None);
    assert_eq!(c.rectify, RectifyConfig::default());
}

#[test]
fn test_rectify_config_from_json() {
    let json = r#"{
        "interpolation": "Bilinear",
        "background": {"Color": [10, 20, 30, 255]},
        "corner_strategy": "Angular"
    }"#;
    let c: RectifyConfig = serde_json::from_str(json).unwrap();
    assert_eq!(c.interpolation, Interpolation::Bilinear);
    assert_eq!(c.background, Background::Color([10, 20, 30, 255]));
    assert_eq!(c.corner_strategy, CornerStrategy::Angular);
}

#[test]
fn test_session_config_json_round_trip() {
    let mut c = SessionConfig::default();
    c.rectify.background = Background::White;
    c.overlay.marker_radius = 6.0;
    let json = serde_json::to_string(&c).unwrap();
    let back: SessionConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, c);
}
