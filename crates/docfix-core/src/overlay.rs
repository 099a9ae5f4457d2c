use crate::config::OverlayConfig;
use crate::geometry::ScreenPoint;
use crate::points::PointSet;
use crate::view::RenderTransform;

/// A filled circle drawn over a selected point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
    pub center: ScreenPoint,
    /// Radius in screen pixels.
    pub radius: f64,
}

/// Screen-space geometry for the current selection: one marker per point
/// and segments joining consecutive points. The outline closes once all
/// four corners are present.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Overlay {
    pub markers: Vec<Marker>,
    pub segments: Vec<(ScreenPoint, ScreenPoint)>,
    /// Image pixels per screen pixel for the frame this was built for.
    pub overlay_scale: f64,
}

impl Overlay {
    /// Marker radius expressed in image pixels, for drawing directly onto
    /// the image.
    pub fn marker_radius_image(&self) -> f64 {
        self.markers
            .first()
            .map_or(0.0, |m| m.radius * self.overlay_scale)
    }

    pub fn is_closed(&self) -> bool {
        self.markers.len() == PointSet::CAPACITY && self.segments.len() == PointSet::CAPACITY
    }
}

pub fn overlay(points: &PointSet, render: &RenderTransform, config: &OverlayConfig) -> Overlay {
    let screen: Vec<ScreenPoint> = points.iter().map(|&p| render.to_screen(p)).collect();

    let markers = screen
        .iter()
        .map(|&center| Marker {
            center,
            radius: config.marker_radius,
        })
        .collect();

    let mut segments: Vec<_> = screen.windows(2).map(|w| (w[0], w[1])).collect();
    if points.is_full() {
        segments.push((screen[screen.len() - 1], screen[0]));
    }

    Overlay {
        markers,
        segments,
        overlay_scale: render.overlay_scale,
    }
}
