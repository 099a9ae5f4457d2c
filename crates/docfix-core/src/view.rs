use tracing::debug;

use crate::config::{Background, Interpolation, ViewConfig};
use crate::error::{DocfixError, Result};
use crate::geometry::{Affine2, Homography, ImagePoint, ScreenPoint};
use crate::raster::Raster;
use crate::rectify::{resample, ResampleOptions};

/// Size of the display surface in screen pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Scale and centring offset that fit the whole image inside a viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitParams {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl FitParams {
    const UNIT: FitParams = FitParams {
        scale: 1.0,
        offset_x: 0.0,
        offset_y: 0.0,
    };
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderTransform {
    /// Image space → screen space.
    pub image_to_screen: Affine2,
    /// Image pixels per screen pixel. Multiply a screen-space length by this
    /// to draw it at constant on-screen size in image space.
    pub overlay_scale: f64,
}

impl RenderTransform {
    pub fn to_screen(&self, p: ImagePoint) -> ScreenPoint {
        let (x, y) = self.image_to_screen.apply(p.x, p.y);
        ScreenPoint::new(x, y)
    }

    pub fn to_image(&self, q: ScreenPoint) -> Result<ImagePoint> {
        let (x, y) = self.image_to_screen.inverse()?.apply(q.x, q.y);
        Ok(ImagePoint::new(x, y))
    }
}

/// Pan/zoom state of the image display.
///
/// The view matrix is `T(image_center) · S(scale) · T(-center)`: it zooms
/// about `center` and keeps that point where the image centre would sit at
/// scale 1. Fitting to the viewport is applied on top at render time and is
/// never stored here.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
    config: ViewConfig,
    image_size: Option<(u32, u32)>,
    center: ImagePoint,
    scale: f64,
    matrix: Affine2,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(ViewConfig::default())
    }
}

impl ViewState {
    pub fn new(config: ViewConfig) -> Self {
        Self {
            config,
            image_size: None,
            center: ImagePoint::default(),
            scale: 1.0,
            matrix: Affine2::identity(),
        }
    }

    /// Record a newly loaded image and reset pan and zoom.
    pub fn load(&mut self, width: u32, height: u32) {
        self.image_size = Some((width, height));
        self.reset();
    }

    /// Forget the image; every transform becomes the identity.
    pub fn unload(&mut self) {
        self.image_size = None;
        self.reset();
    }

    /// Center on the image and return to scale 1.
    pub fn reset(&mut self) {
        self.center = self.image_center();
        self.scale = 1.0;
        self.refresh();
    }

    pub fn has_image(&self) -> bool {
        self.image_size.is_some()
    }

    pub fn image_size(&self) -> Option<(u32, u32)> {
        self.image_size
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn center(&self) -> ImagePoint {
        self.center
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// The view matrix for the current center and scale.
    pub fn matrix(&self) -> Affine2 {
        self.matrix
    }

    fn image_center(&self) -> ImagePoint {
        match self.image_size {
            Some((w, h)) => ImagePoint::new(w as f64 / 2.0, h as f64 / 2.0),
            None => ImagePoint::default(),
        }
    }

    fn refresh(&mut self) {
        self.matrix = match self.image_size {
            Some(_) => {
                let ic = self.image_center();
                Affine2::translation(ic.x, ic.y)
                    .multiply(&Affine2::scale(self.scale))
                    .multiply(&Affine2::translation(-self.center.x, -self.center.y))
            }
            None => Affine2::identity(),
        };
    }

    /// Largest scale that shows the whole image inside `viewport` minus the
    /// configured margin, centred.
    pub fn fit_to_viewport(&self, viewport: Viewport) -> FitParams {
        let Some((iw, ih)) = self.image_size else {
            return FitParams::UNIT;
        };
        let margin = self.config.margin;
        let usable = viewport.width > margin
            && viewport.height > margin
            && viewport.width.is_finite()
            && viewport.height.is_finite();
        if !usable {
            return FitParams::UNIT;
        }

        let (iw, ih) = (iw as f64, ih as f64);
        let scale = ((viewport.width - margin) / iw).min((viewport.height - margin) / ih);
        FitParams {
            scale,
            offset_x: (viewport.width - iw * scale) / 2.0,
            offset_y: (viewport.height - ih * scale) / 2.0,
        }
    }

    /// Multiply the scale by `factor`, keeping `anchor` at the same screen
    /// position.
    ///
    /// The new scale is limited to any configured `min_scale`/`max_scale`
    /// and snapped to the nearest integer when within `zoom_snap_tolerance`
    /// of it. Without bounds, zooming by `f` then `1/f` restores the view.
    pub fn zoom_at(&mut self, anchor: ImagePoint, factor: f64) -> Result<()> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(DocfixError::InvalidZoomFactor(factor));
        }
        if self.image_size.is_none() {
            return Ok(());
        }

        let new_scale = self.snap(self.bounded(self.scale * factor));
        if !new_scale.is_finite() || new_scale <= 0.0 {
            return Err(DocfixError::InvalidZoomFactor(factor));
        }
        let ratio = self.scale / new_scale;
        self.center = ImagePoint::new(
            anchor.x + (self.center.x - anchor.x) * ratio,
            anchor.y + (self.center.y - anchor.y) * ratio,
        );
        self.scale = new_scale;
        self.refresh();

        debug!(scale = self.scale, center = %self.center, "View zoomed");
        Ok(())
    }

    /// [`zoom_at`](Self::zoom_at) with the anchor given in screen space.
    pub fn zoom_at_screen(
        &mut self,
        anchor: ScreenPoint,
        viewport: Viewport,
        factor: f64,
    ) -> Result<()> {
        let anchor = self.screen_to_image(anchor, viewport)?;
        self.zoom_at(anchor, factor)
    }

    /// Apply the configured bounds. `f64::max`/`min` ignore NaN bounds, so an
    /// unvalidated config cannot panic here.
    fn bounded(&self, scale: f64) -> f64 {
        let scale = match self.config.min_scale {
            Some(lo) => scale.max(lo),
            None => scale,
        };
        match self.config.max_scale {
            Some(hi) => scale.min(hi),
            None => scale,
        }
    }

    fn snap(&self, scale: f64) -> f64 {
        let nearest = scale.round();
        if nearest >= 1.0 && (scale - nearest).abs() <= self.config.zoom_snap_tolerance {
            nearest
        } else {
            scale
        }
    }

    /// Move the view center by `(dx, dy)` image pixels.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        if self.image_size.is_none() {
            return;
        }
        self.center = ImagePoint::new(self.center.x + dx, self.center.y + dy);
        self.refresh();
    }

    /// Full image → screen transform for `viewport`: fit, then view.
    pub fn render(&self, viewport: Viewport) -> RenderTransform {
        if self.image_size.is_none() {
            return RenderTransform {
                image_to_screen: Affine2::identity(),
                overlay_scale: 1.0,
            };
        }
        let fit = self.fit_to_viewport(viewport);
        let image_to_screen = Affine2::translation(fit.offset_x, fit.offset_y)
            .multiply(&Affine2::scale(fit.scale))
            .multiply(&self.matrix);
        RenderTransform {
            image_to_screen,
            overlay_scale: 1.0 / (fit.scale * self.scale),
        }
    }

    pub fn image_to_screen(&self, p: ImagePoint, viewport: Viewport) -> ScreenPoint {
        self.render(viewport).to_screen(p)
    }

    pub fn screen_to_image(&self, q: ScreenPoint, viewport: Viewport) -> Result<ImagePoint> {
        self.render(viewport).to_image(q)
    }
}

/// Draw `raster` as it appears through `view` into a viewport-sized raster.
///
/// Uses nearest-neighbour sampling; screen pixels not covered by the image
/// get `background`.
pub fn render_preview(
    raster: &Raster,
    view: &ViewState,
    viewport: Viewport,
    background: Background,
) -> Result<Raster> {
    let width = viewport.width.max(0.0).floor() as u32;
    let height = viewport.height.max(0.0).floor() as u32;
    let screen_to_image = view.render(viewport).image_to_screen.inverse()?;
    let options = ResampleOptions {
        interpolation: Interpolation::Nearest,
        background,
    };
    resample(
        raster,
        &Homography::from_affine(&screen_to_image),
        width,
        height,
        &options,
    )
}
