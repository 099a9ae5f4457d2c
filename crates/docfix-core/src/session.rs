//! Per-document state: the loaded raster, its view, the selected corners and
//! the last rectified result.

use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::corners::classify;
use crate::error::{DocfixError, Result};
use crate::geometry::{ImagePoint, ScreenPoint};
use crate::orient::Rotation;
use crate::overlay::{overlay, Overlay};
use crate::points::PointSet;
use crate::raster::Raster;
use crate::rectify::{rectify, Rectified, ResampleOptions};
use crate::view::{render_preview, RenderTransform, ViewState, Viewport};

#[derive(Clone, Debug)]
pub struct Session {
    config: SessionConfig,
    image: Option<Raster>,
    view: ViewState,
    points: PointSet,
    result: Option<Rectified>,
}

impl Default for Session {
    fn default() -> Self {
        Self::with_valid_config(SessionConfig::default())
    }
}

impl Session {
    /// Start an empty session. Fails with `InvalidConfig` when the
    /// configuration does not validate.
    pub fn new(config: SessionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: SessionConfig) -> Self {
        let view = ViewState::new(config.view.clone());
        Self {
            config,
            image: None,
            view,
            points: PointSet::new(),
            result: None,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Start a new document. Resets the view and discards the selection and
    /// any previous result.
    pub fn load(&mut self, raster: Raster) {
        info!(
            width = raster.width(),
            height = raster.height(),
            format = %raster.format(),
            "Image loaded"
        );
        self.view.load(raster.width(), raster.height());
        self.image = Some(raster);
        self.points.clear();
        self.result = None;
    }

    pub fn image(&self) -> Option<&Raster> {
        self.image.as_ref()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn points(&self) -> &PointSet {
        &self.points
    }

    pub fn result(&self) -> Option<&Rectified> {
        self.result.as_ref()
    }

    /// Record a click on the display surface as a corner point.
    pub fn click(&mut self, screen: ScreenPoint, viewport: Viewport) -> Result<()> {
        if self.image.is_none() {
            return Ok(());
        }
        let point = self.view.screen_to_image(screen, viewport)?;
        self.add_point(point);
        Ok(())
    }

    pub fn add_point(&mut self, point: ImagePoint) {
        if self.image.is_none() {
            return;
        }
        if self.points.is_full() {
            debug!("Selection full, starting over");
        }
        self.points.push(point);
        debug!(point = %point, count = self.points.len(), "Corner point added");
    }

    pub fn clear_points(&mut self) {
        self.points.clear();
    }

    pub fn rotate_left(&mut self) {
        self.rotate(Rotation::Left);
    }

    pub fn rotate_right(&mut self) {
        self.rotate(Rotation::Right);
    }

    /// Replace the raster with its rotation. Points selected on the old
    /// orientation no longer apply and are cleared.
    pub fn rotate(&mut self, rotation: Rotation) {
        let Some(image) = self.image.as_ref() else {
            return;
        };
        let rotated = rotation.apply(image);
        self.view.load(rotated.width(), rotated.height());
        self.image = Some(rotated);
        self.points.clear();
        info!(rotation = %rotation, "Image rotated");
    }

    pub fn zoom_at(&mut self, anchor: ImagePoint, factor: f64) -> Result<()> {
        self.view.zoom_at(anchor, factor)
    }

    pub fn zoom_at_screen(
        &mut self,
        anchor: ScreenPoint,
        viewport: Viewport,
        factor: f64,
    ) -> Result<()> {
        self.view.zoom_at_screen(anchor, viewport, factor)
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.view.pan(dx, dy);
    }

    pub fn render(&self, viewport: Viewport) -> RenderTransform {
        self.view.render(viewport)
    }

    pub fn overlay(&self, viewport: Viewport) -> Overlay {
        overlay(&self.points, &self.render(viewport), &self.config.overlay)
    }

    /// The current image drawn through the view into a viewport-sized raster.
    pub fn preview(&self, viewport: Viewport) -> Result<Raster> {
        let image = self.image.as_ref().ok_or(DocfixError::NoImage)?;
        render_preview(image, &self.view, viewport, self.config.rectify.background)
    }

    /// Rectify the image using the selected corners.
    ///
    /// On failure the raster, view and selection are left exactly as they
    /// were so the operator can adjust the points and retry.
    pub fn process(&mut self) -> Result<&Rectified> {
        let image = self.image.as_ref().ok_or(DocfixError::NoImage)?;
        let options = ResampleOptions::from(&self.config.rectify);
        let rectified = classify(self.points.as_slice(), self.config.rectify.corner_strategy)
            .and_then(|corners| rectify(image, &corners, &options))
            .inspect_err(|e| warn!(error = %e, "Rectification failed"))?;

        info!(
            width = rectified.raster.width(),
            height = rectified.raster.height(),
            "Page rectified"
        );
        let stored = self.result.insert(rectified);
        Ok(&*stored)
    }
}
