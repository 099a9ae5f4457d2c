use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use docfix_core::config::{Background, CornerStrategy, Interpolation, SessionConfig};
use docfix_core::consts::CORNER_COUNT;
use docfix_core::error::DocfixError;
use docfix_core::session::Session;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use super::rotate::DirectionArg;
use crate::image_io::{load_config, load_raster, parse_points, save_raster};
use crate::summary::print_rectify_summary;

#[derive(Clone, Copy, ValueEnum)]
pub enum InterpolationArg {
    Nearest,
    Bilinear,
    Bicubic,
}

impl From<InterpolationArg> for Interpolation {
    fn from(arg: InterpolationArg) -> Self {
        match arg {
            InterpolationArg::Nearest => Interpolation::Nearest,
            InterpolationArg::Bilinear => Interpolation::Bilinear,
            InterpolationArg::Bicubic => Interpolation::Bicubic,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum BackgroundArg {
    Transparent,
    Black,
    White,
}

impl From<BackgroundArg> for Background {
    fn from(arg: BackgroundArg) -> Self {
        match arg {
            BackgroundArg::Transparent => Background::Transparent,
            BackgroundArg::Black => Background::Black,
            BackgroundArg::White => Background::White,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StrategyArg {
    /// Split the points around their centroid
    Quadrant,
    /// Walk the points clockwise around their centroid
    Angular,
}

impl From<StrategyArg> for CornerStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Quadrant => CornerStrategy::Quadrant,
            StrategyArg::Angular => CornerStrategy::Angular,
        }
    }
}

#[derive(Args)]
pub struct RectifyArgs {
    /// Input image file
    pub file: PathBuf,

    /// Four page corners in image pixels, any order (e.g. "12,8 610,20 598,820 5,790")
    #[arg(long)]
    pub points: String,

    /// Rotate the image before applying the points
    #[arg(long, value_enum)]
    pub rotate: Option<DirectionArg>,

    /// TOML config file (see `docfix config`)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Resampling kernel, overrides the config file
    #[arg(long, value_enum)]
    pub interpolation: Option<InterpolationArg>,

    /// Fill for pixels outside the source, overrides the config file
    #[arg(long, value_enum)]
    pub background: Option<BackgroundArg>,

    /// Corner labelling strategy, overrides the config file
    #[arg(long, value_enum)]
    pub corners: Option<StrategyArg>,

    /// Output file path
    #[arg(short, long, default_value = "rectified.png")]
    pub output: PathBuf,
}

impl RectifyArgs {
    fn session_config(&self) -> Result<SessionConfig> {
        let mut config = match self.config {
            Some(ref path) => {
                info!(path = %path.display(), "Loading config");
                load_config(path)?
            }
            None => SessionConfig::default(),
        };
        if let Some(interpolation) = self.interpolation {
            config.rectify.interpolation = interpolation.into();
        }
        if let Some(background) = self.background {
            config.rectify.background = background.into();
        }
        if let Some(strategy) = self.corners {
            config.rectify.corner_strategy = strategy.into();
        }
        Ok(config)
    }
}

pub fn run(args: &RectifyArgs) -> Result<()> {
    let config = args.session_config()?;
    let points = parse_points(&args.points)?;
    if points.len() != CORNER_COUNT {
        return Err(DocfixError::WrongPointCount {
            count: points.len(),
        }
        .into());
    }

    let raster = load_raster(&args.file)?;
    let mut session = Session::new(config.clone())?;
    session.load(raster);
    if let Some(direction) = args.rotate {
        session.rotate(direction.into());
    }
    for p in points {
        session.add_point(p);
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}")?);
    pb.set_message("Rectifying");
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = session.process();
    pb.finish_and_clear();
    let result = result.context("Rectification failed")?;

    save_raster(&result.raster, &args.output)
        .with_context(|| format!("Failed to save {}", args.output.display()))?;
    print_rectify_summary(&args.file, &args.output, &config, result);

    Ok(())
}
