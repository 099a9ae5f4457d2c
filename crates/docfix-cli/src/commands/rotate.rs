use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use docfix_core::orient::Rotation;

use crate::image_io::{load_raster, save_raster};

#[derive(Clone, Copy, ValueEnum)]
pub enum DirectionArg {
    /// 90° counter-clockwise
    Left,
    /// 90° clockwise
    Right,
    /// 180°
    Half,
}

impl From<DirectionArg> for Rotation {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Left => Rotation::Left,
            DirectionArg::Right => Rotation::Right,
            DirectionArg::Half => Rotation::Half,
        }
    }
}

#[derive(Args)]
pub struct RotateArgs {
    /// Input image file
    pub file: PathBuf,

    /// Rotation direction
    #[arg(long, value_enum, default_value = "left")]
    pub direction: DirectionArg,

    /// Output file path
    #[arg(short, long, default_value = "rotated.png")]
    pub output: PathBuf,
}

pub fn run(args: &RotateArgs) -> Result<()> {
    let raster = load_raster(&args.file)?;
    let rotation = Rotation::from(args.direction);
    let rotated = rotation.apply(&raster);

    save_raster(&rotated, &args.output)
        .with_context(|| format!("Failed to save {}", args.output.display()))?;
    println!(
        "Rotated {} ({}x{} -> {}x{}), saved to {}",
        rotation,
        raster.width(),
        raster.height(),
        rotated.width(),
        rotated.height(),
        args.output.display()
    );
    Ok(())
}
