use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::image_io::load_raster;

#[derive(Args)]
pub struct InfoArgs {
    /// Input image file
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let raster = load_raster(&args.file)?;

    println!("File:        {}", args.file.display());
    println!("Dimensions:  {}x{}", raster.width(), raster.height());
    println!("Format:      {}", raster.format());

    let bytes = raster.width() as usize * raster.height() as usize * raster.channels();
    println!("Data size:   {:.1} MB", bytes as f64 / (1024.0 * 1024.0));

    Ok(())
}
