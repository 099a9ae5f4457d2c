mod commands;
mod image_io;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "docfix", about = "Document page perspective correction")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show image dimensions and pixel format
    Info(commands::info::InfoArgs),
    /// Rotate an image by a quarter or half turn
    Rotate(commands::rotate::RotateArgs),
    /// Correct the perspective of a page from its four corners
    Rectify(commands::rectify::RectifyArgs),
    /// Print or save the default configuration
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Rotate(args) => commands::rotate::run(args),
        Commands::Rectify(args) => commands::rectify::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
