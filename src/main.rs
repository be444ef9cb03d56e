//! CLI entry point for photo mosaic generation

use clap::Parser;
use photomosaic::io::cli::Cli;

fn main() -> photomosaic::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    cli.run().map(|_| ())
}
