//! Command-line interface for one-shot mosaic generation

use crate::algorithm::executor::{MosaicOutcome, MosaicRequest, generate_with_progress};
use crate::io::configuration::{DEFAULT_OUTPUT_PATH, DEFAULT_TILE_SIZE, DEFAULT_TOP_K};
use crate::io::error::Result;
use crate::io::progress::{NoProgress, ProgressReporter};
use clap::Parser;
use log::{info, warn};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "photomosaic")]
#[command(
    author,
    version,
    about = "Compose a target image out of a directory of photos"
)]
/// Command-line arguments for the mosaic generator
pub struct Cli {
    /// Image the mosaic should approximate
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Directory of candidate photos (jpg, jpeg, png)
    #[arg(value_name = "TILES")]
    pub tiles: PathBuf,

    /// Output image path; the extension selects the format
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Side length of each mosaic cell in pixels
    #[arg(short, long, default_value_t = DEFAULT_TILE_SIZE)]
    pub tile_size: u32,

    /// Number of nearest photos to choose from per cell
    #[arg(short = 'k', long, default_value_t = DEFAULT_TOP_K)]
    pub top_k: usize,

    /// Random seed for reproducible output
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Suppress the progress bar
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Build the generation request described by the arguments
    pub fn request(&self) -> MosaicRequest {
        let request = MosaicRequest::new(&self.target, &self.tiles, &self.output)
            .with_tile_size(self.tile_size)
            .with_top_k(self.top_k);

        match self.seed {
            Some(seed) => request.with_seed(seed),
            None => request,
        }
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Run the generation and log its outcome
    ///
    /// # Errors
    ///
    /// Returns any error from [`generate_with_progress`]
    pub fn run(&self) -> Result<MosaicOutcome> {
        let request = self.request();

        let outcome = if self.should_show_progress() {
            let mut reporter = ProgressReporter::new();
            let outcome = generate_with_progress(&request, &mut reporter);
            reporter.finish();
            outcome?
        } else {
            generate_with_progress(&request, &mut NoProgress)?
        };

        if outcome.skipped_candidates > 0 {
            warn!(
                "{} candidate files could not be decoded",
                outcome.skipped_candidates
            );
        }
        if outcome.duplicates_used {
            warn!("Not enough unique photos, some tiles were reused");
        }
        info!("Mosaic saved to {}", outcome.output_path.display());

        Ok(outcome)
    }
}
