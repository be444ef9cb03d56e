//! Generation defaults and tuning constants

/// Default side length of a mosaic cell in pixels
pub const DEFAULT_TILE_SIZE: u32 = 20;

/// Default number of nearest tiles drawn from when picking a tile for a cell
pub const DEFAULT_TOP_K: usize = 20;

/// Candidate photo extensions, matched case-insensitively
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

// Roughly one report per 2% of the work
/// Number of progress reports emitted per phase
pub const PROGRESS_STEPS: usize = 50;

/// Output location used when none is given
pub const DEFAULT_OUTPUT_PATH: &str = "data/mosaic.jpg";

/// Suffix of the temporary file written next to the output before it is renamed into place
pub const PARTIAL_OUTPUT_SUFFIX: &str = "partial";

/// Width of the terminal progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
