//! Tests for default generation parameters and format constants

#[cfg(test)]
mod tests {
    use photomosaic::io::configuration::{
        DEFAULT_OUTPUT_PATH, DEFAULT_TILE_SIZE, DEFAULT_TOP_K, PARTIAL_OUTPUT_SUFFIX,
        PROGRESS_BAR_WIDTH, PROGRESS_STEPS, SUPPORTED_EXTENSIONS,
    };

    // Tests default tuning values
    // Verified by changing constant values
    #[test]
    fn test_default_parameters() {
        assert_eq!(DEFAULT_TILE_SIZE, 20);
        assert_eq!(DEFAULT_TOP_K, 20);
        assert_eq!(PROGRESS_STEPS, 50);
    }

    // Tests only the accepted photo formats are listed, in lower case
    // Verified by adding an upper-case variant
    #[test]
    fn test_supported_extensions() {
        assert_eq!(SUPPORTED_EXTENSIONS, ["jpg", "jpeg", "png"]);
        assert!(
            SUPPORTED_EXTENSIONS
                .iter()
                .all(|ext| ext.chars().all(|c| c.is_ascii_lowercase()))
        );
    }

    // Tests the default output has an encodable extension
    // Verified by removing the extension
    #[test]
    fn test_default_output_path() {
        let path = std::path::Path::new(DEFAULT_OUTPUT_PATH);
        assert!(image::ImageFormat::from_path(path).is_ok());
        assert!(!PARTIAL_OUTPUT_SUFFIX.is_empty());
    }

    // Tests progress bar width is reasonable
    // Verified by setting width to zero
    #[test]
    fn test_progress_bar_width() {
        assert!(PROGRESS_BAR_WIDTH > 0);
        assert!(PROGRESS_BAR_WIDTH <= 100);
    }
}
