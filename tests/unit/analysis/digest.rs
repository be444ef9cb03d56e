//! Tests for candidate discovery and tile digests

#[cfg(test)]
mod tests {
    use image::{ImageFormat, Rgb, RgbImage};
    use photomosaic::MosaicError;
    use photomosaic::analysis::digest::{
        TileSet, decode_chunk_size, digest_image, discover_candidates, is_supported_photo,
    };
    use photomosaic::io::progress::{NoProgress, Phase, ProgressEvent};
    use photomosaic::math::color::{distance, srgb_to_lab};
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn save_solid(dir: &Path, name: &str, color: Rgb<u8>, width: u32, height: u32) {
        RgbImage::from_pixel(width, height, color)
            .save(dir.join(name))
            .unwrap();
    }

    // Tests extension filtering is case-insensitive and limited to photos
    // Verified by comparing extensions case-sensitively
    #[test]
    fn test_is_supported_photo() {
        assert!(is_supported_photo(Path::new("a.JPG")));
        assert!(is_supported_photo(Path::new("b.jpeg")));
        assert!(is_supported_photo(Path::new("c.Png")));
        assert!(!is_supported_photo(Path::new("d.gif")));
        assert!(!is_supported_photo(Path::new("noext")));
        assert!(!is_supported_photo(Path::new("png")));
    }

    // Tests discovery skips other files and directories, sorted by path
    // Verified by removing the file-type check
    #[test]
    fn test_discover_candidates_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        save_solid(dir.path(), "b.png", Rgb([0, 0, 0]), 4, 4);
        save_solid(dir.path(), "a.png", Rgb([0, 0, 0]), 4, 4);
        fs::write(dir.path().join("notes.txt"), "not a photo").unwrap();
        fs::create_dir(dir.path().join("nested.png")).unwrap();
        save_solid(&dir.path().join("nested.png"), "deep.png", Rgb([0, 0, 0]), 4, 4);

        let files = discover_candidates(dir.path()).unwrap();
        let names: Vec<String> = files
            .iter()
            .filter_map(|path| path.file_name())
            .map(|name| name.to_string_lossy().to_string())
            .collect();

        assert_eq!(names, vec!["a.png", "b.png"]);
    }

    // Tests decodable photos become tiles and undecodable ones are counted
    // Verified by propagating decode errors
    #[test]
    fn test_from_directory_skips_undecodable() {
        let dir = TempDir::new().unwrap();
        save_solid(dir.path(), "red.png", Rgb([255, 0, 0]), 30, 17);
        save_solid(dir.path(), "blue.png", Rgb([0, 0, 255]), 9, 40);
        fs::write(dir.path().join("broken.jpg"), b"definitely not a jpeg").unwrap();

        let tiles = TileSet::from_directory(dir.path(), 8, &mut NoProgress).unwrap();

        assert_eq!(tiles.len(), 2);
        assert_eq!(tiles.skipped(), 1);
        assert_eq!(tiles.colors().len(), 2);
        assert_eq!(tiles.images().len(), 2);
        for image in tiles.images() {
            assert_eq!(image.dimensions(), (8, 8));
        }

        // Sorted order puts blue before red
        assert!(distance(&tiles.colors()[0], &srgb_to_lab(Rgb([0, 0, 255]))) < 1.0);
        assert!(distance(&tiles.colors()[1], &srgb_to_lab(Rgb([255, 0, 0]))) < 1.0);
    }

    // Tests an empty directory yields no candidates
    // Verified by returning an empty tile set
    #[test]
    fn test_empty_directory_is_error() {
        let dir = TempDir::new().unwrap();
        let result = TileSet::from_directory(dir.path(), 8, &mut NoProgress);

        assert!(matches!(
            result,
            Err(MosaicError::NoCandidates { skipped: 0, .. })
        ));
    }

    // Tests a directory of only broken photos yields no candidates with the skip count
    // Verified by dropping the skip counter
    #[test]
    fn test_only_broken_files_is_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("broken.png"), b"garbage").unwrap();

        let result = TileSet::from_directory(dir.path(), 8, &mut NoProgress);
        assert!(matches!(
            result,
            Err(MosaicError::NoCandidates { skipped: 1, .. })
        ));
    }

    // Tests a missing directory reports a file system error
    // Verified by treating read failures as an empty directory
    #[test]
    fn test_missing_directory_is_error() {
        let dir = TempDir::new().unwrap();
        let result = TileSet::from_directory(&dir.path().join("absent"), 8, &mut NoProgress);

        assert!(matches!(result, Err(MosaicError::FileSystem { .. })));
    }

    // Tests resizing stretches rather than crops and keeps the color
    // Verified by cropping to the shorter side
    #[test]
    fn test_digest_image_resizes_to_square() {
        let image = RgbImage::from_pixel(7, 3, Rgb([200, 40, 90]));
        let (tile, color) = digest_image(&image, 5);

        assert_eq!(tile.dimensions(), (5, 5));
        for pixel in tile.pixels() {
            assert!(pixel.0[0].abs_diff(200) <= 1);
            assert!(pixel.0[1].abs_diff(40) <= 1);
            assert!(pixel.0[2].abs_diff(90) <= 1);
        }
        assert!(distance(&color, &srgb_to_lab(Rgb([200, 40, 90]))) < 1.0);
    }

    // Tests progress reaches completion for the loading phase
    // Verified by skipping the final progress report
    #[test]
    fn test_progress_reports_loading() {
        let dir = TempDir::new().unwrap();
        for i in 0..3u8 {
            save_solid(dir.path(), &format!("{i}.png"), Rgb([i * 50, 0, 0]), 4, 4);
        }

        let mut events: Vec<ProgressEvent> = Vec::new();
        let mut sink = |event: ProgressEvent| events.push(event);
        let tiles = TileSet::from_directory(dir.path(), 4, &mut sink).unwrap();
        assert_eq!(tiles.len(), 3);

        let last = events.last().copied().unwrap();
        assert_eq!(last.phase, Phase::LoadingTiles);
        assert_eq!(last.completed, 3);
        assert_eq!(last.total, 3);
    }

    // Tests a zero tile size is rejected
    // Verified by removing the parameter check
    #[test]
    fn test_zero_tile_size_rejected() {
        let dir = TempDir::new().unwrap();
        save_solid(dir.path(), "a.png", Rgb([0, 0, 0]), 4, 4);

        let result = TileSet::from_directory(dir.path(), 0, &mut NoProgress);
        assert!(matches!(result, Err(MosaicError::InvalidParameter { .. })));
    }

    // Tests photos are decoded by content when the extension is wrong
    // Verified by decoding with the extension-selected format only
    #[test]
    fn test_mismatched_extension_still_decodes() {
        let dir = TempDir::new().unwrap();
        RgbImage::from_pixel(6, 6, Rgb([0, 200, 0]))
            .save_with_format(dir.path().join("photo.jpg"), ImageFormat::Png)
            .unwrap();

        let tiles = TileSet::from_directory(dir.path(), 4, &mut NoProgress).unwrap();

        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles.skipped(), 0);
    }

    // Tests decoding batches keep every worker thread busy
    // Verified by sizing batches from the progress interval alone
    #[test]
    fn test_decode_chunk_size() {
        let threads = rayon::current_num_threads();

        assert!(decode_chunk_size(0) >= 1);
        assert!(decode_chunk_size(10) >= threads);
        assert!(decode_chunk_size(10_000) >= 10_000 / 50);
        assert!(decode_chunk_size(10_000) >= threads);
    }
}
