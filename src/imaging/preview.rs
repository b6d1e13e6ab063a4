/// Decoding and bounded previews
use image::{imageops::FilterType, DynamicImage, GenericImageView};
use std::path::Path;

use crate::error::ActionError;

/// Decode an image file from disk.
///
/// Missing files, unreadable files and unknown formats all map to
/// [`ActionError::Decode`].
pub fn decode(path: &Path) -> Result<DynamicImage, ActionError> {
    image::open(path).map_err(|source| ActionError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Size that fits `width x height` inside a `max_side` square, keeping
/// the aspect ratio. Images that already fit are left at their size.
pub fn preview_dimensions(width: u32, height: u32, max_side: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest <= max_side || longest == 0 {
        return (width, height);
    }

    let scale = |side: u32| -> u32 {
        let scaled = (side as u64 * max_side as u64 + longest as u64 / 2) / longest as u64;
        (scaled as u32).max(1)
    };

    (scale(width), scale(height))
}

/// Scaled-down copy for display; the source is left untouched.
pub fn bounded_preview(image: &DynamicImage, max_side: u32) -> DynamicImage {
    let (width, height) = image.dimensions();
    let (target_w, target_h) = preview_dimensions(width, height, max_side);

    if (target_w, target_h) == (width, height) {
        return image.clone();
    }

    image.resize_exact(target_w, target_h, FilterType::Lanczos3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_landscape_is_capped_at_longest_side() {
        assert_eq!(preview_dimensions(500, 400, 300), (300, 240));
    }

    #[test]
    fn test_portrait_is_capped_at_longest_side() {
        assert_eq!(preview_dimensions(400, 1000, 300), (120, 300));
    }

    #[test]
    fn test_small_images_are_not_upscaled() {
        assert_eq!(preview_dimensions(120, 80, 300), (120, 80));
        assert_eq!(preview_dimensions(300, 300, 300), (300, 300));
    }

    #[test]
    fn test_extreme_aspect_keeps_one_pixel() {
        assert_eq!(preview_dimensions(3000, 1, 300), (300, 1));
    }

    #[test]
    fn test_bounded_preview_resizes_copy() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(500, 400, Rgb([9, 9, 9])));
        let preview = bounded_preview(&image, 300);

        assert_eq!(preview.dimensions(), (300, 240));
        assert_eq!(image.dimensions(), (500, 400));
    }

    #[test]
    fn test_decode_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone.png");

        match decode(&missing) {
            Err(ActionError::Decode { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected decode error, got {:?}", other.map(|i| i.dimensions())),
        }
    }

    #[test]
    fn test_decode_rejects_non_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.png");
        std::fs::write(&path, b"this is plain text").unwrap();

        assert!(matches!(decode(&path), Err(ActionError::Decode { .. })));
    }
}
