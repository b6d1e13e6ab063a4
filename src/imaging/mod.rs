/// Image processing module
///
/// This module handles:
/// - Decoding image files and building bounded previews (preview.rs)
/// - The two fixed filters: median denoise and histogram equalization (filters.rs)

pub mod filters;
pub mod preview;
