/// Per-screen state of the Restore and Histogram screens
///
/// A `Workbench` holds the decoded original and the two preview slots.
/// Actions never modify it in place: each returns the next `Workbench`,
/// or an error, in which case the caller keeps the current one.
use iced::widget::image::Handle;
use image::DynamicImage;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::histogram::Histogram;
use crate::error::ActionError;
use crate::imaging::{filters, preview};
use crate::state::store::Store;

/// Filter bound to a screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    RemoveNoise,
    EqualizeHistogram,
}

impl Filter {
    pub fn apply(self, image: Option<&DynamicImage>) -> Option<DynamicImage> {
        match self {
            Filter::RemoveNoise => filters::remove_noise(image),
            Filter::EqualizeHistogram => filters::equalize_histogram(image),
        }
    }

    /// Label of the button that runs the filter
    pub fn action_label(self) -> &'static str {
        match self {
            Filter::RemoveNoise => "Remove Noise",
            Filter::EqualizeHistogram => "Equalize Histogram",
        }
    }

    /// Whether the screen charts each slot's distribution
    pub fn shows_distribution(self) -> bool {
        matches!(self, Filter::EqualizeHistogram)
    }

    /// Caption above the processed preview
    pub fn processed_title(self) -> &'static str {
        match self {
            Filter::RemoveNoise => "Processed Image",
            Filter::EqualizeHistogram => "Equalized Image",
        }
    }
}

/// One preview slot ready for display
#[derive(Debug, Clone)]
pub struct Slot {
    pub width: u32,
    pub height: u32,
    pub handle: Handle,
    /// Distribution of the full-resolution image, only for screens that chart it
    pub histogram: Option<Histogram>,
}

impl Slot {
    fn from_image(image: &DynamicImage, max_side: u32, with_histogram: bool) -> Self {
        let rgba = preview::bounded_preview(image, max_side).to_rgba8();
        let (width, height) = rgba.dimensions();

        Slot {
            width,
            height,
            handle: Handle::from_rgba(width, height, rgba.into_raw()),
            histogram: with_histogram.then(|| Histogram::from_image(image)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Workbench {
    filter: Filter,
    preview_size: u32,
    source: Option<PathBuf>,
    original: Option<Arc<DynamicImage>>,
    original_slot: Option<Slot>,
    processed_slot: Option<Slot>,
}

impl Workbench {
    /// Fresh state: nothing loaded, both slots empty
    pub fn new(filter: Filter, preview_size: u32) -> Self {
        Self {
            filter,
            preview_size,
            source: None,
            original: None,
            original_slot: None,
            processed_slot: None,
        }
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn preview_size(&self) -> u32 {
        self.preview_size
    }

    /// Path the current original was loaded from
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn original(&self) -> Option<&DynamicImage> {
        self.original.as_deref()
    }

    pub fn original_slot(&self) -> Option<&Slot> {
        self.original_slot.as_ref()
    }

    pub fn processed_slot(&self) -> Option<&Slot> {
        self.processed_slot.as_ref()
    }

    /// Load a picked file and record it in the store.
    ///
    /// Nothing is recorded if the file can't be decoded.
    pub fn browse(&self, path: &Path, store: &Store) -> Result<Self, ActionError> {
        let image = preview::decode(path)?;
        store.append(&path.to_string_lossy())?;

        log::info!("🖼️  Browsed {}", path.display());
        Ok(self.with_original(path, image))
    }

    /// Reload the most recently recorded path (largest id).
    pub fn load_from_store(&self, store: &Store) -> Result<Self, ActionError> {
        let paths = store.list_all()?;
        let latest = paths.last().ok_or(ActionError::EmptyStore)?;

        let path = PathBuf::from(latest);
        let image = preview::decode(&path)?;

        log::info!("📂 Loaded {} from database", path.display());
        Ok(self.with_original(&path, image))
    }

    /// Run the screen's filter on the held original. No-op when nothing is loaded.
    pub fn apply_filter(&self) -> Self {
        let Some(original) = self.original() else {
            log::debug!("{} ignored: no image loaded", self.filter.action_label());
            return self.clone();
        };

        let processed = self.filter.apply(Some(original));

        Self {
            processed_slot: processed.map(|image| self.slot(&image)),
            ..self.clone()
        }
    }

    fn slot(&self, image: &DynamicImage) -> Slot {
        Slot::from_image(image, self.preview_size, self.filter.shows_distribution())
    }

    fn with_original(&self, path: &Path, image: DynamicImage) -> Self {
        Self {
            filter: self.filter,
            preview_size: self.preview_size,
            source: Some(path.to_path_buf()),
            original_slot: Some(self.slot(&image)),
            processed_slot: None,
            original: Some(Arc::new(image)),
        }
    }
}
