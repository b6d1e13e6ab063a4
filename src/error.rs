use std::path::PathBuf;
use thiserror::Error;

use crate::state::store::StoreError;

/// Why a screen action did not change the display
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("could not open {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("no images found in the database")]
    EmptyStore,
}

/// How loudly a notice should be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A user-visible message box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: &'static str,
    pub body: String,
}

impl ActionError {
    /// An empty store is expected on first run, not a failure
    pub fn is_informational(&self) -> bool {
        matches!(self, ActionError::EmptyStore)
    }

    pub fn notice(&self) -> Notice {
        let (level, title) = match self {
            ActionError::Storage(_) => (NoticeLevel::Error, "Database Error"),
            ActionError::Decode { .. } => (NoticeLevel::Error, "Cannot Open Image"),
            ActionError::EmptyStore => (NoticeLevel::Info, "No Images"),
        };

        let body = match self {
            ActionError::EmptyStore => "No images found in the database.".to_string(),
            other => other.to_string(),
        };

        Notice { level, title, body }
    }
}
