use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One labeled image discovered under a class folder.
///
/// Field names serialize as `imagePath`, `label` and `className`, the shape
/// downstream dataset containers expect.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleRecord {
    /// Class folder joined with the image file name.
    pub image_path: PathBuf,
    /// Zero-based class index in sorted folder order.
    pub label: usize,
    /// Human-readable class description used in prompts.
    pub class_name: String,
}

impl SampleRecord {
    pub fn new(image_path: impl Into<PathBuf>, label: usize, class_name: impl Into<String>) -> Self {
        Self {
            image_path: image_path.into(),
            label,
            class_name: class_name.into(),
        }
    }
}
