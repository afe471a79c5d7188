//! Folder-per-class image datasets split for few-shot evaluation.

mod error;
mod export;
mod few_shot;
mod image_support;
mod record;
mod scanner;
mod semantic_names;
mod split;

pub use error::DatasetError;
pub use export::{ExportParams, ExportSummary, export_split};
pub use few_shot::{DEFAULT_TEMPLATES, FewShotDataset, render_prompt};
pub use record::SampleRecord;
pub use scanner::{ClassFolder, DatasetScan, ScanError, scan_class_folders, scan_dataset_root};
pub use semantic_names::SemanticNames;
pub use split::{
    ClassSplitCounts, DEFAULT_VAL_FRACTION, FewShotSplit, SplitError, SplitKind, SplitOptions,
    split_few_shot, split_rng,
};
