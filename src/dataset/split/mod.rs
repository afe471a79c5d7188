//! Few-shot train/val/test splitting of scanned records.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use super::record::SampleRecord;

/// Default fraction of each class's leftover pool assigned to validation.
pub const DEFAULT_VAL_FRACTION: f64 = 0.2;

/// Errors raised for invalid split parameters.
#[derive(Debug, Error)]
pub enum SplitError {
    #[error("Invalid {name}: {value}")]
    InvalidArgument { name: &'static str, value: String },
}

/// Parameters for [`split_few_shot`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitOptions {
    /// Training examples reserved per class.
    pub shots: usize,
    /// Fraction of the leftover pool sent to validation, in `(0, 1)`.
    pub val_fraction: f64,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            shots: 1,
            val_fraction: DEFAULT_VAL_FRACTION,
        }
    }
}

impl SplitOptions {
    pub fn new(shots: usize) -> Self {
        Self {
            shots,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), SplitError> {
        if self.shots == 0 {
            return Err(SplitError::InvalidArgument {
                name: "shots",
                value: "0 (must be a positive integer)".to_string(),
            });
        }
        if !(self.val_fraction > 0.0 && self.val_fraction < 1.0) {
            return Err(SplitError::InvalidArgument {
                name: "val_fraction",
                value: format!("{} (must be in (0, 1))", self.val_fraction),
            });
        }
        Ok(())
    }

    /// Number of validation items taken from a leftover pool of `leftover` items.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn val_count(&self, leftover: usize) -> usize {
        if leftover == 0 {
            return 0;
        }
        let proportional = (leftover as f64 * self.val_fraction).floor() as usize;
        proportional.max(1).min(leftover)
    }
}

/// Train, validation and test partitions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FewShotSplit {
    pub train: Vec<SampleRecord>,
    pub val: Vec<SampleRecord>,
    pub test: Vec<SampleRecord>,
}

/// Which partition a record landed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitKind {
    Train,
    Val,
    Test,
}

impl SplitKind {
    pub const ALL: [SplitKind; 3] = [SplitKind::Train, SplitKind::Val, SplitKind::Test];

    pub fn as_str(self) -> &'static str {
        match self {
            SplitKind::Train => "train",
            SplitKind::Val => "val",
            SplitKind::Test => "test",
        }
    }
}

/// Per-class partition sizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassSplitCounts {
    pub label: usize,
    pub class_name: String,
    pub train: usize,
    pub val: usize,
    pub test: usize,
}

impl FewShotSplit {
    pub fn len(&self) -> usize {
        self.train.len() + self.val.len() + self.test.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Build the random source used for splitting.
///
/// A fixed seed makes the split reproducible; `None` draws from the OS.
pub fn split_rng(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64)
}

/// Split records into few-shot train, validation and test sets.
///
/// Classes are processed in ascending label order. Each class is shuffled
/// with `rng`; the first `shots` records go to train and the leftover pool is
/// divided between val and test. Classes with fewer than `shots` records go
/// entirely to train.
pub fn split_few_shot<R>(
    records: &[SampleRecord],
    options: &SplitOptions,
    rng: &mut R,
) -> Result<FewShotSplit, SplitError>
where
    R: Rng + ?Sized,
{
    options.validate()?;
    let mut by_label: BTreeMap<usize, Vec<SampleRecord>> = BTreeMap::new();
    for record in records {
        by_label.entry(record.label).or_default().push(record.clone());
    }

    let mut split = FewShotSplit::default();
    for (label, mut class_records) in by_label {
        class_records.shuffle(rng);
        let shots = options.shots.min(class_records.len());
        let mut leftover = class_records.split_off(shots);
        let test = leftover.split_off(options.val_count(leftover.len()));
        debug!(
            label,
            train = class_records.len(),
            val = leftover.len(),
            test = test.len(),
            "Split class"
        );
        split.train.extend(class_records);
        split.val.extend(leftover);
        split.test.extend(test);
    }
    info!(
        train = split.train.len(),
        val = split.val.len(),
        test = split.test.len(),
        shots = options.shots,
        "Few-shot split complete"
    );
    Ok(split)
}

#[cfg(test)]
mod tests;
