use std::collections::BTreeMap;
use std::path::Path;

use rand::Rng;

use super::error::DatasetError;
use super::record::SampleRecord;
use super::scanner::scan_dataset_root;
use super::semantic_names::SemanticNames;
use super::split::{ClassSplitCounts, FewShotSplit, SplitKind, SplitOptions, split_few_shot};

/// Prompt templates rendered once per class for the text encoder.
pub const DEFAULT_TEMPLATES: [&str; 1] = ["a photo of a {}."];

/// Substitute `class_name` for every `{}` in `template`.
pub fn render_prompt(template: &str, class_name: &str) -> String {
    template.replace("{}", class_name)
}

/// Few-shot dataset built from a folder-per-class image tree.
#[derive(Debug, Clone)]
pub struct FewShotDataset {
    pub train_x: Vec<SampleRecord>,
    pub val: Vec<SampleRecord>,
    pub test: Vec<SampleRecord>,
    class_names: Vec<String>,
    templates: Vec<String>,
}

impl FewShotDataset {
    /// Scan `root` and split it into few-shot train, val and test sets.
    pub fn load<R>(
        root: &Path,
        names: &SemanticNames,
        options: &SplitOptions,
        rng: &mut R,
    ) -> Result<Self, DatasetError>
    where
        R: Rng + ?Sized,
    {
        options.validate()?;
        let scan = scan_dataset_root(root, names)?;
        let split = split_few_shot(&scan.records, options, rng)?;
        let class_names = scan
            .classes
            .into_iter()
            .map(|class| class.class_name)
            .collect();
        Ok(Self::from_split(split, class_names))
    }

    /// Wrap an existing split; `class_names` is indexed by label.
    pub fn from_split(split: FewShotSplit, class_names: Vec<String>) -> Self {
        Self {
            train_x: split.train,
            val: split.val,
            test: split.test,
            class_names,
            templates: DEFAULT_TEMPLATES.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn with_templates(mut self, templates: Vec<String>) -> Self {
        self.templates = templates;
        self
    }

    /// Number of class folders, including any that held no images.
    pub fn num_classes(&self) -> usize {
        self.class_names.len()
    }

    pub fn class_name(&self, label: usize) -> Option<&str> {
        self.class_names.get(label).map(String::as_str)
    }

    pub fn class_names(&self) -> &[String] {
        &self.class_names
    }

    pub fn label_to_name(&self) -> BTreeMap<usize, String> {
        self.class_names.iter().cloned().enumerate().collect()
    }

    pub fn partition(&self, kind: SplitKind) -> &[SampleRecord] {
        match kind {
            SplitKind::Train => &self.train_x,
            SplitKind::Val => &self.val,
            SplitKind::Test => &self.test,
        }
    }

    /// Rendered prompts for `label`, one per template.
    pub fn prompts_for(&self, label: usize) -> Option<Vec<String>> {
        let class_name = self.class_name(label)?;
        Some(
            self.templates
                .iter()
                .map(|template| render_prompt(template, class_name))
                .collect(),
        )
    }

    /// Per-class partition sizes for every class folder, in label order.
    pub fn class_counts(&self) -> Vec<ClassSplitCounts> {
        let mut counts: Vec<ClassSplitCounts> = self
            .class_names
            .iter()
            .enumerate()
            .map(|(label, class_name)| ClassSplitCounts {
                label,
                class_name: class_name.clone(),
                train: 0,
                val: 0,
                test: 0,
            })
            .collect();
        for kind in SplitKind::ALL {
            for record in self.partition(kind) {
                let Some(entry) = counts.get_mut(record.label) else {
                    continue;
                };
                match kind {
                    SplitKind::Train => entry.train += 1,
                    SplitKind::Val => entry.val += 1,
                    SplitKind::Test => entry.test += 1,
                }
            }
        }
        counts
    }
}
