//! Write a few-shot split to disk as JSON lines plus a manifest.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::error::DatasetError;
use super::few_shot::FewShotDataset;
use super::record::SampleRecord;
use super::split::{ClassSplitCounts, SplitKind};

const EXPORT_FORMAT_VERSION: i64 = 1;
const MANIFEST_FILE_NAME: &str = "manifest.json";

/// Split parameters recorded in the manifest.
#[derive(Debug, Clone, Serialize)]
pub struct ExportParams {
    pub shots: usize,
    pub val_fraction: f64,
    pub seed: Option<u64>,
}

/// What [`export_split`] wrote.
#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub manifest_path: PathBuf,
    pub train: usize,
    pub val: usize,
    pub test: usize,
}

#[derive(Debug, Serialize)]
struct SplitManifest<'a> {
    format_version: i64,
    params: &'a ExportParams,
    num_classes: usize,
    class_names: &'a [String],
    files: SplitManifestFiles,
    train: usize,
    val: usize,
    test: usize,
    class_counts: Vec<ClassSplitCounts>,
}

#[derive(Debug, Serialize)]
struct SplitManifestFiles {
    train: String,
    val: String,
    test: String,
}

/// Write `train.jsonl`, `val.jsonl`, `test.jsonl` and `manifest.json` into `out_dir`.
pub fn export_split(
    dataset: &FewShotDataset,
    params: &ExportParams,
    out_dir: &Path,
) -> Result<ExportSummary, DatasetError> {
    std::fs::create_dir_all(out_dir).map_err(|source| DatasetError::Write {
        path: out_dir.to_path_buf(),
        source,
    })?;
    for kind in SplitKind::ALL {
        write_jsonl(&out_dir.join(file_name(kind)), dataset.partition(kind))?;
    }

    let manifest_path = out_dir.join(MANIFEST_FILE_NAME);
    let manifest = SplitManifest {
        format_version: EXPORT_FORMAT_VERSION,
        params,
        num_classes: dataset.num_classes(),
        class_names: dataset.class_names(),
        files: SplitManifestFiles {
            train: file_name(SplitKind::Train),
            val: file_name(SplitKind::Val),
            test: file_name(SplitKind::Test),
        },
        train: dataset.train_x.len(),
        val: dataset.val.len(),
        test: dataset.test.len(),
        class_counts: dataset.class_counts(),
    };
    let bytes = serde_json::to_vec_pretty(&manifest).map_err(|source| DatasetError::Json {
        path: manifest_path.clone(),
        source,
    })?;
    std::fs::write(&manifest_path, bytes).map_err(|source| DatasetError::Write {
        path: manifest_path.clone(),
        source,
    })?;
    tracing::info!("Wrote split manifest to {}", manifest_path.display());

    Ok(ExportSummary {
        manifest_path,
        train: dataset.train_x.len(),
        val: dataset.val.len(),
        test: dataset.test.len(),
    })
}

fn file_name(kind: SplitKind) -> String {
    format!("{}.jsonl", kind.as_str())
}

fn write_jsonl(path: &Path, records: &[SampleRecord]) -> Result<(), DatasetError> {
    let write_err = |source| DatasetError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = BufWriter::new(File::create(path).map_err(write_err)?);
    for record in records {
        serde_json::to_writer(&mut writer, record).map_err(|source| DatasetError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        writer.write_all(b"\n").map_err(write_err)?;
    }
    writer.flush().map_err(write_err)
}
