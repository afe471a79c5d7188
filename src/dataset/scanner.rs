use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, info, warn};

use super::image_support::is_supported_image;
use super::record::SampleRecord;
use super::semantic_names::SemanticNames;

/// Errors that can occur while scanning a dataset root.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Dataset root does not exist: {0}")]
    PathNotFound(PathBuf),
    #[error("Dataset root is not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// One class folder found under the dataset root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassFolder {
    pub label: usize,
    /// Raw directory name, e.g. `JB00039888`.
    pub folder_name: String,
    /// Resolved semantic name.
    pub class_name: String,
    pub image_count: usize,
}

/// Result of scanning a dataset root.
#[derive(Debug, Clone, Default)]
pub struct DatasetScan {
    /// Every class folder in label order, including ones without images.
    pub classes: Vec<ClassFolder>,
    pub records: Vec<SampleRecord>,
}

/// Scan `root` for class folders and return one record per image.
pub fn scan_class_folders(
    root: &Path,
    names: &SemanticNames,
) -> Result<Vec<SampleRecord>, ScanError> {
    scan_dataset_root(root, names).map(|scan| scan.records)
}

/// Scan `root`, keeping the class folder listing alongside the records.
///
/// Labels follow the sorted order of the class folder names. A folder with no
/// images still consumes its label.
pub fn scan_dataset_root(root: &Path, names: &SemanticNames) -> Result<DatasetScan, ScanError> {
    ensure_root_dir(root)?;
    let mut scan = DatasetScan::default();
    for (label, (folder_name, class_dir)) in list_class_dirs(root)?.into_iter().enumerate() {
        let class_name = names.resolve(&folder_name);
        let images = list_images(&class_dir)?;
        if images.is_empty() {
            warn!(
                dir = %class_dir.display(),
                label,
                "Class folder has no supported images"
            );
        } else {
            debug!(
                folder = %folder_name,
                label,
                class_name = %class_name,
                images = images.len(),
                "Scanned class folder"
            );
        }
        scan.classes.push(ClassFolder {
            label,
            folder_name,
            class_name: class_name.clone(),
            image_count: images.len(),
        });
        scan.records.extend(
            images
                .into_iter()
                .map(|path| SampleRecord::new(path, label, class_name.clone())),
        );
    }
    info!(
        root = %root.display(),
        classes = scan.classes.len(),
        images = scan.records.len(),
        "Dataset scan complete"
    );
    Ok(scan)
}

fn ensure_root_dir(root: &Path) -> Result<(), ScanError> {
    let metadata = match fs::metadata(root) {
        Ok(metadata) => metadata,
        Err(source)
            if matches!(
                source.kind(),
                ErrorKind::NotFound | ErrorKind::NotADirectory
            ) =>
        {
            return Err(ScanError::PathNotFound(root.to_path_buf()));
        }
        Err(source) => return Err(io_error(root, source)),
    };
    if !metadata.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }
    Ok(())
}

fn list_class_dirs(root: &Path) -> Result<Vec<(String, PathBuf)>, ScanError> {
    let mut classes = Vec::new();
    for entry in read_dir(root)? {
        let entry = entry.map_err(|source| io_error(root, source))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        classes.push((entry.file_name().to_string_lossy().into_owned(), path));
    }
    classes.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(classes)
}

fn list_images(class_dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut images = Vec::new();
    for entry in read_dir(class_dir)? {
        let entry = entry.map_err(|source| io_error(class_dir, source))?;
        let path = entry.path();
        if path.is_file() && is_supported_image(&path) {
            images.push((entry.file_name().to_string_lossy().into_owned(), path));
        }
    }
    images.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(images.into_iter().map(|(_, path)| path).collect())
}

fn read_dir(dir: &Path) -> Result<fs::ReadDir, ScanError> {
    fs::read_dir(dir).map_err(|source| io_error(dir, source))
}

fn io_error(path: &Path, source: std::io::Error) -> ScanError {
    ScanError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn missing_root_is_path_not_found() {
        let dir = tempdir().unwrap();
        let err = scan_class_folders(&dir.path().join("nope"), &SemanticNames::default())
            .unwrap_err();
        assert!(matches!(err, ScanError::PathNotFound(_)));
    }

    #[test]
    fn root_below_a_file_is_path_not_found() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("file.png");
        touch(&file);
        let err = scan_class_folders(&file.join("sub"), &SemanticNames::default()).unwrap_err();
        assert!(matches!(err, ScanError::PathNotFound(_)));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_root_metadata_is_io_error() {
        let dir = tempdir().unwrap();
        let too_long = dir.path().join("x".repeat(300));
        let err = scan_class_folders(&too_long, &SemanticNames::default()).unwrap_err();
        assert!(matches!(err, ScanError::Io { .. }), "{err:?}");
    }

    #[test]
    fn file_root_is_not_a_directory() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("file.png");
        touch(&file);
        let err = scan_class_folders(&file, &SemanticNames::default()).unwrap_err();
        assert!(matches!(err, ScanError::NotADirectory(_)));
    }

    #[test]
    fn labels_follow_sorted_folder_names() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("b/1.png"));
        touch(&dir.path().join("a/2.jpg"));
        touch(&dir.path().join("C/3.bmp"));
        let records = scan_class_folders(dir.path(), &SemanticNames::default()).unwrap();
        let labels: Vec<(String, usize)> = records
            .iter()
            .map(|r| (r.class_name.clone(), r.label))
            .collect();
        assert_eq!(
            labels,
            vec![
                ("C".to_string(), 0),
                ("a".to_string(), 1),
                ("b".to_string(), 2)
            ]
        );
    }

    #[test]
    fn images_are_sorted_and_filtered() {
        let dir = tempdir().unwrap();
        let class = dir.path().join("cls");
        touch(&class.join("b.PNG"));
        touch(&class.join("a.jpeg"));
        touch(&class.join("readme.txt"));
        fs::create_dir_all(class.join("nested.png")).unwrap();
        touch(&dir.path().join("stray.png"));
        let records = scan_class_folders(dir.path(), &SemanticNames::default()).unwrap();
        let paths: Vec<PathBuf> = records.into_iter().map(|r| r.image_path).collect();
        assert_eq!(paths, vec![class.join("a.jpeg"), class.join("b.PNG")]);
    }

    #[test]
    fn empty_class_keeps_its_label_slot() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("a/1.png"));
        fs::create_dir_all(dir.path().join("b")).unwrap();
        touch(&dir.path().join("b/notes.txt"));
        touch(&dir.path().join("c/1.png"));
        let scan = scan_dataset_root(dir.path(), &SemanticNames::default()).unwrap();
        assert_eq!(scan.classes.len(), 3);
        assert_eq!(scan.classes[1].image_count, 0);
        let labels: Vec<usize> = scan.records.iter().map(|r| r.label).collect();
        assert_eq!(labels, vec![0, 2]);
    }

    #[test]
    fn semantic_names_are_resolved_per_class() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("JB00039888/1.png"));
        touch(&dir.path().join("unknown_folder/1.png"));
        let records = scan_class_folders(dir.path(), &SemanticNames::builtin()).unwrap();
        assert_eq!(
            records[0].class_name,
            "red and silver vertical planetary gear motor"
        );
        assert_eq!(records[1].class_name, "unknown folder");
    }

    #[test]
    fn empty_root_yields_no_records() {
        let dir = tempdir().unwrap();
        let scan = scan_dataset_root(dir.path(), &SemanticNames::default()).unwrap();
        assert!(scan.classes.is_empty());
        assert!(scan.records.is_empty());
    }
}
