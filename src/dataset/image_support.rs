use std::path::Path;

/// Supported image extensions for class folders (lowercase, without dots).
pub(crate) const SUPPORTED_IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

/// Return true if the file name ends with a supported image extension.
///
/// Matching is done on the whole lowercased name, so `.PNG` on its own counts.
pub(crate) fn is_supported_image(path: &Path) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    let name = name.to_string_lossy().to_ascii_lowercase();
    SUPPORTED_IMAGE_EXTENSIONS.iter().any(|ext| {
        name.strip_suffix(ext)
            .is_some_and(|stem| stem.ends_with('.'))
    })
}
