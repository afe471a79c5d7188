use std::path::Path;

/// Create `count` empty image files named `img_000.png`, ... under `root/class`.
pub fn write_class(root: &Path, class: &str, count: usize) {
    let dir = root.join(class);
    std::fs::create_dir_all(&dir).expect("create class dir");
    for idx in 0..count {
        std::fs::write(dir.join(format!("img_{idx:03}.png")), b"").expect("write image");
    }
}

/// Write a file with arbitrary name and no content.
pub fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dirs");
    }
    std::fs::write(path, b"").expect("write file");
}
