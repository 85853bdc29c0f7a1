//! Recursive disk-usage collaborator.
//!
//! Sizes are only ever computed for paths the user explicitly requested, and
//! the result is cached by the caller for the lifetime of the process, so a
//! plain synchronous walk is fine here.

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

/// Sum the sizes of all regular files under `path`, recursively.
///
/// Unreadable entries are skipped rather than aborting the walk. A plain
/// file's own length is returned directly.
pub fn disk_usage(path: &Path) -> u64 {
    if path.is_dir() {
        WalkDir::new(path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.metadata().ok())
            .filter(|meta| meta.is_file())
            .map(|meta| meta.len())
            .sum()
    } else {
        fs::symlink_metadata(path).map(|meta| meta.len()).unwrap_or(0)
    }
}

/// Render a byte count as a human-readable string (1024-based units).
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{} {}", bytes, UNITS[unit_idx])
    } else {
        format!("{:.2} {}", size, UNITS[unit_idx])
    }
}

/// The bracketed size annotation shown right-aligned in the tree view.
pub fn size_label(path: &Path) -> String {
    format!("[{}]", format_size(disk_usage(path)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn format_size_bytes() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
    }

    #[test]
    fn format_size_larger_units() {
        assert_eq!(format_size(1024), "1.00 KB");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(1024 * 1024), "1.00 MB");
    }

    #[test]
    fn disk_usage_single_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.bin");
        let mut f = File::create(&path).unwrap();
        f.write_all(&[0u8; 100]).unwrap();
        assert_eq!(disk_usage(&path), 100);
    }

    #[test]
    fn disk_usage_sums_recursively() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("a"), [0u8; 10]).unwrap();
        fs::write(dir.path().join("sub").join("b"), [0u8; 30]).unwrap();
        assert_eq!(disk_usage(dir.path()), 40);
    }

    #[test]
    fn disk_usage_missing_path_is_zero() {
        let dir = TempDir::new().unwrap();
        assert_eq!(disk_usage(&dir.path().join("nope")), 0);
    }

    #[test]
    fn size_label_is_bracketed() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a"), [0u8; 5]).unwrap();
        assert_eq!(size_label(&dir.path().join("a")), "[5 B]");
    }
}
