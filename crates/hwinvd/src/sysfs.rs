//! Small helpers for sysfs attribute reading.

use std::fs;
use std::path::{Path, PathBuf};

/// Immediate subdirectories of `root`, sorted by name for stable ordering.
pub fn sorted_subdirs(root: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut dirs: Vec<PathBuf> = fs::read_dir(root)?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();
    Ok(dirs)
}

/// Read a single-value attribute file, trimmed; `None` when missing or empty.
pub fn read_attr(dir: &Path, attr: &str) -> Option<String> {
    let raw = fs::read_to_string(dir.join(attr)).ok()?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Read a hex attribute file, stripping a leading `0x` when present.
pub fn read_hex_attr(dir: &Path, attr: &str) -> Option<String> {
    let raw = read_attr(dir, attr)?;
    let stripped = raw.strip_prefix("0x").unwrap_or(&raw);
    if stripped.is_empty() {
        None
    } else {
        Some(stripped.to_ascii_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_hex_attr_strips_prefix() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("vendor"), "0x8086\n").unwrap();

        assert_eq!(read_hex_attr(dir.path(), "vendor").as_deref(), Some("8086"));
    }

    #[test]
    fn test_read_hex_attr_plain_value() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("idVendor"), "0BDA\n").unwrap();

        assert_eq!(read_hex_attr(dir.path(), "idVendor").as_deref(), Some("0bda"));
    }

    #[test]
    fn test_read_attr_missing_or_blank() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read_attr(dir.path(), "vendor"), None);

        fs::write(dir.path().join("serial"), "  \n").unwrap();
        assert_eq!(read_attr(dir.path(), "serial"), None);
    }

    #[test]
    fn test_sorted_subdirs_ignores_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("b")).unwrap();
        fs::create_dir(dir.path().join("a")).unwrap();
        fs::write(dir.path().join("not-a-dir"), "x").unwrap();

        let subdirs = sorted_subdirs(dir.path()).unwrap();
        let names: Vec<_> = subdirs
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
