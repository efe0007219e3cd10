//! Vendor build-property lookup.
//!
//! Android-style `build.prop` files live on several partitions; the first
//! candidate that exists on this host wins. A missing key resolves to an
//! empty string, never an error.

use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Manufacturer property key
pub const PROP_MANUFACTURER: &str = "ro.product.vendor.manufacturer";

/// Marketed model property key
pub const PROP_MODEL: &str = "ro.product.vendor.model";

/// Board/device codename property key
pub const PROP_DEVICE: &str = "ro.product.vendor.device";

/// Bootloader id property key, the fallback when bootconfig is silent
pub const PROP_BOOTLOADER: &str = "ro.bootloader";

/// Look up `key` in the first existing candidate file.
pub fn get_property(paths: &[PathBuf], key: &str) -> String {
    let Some(path) = paths.iter().find(|p| p.exists()) else {
        debug!("no property file present for {}", key);
        return String::new();
    };
    let Ok(content) = fs::read_to_string(path) else {
        return String::new();
    };
    property_value(&content, key)
}

/// Scan `key=value` lines for a line beginning with `key`.
fn property_value(content: &str, key: &str) -> String {
    for line in content.lines() {
        let line = line.trim_start();
        if let Some(rest) = line.strip_prefix(key) {
            if let Some(value) = rest.strip_prefix('=') {
                return value.trim().to_string();
            }
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_property_value_basic() {
        let content = "# build properties\nro.product.vendor.manufacturer=Acme\nro.product.vendor.model=Widget X\n";
        assert_eq!(property_value(content, PROP_MANUFACTURER), "Acme");
        assert_eq!(property_value(content, PROP_MODEL), "Widget X");
    }

    #[test]
    fn test_property_value_missing_key() {
        assert_eq!(property_value("other.key=1\n", PROP_MANUFACTURER), "");
    }

    #[test]
    fn test_property_value_trims_whitespace() {
        assert_eq!(property_value("ro.bootloader= ABC-123 \n", PROP_BOOTLOADER), "ABC-123");
    }

    #[test]
    fn test_first_existing_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.prop");
        let second = dir.path().join("second.prop");
        fs::write(&second, "ro.bootloader=from-second\n").unwrap();

        let mut f = fs::File::create(&first).unwrap();
        writeln!(f, "ro.bootloader=from-first").unwrap();

        let paths = vec![
            dir.path().join("missing.prop"),
            first.clone(),
            second.clone(),
        ];
        assert_eq!(get_property(&paths, PROP_BOOTLOADER), "from-first");
    }

    #[test]
    fn test_no_candidate_exists() {
        let paths = vec![PathBuf::from("/nonexistent/a.prop")];
        assert_eq!(get_property(&paths, PROP_BOOTLOADER), "");
    }
}
