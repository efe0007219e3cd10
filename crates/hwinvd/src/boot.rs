//! Boot configuration extraction.
//!
//! Reads the bootloader identifier and device serial from the kernel boot
//! configuration, falling back to the vendor property store when the
//! kernel did not carry them.

use crate::config::DiscoveryConfig;
use crate::props;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Bootloader identity resolved at boot time.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BootInfo {
    pub bootloader: String,
    pub serialno: String,
}

/// Resolve bootloader id and serial number.
pub fn probe(config: &DiscoveryConfig) -> BootInfo {
    let mut info = fs::read_to_string(&config.bootconfig_path)
        .map(|content| parse_bootconfig(&content))
        .unwrap_or_default();

    if info.bootloader.is_empty() {
        debug!("bootconfig silent, falling back to {}", props::PROP_BOOTLOADER);
        info.bootloader = props::get_property(&config.prop_paths, props::PROP_BOOTLOADER);
    }

    info
}

/// The raw kernel command line, `None` when unreadable or empty.
pub fn kernel_cmdline(path: &Path) -> Option<String> {
    let raw = fs::read_to_string(path).ok()?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Scan bootconfig assignments for the androidboot bootloader and serial
/// keys; values arrive quoted.
fn parse_bootconfig(content: &str) -> BootInfo {
    let mut info = BootInfo::default();
    for line in content.lines() {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = value.trim().trim_matches('"').to_string();
        match key.trim() {
            "androidboot.bootloader" => info.bootloader = value,
            "androidboot.serialno" => info.serialno = value,
            _ => {}
        }
    }
    info
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bootconfig_quoted_values() {
        let content = "androidboot.bootloader = \"G998BXXU5DVGA\"\nandroidboot.serialno = \"R5CT10ABCDE\"\nandroidboot.hardware = \"exynos2100\"\n";
        let info = parse_bootconfig(content);
        assert_eq!(info.bootloader, "G998BXXU5DVGA");
        assert_eq!(info.serialno, "R5CT10ABCDE");
    }

    #[test]
    fn test_parse_bootconfig_missing_keys() {
        let info = parse_bootconfig("androidboot.hardware = \"qcom\"\n");
        assert_eq!(info, BootInfo::default());
    }

    #[test]
    fn test_fallback_to_property_store() {
        let dir = tempfile::tempdir().unwrap();
        let prop = dir.path().join("build.prop");
        fs::write(&prop, "ro.bootloader=PROP-BL-1\n").unwrap();

        let config = DiscoveryConfig {
            bootconfig_path: dir.path().join("no-bootconfig"),
            prop_paths: vec![prop],
            ..DiscoveryConfig::default()
        };

        let info = probe(&config);
        assert_eq!(info.bootloader, "PROP-BL-1");
        assert!(info.serialno.is_empty());
    }

    #[test]
    fn test_kernel_cmdline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cmdline");
        fs::write(&path, "console=ttyMSM0,115200n8 androidboot.hardware=qcom\n").unwrap();

        let cmdline = kernel_cmdline(&path).unwrap();
        assert!(cmdline.starts_with("console=ttyMSM0"));
        assert_eq!(kernel_cmdline(&dir.path().join("missing")), None);
    }
}
