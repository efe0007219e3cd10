//! Vendor/device name lookup against pci.ids / usb.ids databases.
//!
//! The databases are flat text: un-indented vendor lines
//! (`<vendor_id><ws><name>`) followed by tab-indented device lines
//! (`\t<device_id><ws><name>`) until the next un-indented line.

use hwinv_common::{ProbeError, ProbeResult};
use std::fs;
use std::path::Path;

/// Names resolved for a (vendor, device) id pair.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IdNames {
    pub vendor: Option<String>,
    pub device: Option<String>,
}

/// Look up lower-case hex ids (no `0x` prefix) in a sectioned database.
pub fn lookup(path: &Path, vendor_id: &str, device_id: &str) -> ProbeResult<IdNames> {
    if !path.exists() {
        return Err(ProbeError::Absent(path.display().to_string()));
    }
    let content = fs::read_to_string(path)?;
    Ok(scan(&content, vendor_id, device_id))
}

/// Sequential section scan.
///
/// A vendor line matching the target opens its section; device lines match
/// only while the section is open; a device match halts the scan; any other
/// un-indented line closes the section.
fn scan(content: &str, vendor_id: &str, device_id: &str) -> IdNames {
    let mut names = IdNames::default();
    let mut in_section = false;

    for line in content.lines() {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(entry) = line.strip_prefix('\t') {
            // Deeper-indented lines are subdevice/interface entries
            if !in_section || entry.starts_with('\t') {
                continue;
            }
            if let Some((id, name)) = split_entry(entry) {
                if id == device_id {
                    names.device = Some(name.to_string());
                    break;
                }
            }
        } else {
            match split_entry(line) {
                Some((id, name)) if id == vendor_id => {
                    if names.vendor.is_none() {
                        names.vendor = Some(name.to_string());
                    }
                    in_section = true;
                }
                _ => in_section = false,
            }
        }
    }

    names
}

fn split_entry(line: &str) -> Option<(&str, &str)> {
    let mut parts = line.splitn(2, char::is_whitespace);
    let id = parts.next()?;
    let name = parts.next()?.trim();
    if name.is_empty() {
        None
    } else {
        Some((id, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
# Comment line
1234  First Vendor
\tabcd  First Device
\tbeef  Second Device
5678  Second Vendor
\tabcd  Impostor Device
";

    #[test]
    fn test_device_resolves_under_matching_vendor() {
        let names = scan(SAMPLE, "1234", "abcd");
        assert_eq!(names.vendor.as_deref(), Some("First Vendor"));
        assert_eq!(names.device.as_deref(), Some("First Device"));
    }

    #[test]
    fn test_device_outside_section_not_matched() {
        // "beef" exists only under the first vendor
        let names = scan(SAMPLE, "5678", "beef");
        assert_eq!(names.vendor.as_deref(), Some("Second Vendor"));
        assert_eq!(names.device, None);
    }

    #[test]
    fn test_unknown_pair_yields_nothing() {
        let names = scan(SAMPLE, "ffff", "ffff");
        assert_eq!(names, IdNames::default());
    }

    #[test]
    fn test_subdevice_lines_skipped() {
        let content = "1234  Vendor\n\tabcd  Device\n\t\t9999 0001  Subsystem\n";
        let names = scan(content, "1234", "9999");
        assert_eq!(names.vendor.as_deref(), Some("Vendor"));
        assert_eq!(names.device, None);
    }

    #[test]
    fn test_missing_file_is_absent() {
        let err = lookup(Path::new("/nonexistent/pci.ids"), "1234", "abcd").unwrap_err();
        assert!(err.is_absent());
    }

    #[test]
    fn test_lookup_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let names = lookup(file.path(), "1234", "beef").unwrap();
        assert_eq!(names.device.as_deref(), Some("Second Device"));
    }
}
