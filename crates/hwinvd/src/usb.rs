//! USB bus probe.
//!
//! Enumerates the immediate subdirectories of the USB bus root. Interface
//! entries (`1-1:1.0` and the like) carry no `idVendor` attribute and fall
//! out naturally.

use crate::ids;
use crate::sysfs::{read_attr, read_hex_attr, sorted_subdirs};
use hwinv_common::{DeviceRecord, ProbeError, ProbeResult, DEFAULT_VERSION};
use std::path::Path;
use tracing::debug;

/// Enumerate USB devices under `root`, resolving names via `ids_path`.
///
/// Devices missing either `idVendor` or `idProduct` are skipped; `serial`
/// is optional.
pub fn probe(root: &Path, ids_path: &Path) -> ProbeResult<Vec<DeviceRecord>> {
    if !root.exists() {
        return Err(ProbeError::Absent(root.display().to_string()));
    }

    let mut devices = Vec::new();
    for dir in sorted_subdirs(root)? {
        let address = dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let vendor_id = match read_hex_attr(&dir, "idVendor") {
            Some(v) => v,
            None => continue,
        };
        let product_id = match read_hex_attr(&dir, "idProduct") {
            Some(v) => v,
            None => continue,
        };
        let serial = read_attr(&dir, "serial").unwrap_or_default();
        let version = read_attr(&dir, "version")
            .map(|v| normalize_version(&v))
            .unwrap_or_else(|| DEFAULT_VERSION.to_string());

        let names = ids::lookup(ids_path, &vendor_id, &product_id)?;
        let name = names.device.unwrap_or_else(|| product_id.clone());
        let vendor = names.vendor.unwrap_or_else(|| vendor_id.clone());

        let mut record = DeviceRecord::new(
            "usb",
            name,
            &[
                address.as_str(),
                vendor_id.as_str(),
                product_id.as_str(),
                serial.as_str(),
            ],
        );
        record.vendor = vendor;
        record.vendor_id = Some(format!("USB:0x{}", vendor_id));
        record.version = version;
        record.serial = serial;
        devices.push(record);
    }

    debug!("usb: {} devices", devices.len());
    Ok(devices)
}

/// Normalize the sysfs `version` attribute (a decimal/float string such as
/// " 2.10") to an integer-valued decimal string.
fn normalize_version(raw: &str) -> String {
    raw.trim()
        .parse::<f64>()
        .ok()
        .map(|v| format!("{}", v as u64))
        .unwrap_or_else(|| DEFAULT_VERSION.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_version_float() {
        assert_eq!(normalize_version(" 2.10"), "2");
        assert_eq!(normalize_version("3.00"), "3");
        assert_eq!(normalize_version("1"), "1");
    }

    #[test]
    fn test_normalize_version_garbage_defaults() {
        assert_eq!(normalize_version("fast"), DEFAULT_VERSION);
        assert_eq!(normalize_version(""), DEFAULT_VERSION);
    }
}
