//! PCI bus probe.
//!
//! Enumerates the immediate subdirectories of the PCI bus root, reads the
//! per-device attribute files, and resolves names against the PCI id
//! database.

use crate::ids;
use crate::sysfs::{read_hex_attr, sorted_subdirs};
use hwinv_common::{DeviceRecord, ProbeError, ProbeResult, DEFAULT_VERSION};
use std::path::Path;
use tracing::debug;

/// Enumerate PCI devices under `root`, resolving names via `ids_path`.
///
/// Devices missing either the `vendor` or `device` attribute are skipped.
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

        let vendor_id = match read_hex_attr(&dir, "vendor") {
            Some(v) => v,
            None => continue,
        };
        let device_id = match read_hex_attr(&dir, "device") {
            Some(v) => v,
            None => continue,
        };
        let version = read_hex_attr(&dir, "revision")
            .and_then(|rev| u64::from_str_radix(&rev, 16).ok())
            .map(|rev| rev.to_string())
            .unwrap_or_else(|| DEFAULT_VERSION.to_string());

        let names = ids::lookup(ids_path, &vendor_id, &device_id)?;
        let name = names.device.unwrap_or_else(|| device_id.clone());
        let vendor = names.vendor.unwrap_or_else(|| vendor_id.clone());

        let mut record = DeviceRecord::new(
            "pci",
            name,
            &[address.as_str(), vendor_id.as_str(), device_id.as_str()],
        );
        record.vendor = vendor;
        record.vendor_id = Some(format!("PCI:0x{}", vendor_id));
        record.version = version;
        devices.push(record);
    }

    debug!("pci: {} devices", devices.len());
    Ok(devices)
}
