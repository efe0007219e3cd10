//! SCSI bus probe.
//!
//! Enumerates `scsi_generic` entries and descends into each entry's
//! `device` subdirectory for the identifying attributes. The VPD page 0x80
//! blob supplies the serial when present.

use crate::sysfs::{read_attr, sorted_subdirs};
use hwinv_common::{DeviceRecord, ProbeError, ProbeResult, DEFAULT_VERSION};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Enumerate SCSI devices under `root`.
///
/// Entries missing `vendor` or `model` are skipped. Duplicate
/// (vendor, model, version) triples are dropped, first occurrence wins.
pub fn probe(root: &Path) -> ProbeResult<Vec<DeviceRecord>> {
    if !root.exists() {
        return Err(ProbeError::Absent(root.display().to_string()));
    }

    let mut devices = Vec::new();
    let mut seen: HashSet<(String, String, String)> = HashSet::new();
    for entry in sorted_subdirs(root)? {
        let device_dir = entry.join("device");

        let vendor = match read_attr(&device_dir, "vendor") {
            Some(v) => v,
            None => continue,
        };
        let model = match read_attr(&device_dir, "model") {
            Some(v) => v,
            None => continue,
        };
        let version =
            read_attr(&device_dir, "rev").unwrap_or_else(|| DEFAULT_VERSION.to_string());
        let serial = read_vpd_serial(&device_dir.join("vpd_pg80"));

        if !seen.insert((vendor.clone(), model.clone(), version.clone())) {
            continue;
        }

        let mut record = DeviceRecord::new(
            "scsi",
            model.as_str(),
            &[vendor.as_str(), model.as_str(), version.as_str()],
        );
        record.vendor = vendor;
        record.version = version;
        record.serial = serial;
        devices.push(record);
    }

    debug!("scsi: {} devices", devices.len());
    Ok(devices)
}

/// Read the binary VPD page and keep only printable ASCII bytes.
fn read_vpd_serial(path: &Path) -> String {
    fs::read(path)
        .map(|bytes| printable_ascii(&bytes))
        .unwrap_or_default()
}

/// Retain bytes in the printable range 32..=126, no separator inserted.
fn printable_ascii(bytes: &[u8]) -> String {
    bytes
        .iter()
        .copied()
        .filter(|b| (32..=126).contains(b))
        .map(char::from)
        .collect()
}
