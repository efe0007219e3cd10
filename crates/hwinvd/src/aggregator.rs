//! One-shot discovery pass.
//!
//! Runs every probe in a fixed order and folds the results into an
//! immutable inventory. A probe failure never aborts the pass: expected
//! absence is logged at debug, anything else at warn, and the aggregation
//! always completes.

use crate::config::DiscoveryConfig;
use crate::props::{PROP_DEVICE, PROP_MANUFACTURER, PROP_MODEL};
use crate::{boot, devicetree, modem, osrelease, pci, props, scsi, sensors, usb};
use hwinv_common::{metadata, DeviceRecord, HostProfile, MetadataMap, ProbeError};
use serde::Serialize;
use std::fs;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Product of one discovery pass, handed to the façade read-only.
#[derive(Debug, Clone, Serialize)]
pub struct Inventory {
    pub devices: Vec<DeviceRecord>,
    pub metadata: MetadataMap,
    pub host: HostProfile,
}

/// Accumulates probe deltas in probe order.
///
/// Probes never see the accumulator; the aggregator folds each delta in,
/// then freezes the builder into the inventory.
#[derive(Debug, Default)]
struct InventoryBuilder {
    devices: Vec<DeviceRecord>,
    metadata: MetadataMap,
    host: HostProfile,
}

impl InventoryBuilder {
    fn add_device(&mut self, record: DeviceRecord) {
        self.devices.push(record);
    }

    fn add_devices(&mut self, records: Vec<DeviceRecord>) {
        self.devices.extend(records);
    }

    /// Insert a metadata key; empty values are not published. Later writes
    /// for the same key overwrite earlier ones.
    fn set_metadata(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        if !value.is_empty() {
            self.metadata.insert(key.to_string(), value);
        }
    }

    fn finish(self) -> Inventory {
        Inventory {
            devices: self.devices,
            metadata: self.metadata,
            host: self.host,
        }
    }
}

/// Run the full probe sequence once.
pub async fn run(config: &DiscoveryConfig) -> Inventory {
    let start = Instant::now();
    let mut builder = InventoryBuilder::default();

    builder.set_metadata(metadata::RUNTIME_VERSION, env!("CARGO_PKG_VERSION"));

    // Host identity from the vendor property store
    let manufacturer = props::get_property(&config.prop_paths, PROP_MANUFACTURER);
    let host_vendor = manufacturer.to_uppercase();
    let product = props::get_property(&config.prop_paths, PROP_MODEL);
    let codename = props::get_property(&config.prop_paths, PROP_DEVICE);
    builder.host.vendor = host_vendor.clone();
    builder.host.product = product.clone();
    builder.host.codename = codename.clone();
    builder.set_metadata(metadata::HOST_VENDOR, host_vendor);
    builder.set_metadata(metadata::HOST_PRODUCT, product);
    builder.set_metadata(metadata::HOST_CODENAME, codename);

    // Machine id
    let machine_id = read_trimmed(&config.machine_id_path);
    builder.host.machine_id = machine_id.clone();
    builder.set_metadata(metadata::MACHINE_ID, machine_id);

    // Bootloader
    let boot_info = boot::probe(config);
    if !boot_info.bootloader.is_empty() {
        let mut record = DeviceRecord::new(
            "boot",
            "System bootloader",
            &[boot_info.bootloader.as_str(), boot_info.serialno.as_str()],
        );
        record.vendor = manufacturer.clone();
        record.version = boot_info.bootloader.clone();
        record.serial = boot_info.serialno.clone();
        builder.add_device(record);
        builder.set_metadata(metadata::BOOTLOADER_VERSION, boot_info.bootloader);
    }

    // Modem
    match modem::probe(&config.mmcli_bin, config.probe_timeout_secs).await {
        Ok(m) => {
            let name = if m.model.is_empty() {
                "Modem".to_string()
            } else {
                m.model.clone()
            };
            let mut record =
                DeviceRecord::new("modem", name, &[m.serial.as_str(), m.revision.as_str()]);
            record.vendor = m.manufacturer;
            if !m.revision.is_empty() {
                record.version = m.revision;
            }
            record.serial = m.serial;
            builder.add_device(record);
            builder.set_metadata(metadata::MODEM_SOFTWARE_VERSION, m.software_version);
        }
        Err(err) => log_probe("modem", &err),
    }

    // Sensors
    match sensors::probe(
        &config.binder_call_bin,
        &config.sensor_hal_versions,
        config.probe_timeout_secs,
    )
    .await
    {
        Ok(entries) => {
            for entry in entries {
                let mut record = DeviceRecord::new(
                    "sensors",
                    entry.name.as_str(),
                    &[entry.id.as_str(), entry.vendor.as_str()],
                );
                record.vendor = entry.vendor;
                record.version = entry.version;
                record.serial = entry.id;
                builder.add_device(record);
            }
        }
        Err(err) => log_probe("sensors", &err),
    }

    // Device buses
    match pci::probe(&config.pci_root, &config.pci_ids_path) {
        Ok(devices) => builder.add_devices(devices),
        Err(err) => log_probe("pci", &err),
    }
    match usb::probe(&config.usb_root, &config.usb_ids_path) {
        Ok(devices) => builder.add_devices(devices),
        Err(err) => log_probe("usb", &err),
    }
    match scsi::probe(&config.scsi_root) {
        Ok(devices) => builder.add_devices(devices),
        Err(err) => log_probe("scsi", &err),
    }

    // Kernel command line
    if let Some(cmdline) = boot::kernel_cmdline(&config.cmdline_path) {
        builder.set_metadata(metadata::KERNEL_CMDLINE, cmdline);
    }

    // Distro identity
    for (key, field) in [
        (metadata::DISTRO_ID, "ID"),
        (metadata::DISTRO_NAME, "NAME"),
        (metadata::DISTRO_VERSION, "VERSION_ID"),
        (metadata::DISTRO_VARIANT, "VARIANT_ID"),
    ] {
        if let Some(value) = osrelease::os_release_value(&config.os_release_path, field) {
            builder.set_metadata(key, value);
        }
    }

    // Kernel, CPU and boot-time facts
    let kernel_name = std::env::consts::OS.to_string();
    let kernel_version = sysinfo::System::kernel_version().unwrap_or_default();
    let cpu_architecture = sysinfo::System::cpu_arch().unwrap_or_default();
    let boot_time = chrono::DateTime::from_timestamp(sysinfo::System::boot_time() as i64, 0)
        .map(|t| t.to_rfc3339())
        .unwrap_or_default();
    builder.host.kernel_name = kernel_name.clone();
    builder.host.kernel_version = kernel_version.clone();
    builder.host.cpu_architecture = cpu_architecture.clone();
    builder.host.boot_time = boot_time.clone();
    builder.set_metadata(metadata::KERNEL_NAME, kernel_name);
    builder.set_metadata(metadata::KERNEL_VERSION, kernel_version);
    builder.set_metadata(metadata::CPU_ARCHITECTURE, cpu_architecture);
    builder.set_metadata(metadata::BOOT_TIME, boot_time);

    // Device family from the devicetree
    if let Some(family) = devicetree::family(&config.devicetree_path) {
        builder.host.family = family.clone();
        builder.set_metadata(metadata::HOST_FAMILY, family);
    }

    let inventory = builder.finish();
    info!(
        "discovery pass complete: {} devices, {} metadata keys in {:?}",
        inventory.devices.len(),
        inventory.metadata.len(),
        start.elapsed()
    );
    inventory
}

fn read_trimmed(path: &std::path::Path) -> String {
    fs::read_to_string(path)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

fn log_probe(probe: &str, err: &ProbeError) {
    if err.is_absent() {
        debug!("{} probe: {}", probe, err);
    } else {
        warn!("{} probe failed: {}", probe, err);
    }
}
