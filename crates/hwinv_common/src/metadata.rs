//! Metadata map keys.
//!
//! The aggregator publishes a flat string map alongside the device list.
//! Later probes overwrite earlier values for the same key.

use std::collections::BTreeMap;

/// Flat host metadata, key → value.
pub type MetadataMap = BTreeMap<String, String>;

pub const HOST_VENDOR: &str = "HostVendor";
pub const HOST_PRODUCT: &str = "HostProduct";
pub const HOST_CODENAME: &str = "HostCodename";
pub const HOST_FAMILY: &str = "HostFamily";
pub const MACHINE_ID: &str = "MachineId";
pub const KERNEL_NAME: &str = "KernelName";
pub const KERNEL_VERSION: &str = "KernelVersion";
pub const KERNEL_CMDLINE: &str = "KernelCmdline";
pub const CPU_ARCHITECTURE: &str = "CpuArchitecture";
pub const BOOT_TIME: &str = "BootTime";
pub const DISTRO_ID: &str = "DistroId";
pub const DISTRO_NAME: &str = "DistroName";
pub const DISTRO_VERSION: &str = "DistroVersion";
pub const DISTRO_VARIANT: &str = "DistroVariant";
pub const BOOTLOADER_VERSION: &str = "BootloaderVersion";
pub const MODEM_SOFTWARE_VERSION: &str = "ModemSoftwareVersion";
pub const RUNTIME_VERSION: &str = "RuntimeVersion";
