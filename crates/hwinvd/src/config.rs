//! Configuration for the discovery pass.
//!
//! Loads settings from /etc/hwinv/config.toml or uses defaults. Every
//! probe source path is configurable so deployments on non-standard
//! layouts (and tests) can point the engine elsewhere.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

/// Config file path
pub const CONFIG_PATH: &str = "/etc/hwinv/config.toml";

/// Sources read by the discovery pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Candidate vendor build-property files, first existing wins
    #[serde(default = "default_prop_paths")]
    pub prop_paths: Vec<PathBuf>,

    /// Kernel boot configuration
    #[serde(default = "default_bootconfig_path")]
    pub bootconfig_path: PathBuf,

    /// Kernel command line
    #[serde(default = "default_cmdline_path")]
    pub cmdline_path: PathBuf,

    /// Machine id file
    #[serde(default = "default_machine_id_path")]
    pub machine_id_path: PathBuf,

    /// OS release metadata
    #[serde(default = "default_os_release_path")]
    pub os_release_path: PathBuf,

    /// Devicetree compatible blob
    #[serde(default = "default_devicetree_path")]
    pub devicetree_path: PathBuf,

    /// PCI bus enumeration root
    #[serde(default = "default_pci_root")]
    pub pci_root: PathBuf,

    /// USB bus enumeration root
    #[serde(default = "default_usb_root")]
    pub usb_root: PathBuf,

    /// SCSI generic enumeration root
    #[serde(default = "default_scsi_root")]
    pub scsi_root: PathBuf,

    /// PCI id database
    #[serde(default = "default_pci_ids_path")]
    pub pci_ids_path: PathBuf,

    /// USB id database
    #[serde(default = "default_usb_ids_path")]
    pub usb_ids_path: PathBuf,

    /// ModemManager CLI binary
    #[serde(default = "default_mmcli_bin")]
    pub mmcli_bin: String,

    /// Binder call helper binary
    #[serde(default = "default_binder_call_bin")]
    pub binder_call_bin: String,

    /// Sensor HAL interfaces to try, most preferred first
    #[serde(default = "default_sensor_hal_versions")]
    pub sensor_hal_versions: Vec<String>,

    /// Per-invocation timeout for external queries
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,
}

fn default_prop_paths() -> Vec<PathBuf> {
    [
        "/system/build.prop",
        "/vendor/build.prop",
        "/product/build.prop",
        "/system_ext/build.prop",
        "/odm/build.prop",
        "/odm/etc/build.prop",
        "/default.prop",
    ]
    .iter()
    .map(PathBuf::from)
    .collect()
}

fn default_bootconfig_path() -> PathBuf {
    PathBuf::from("/proc/bootconfig")
}

fn default_cmdline_path() -> PathBuf {
    PathBuf::from("/proc/cmdline")
}

fn default_machine_id_path() -> PathBuf {
    PathBuf::from("/etc/machine-id")
}

fn default_os_release_path() -> PathBuf {
    PathBuf::from("/etc/os-release")
}

fn default_devicetree_path() -> PathBuf {
    PathBuf::from("/sys/firmware/devicetree/base/compatible")
}

fn default_pci_root() -> PathBuf {
    PathBuf::from("/sys/bus/pci/devices")
}

fn default_usb_root() -> PathBuf {
    PathBuf::from("/sys/bus/usb/devices")
}

fn default_scsi_root() -> PathBuf {
    PathBuf::from("/sys/class/scsi_generic")
}

fn default_pci_ids_path() -> PathBuf {
    PathBuf::from("/usr/share/hwdata/pci.ids")
}

fn default_usb_ids_path() -> PathBuf {
    PathBuf::from("/usr/share/hwdata/usb.ids")
}

fn default_mmcli_bin() -> String {
    "mmcli".to_string()
}

fn default_binder_call_bin() -> String {
    "binder-call".to_string()
}

fn default_sensor_hal_versions() -> Vec<String> {
    [
        "android.hardware.sensors@2.1::ISensors/default",
        "android.hardware.sensors@2.0::ISensors/default",
        "android.hardware.sensors@1.0::ISensors/default",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_probe_timeout() -> u64 {
    5
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            prop_paths: default_prop_paths(),
            bootconfig_path: default_bootconfig_path(),
            cmdline_path: default_cmdline_path(),
            machine_id_path: default_machine_id_path(),
            os_release_path: default_os_release_path(),
            devicetree_path: default_devicetree_path(),
            pci_root: default_pci_root(),
            usb_root: default_usb_root(),
            scsi_root: default_scsi_root(),
            pci_ids_path: default_pci_ids_path(),
            usb_ids_path: default_usb_ids_path(),
            mmcli_bin: default_mmcli_bin(),
            binder_call_bin: default_binder_call_bin(),
            sensor_hal_versions: default_sensor_hal_versions(),
            probe_timeout_secs: default_probe_timeout(),
        }
    }
}

impl DiscoveryConfig {
    /// Load config from `path`, or return defaults.
    pub fn load(path: &str) -> Self {
        Self::load_from_path(path).unwrap_or_else(|e| {
            warn!("Config not found, using defaults: {}", e);
            DiscoveryConfig::default()
        })
    }

    fn load_from_path(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: DiscoveryConfig = toml::from_str(&content)?;
        info!("Loaded config from {}", path);
        Ok(config)
    }
}
