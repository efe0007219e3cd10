//! Device records published to the update-service façade.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Source tag carried by every record.
pub const PLUGIN_NAME: &str = "hwinv";

/// Protocol identifier carried by every record.
pub const PROTOCOL_NAME: &str = "org.hwinv.inventory";

/// Fixed flag bitmask reported for every discovered device.
pub const DEVICE_FLAGS: u64 = 7;

/// Version string used when a device does not report one.
pub const DEFAULT_VERSION: &str = "1";

/// One discovered hardware component.
///
/// Every field has a defined default; a record is never published with an
/// unset field. Records are built once during the discovery pass and not
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    /// Stable identifier derived from the record's physical identity
    pub device_id: String,

    /// Human-readable device name
    pub name: String,

    /// Vendor name, empty when unresolved
    #[serde(default)]
    pub vendor: String,

    /// Bus-tagged vendor id, e.g. "PCI:0x8086"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,

    /// Version as a decimal string, "1" when unknown
    pub version: String,

    /// Engine source tag
    pub plugin: String,

    /// Engine protocol tag
    pub protocol: String,

    /// Fixed flag bitmask
    pub flags: u64,

    /// Serial number, empty when unavailable
    #[serde(default)]
    pub serial: String,
}

impl DeviceRecord {
    /// Create a record with every optional field at its default.
    ///
    /// `bus` tags the identity hash so equal names on different buses stay
    /// distinct; `identity` should hold the most specific stable attributes
    /// available for the device (bus address, hex ids, serial).
    pub fn new(bus: &str, name: impl Into<String>, identity: &[&str]) -> Self {
        Self {
            device_id: stable_id(bus, identity),
            name: name.into(),
            vendor: String::new(),
            vendor_id: None,
            version: DEFAULT_VERSION.to_string(),
            plugin: PLUGIN_NAME.to_string(),
            protocol: PROTOCOL_NAME.to_string(),
            flags: DEVICE_FLAGS,
            serial: String::new(),
        }
    }
}

/// Derive a stable device id: the first 16 hex chars of a SHA-256 over the
/// plugin tag, the bus tag, and the NUL-separated identity parts.
pub fn stable_id(bus: &str, identity: &[&str]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(PLUGIN_NAME.as_bytes());
    hasher.update([0u8]);
    hasher.update(bus.as_bytes());
    for part in identity {
        hasher.update([0u8]);
        hasher.update(part.as_bytes());
    }
    hex::encode(hasher.finalize())[..16].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_defaults() {
        let record = DeviceRecord::new("pci", "Ethernet controller", &["0000:00:1f.6"]);

        assert_eq!(record.name, "Ethernet controller");
        assert_eq!(record.version, DEFAULT_VERSION);
        assert_eq!(record.plugin, PLUGIN_NAME);
        assert_eq!(record.protocol, PROTOCOL_NAME);
        assert_eq!(record.flags, DEVICE_FLAGS);
        assert!(record.vendor.is_empty());
        assert!(record.serial.is_empty());
        assert!(record.vendor_id.is_none());
    }

    #[test]
    fn test_stable_id_is_deterministic() {
        let a = stable_id("usb", &["1-1", "0bda", "8153"]);
        let b = stable_id("usb", &["1-1", "0bda", "8153"]);

        assert_eq!(a, b);
        assert_eq!(a.len(), 16);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_stable_id_distinguishes_bus_and_identity() {
        let pci = stable_id("pci", &["8086", "15d7"]);
        let usb = stable_id("usb", &["8086", "15d7"]);
        let other = stable_id("pci", &["8086", "15d8"]);

        assert_ne!(pci, usb);
        assert_ne!(pci, other);
    }

    #[test]
    fn test_stable_id_part_boundaries() {
        // "ab" + "c" must not collide with "a" + "bc"
        assert_ne!(stable_id("pci", &["ab", "c"]), stable_id("pci", &["a", "bc"]));
    }
}
