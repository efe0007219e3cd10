//! Host-level scalar facts.
//!
//! Resolved once during the discovery pass and mirrored into the metadata
//! map by the aggregator; the façade exposes them as typed properties.

use serde::{Deserialize, Serialize};

/// Scalar facts about the host the engine is running on.
///
/// Fields left empty when the backing source is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostProfile {
    /// Manufacturer, upper-cased
    pub vendor: String,

    /// Marketed product name
    pub product: String,

    /// Board/device codename
    pub codename: String,

    /// Device family, the most specific devicetree compatible string
    pub family: String,

    /// Contents of /etc/machine-id
    pub machine_id: String,

    /// Kernel name, e.g. "linux"
    pub kernel_name: String,

    /// Running kernel release
    pub kernel_version: String,

    /// CPU architecture, e.g. "aarch64"
    pub cpu_architecture: String,

    /// Boot time, RFC 3339
    pub boot_time: String,
}
