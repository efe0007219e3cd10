//! Shared vocabulary for the hwinv discovery engine.
//!
//! Holds the record schema published to the update-service façade, the
//! host profile, metadata key constants, and the probe error taxonomy.

pub mod device;
pub mod error;
pub mod host;
pub mod metadata;

pub use device::{DeviceRecord, DEFAULT_VERSION, DEVICE_FLAGS, PLUGIN_NAME, PROTOCOL_NAME};
pub use error::{ProbeError, ProbeResult};
pub use host::HostProfile;
pub use metadata::MetadataMap;
