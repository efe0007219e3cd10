//! Error taxonomy for discovery probes.
//!
//! Expected absence (no bus root, no modem, no devicetree) is a
//! first-class variant so the aggregator can log it apart from real
//! failures. Nothing here ever aborts the discovery pass.

use thiserror::Error;

pub type ProbeResult<T> = Result<T, ProbeError>;

#[derive(Error, Debug)]
pub enum ProbeError {
    /// The source does not exist on this host.
    #[error("source not present: {0}")]
    Absent(String),

    /// The source exists but could not be understood.
    #[error("malformed entry: {0}")]
    Malformed(String),

    /// An out-of-process query failed, timed out, or returned garbage.
    #[error("external query failed: {0}")]
    External(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProbeError {
    /// True for expected absence, false for anything worth a warning.
    pub fn is_absent(&self) -> bool {
        matches!(self, ProbeError::Absent(_))
    }
}
