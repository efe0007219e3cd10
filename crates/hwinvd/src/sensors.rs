//! Sensor enumeration through the binder-call helper.
//!
//! Sensor HAL interfaces are versioned; the helper is invoked once per
//! candidate version, most preferred first, and the first version that
//! answers with output wins. The reply lists one brace-wrapped tuple per
//! sensor.

use hwinv_common::{ProbeError, ProbeResult, DEFAULT_VERSION};
use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

/// One parsed sensor entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorEntry {
    pub id: String,
    pub name: String,
    pub vendor: String,
    pub version: String,
}

// { <id> <type> "<name>"H "<vendor>"H <version> }
static SENSOR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\{\s*(\d+)\s+\S+\s+"([^"]*)"H\s+"([^"]*)"H\s*(\d*)\s*\}"#).unwrap()
});

/// Enumerate sensors via the first HAL interface version that responds.
pub async fn probe(
    binder_call_bin: &str,
    hal_versions: &[String],
    timeout_secs: u64,
) -> ProbeResult<Vec<SensorEntry>> {
    for hal in hal_versions {
        let output = match run(binder_call_bin, hal, timeout_secs).await {
            Ok(output) => output,
            Err(err) if err.is_absent() => return Err(err),
            Err(err) => {
                debug!("sensor HAL {} query failed: {}", hal, err);
                continue;
            }
        };
        if output.trim().is_empty() {
            continue;
        }
        let entries = parse_sensor_list(&output);
        debug!("sensors: {} entries via {}", entries.len(), hal);
        return Ok(entries);
    }
    Err(ProbeError::Absent("no sensor HAL answered".to_string()))
}

async fn run(bin: &str, hal: &str, timeout_secs: u64) -> ProbeResult<String> {
    let invocation = Command::new(bin).arg(hal).output();
    match timeout(Duration::from_secs(timeout_secs), invocation).await {
        Err(_) => Err(ProbeError::External(format!("{} timed out on {}", bin, hal))),
        Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ProbeError::Absent(bin.to_string()))
        }
        Ok(Err(e)) => Err(ProbeError::External(format!("{}: {}", bin, e))),
        Ok(Ok(output)) if !output.status.success() => Err(ProbeError::External(format!(
            "{} {} exited with {}",
            bin, hal, output.status
        ))),
        Ok(Ok(output)) => Ok(String::from_utf8_lossy(&output.stdout).to_string()),
    }
}

/// Every brace-wrapped tuple in the reply becomes one entry; an empty
/// version capture falls back to the default.
fn parse_sensor_list(output: &str) -> Vec<SensorEntry> {
    SENSOR_PATTERN
        .captures_iter(output)
        .map(|cap| {
            let version = cap[4].to_string();
            SensorEntry {
                id: cap[1].to_string(),
                name: cap[2].to_string(),
                vendor: cap[3].to_string(),
                version: if version.is_empty() {
                    DEFAULT_VERSION.to_string()
                } else {
                    version
                },
            }
        })
        .collect()
}
