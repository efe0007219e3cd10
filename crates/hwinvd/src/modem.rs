//! Modem discovery via the ModemManager CLI.
//!
//! Enumerates managed modem objects with `mmcli` and reads the identifying
//! key/value fields of each. Every failure mode short of a timeout is the
//! ordinary state of a host without telephony hardware.

use hwinv_common::{ProbeError, ProbeResult};
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

/// Values read from one modem object.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ModemInfo {
    pub manufacturer: String,
    pub model: String,
    pub revision: String,
    pub serial: String,
    pub software_version: String,
}

/// Query ModemManager for modem identity.
///
/// When several modems are managed, only the last enumerated one is kept.
pub async fn probe(mmcli_bin: &str, timeout_secs: u64) -> ProbeResult<ModemInfo> {
    let listing = run(mmcli_bin, &["-L", "--output-keyvalue"], timeout_secs).await?;
    let paths = parse_modem_list(&listing);
    if paths.is_empty() {
        return Err(ProbeError::Absent("no managed modems".to_string()));
    }

    let mut info = ModemInfo::default();
    for path in &paths {
        let output = run(mmcli_bin, &["-m", path, "--output-keyvalue"], timeout_secs).await?;
        info = parse_modem_info(&output);
    }
    debug!("modem: {} {}", info.manufacturer, info.model);
    Ok(info)
}

async fn run(bin: &str, args: &[&str], timeout_secs: u64) -> ProbeResult<String> {
    let invocation = Command::new(bin).args(args).output();
    match timeout(Duration::from_secs(timeout_secs), invocation).await {
        Err(_) => Err(ProbeError::External(format!("{} timed out", bin))),
        Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ProbeError::Absent(bin.to_string()))
        }
        Ok(Err(e)) => Err(ProbeError::External(format!("{}: {}", bin, e))),
        // mmcli exits non-zero when ModemManager is not on the bus
        Ok(Ok(output)) if !output.status.success() => Err(ProbeError::Absent(format!(
            "{} exited with {}",
            bin, output.status
        ))),
        Ok(Ok(output)) => Ok(String::from_utf8_lossy(&output.stdout).to_string()),
    }
}

/// Modem object paths from `mmcli -L --output-keyvalue`.
fn parse_modem_list(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| {
            let (key, value) = line.split_once(':')?;
            if key.trim().starts_with("modem-list.value") {
                Some(value.trim().to_string())
            } else {
                None
            }
        })
        .collect()
}

/// Identity fields from `mmcli -m <path> --output-keyvalue`.
fn parse_modem_info(output: &str) -> ModemInfo {
    let mut info = ModemInfo::default();
    for line in output.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        // mmcli prints "--" for unset fields
        if value == "--" {
            continue;
        }
        match key.trim() {
            "modem.generic.manufacturer" => info.manufacturer = value.to_string(),
            "modem.generic.model" => info.model = value.to_string(),
            "modem.generic.revision" => info.revision = value.to_string(),
            "modem.generic.equipment-identifier" => info.serial = value.to_string(),
            "modem.generic.carrier-configuration-revision" => {
                info.software_version = value.to_string()
            }
            _ => {}
        }
    }
    info
}
