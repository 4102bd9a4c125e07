// ── Per-platform fact extraction ──
//
// Reduces `show version` / `show inventory` output to one DeviceFact.
// Each platform names its own field paths into the structured payload;
// ASA is the raw-text outlier and goes through the anchored-substring
// strategy instead. A missing field never aborts the run: the field
// degrades to its sentinel and the degradation is logged.

use serde_json::Value;
use tracing::{debug, warn};

use crate::command::{CommandResult, between, lookup_str, lookup_u64};
use crate::error::ExtractError;
use crate::model::fact::{DeviceFact, N_A, Platform, Uptime};

/// Extract a normalized fact from one device's command output.
///
/// Dispatch is a closed match over [`Platform`]: adding a platform is a
/// compile-time exhaustiveness obligation. Platforms with no CLI
/// extraction rules (controllers, unknowns) yield
/// [`ExtractError::UnsupportedPlatform`] — a skip signal for the caller.
pub fn extract(
    platform: Platform,
    hostname: &str,
    version: &CommandResult,
    inventory: &CommandResult,
) -> Result<DeviceFact, ExtractError> {
    match platform {
        Platform::IosXr => Ok(extract_iosxr(hostname, version, inventory)),
        Platform::IosXe => Ok(extract_iosxe(hostname, version, inventory)),
        Platform::Nxos => Ok(extract_nxos(hostname, version, inventory)),
        Platform::Asa => Ok(extract_asa(hostname, version, inventory)),
        Platform::Ios => Ok(extract_ios(hostname, version)),
        Platform::FabricController | Platform::SdwanController | Platform::Unknown => {
            Err(ExtractError::UnsupportedPlatform(platform))
        }
    }
}

// ── Field helpers ────────────────────────────────────────────────────

/// The structured payload, logging when a parser was expected but the
/// command fell back to raw output.
fn parsed_payload<'a>(
    result: &'a CommandResult,
    hostname: &str,
    command: &str,
) -> Option<&'a Value> {
    let payload = result.as_parsed();
    if payload.is_none() {
        warn!(hostname, command, "expected parsed output, got raw text");
    }
    payload
}

/// A string field along `path`, degrading to `None` with a log line.
fn str_field(payload: Option<&Value>, path: &[&str], hostname: &str) -> Option<String> {
    let value = payload.and_then(|p| lookup_str(p, path));
    if value.is_none() {
        debug!(hostname, path = path.join("."), "field absent, using sentinel");
    }
    value.map(str::to_owned)
}

/// Serial-number lookup with the `"N/A"` sentinel applied.
fn serial_or_na(payload: Option<&Value>, path: &[&str], hostname: &str) -> String {
    str_field(payload, path, hostname).unwrap_or_else(|| N_A.to_owned())
}

fn uptime_or_na(text: Option<String>) -> Uptime {
    text.map_or_else(Uptime::not_available, Uptime::from_text)
}

// ── Platform branches ────────────────────────────────────────────────

fn extract_iosxr(hostname: &str, version: &CommandResult, inventory: &CommandResult) -> DeviceFact {
    let ver = parsed_payload(version, hostname, "show version");
    let inv = inventory.as_parsed();

    DeviceFact {
        hostname: hostname.to_owned(),
        platform: Platform::IosXr,
        software_version: str_field(ver, &["software_version"], hostname),
        uptime: uptime_or_na(str_field(ver, &["uptime"], hostname)),
        // show inventory is frequently empty on virtual hardware.
        serial_number: serial_or_na(inv, &["module_name", "0/0/CPU0", "sn"], hostname),
    }
}

fn extract_iosxe(hostname: &str, version: &CommandResult, inventory: &CommandResult) -> DeviceFact {
    let ver = parsed_payload(version, hostname, "show version");
    let inv = inventory.as_parsed();

    // The inventory path is keyed by the chassis model from show version.
    let serial_number = str_field(ver, &["version", "chassis"], hostname)
        .and_then(|model| {
            inv.and_then(|p| lookup_str(p, &["main", "chassis", model.as_str(), "sn"]))
                .map(str::to_owned)
        })
        .unwrap_or_else(|| N_A.to_owned());

    DeviceFact {
        hostname: hostname.to_owned(),
        platform: Platform::IosXe,
        software_version: str_field(ver, &["version", "version"], hostname),
        uptime: uptime_or_na(str_field(ver, &["version", "uptime"], hostname)),
        serial_number,
    }
}

fn extract_nxos(hostname: &str, version: &CommandResult, inventory: &CommandResult) -> DeviceFact {
    let ver = parsed_payload(version, hostname, "show version");
    let inv = inventory.as_parsed();

    // kernel_uptime is a component breakdown, not a string.
    let uptime = ver
        .and_then(|p| {
            let days = lookup_u64(p, &["platform", "kernel_uptime", "days"])?;
            let hours = lookup_u64(p, &["platform", "kernel_uptime", "hours"])?;
            let minutes = lookup_u64(p, &["platform", "kernel_uptime", "minutes"])?;
            Some(Uptime::from_components(days, hours, minutes))
        })
        .unwrap_or_else(|| {
            debug!(hostname, "kernel_uptime absent, using sentinel");
            Uptime::not_available()
        });

    DeviceFact {
        hostname: hostname.to_owned(),
        platform: Platform::Nxos,
        software_version: str_field(
            ver,
            &["platform", "software", "system_version"],
            hostname,
        ),
        uptime,
        serial_number: serial_or_na(inv, &["name", "Chassis", "serial_number"], hostname),
    }
}

fn extract_asa(hostname: &str, version: &CommandResult, inventory: &CommandResult) -> DeviceFact {
    // No parser exists for ASA show version: fields are pulled out of the
    // raw text between literal anchors. Anchor coupling to exact firmware
    // wording is accepted; a missing anchor degrades that field only.
    let raw = version.as_raw();
    if raw.is_none() {
        warn!(hostname, command = "show version", "expected raw output");
    }

    let software_version = raw.and_then(|text| match between(text, "Software Version ", "\r\n") {
        Ok(s) => Some(s.trim().to_owned()),
        Err(e) => {
            debug!(hostname, %e, "version anchor not found");
            None
        }
    });

    let up_anchor = format!("{hostname} up ");
    let uptime = raw.and_then(|text| match between(text, &up_anchor, "\r\n") {
        Ok(s) => Some(s.trim().to_owned()),
        Err(e) => {
            debug!(hostname, %e, "uptime anchor not found");
            None
        }
    });

    DeviceFact {
        hostname: hostname.to_owned(),
        platform: Platform::Asa,
        software_version,
        uptime: uptime_or_na(uptime),
        serial_number: serial_or_na(inventory.as_parsed(), &["Chassis", "sn"], hostname),
    }
}

fn extract_ios(hostname: &str, version: &CommandResult) -> DeviceFact {
    // show inventory is not supported here; the chassis serial rides
    // along in show version.
    let ver = parsed_payload(version, hostname, "show version");

    DeviceFact {
        hostname: hostname.to_owned(),
        platform: Platform::Ios,
        software_version: str_field(ver, &["version", "version"], hostname),
        uptime: uptime_or_na(str_field(ver, &["version", "uptime"], hostname)),
        serial_number: serial_or_na(ver, &["version", "chassis_sn"], hostname),
    }
}
