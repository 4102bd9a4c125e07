// ── API-to-domain conversions ──
//
// Bridges raw `netaudit_api` response types into the canonical
// DeviceFact shape. Controller lookups that failed upstream arrive as
// `None` and render as the "Unknown" sentinel -- a degraded node, not a
// failed collection.

use chrono::{DateTime, Utc};

use netaudit_api::fabric::FabricNode;
use netaudit_api::sdwan::SdwanDevice;

use crate::model::fact::{DeviceFact, Platform, UNKNOWN, Uptime};

/// Convert one fabric node into a fact.
///
/// Uptime arrives as the controller's colon-delimited
/// `days:hours:minutes[:...]` string and is normalized into the
/// canonical rendering; an unparseable or missing value becomes
/// "Unknown".
pub fn fabric_node_fact(node: &FabricNode) -> DeviceFact {
    let uptime = node
        .uptime
        .as_deref()
        .and_then(Uptime::from_colon_triplet)
        .unwrap_or_else(Uptime::unknown);

    DeviceFact {
        hostname: node.name.clone(),
        platform: Platform::FabricController,
        software_version: Some(
            node.firmware_version
                .clone()
                .unwrap_or_else(|| UNKNOWN.to_owned()),
        ),
        uptime,
        serial_number: node.serial.clone(),
    }
}

/// Convert one SD-WAN device into a fact.
///
/// Uptime arrives as a boot timestamp in epoch milliseconds; `now` is
/// injected by the caller so the conversion stays pure.
pub fn sdwan_device_fact(device: &SdwanDevice, now: DateTime<Utc>) -> DeviceFact {
    let uptime = device
        .uptime_date
        .and_then(|ms| Uptime::from_epoch_millis(ms, now))
        .unwrap_or_else(Uptime::unknown);

    DeviceFact {
        hostname: device.host_name.clone(),
        platform: Platform::SdwanController,
        software_version: device.version.clone(),
        uptime,
        serial_number: device
            .board_serial
            .clone()
            .unwrap_or_else(|| UNKNOWN.to_owned()),
    }
}
