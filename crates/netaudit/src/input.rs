//! Input file loaders.
//!
//! The connection/session layer is an external collaborator: its output
//! reaches this CLI as capture files. Loaders here turn those files into
//! the core's typed inputs and apply the documented load-time rules
//! (last-write-wins on duplicate source-of-truth keys).

use std::collections::BTreeMap;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::warn;

use netaudit_core::{CommandResult, DeviceFact, ObservedTopology, Platform, SourceOfTruthLink};

use crate::error::CliError;

fn input_error(path: &Path, reason: impl std::fmt::Display) -> CliError {
    CliError::Input {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

// ── Captured CLI-device command results ──────────────────────────────

/// One device's captured command results, as written by the collection
/// layer: `{"hostname": ..., "os": ..., "show_version": {...}, "show_inventory": {...}}`.
#[derive(Debug, Deserialize)]
pub struct CapturedDevice {
    pub hostname: String,
    pub os: String,
    pub show_version: CommandResult,
    pub show_inventory: CommandResult,
}

/// Load a capture file and extract one fact per supported device.
///
/// Devices with an unrecognized OS are skipped with a log line, never a
/// failure — matching live collection behavior.
pub fn load_device_facts(path: &Path) -> Result<Vec<DeviceFact>, CliError> {
    let contents = std::fs::read_to_string(path).map_err(|e| input_error(path, e))?;
    let captured: Vec<CapturedDevice> =
        serde_json::from_str(&contents).map_err(|e| input_error(path, e))?;

    let mut facts = Vec::with_capacity(captured.len());
    for device in captured {
        let platform = Platform::from_os(&device.os);
        match netaudit_core::extract(
            platform,
            &device.hostname,
            &device.show_version,
            &device.show_inventory,
        ) {
            Ok(fact) => facts.push(fact),
            Err(e) => warn!(hostname = device.hostname, %e, "skipping device"),
        }
    }

    Ok(facts)
}

// ── Source-of-truth CSV ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct SotRecord {
    #[serde(rename = "Device Name")]
    device: String,
    #[serde(rename = "Interface")]
    interface: String,
    #[serde(rename = "Connected Device")]
    peer_device: String,
    #[serde(rename = "Connected Interface")]
    peer_interface: String,
    #[serde(rename = "Purpose")]
    purpose: String,
}

/// Load the declared topology from CSV.
///
/// Duplicate `(device, interface)` keys overwrite in place: the last row
/// wins, at its first-seen position. Blank-device rows are kept (they
/// still appear in the audit report); reconciliation skips them.
pub fn load_sot(path: &Path) -> Result<Vec<SourceOfTruthLink>, CliError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| input_error(path, e))?;

    let mut links: IndexMap<(String, String), SourceOfTruthLink> = IndexMap::new();
    let mut blank_rows = Vec::new();

    for record in reader.deserialize() {
        let record: SotRecord = record.map_err(|e| input_error(path, e))?;
        let link = SourceOfTruthLink {
            device: record.device,
            interface: record.interface,
            peer_device: record.peer_device,
            peer_interface: record.peer_interface,
            purpose: record.purpose,
        };

        if link.device.is_empty() {
            blank_rows.push(link);
        } else {
            links.insert((link.device.clone(), link.interface.clone()), link);
        }
    }

    let mut out: Vec<SourceOfTruthLink> = links.into_values().collect();
    out.extend(blank_rows);
    Ok(out)
}

// ── Observed neighbors ───────────────────────────────────────────────

/// Load observed neighbor-discovery data.
///
/// Shape: `{device: {interface: {"ports": [...], "hosts_by_port": {port: [...]}}}}`.
/// A device may be absent entirely (discovery not enabled) or an
/// interface absent (no neighbor heard) — both are first-class verdicts
/// downstream, not load errors.
pub fn load_neighbors(path: &Path) -> Result<ObservedTopology, CliError> {
    let contents = std::fs::read_to_string(path).map_err(|e| input_error(path, e))?;
    serde_json::from_str(&contents).map_err(|e| input_error(path, e))
}

// ── Pre-change descriptions ──────────────────────────────────────────

/// Load the interface descriptions captured before the change, keyed
/// `{device: {interface: description}}`.
pub fn load_old_descriptions(
    path: &Path,
) -> Result<BTreeMap<(String, String), String>, CliError> {
    let contents = std::fs::read_to_string(path).map_err(|e| input_error(path, e))?;
    let nested: BTreeMap<String, BTreeMap<String, String>> =
        serde_json::from_str(&contents).map_err(|e| input_error(path, e))?;

    Ok(nested
        .into_iter()
        .flat_map(|(device, by_interface)| {
            by_interface
                .into_iter()
                .map(move |(interface, desc)| ((device.clone(), interface), desc))
        })
        .collect())
}
