//! Fabric controller response types.
//!
//! Every class query answers with the same envelope:
//! `{ "totalCount": "N", "imdata": [ { "<className>": { "attributes": {...} } } ] }`.
//! `totalCount` is a stringified integer, not a number.

use serde::{Deserialize, Serialize};

// ── Envelope ─────────────────────────────────────────────────────────

/// Generic class-query envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassEnvelope<T> {
    #[serde(rename = "totalCount", default)]
    pub total_count: Option<String>,
    #[serde(default = "Vec::new")]
    pub imdata: Vec<T>,
}

impl<T> ClassEnvelope<T> {
    /// The controller reports an empty result set as `totalCount: "0"`.
    pub fn is_empty(&self) -> bool {
        self.total_count.as_deref() == Some("0") || self.imdata.is_empty()
    }
}

/// Inner `{ "attributes": {...} }` wrapper shared by all managed objects.
#[derive(Debug, Clone, Deserialize)]
pub struct Attributes<T> {
    pub attributes: T,
}

// ── Login ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct AaaLoginRecord {
    #[serde(rename = "aaaLogin")]
    pub aaa_login: Attributes<AaaLoginAttributes>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AaaLoginAttributes {
    pub token: String,
}

// ── Fabric nodes ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct FabricNodeRecord {
    #[serde(rename = "fabricNode")]
    pub fabric_node: Attributes<FabricNodeAttributes>,
}

/// One managed node — from `GET /api/node/class/fabricNode.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FabricNodeAttributes {
    pub name: String,
    pub model: String,
    pub serial: String,
    /// Distinguished name, used to scope the per-node secondary lookups.
    pub dn: String,
}

// ── Per-node secondary lookups ───────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct FirmwareRunningRecord {
    #[serde(rename = "firmwareRunning")]
    pub firmware_running: Attributes<FirmwareRunningAttributes>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FirmwareRunningAttributes {
    pub version: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopSystemRecord {
    #[serde(rename = "topSystem")]
    pub top_system: Attributes<TopSystemAttributes>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopSystemAttributes {
    /// Colon-delimited uptime, `days:hours:minutes[:seconds...]`.
    #[serde(rename = "systemUpTime")]
    pub system_up_time: String,
}

// ── Collected output ─────────────────────────────────────────────────

/// One fabric node with its secondary lookups resolved.
///
/// `firmware_version` / `uptime` are `None` when the corresponding lookup
/// failed or came back empty; that node degrades, the rest of the
/// collection is unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FabricNode {
    pub name: String,
    pub model: String,
    pub serial: String,
    pub dn: String,
    pub firmware_version: Option<String>,
    /// Raw colon-delimited uptime string as reported by the controller.
    pub uptime: Option<String>,
}
