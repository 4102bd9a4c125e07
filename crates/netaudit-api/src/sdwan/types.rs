//! SD-WAN controller response types.
//!
//! Data service endpoints answer with a `{ "data": [...] }` wrapper.
//! Field names are kebab-case on the wire.

use serde::{Deserialize, Serialize};

/// Generic data-service wrapper returned by list endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct DataEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// One managed device — from `GET /dataservice/device`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdwanDevice {
    #[serde(rename = "host-name")]
    pub host_name: String,

    #[serde(rename = "device-model")]
    pub device_model: Option<String>,

    pub version: Option<String>,

    /// Boot timestamp in epoch milliseconds; elapsed uptime is derived
    /// against the collection time.
    #[serde(rename = "uptime-date")]
    pub uptime_date: Option<i64>,

    #[serde(rename = "board-serial")]
    pub board_serial: Option<String>,
}
