// ── Topology types: declared links, observed neighbors, verdicts ──

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// One declared link from the source-of-truth table.
///
/// Identity key is `(device, interface)`; loaders apply last-write-wins
/// on duplicate keys, so the reconciliation engine never sees two rows
/// for the same local interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceOfTruthLink {
    pub device: String,
    pub interface: String,
    pub peer_device: String,
    pub peer_interface: String,
    pub purpose: String,
}

impl SourceOfTruthLink {
    /// Identity key within a load.
    pub fn key(&self) -> (&str, &str) {
        (&self.device, &self.interface)
    }

    /// The interface description this link prescribes.
    pub fn description(&self) -> String {
        format!(
            "Connected to {} {} - {}",
            self.peer_device, self.peer_interface, self.purpose
        )
    }
}

/// Neighbor observations for one local interface.
///
/// BTree collections keep enumeration deterministic: when a mismatch
/// verdict needs one representative candidate for display, "first in
/// natural order" is stable across runs. Candidate sets are singletons
/// on almost every real link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceNeighbors {
    /// Peer ports seen on this interface.
    pub ports: BTreeSet<String>,
    /// Peer hostnames seen per peer port.
    pub hosts_by_port: BTreeMap<String, BTreeSet<String>>,
}

impl InterfaceNeighbors {
    /// No neighbor was heard on this interface at all.
    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }
}

/// Observed topology for a whole run: device → interface → neighbors.
///
/// A device absent from the outer map had neighbor discovery disabled
/// (or unreachable); an interface absent from the inner map heard no
/// neighbor.
pub type ObservedTopology = BTreeMap<String, BTreeMap<String, InterfaceNeighbors>>;

/// Classification of one declared link against observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Declared peer interface and peer device both observed.
    Correct,
    /// The declared peer interface was not among the observed peer
    /// ports; carries one representative observed port for diagnosis.
    IncorrectPeerInterface { observed: String },
    /// The peer interface matched but the declared peer device was not
    /// among the hostnames seen on that port. Comparison is exact-string:
    /// discovery hostnames often carry a domain suffix the source of
    /// truth omits, and no canonicalization is applied.
    IncorrectPeerDevice { observed: String },
    /// The device reported neighbor data, but none for this interface.
    UnknownNoNeighborInfo,
    /// The device reported no neighbor data at all.
    UnknownDiscoveryDisabled,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Correct => f.write_str("Correct"),
            Self::IncorrectPeerInterface { observed }
            | Self::IncorrectPeerDevice { observed } => {
                write!(f, "Incorrect - connected to {observed}")
            }
            Self::UnknownNoNeighborInfo => f.write_str("Unknown - No LLDP neighbor info"),
            Self::UnknownDiscoveryDisabled => f.write_str("Unknown - LLDP is not enabled"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link() -> SourceOfTruthLink {
        SourceOfTruthLink {
            device: "edge-router01".into(),
            interface: "GigabitEthernet2".into(),
            peer_device: "core-switch01".into(),
            peer_interface: "Ethernet1/1".into(),
            purpose: "uplink".into(),
        }
    }

    #[test]
    fn description_renders_peer_and_purpose() {
        assert_eq!(
            link().description(),
            "Connected to core-switch01 Ethernet1/1 - uplink"
        );
    }

    #[test]
    fn verdict_display_matches_report_wording() {
        assert_eq!(Verdict::Correct.to_string(), "Correct");
        assert_eq!(
            Verdict::IncorrectPeerInterface {
                observed: "Ethernet1/3".into()
            }
            .to_string(),
            "Incorrect - connected to Ethernet1/3"
        );
        assert_eq!(
            Verdict::UnknownNoNeighborInfo.to_string(),
            "Unknown - No LLDP neighbor info"
        );
        assert_eq!(
            Verdict::UnknownDiscoveryDisabled.to_string(),
            "Unknown - LLDP is not enabled"
        );
    }
}
