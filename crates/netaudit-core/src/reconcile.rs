// ── Topology reconciliation ──
//
// Compares the declared source-of-truth link list against observed
// neighbor-discovery data and classifies every link. Pure function of
// its two inputs: no I/O, no device connections, no state carried
// between rows -- the live-collection step is tested elsewhere.

use indexmap::IndexMap;

use crate::model::topology::{ObservedTopology, SourceOfTruthLink, Verdict};

/// Classify every declared link against the observed topology.
///
/// One verdict per link with a non-blank device, keyed by
/// `(device, interface)` in source order. Blank-device rows are skipped
/// entirely and never appear in the output. Re-running on identical
/// inputs yields an identical mapping.
pub fn reconcile(
    sot: &[SourceOfTruthLink],
    observed: &ObservedTopology,
) -> IndexMap<(String, String), Verdict> {
    let mut verdicts = IndexMap::new();

    for link in sot {
        if link.device.is_empty() {
            continue;
        }

        verdicts.insert(
            (link.device.clone(), link.interface.clone()),
            classify(link, observed),
        );
    }

    verdicts
}

fn classify(link: &SourceOfTruthLink, observed: &ObservedTopology) -> Verdict {
    // Discovery never reported for this device at all.
    let Some(device_neighbors) = observed.get(&link.device) else {
        return Verdict::UnknownDiscoveryDisabled;
    };

    // Discovery ran, but nothing was heard on this interface.
    let Some(neighbors) = device_neighbors
        .get(&link.interface)
        .filter(|n| !n.is_empty())
    else {
        return Verdict::UnknownNoNeighborInfo;
    };

    // Declared peer interface must be among the observed peer ports.
    if !neighbors.ports.contains(&link.peer_interface) {
        // One representative candidate for the operator; first in
        // natural order, and the set is a singleton on real links.
        let observed_port = neighbors
            .ports
            .iter()
            .next()
            .cloned()
            .unwrap_or_default();
        return Verdict::IncorrectPeerInterface {
            observed: observed_port,
        };
    }

    // Declared peer device must be among the hostnames seen on that
    // port. Exact-string comparison: discovery hostnames may carry a
    // domain suffix the source of truth omits, and that mismatch is
    // surfaced rather than papered over.
    let hosts = neighbors.hosts_by_port.get(&link.peer_interface);
    let matched = hosts.is_some_and(|set| set.contains(&link.peer_device));
    if !matched {
        let observed_host = hosts
            .and_then(|set| set.iter().next().cloned())
            .unwrap_or_default();
        return Verdict::IncorrectPeerDevice {
            observed: observed_host,
        };
    }

    Verdict::Correct
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;

    use crate::model::topology::InterfaceNeighbors;

    fn link(device: &str, interface: &str, peer_device: &str, peer_interface: &str) -> SourceOfTruthLink {
        SourceOfTruthLink {
            device: device.into(),
            interface: interface.into(),
            peer_device: peer_device.into(),
            peer_interface: peer_interface.into(),
            purpose: "uplink".into(),
        }
    }

    /// Observed: sw01 Gi0/1 hears core01 on Eth1/1.
    fn observed_single() -> ObservedTopology {
        let mut neighbors = InterfaceNeighbors::default();
        neighbors.ports.insert("Eth1/1".into());
        neighbors
            .hosts_by_port
            .entry("Eth1/1".into())
            .or_default()
            .insert("core01".into());

        let mut by_interface = BTreeMap::new();
        by_interface.insert("Gi0/1".into(), neighbors);

        let mut topology = BTreeMap::new();
        topology.insert("sw01".into(), by_interface);
        topology
    }

    #[test]
    fn device_absent_means_discovery_disabled() {
        let sot = vec![link("sw99", "Gi0/1", "core01", "Eth1/1")];
        let verdicts = reconcile(&sot, &observed_single());

        assert_eq!(
            verdicts.get(&("sw99".to_owned(), "Gi0/1".to_owned())),
            Some(&Verdict::UnknownDiscoveryDisabled)
        );
    }

    #[test]
    fn interface_absent_means_no_neighbor_info() {
        let sot = vec![link("sw01", "Gi0/9", "core01", "Eth1/1")];
        let verdicts = reconcile(&sot, &observed_single());

        assert_eq!(
            verdicts.get(&("sw01".to_owned(), "Gi0/9".to_owned())),
            Some(&Verdict::UnknownNoNeighborInfo)
        );
    }

    #[test]
    fn interface_with_empty_candidate_set_means_no_neighbor_info() {
        let mut topology = observed_single();
        topology
            .get_mut("sw01")
            .expect("device present")
            .insert("Gi0/2".into(), InterfaceNeighbors::default());

        let sot = vec![link("sw01", "Gi0/2", "core01", "Eth1/1")];
        let verdicts = reconcile(&sot, &topology);

        assert_eq!(
            verdicts.get(&("sw01".to_owned(), "Gi0/2".to_owned())),
            Some(&Verdict::UnknownNoNeighborInfo)
        );
    }

    #[test]
    fn wrong_peer_interface_carries_observed_candidate() {
        let sot = vec![link("sw01", "Gi0/1", "core01", "Eth1/3")];
        let verdicts = reconcile(&sot, &observed_single());

        assert_eq!(
            verdicts.get(&("sw01".to_owned(), "Gi0/1".to_owned())),
            Some(&Verdict::IncorrectPeerInterface {
                observed: "Eth1/1".into()
            })
        );
    }

    #[test]
    fn wrong_peer_device_carries_observed_hostname() {
        let sot = vec![link("sw01", "Gi0/1", "core02", "Eth1/1")];
        let verdicts = reconcile(&sot, &observed_single());

        assert_eq!(
            verdicts.get(&("sw01".to_owned(), "Gi0/1".to_owned())),
            Some(&Verdict::IncorrectPeerDevice {
                observed: "core01".into()
            })
        );
    }

    #[test]
    fn matching_link_is_correct() {
        let sot = vec![link("sw01", "Gi0/1", "core01", "Eth1/1")];
        let verdicts = reconcile(&sot, &observed_single());

        assert_eq!(
            verdicts.get(&("sw01".to_owned(), "Gi0/1".to_owned())),
            Some(&Verdict::Correct)
        );
    }

    #[test]
    fn domain_suffix_mismatch_is_incorrect_peer_device() {
        // Discovery reports the FQDN; the source of truth has the bare
        // hostname. Exact-string semantics surface this as a mismatch.
        let mut topology = observed_single();
        let neighbors = topology
            .get_mut("sw01")
            .and_then(|m| m.get_mut("Gi0/1"))
            .expect("present");
        neighbors.hosts_by_port.get_mut("Eth1/1").expect("port").clear();
        neighbors
            .hosts_by_port
            .get_mut("Eth1/1")
            .expect("port")
            .insert("core01.example.net".into());

        let sot = vec![link("sw01", "Gi0/1", "core01", "Eth1/1")];
        let verdicts = reconcile(&sot, &topology);

        assert_eq!(
            verdicts.get(&("sw01".to_owned(), "Gi0/1".to_owned())),
            Some(&Verdict::IncorrectPeerDevice {
                observed: "core01.example.net".into()
            })
        );
    }

    #[test]
    fn blank_device_rows_are_skipped() {
        let sot = vec![
            link("", "Gi0/1", "core01", "Eth1/1"),
            link("sw01", "Gi0/1", "core01", "Eth1/1"),
        ];
        let verdicts = reconcile(&sot, &observed_single());

        assert_eq!(verdicts.len(), 1);
        assert!(!verdicts.keys().any(|(device, _)| device.is_empty()));
    }

    #[test]
    fn reconcile_is_idempotent() {
        let sot = vec![
            link("sw01", "Gi0/1", "core01", "Eth1/1"),
            link("sw01", "Gi0/9", "core01", "Eth1/1"),
            link("sw99", "Gi0/1", "core01", "Eth1/1"),
        ];
        let observed = observed_single();

        let first = reconcile(&sot, &observed);
        let second = reconcile(&sot, &observed);

        assert_eq!(first, second);
    }
}
