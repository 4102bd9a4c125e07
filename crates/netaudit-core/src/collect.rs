// ── Collection orchestration ──
//
// CLI devices and controller endpoints are mutually independent
// sources: controllers run concurrently and merge at a barrier, CLI
// devices run the ordered version-then-inventory command pair. A source
// that fails contributes nothing and never cancels its siblings.
//
// The connection/session layer itself (SSH transport, prompt handling,
// authentication) lives outside this crate; it reaches the core as the
// `DeviceSession` trait.

use std::time::Duration;

use chrono::Utc;
use secrecy::SecretString;
use tracing::{debug, info, warn};

use netaudit_api::{FabricClient, SdwanClient};

use crate::command::CommandResult;
use crate::convert::{fabric_node_fact, sdwan_device_fact};
use crate::extract::extract;
use crate::model::fact::{DeviceFact, Platform};

pub const SHOW_VERSION: &str = "show version";
pub const SHOW_INVENTORY: &str = "show inventory";

/// Credentials for one controller endpoint.
pub struct ControllerCredentials {
    pub username: String,
    pub password: SecretString,
}

/// An established session with one CLI-managed device.
///
/// Implemented by the excluded connection layer; the core only needs to
/// run commands and read the tagged results.
pub trait DeviceSession {
    fn hostname(&self) -> &str;
    fn platform(&self) -> Platform;
    fn run(&mut self, command: &str) -> CommandResult;
}

/// Collect facts from CLI devices, one fact per supported device.
///
/// Within a device the command order matters (inventory extraction may
/// key off fields produced alongside version extraction), so the pair
/// runs in sequence. A device whose platform has no extraction rules is
/// skipped with a log line; the run continues.
pub fn collect_device_facts<S, I>(sessions: I) -> Vec<DeviceFact>
where
    S: DeviceSession,
    I: IntoIterator<Item = S>,
{
    let mut facts = Vec::new();

    for mut session in sessions {
        let hostname = session.hostname().to_owned();
        let platform = session.platform();
        debug!(hostname, %platform, "collecting device facts");

        let version = session.run(SHOW_VERSION);
        let inventory = session.run(SHOW_INVENTORY);

        match extract(platform, &hostname, &version, &inventory) {
            Ok(fact) => facts.push(fact),
            Err(e) => warn!(hostname, %e, "skipping device"),
        }
    }

    facts
}

/// Collect facts from both controller endpoints concurrently.
///
/// Returns one fact sequence per source (in fabric, SD-WAN order) for
/// the aggregator. A failed collection -- bad credentials, unreachable
/// endpoint -- logs the failure and contributes an empty sequence
/// without cancelling the sibling collector.
pub async fn collect_controllers(
    fabric: Option<(&FabricClient, &ControllerCredentials)>,
    sdwan: Option<(&SdwanClient, &ControllerCredentials)>,
) -> Vec<Vec<DeviceFact>> {
    let now = Utc::now();

    let fabric_task = async {
        match fabric {
            None => Vec::new(),
            Some((client, creds)) => {
                match client.collect(&creds.username, &creds.password).await {
                    Ok(nodes) => nodes.iter().map(fabric_node_fact).collect(),
                    Err(e) => {
                        warn!(url = %client.base_url(), error = %e, "fabric collection failed");
                        Vec::new()
                    }
                }
            }
        }
    };

    let sdwan_task = async {
        match sdwan {
            None => Vec::new(),
            Some((client, creds)) => {
                match client.collect(&creds.username, &creds.password).await {
                    Ok(devices) => devices
                        .iter()
                        .map(|d| sdwan_device_fact(d, now))
                        .collect(),
                    Err(e) => {
                        warn!(url = %client.base_url(), error = %e, "SD-WAN collection failed");
                        Vec::new()
                    }
                }
            }
        }
    };

    let (fabric_facts, sdwan_facts) = tokio::join!(fabric_task, sdwan_task);
    vec![fabric_facts, sdwan_facts]
}

/// Wait for the topology to stabilize before sampling neighbor data.
///
/// Freshly configured interfaces take a moment to show up in peers'
/// discovery tables. The delay is injected by the caller, never
/// hard-coded here.
pub async fn settle(delay: Duration) {
    if delay.is_zero() {
        return;
    }
    info!(?delay, "waiting for topology to settle");
    tokio::time::sleep(delay).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;
    use std::rc::Rc;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    /// Canned session: answers commands from fixed results and records
    /// the order they were issued in.
    struct CannedSession {
        hostname: String,
        platform: Platform,
        version: CommandResult,
        inventory: CommandResult,
        issued: Rc<RefCell<Vec<String>>>,
    }

    impl CannedSession {
        fn new(hostname: &str, platform: Platform, version: CommandResult) -> Self {
            Self {
                hostname: hostname.into(),
                platform,
                version,
                inventory: CommandResult::Parsed(json!({})),
                issued: Rc::new(RefCell::new(Vec::new())),
            }
        }
    }

    impl DeviceSession for CannedSession {
        fn hostname(&self) -> &str {
            &self.hostname
        }

        fn platform(&self) -> Platform {
            self.platform
        }

        fn run(&mut self, command: &str) -> CommandResult {
            self.issued.borrow_mut().push(command.to_owned());
            match command {
                SHOW_VERSION => self.version.clone(),
                _ => self.inventory.clone(),
            }
        }
    }

    #[test]
    fn version_runs_before_inventory_on_each_device() {
        let session = CannedSession::new(
            "dc-sw01",
            Platform::Nxos,
            CommandResult::Parsed(json!({})),
        );
        let issued = Rc::clone(&session.issued);

        let _facts = collect_device_facts(vec![session]);

        assert_eq!(*issued.borrow(), [SHOW_VERSION, SHOW_INVENTORY]);
    }

    #[test]
    fn unsupported_platforms_are_skipped_not_fatal() {
        let ios_version = CommandResult::Parsed(json!({
            "version": {
                "version": "15.2(CML",
                "uptime": "1 hour, 59 minutes",
                "chassis_sn": "99GVDCAYZ1T"
            }
        }));

        let sessions = vec![
            CannedSession::new("lab-rtr01", Platform::Ios, ios_version),
            CannedSession::new(
                "mystery01",
                Platform::Unknown,
                CommandResult::Raw(String::new()),
            ),
        ];

        let facts = collect_device_facts(sessions);

        assert_eq!(facts.len(), 1);
        assert_eq!(facts[0].hostname, "lab-rtr01");
    }

    #[tokio::test]
    async fn no_controllers_yield_empty_sources() {
        let sources = collect_controllers(None, None).await;
        let expected: Vec<Vec<DeviceFact>> = vec![Vec::new(), Vec::new()];
        assert_eq!(sources, expected);
    }

    #[tokio::test(start_paused = true)]
    async fn settle_honors_injected_delay() {
        let before = tokio::time::Instant::now();
        settle(Duration::from_secs(300)).await;
        assert_eq!(before.elapsed(), Duration::from_secs(300));
    }
}
