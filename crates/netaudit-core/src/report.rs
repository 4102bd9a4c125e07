// ── Inventory aggregation and report serialization ──
//
// Facts from every source are concatenated in collection order into one
// flat table. A device reachable both over CLI and through a controller
// inventory yields two rows; that duplication is accepted current
// behavior, not silently deduplicated.

use std::collections::BTreeMap;
use std::io::Write;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::error::CoreError;
use crate::model::fact::{DeviceFact, N_A};
use crate::model::topology::{SourceOfTruthLink, Verdict};

/// Fixed column header of the inventory report.
pub const INVENTORY_HEADER: [&str; 5] = [
    "device_name",
    "device_os",
    "software_version",
    "uptime",
    "serial_number",
];

// ── Inventory ────────────────────────────────────────────────────────

/// Ordered inventory report: one row per collected fact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryReport {
    rows: Vec<DeviceFact>,
}

/// Merge facts from CLI devices and controller endpoints.
///
/// Plain concatenation preserving collection order: CLI facts first,
/// then each controller's contribution in turn. No deduplication.
pub fn aggregate(
    cli_facts: Vec<DeviceFact>,
    controller_facts: Vec<Vec<DeviceFact>>,
) -> InventoryReport {
    let mut rows = cli_facts;
    for source in controller_facts {
        rows.extend(source);
    }
    InventoryReport { rows }
}

impl InventoryReport {
    pub fn rows(&self) -> &[DeviceFact] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Serialize as CSV with the fixed header. Every fact field maps 1:1
    /// to a column; absent values render as the "N/A" sentinel, never as
    /// an empty cell.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), CoreError> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(INVENTORY_HEADER)?;

        for fact in &self.rows {
            let platform = fact.platform.to_string();
            csv.write_record([
                fact.hostname.as_str(),
                platform.as_str(),
                fact.version_or_na(),
                fact.uptime.as_str(),
                fact.serial_number.as_str(),
            ])?;
        }

        csv.flush().map_err(csv::Error::from)?;
        Ok(())
    }
}

/// Default inventory filename: `{timestamp}_{name}_inventory.csv`.
pub fn inventory_filename(name: &str, now: DateTime<Utc>) -> String {
    format!("{}_{name}_inventory.csv", now.format("%Y-%m-%d-%H-%M-%S"))
}

// ── Audit ────────────────────────────────────────────────────────────

/// One audit row: the declared link plus change-control bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct AuditRow {
    pub link: SourceOfTruthLink,
    /// Description found on the interface before any change was pushed.
    pub old_description: Option<String>,
    /// Reconciliation verdict, present when the check was requested.
    pub verdict: Option<Verdict>,
}

/// Audit report extending the source-of-truth columns with the old
/// description and, when reconciliation ran, the neighbor-test verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditReport {
    rows: Vec<AuditRow>,
    checked: bool,
}

impl AuditReport {
    /// Assemble rows from the declared links, the captured
    /// pre-change descriptions, and (optionally) reconciliation verdicts.
    ///
    /// Links with a blank device carry no verdict even when the check
    /// ran -- they are absent from the reconciliation output by design.
    pub fn assemble(
        links: Vec<SourceOfTruthLink>,
        old_descriptions: &BTreeMap<(String, String), String>,
        verdicts: Option<&IndexMap<(String, String), Verdict>>,
    ) -> Self {
        let checked = verdicts.is_some();
        let rows = links
            .into_iter()
            .map(|link| {
                let key = (link.device.clone(), link.interface.clone());
                AuditRow {
                    old_description: old_descriptions.get(&key).cloned(),
                    verdict: verdicts.and_then(|v| v.get(&key).cloned()),
                    link,
                }
            })
            .collect();

        Self { rows, checked }
    }

    pub fn rows(&self) -> &[AuditRow] {
        &self.rows
    }

    /// Serialize as CSV. The `LLDP neighbor test` column appears only
    /// when reconciliation was requested.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), CoreError> {
        let mut csv = csv::Writer::from_writer(writer);

        let mut header = vec![
            "Device Name",
            "Interface",
            "Connected Device",
            "Connected Interface",
            "Purpose",
            "Old Description",
        ];
        if self.checked {
            header.push("LLDP neighbor test");
        }
        csv.write_record(&header)?;

        for row in &self.rows {
            let old = row.old_description.as_deref().unwrap_or(N_A);
            let mut record = vec![
                row.link.device.clone(),
                row.link.interface.clone(),
                row.link.peer_device.clone(),
                row.link.peer_interface.clone(),
                row.link.purpose.clone(),
                old.to_owned(),
            ];
            if self.checked {
                record.push(
                    row.verdict
                        .as_ref()
                        .map_or_else(String::new, ToString::to_string),
                );
            }
            csv.write_record(&record)?;
        }

        csv.flush().map_err(csv::Error::from)?;
        Ok(())
    }
}
