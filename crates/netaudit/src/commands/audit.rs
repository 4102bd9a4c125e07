//! Audit command handler.
//!
//! Loads the declared source-of-truth links, attaches the pre-change
//! descriptions, optionally reconciles against observed neighbor data,
//! and emits the audit report.

use std::fs::File;

use tabled::Tabled;
use tracing::info;

use netaudit_core::{AuditReport, AuditRow, N_A, reconcile};

use crate::cli::{AuditArgs, GlobalOpts};
use crate::error::CliError;
use crate::{input, output};

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct AuditTableRow {
    #[tabled(rename = "Device")]
    device: String,
    #[tabled(rename = "Interface")]
    interface: String,
    #[tabled(rename = "Peer")]
    peer: String,
    #[tabled(rename = "Peer Interface")]
    peer_interface: String,
    #[tabled(rename = "Old Description")]
    old_description: String,
    #[tabled(rename = "LLDP Test")]
    verdict: String,
}

impl From<&AuditRow> for AuditTableRow {
    fn from(row: &AuditRow) -> Self {
        Self {
            device: row.link.device.clone(),
            interface: row.link.interface.clone(),
            peer: row.link.peer_device.clone(),
            peer_interface: row.link.peer_interface.clone(),
            old_description: row.old_description.clone().unwrap_or_else(|| N_A.into()),
            verdict: row
                .verdict
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: AuditArgs, global: &GlobalOpts) -> Result<(), CliError> {
    if args.check && args.neighbors.is_none() {
        return Err(CliError::CheckWithoutNeighbors);
    }

    let links = input::load_sot(&args.sot)?;
    info!(links = links.len(), "source of truth loaded");

    let old_descriptions = match args.old_descriptions {
        Some(ref path) => input::load_old_descriptions(path)?,
        None => std::collections::BTreeMap::new(),
    };

    // Reconciliation is a batch operation: all observed-neighbor data is
    // in hand before it runs, after the injected settle delay.
    let verdicts = match args.neighbors {
        Some(ref path) if args.check => {
            let delay = settle_delay(&args, global)?;
            netaudit_core::collect::settle(delay).await;

            let observed = input::load_neighbors(path)?;
            Some(reconcile(&links, &observed))
        }
        _ => None,
    };

    let report = AuditReport::assemble(links, &old_descriptions, verdicts.as_ref());

    if let Some(ref out_path) = args.out {
        let file = File::create(out_path)?;
        report.write_csv(file)?;
        if !global.quiet {
            println!(
                "Wrote {} rows to {}",
                report.rows().len(),
                out_path.display()
            );
        }
        return Ok(());
    }

    let rendered = output::render_list(
        &global.output,
        report.rows(),
        |row| AuditTableRow::from(row),
        |buf| report.write_csv(buf),
    )?;
    output::print_output(&rendered, global.quiet);

    Ok(())
}

/// The topology settle delay: CLI flag, then profile, then defaults.
fn settle_delay(args: &AuditArgs, global: &GlobalOpts) -> Result<std::time::Duration, CliError> {
    if let Some(secs) = args.settle_delay {
        return Ok(std::time::Duration::from_secs(secs));
    }

    let cfg = util::load_config(global)?;
    let name = util::active_profile_name(global, &cfg);
    let delay = cfg
        .profiles
        .get(&name)
        .map_or_else(
            || netaudit_config::settle_delay(&netaudit_config::Profile::default(), &cfg.defaults),
            |profile| netaudit_config::settle_delay(profile, &cfg.defaults),
        );
    Ok(delay)
}
