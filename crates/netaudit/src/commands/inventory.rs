//! Inventory command handler.
//!
//! Merges facts from the capture file (CLI devices) and the profile's
//! controllers into one report. The sources are independent: a
//! controller that fails to authenticate contributes nothing and the
//! report still comes out.

use std::fs::File;

use tabled::Tabled;
use tracing::info;

use netaudit_api::{FabricClient, SdwanClient};
use netaudit_core::{DeviceFact, collect_controllers};

use crate::cli::{GlobalOpts, InventoryArgs};
use crate::error::CliError;
use crate::{input, output};

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct InventoryRow {
    #[tabled(rename = "Device")]
    device: String,
    #[tabled(rename = "OS")]
    os: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Uptime")]
    uptime: String,
    #[tabled(rename = "Serial")]
    serial: String,
}

impl From<&DeviceFact> for InventoryRow {
    fn from(f: &DeviceFact) -> Self {
        Self {
            device: f.hostname.clone(),
            os: f.platform.to_string(),
            version: f.version_or_na().to_owned(),
            uptime: f.uptime.to_string(),
            serial: f.serial_number.clone(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: InventoryArgs, global: &GlobalOpts) -> Result<(), CliError> {
    // CLI-device facts come from a capture file; the session layer that
    // produced it is outside this tool.
    let cli_facts = match args.facts {
        Some(ref path) => input::load_device_facts(path)?,
        None => Vec::new(),
    };

    let controller_facts = if args.fabric || args.sdwan {
        collect_from_controllers(&args, global).await?
    } else {
        Vec::new()
    };

    let report = netaudit_core::aggregate(cli_facts, controller_facts);
    info!(rows = report.len(), "inventory assembled");

    let out_path = if args.save {
        Some(std::path::PathBuf::from(netaudit_core::inventory_filename(
            &args.name,
            chrono::Utc::now(),
        )))
    } else {
        args.out.clone()
    };

    if let Some(ref out_path) = out_path {
        let file = File::create(out_path)?;
        report.write_csv(file)?;
        if !global.quiet {
            println!("Wrote {} rows to {}", report.len(), out_path.display());
        }
        return Ok(());
    }

    let rendered = output::render_list(
        &global.output,
        report.rows(),
        |row| InventoryRow::from(row),
        |buf| report.write_csv(buf),
    )?;
    output::print_output(&rendered, global.quiet);

    Ok(())
}

/// Query the enabled controllers concurrently via the core orchestrator.
async fn collect_from_controllers(
    args: &InventoryArgs,
    global: &GlobalOpts,
) -> Result<Vec<Vec<DeviceFact>>, CliError> {
    let cfg = util::load_config(global)?;
    let (profile_name, profile) = util::active_profile(global, &cfg)?;

    let mut fabric = None;
    if args.fabric {
        let endpoint = profile
            .fabric
            .as_ref()
            .ok_or_else(|| CliError::NoEndpoint {
                profile: profile_name.clone(),
                endpoint: "fabric".into(),
            })?;
        let mut transport =
            netaudit_config::transport_for(endpoint, profile, &cfg.defaults, global.insecure);
        if let Some(secs) = global.timeout {
            transport.timeout = std::time::Duration::from_secs(secs);
        }
        let url = netaudit_config::endpoint_url(endpoint)?;
        let creds = util::credentials_for(endpoint, &format!("fabric controller {url}"))?;
        let client = FabricClient::new(url, &transport).map_err(netaudit_core::CoreError::from)?;
        fabric = Some((client, creds));
    }

    let mut sdwan = None;
    if args.sdwan {
        let endpoint = profile.sdwan.as_ref().ok_or_else(|| CliError::NoEndpoint {
            profile: profile_name.clone(),
            endpoint: "sdwan".into(),
        })?;
        let mut transport =
            netaudit_config::transport_for(endpoint, profile, &cfg.defaults, global.insecure);
        if let Some(secs) = global.timeout {
            transport.timeout = std::time::Duration::from_secs(secs);
        }
        let url = netaudit_config::endpoint_url(endpoint)?;
        let creds = util::credentials_for(endpoint, &format!("SD-WAN controller {url}"))?;
        let client = SdwanClient::new(url, &transport).map_err(netaudit_core::CoreError::from)?;
        sdwan = Some((client, creds));
    }

    Ok(collect_controllers(
        fabric.as_ref().map(|(c, creds)| (c, creds)),
        sdwan.as_ref().map(|(c, creds)| (c, creds)),
    )
    .await)
}
