//! Clap derive structures for the `netaudit` CLI.
//!
//! Defines the command tree, global flags, and shared enums.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// netaudit -- network inventory and topology-audit CLI
#[derive(Debug, Parser)]
#[command(
    name = "netaudit",
    version,
    about = "Collect device inventory and audit declared topology against LLDP",
    long_about = "Normalizes version/inventory data from heterogeneous network\n\
        devices and controller APIs into one report, and reconciles a declared\n\
        source-of-truth link list against observed neighbor-discovery data.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Profile to use
    #[arg(long, short = 'p', env = "NETAUDIT_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Config file path (overrides the platform default)
    #[arg(long, env = "NETAUDIT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "NETAUDIT_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "NETAUDIT_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "NETAUDIT_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// CSV with the report's fixed header
    Csv,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the merged device inventory report
    #[command(alias = "inv")]
    Inventory(InventoryArgs),

    /// Audit source-of-truth links against observed neighbors
    Audit(AuditArgs),
}

#[derive(Debug, Args)]
pub struct InventoryArgs {
    /// JSON capture of per-device command results from the collection layer
    #[arg(long, value_name = "FILE")]
    pub facts: Option<PathBuf>,

    /// Query the profile's fabric controller
    #[arg(long)]
    pub fabric: bool,

    /// Query the profile's SD-WAN controller
    #[arg(long)]
    pub sdwan: bool,

    /// Report name used in the default output filename
    #[arg(long, default_value = "network")]
    pub name: String,

    /// Write the CSV report to this path instead of stdout rendering
    #[arg(long, value_name = "FILE", conflicts_with = "save")]
    pub out: Option<PathBuf>,

    /// Write the CSV report to a timestamped file in the current
    /// directory ({timestamp}_{name}_inventory.csv)
    #[arg(long)]
    pub save: bool,
}

#[derive(Debug, Args)]
pub struct AuditArgs {
    /// Source-of-truth CSV file
    #[arg(long, value_name = "FILE")]
    pub sot: PathBuf,

    /// Observed neighbor data (JSON), required with --check
    #[arg(long, value_name = "FILE")]
    pub neighbors: Option<PathBuf>,

    /// Pre-change interface descriptions (JSON), for the audit trail
    #[arg(long, value_name = "FILE")]
    pub old_descriptions: Option<PathBuf>,

    /// Run the LLDP neighbor reconciliation check
    #[arg(long)]
    pub check: bool,

    /// Seconds to wait for the topology to settle before sampling
    /// neighbor data (overrides profile/defaults)
    #[arg(long, value_name = "SECS")]
    pub settle_delay: Option<u64>,

    /// Write the CSV report to this path instead of stdout rendering
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}
