//! Fact normalization and topology reconciliation for heterogeneous networks.
//!
//! This crate owns the business logic of the netaudit workspace:
//!
//! - **[`CommandResult`]** — tagged output of one command on one device:
//!   structured (parser-produced) or raw text. Field access over the
//!   structured form goes through optional-path accessors; raw text goes
//!   through an explicit best-effort anchor-extraction strategy.
//!
//! - **[`extract`](extract::extract)** — per-platform rules reducing
//!   `show version` / `show inventory` output to a uniform
//!   [`DeviceFact`]. Dispatch is a closed match over [`Platform`], so a
//!   new platform is a compile-time exhaustiveness obligation, not a
//!   silently ignored fall-through.
//!
//! - **[`convert`]** — maps controller API responses (`netaudit-api`
//!   fabric/SD-WAN types) into the same [`DeviceFact`] shape.
//!
//! - **[`aggregate`](report::aggregate)** — merges facts from CLI devices
//!   and controller endpoints into one ordered [`InventoryReport`].
//!
//! - **[`reconcile`](reconcile::reconcile)** — pure comparison of a
//!   declared source-of-truth link list against observed
//!   neighbor-discovery data, yielding one [`Verdict`] per link.
//!
//! Collection from independent sources runs concurrently; the pure
//! functions here never touch the network.

pub mod collect;
pub mod command;
pub mod convert;
pub mod error;
pub mod extract;
pub mod model;
pub mod reconcile;
pub mod report;

// ── Primary re-exports ──────────────────────────────────────────────
pub use collect::{ControllerCredentials, DeviceSession, collect_controllers, collect_device_facts};
pub use command::{AnchorNotFound, CommandResult};
pub use error::{CoreError, ExtractError};
pub use extract::extract;
pub use model::fact::{DeviceFact, N_A, Platform, UNKNOWN, Uptime};
pub use model::topology::{
    InterfaceNeighbors, ObservedTopology, SourceOfTruthLink, Verdict,
};
pub use reconcile::reconcile;
pub use report::{AuditReport, AuditRow, InventoryReport, aggregate, inventory_filename};
