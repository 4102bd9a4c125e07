// Fabric controller API client.
//
// Session-token REST API: a login POST returns a token which is carried
// as the `APIC-cookie` cookie on every subsequent request. Inventory is
// read from class queries under /api/node/class/.

pub mod client;
pub mod types;

pub use client::FabricClient;
pub use types::FabricNode;
