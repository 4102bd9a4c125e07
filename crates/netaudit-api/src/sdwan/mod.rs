// SD-WAN controller API client.
//
// Cookie-session REST API: a form-encoded login sets a JSESSIONID cookie
// in the client's jar; subsequent requests use that cookie automatically.
// Inventory is read from /dataservice/device.

pub mod client;
pub mod types;

pub use client::SdwanClient;
pub use types::SdwanDevice;
