// netaudit-api: Async Rust clients for controller inventory APIs (fabric + SD-WAN)

pub mod error;
pub mod fabric;
pub mod sdwan;
pub mod transport;

pub use error::Error;
pub use fabric::FabricClient;
pub use sdwan::SdwanClient;
pub use transport::{TlsMode, TransportConfig};
