//! Calling configuration, read (never owned) by the coordinator.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::signaling::IceServer;

/// Current calling configuration.
///
/// Owned and mutated by the surrounding application; the coordinator only
/// ever reads it, so concurrent reads are safe.
#[derive(Debug, Clone)]
pub struct CallConfig {
    /// Whether this execution context supports calls at all. Desktop and
    /// other host-constrained builds leave this off.
    pub calls_supported: bool,
    /// Prefer relayed connections over direct peer-to-peer ones.
    pub relay_policy: bool,
    /// Ordered ICE server list handed to the media layer on call start.
    pub ice_servers: Vec<IceServer>,
}

impl Default for CallConfig {
    fn default() -> Self {
        Self {
            calls_supported: true,
            relay_policy: false,
            ice_servers: Vec::new(),
        }
    }
}

/// Shared read handle to the configuration.
pub type SharedCallConfig = Arc<RwLock<CallConfig>>;
