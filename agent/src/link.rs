use thiserror::Error;

/// Connectivity of the wireless link as the agent last observed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Disconnected,
    Connecting,
    Connected,
}

#[derive(Debug, Error)]
#[error("association failed: {0}")]
pub struct LinkError(pub String);

/// A visible network from a pre-association scan.
#[derive(Debug, Clone)]
pub struct ScanEntry {
    pub ssid: String,
    pub rssi: i32,
}

/// Wireless association capability. The agent drives it through bounded
/// fixed-interval retry bursts and re-checks the link every cycle.
pub trait WirelessLink {
    /// Tears the interface down and brings it back up.
    fn reset(&mut self);

    /// Networks currently visible to the radio.
    fn scan(&mut self) -> Vec<ScanEntry>;

    /// One association attempt against the configured network.
    fn try_associate(&mut self, ssid: &str, password: &str) -> Result<(), LinkError>;

    fn is_connected(&self) -> bool;
}

/// Link for host builds: association belongs to the operating system, so the
/// link always reports connected.
pub struct HostLink;

impl WirelessLink for HostLink {
    fn reset(&mut self) {}

    fn scan(&mut self) -> Vec<ScanEntry> {
        Vec::new()
    }

    fn try_associate(&mut self, _ssid: &str, _password: &str) -> Result<(), LinkError> {
        Ok(())
    }

    fn is_connected(&self) -> bool {
        true
    }
}
