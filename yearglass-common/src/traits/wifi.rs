use crate::types::WifiConfig;

/// Station-mode radio plus the single network-time exchange it enables.
pub trait WifiStation {
    type Error: core::fmt::Debug;

    async fn connect(&mut self, config: &WifiConfig) -> Result<(), Self::Error>;

    fn is_connected(&self) -> bool;

    async fn disconnect(&mut self) -> Result<(), Self::Error>;

    /// Power the radio down entirely.
    async fn standby(&mut self) -> Result<(), Self::Error>;

    /// One network-time exchange; returns unix seconds, UTC. One call is one
    /// retry attempt from the orchestrator's point of view.
    async fn sync_time(&mut self) -> Result<i64, Self::Error>;
}

/// For builds without a radio.
pub struct NoWifi;

impl WifiStation for NoWifi {
    type Error = ();

    async fn connect(&mut self, _config: &WifiConfig) -> Result<(), Self::Error> {
        Err(())
    }

    fn is_connected(&self) -> bool {
        false
    }

    async fn disconnect(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn standby(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn sync_time(&mut self) -> Result<i64, Self::Error> {
        Err(())
    }
}
