use core::convert::Infallible;

use crate::types::WifiConfig;

/// The access-point + HTTP configuration flow, behind one blocking call.
/// Returns new station credentials if the user supplied any.
pub trait ConfigPortal {
    type Error: core::fmt::Debug;

    async fn serve(&mut self) -> Result<Option<WifiConfig>, Self::Error>;
}

/// For builds without a configuration surface.
pub struct NoPortal;

impl ConfigPortal for NoPortal {
    type Error = Infallible;

    async fn serve(&mut self) -> Result<Option<WifiConfig>, Self::Error> {
        Ok(None)
    }
}
