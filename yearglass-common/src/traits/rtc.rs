use crate::types::RtcDateTime;

/// Battery-backed real-time clock. Stores UTC.
pub trait Rtc {
    type Error: core::fmt::Debug;

    async fn read(&mut self) -> Result<RtcDateTime, Self::Error>;

    async fn write(&mut self, dt: &RtcDateTime) -> Result<(), Self::Error>;
}

/// For builds without a battery-backed clock.
pub struct NoRtc;

impl Rtc for NoRtc {
    type Error = ();

    async fn read(&mut self) -> Result<RtcDateTime, Self::Error> {
        Err(())
    }

    async fn write(&mut self, _dt: &RtcDateTime) -> Result<(), Self::Error> {
        Err(())
    }
}
