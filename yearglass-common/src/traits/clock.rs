use crate::types::DateTime;

/// The microcontroller's own free-running clock. Always available, least
/// trustworthy, and like the durable clock it stores UTC.
pub trait SystemClock {
    type Error: core::fmt::Debug;

    async fn read_now(&mut self) -> Result<DateTime, Self::Error>;

    async fn set(&mut self, dt: &DateTime) -> Result<(), Self::Error>;
}
