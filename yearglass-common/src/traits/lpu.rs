use embassy_time::Duration;

/// Low-power wait primitive. Platforms cap how long a single call may last,
/// which is why the sleep scheduler works in chunks.
pub trait LowPowerUnit {
    type Error: core::fmt::Debug;

    async fn light_sleep(&mut self, duration: Duration) -> Result<(), Self::Error>;
}
