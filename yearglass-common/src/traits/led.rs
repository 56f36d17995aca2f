/// Status LED. Blink codes are picked by the application, not by the core
/// services.
pub trait StatusLed {
    type Error: core::fmt::Debug;

    async fn on(&mut self) -> Result<(), Self::Error>;

    async fn off(&mut self) -> Result<(), Self::Error>;

    async fn blink(&mut self, times: u8) -> Result<(), Self::Error>;
}
