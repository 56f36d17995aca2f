/// Line-oriented serial stream from a positioning receiver.
pub trait GnssReceiver {
    type Error: core::fmt::Debug;

    async fn wake(&mut self) -> Result<(), Self::Error>;

    async fn standby(&mut self) -> Result<(), Self::Error>;

    /// Read one sentence into `buf` and return the bytes up to (excluding)
    /// the line terminator. Implementations bound the wait internally; a
    /// line that never terminates inside that window is an `Err`.
    async fn read_line<'a>(&mut self, buf: &'a mut [u8]) -> Result<&'a [u8], Self::Error>;
}

/// For builds without a receiver.
pub struct NoGnss;

impl GnssReceiver for NoGnss {
    type Error = ();

    async fn wake(&mut self) -> Result<(), Self::Error> {
        Err(())
    }

    async fn standby(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn read_line<'a>(&mut self, _buf: &'a mut [u8]) -> Result<&'a [u8], Self::Error> {
        Err(())
    }
}
