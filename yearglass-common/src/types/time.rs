use embassy_time::Duration;

/// One calendar time sample, UTC or local depending on where it came from.
///
/// `weekday` is 0 = Monday .. 6 = Sunday and `yearday` is 1-based; both are
/// derived from `(year, month, day)` on construction and never taken from a
/// raw source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub weekday: u8,
    pub yearday: u16,
}

/// The tuple the battery-backed RTC speaks, in register order.
///
/// `year` is the full 2000+ value; the two-digit century convention is the
/// driver's concern. The stored `weekday` is carried for the chip's sake but
/// recomputed from the date whenever a sample enters the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RtcDateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub weekday: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl From<&DateTime> for RtcDateTime {
    fn from(dt: &DateTime) -> Self {
        Self {
            year: dt.year,
            month: dt.month,
            day: dt.day,
            weekday: dt.weekday,
            hour: dt.hour,
            minute: dt.minute,
            second: dt.second,
        }
    }
}

/// Per-provider retry behavior. `max_attempts: None` retries forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: Option<u32>,
    pub delay: Duration,
}

impl RetryPolicy {
    pub const fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: Some(max_attempts),
            delay,
        }
    }

    pub const fn forever(delay: Duration) -> Self {
        Self {
            max_attempts: None,
            delay,
        }
    }

    pub fn is_exhausted(&self, attempts: u32) -> bool {
        match self.max_attempts {
            Some(max) => attempts >= max,
            None => false,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(2, Duration::from_secs(1))
    }
}
