/// Completed days this year versus the year's length.
///
/// `days_elapsed` counts fully completed days only; the current day is never
/// included. `(0, 0)` is the defined zero state for "no time known yet".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct YearProgress {
    pub days_elapsed: u16,
    pub days_total: u16,
}

impl YearProgress {
    pub const ZERO: YearProgress = YearProgress {
        days_elapsed: 0,
        days_total: 0,
    };

    pub const fn new(days_elapsed: u16, days_total: u16) -> Self {
        Self {
            days_elapsed,
            days_total,
        }
    }
}

impl Default for YearProgress {
    fn default() -> Self {
        Self::ZERO
    }
}
