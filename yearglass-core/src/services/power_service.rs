//! Chunked light sleep until the next local midnight.
//!
//! The low-power primitive caps a single call, so the scheduler sleeps in
//! chunks and re-reads the clock between them. The distance to midnight
//! must shrink from chunk to chunk; a distance that grew is the
//! post-midnight rollover, and one that froze means the clock stopped.
//! Both end the sleep, which is what keeps a broken clock from turning
//! into a sleep that never returns.

use embassy_time::Duration;
use yearglass_common::{
    GnssReceiver, LowPowerUnit, Rtc, SleepConfig, SystemClock, WifiStation, info, warn,
};

use super::TimeService;

pub struct PowerService<L> {
    lpu: L,
    config: SleepConfig,
}

impl<L: LowPowerUnit> PowerService<L> {
    pub fn new(lpu: L, config: SleepConfig) -> Self {
        Self { lpu, config }
    }

    /// Sleep until the clock has crossed local midnight, then return.
    /// Also returns early if the low-power unit fails or the clock stops
    /// making progress.
    pub async fn sleep_till_midnight<G, W, R, C>(&mut self, time: &mut TimeService<G, W, R, C>)
    where
        G: GnssReceiver,
        W: WifiStation,
        R: Rtc,
        C: SystemClock,
    {
        let mut remaining = time.seconds_till_midnight().await;
        info!("{} s until local midnight", remaining);
        while remaining > 0 {
            let chunk = remaining.min(self.max_chunk_secs());
            info!("light sleep for {} s", chunk);
            if let Err(e) = self.lpu.light_sleep(Duration::from_secs(chunk as u64)).await {
                warn!("light sleep failed: {:?}", e);
                return;
            }
            let next = time.seconds_till_midnight().await;
            if next > remaining {
                info!("local midnight crossed, waking");
                break;
            }
            if next == remaining {
                warn!("midnight distance did not shrink, ending sleep");
                break;
            }
            remaining = next;
        }
    }

    fn max_chunk_secs(&self) -> u32 {
        self.config.max_chunk.as_secs() as u32
    }
}
