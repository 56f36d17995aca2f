//! Time acquisition and sync.
//!
//! One service owns every time source and walks them in trust order:
//! GNSS, then network time, then the battery-backed RTC, then the
//! microcontroller's own clock. Better sources are written through to the
//! worse ones; a write-through failure degrades the next wake-up, not this
//! one, so it only warns.
//!
//! Both clocks store UTC. The civil offset is applied exactly once, on the
//! way out, so a sample can never be shifted twice.

use embassy_time::{Duration, Instant, Timer, with_timeout};
use yearglass_common::{
    DateTime, GnssReceiver, NoGnss, NoRtc, NoWifi, Rtc, RtcDateTime, SystemClock, SystemResult,
    TimeConfig, TimeError, WifiConfig, WifiStation, YearProgress, debug, error, info, warn,
};

use crate::{calendar, nmea};

/// A network-time exchange outside this range is a broken exchange, not a
/// time sample.
const NTP_MIN_UNIX: i64 = 978_307_200; // 2001-01-01
const NTP_MAX_UNIX: i64 = 4_102_444_799; // 2099-12-31

const NMEA_LINE_LEN: usize = 96;

/// The acquisition orchestrator. Radios it does not have stay `None` and
/// their providers are skipped without an attempt.
pub struct TimeService<G, W, R, C> {
    gnss: Option<G>,
    wifi: Option<W>,
    rtc: Option<R>,
    clock: C,
    wifi_config: Option<WifiConfig>,
    config: TimeConfig,
}

impl<C: SystemClock> TimeService<NoGnss, NoWifi, NoRtc, C> {
    pub fn new(clock: C, config: TimeConfig) -> Self {
        Self {
            gnss: None,
            wifi: None,
            rtc: None,
            clock,
            wifi_config: None,
            config,
        }
    }
}

impl<G, W, R, C> TimeService<G, W, R, C> {
    pub fn with_gnss<G2: GnssReceiver>(self, gnss: G2) -> TimeService<G2, W, R, C> {
        TimeService {
            gnss: Some(gnss),
            wifi: self.wifi,
            rtc: self.rtc,
            clock: self.clock,
            wifi_config: self.wifi_config,
            config: self.config,
        }
    }

    pub fn with_wifi<W2: WifiStation>(self, wifi: W2) -> TimeService<G, W2, R, C> {
        TimeService {
            gnss: self.gnss,
            wifi: Some(wifi),
            rtc: self.rtc,
            clock: self.clock,
            wifi_config: self.wifi_config,
            config: self.config,
        }
    }

    pub fn with_rtc<R2: Rtc>(self, rtc: R2) -> TimeService<G, W, R2, C> {
        TimeService {
            gnss: self.gnss,
            wifi: self.wifi,
            rtc: Some(rtc),
            clock: self.clock,
            wifi_config: self.wifi_config,
            config: self.config,
        }
    }

    /// Without credentials the network provider is skipped entirely; the
    /// radio is never brought up on a guess.
    pub fn set_wifi_credentials(&mut self, creds: WifiConfig) {
        self.wifi_config = Some(creds);
    }
}

impl<G, W, R, C> TimeService<G, W, R, C>
where
    G: GnssReceiver,
    W: WifiStation,
    R: Rtc,
    C: SystemClock,
{
    /// Walk the provider chain and return the current civil-local time.
    ///
    /// GNSS and network samples are written through to the RTC and the
    /// internal clock; an RTC sample refreshes the internal clock only; the
    /// internal clock writes nothing back.
    pub async fn acquire(&mut self) -> SystemResult<DateTime> {
        if let Some(utc) = self.fetch_gnss().await {
            info!("time acquired from GNSS");
            self.write_through(&utc, true).await;
            return Ok(calendar::utc_to_local(&utc));
        }
        if let Some(utc) = self.fetch_network().await {
            info!("time acquired from network");
            self.write_through(&utc, true).await;
            return Ok(calendar::utc_to_local(&utc));
        }
        if let Some(utc) = self.read_rtc().await {
            info!("time taken from RTC");
            self.write_through(&utc, false).await;
            return Ok(calendar::utc_to_local(&utc));
        }
        if let Some(utc) = self.read_clock().await {
            info!("falling back to the internal clock");
            return Ok(calendar::utc_to_local(&utc));
        }
        error!("every time provider failed");
        Err(TimeError::AllProvidersExhausted.into())
    }

    /// Completed days of the local year. Uses the radio-less read path.
    pub async fn year_progress(&mut self) -> SystemResult<YearProgress> {
        match self.local_now().await {
            Some(local) => {
                let progress = calendar::year_progress(&local);
                info!(
                    "year progress: {}/{} days",
                    progress.days_elapsed, progress.days_total
                );
                Ok(progress)
            }
            None => Err(TimeError::AllProvidersExhausted.into()),
        }
    }

    /// Seconds to sleep until the next local midnight, margin included.
    /// Never zero: with no readable source this returns the configured
    /// fallback so the caller still makes forward progress.
    pub async fn seconds_till_midnight(&mut self) -> u32 {
        let Some(local) = self.local_now().await else {
            warn!(
                "no readable time source, using the {} s fallback",
                self.config.midnight_fallback_secs
            );
            return self.config.midnight_fallback_secs;
        };
        let raw = calendar::seconds_till_midnight_raw(&local);
        if raw <= 0 {
            return self.config.midnight_fallback_secs;
        }
        raw as u32 + self.config.midnight_margin_secs
    }

    /// Read path for between-sync queries: RTC first, then the internal
    /// clock. No radio ever comes up here.
    async fn local_now(&mut self) -> Option<DateTime> {
        if let Some(utc) = self.read_rtc().await {
            return Some(calendar::utc_to_local(&utc));
        }
        self.read_clock().await.map(|utc| calendar::utc_to_local(&utc))
    }

    async fn write_through(&mut self, utc: &DateTime, include_rtc: bool) {
        if include_rtc {
            if let Some(rtc) = self.rtc.as_mut() {
                if let Err(e) = rtc.write(&RtcDateTime::from(utc)).await {
                    warn!("RTC write-through failed: {:?}", e);
                }
            }
        }
        if let Err(e) = self.clock.set(utc).await {
            warn!("internal clock write-through failed: {:?}", e);
        }
    }

    async fn fetch_gnss(&mut self) -> Option<DateTime> {
        let gnss = self.gnss.as_mut()?;
        // The receiver goes back down on every exit path, fix or no fix;
        // a failed wake still gets the standby in case it half-started.
        let sample = match gnss.wake().await {
            Ok(()) => Self::gnss_attempts(gnss, &self.config).await,
            Err(e) => {
                warn!("GNSS wake failed: {:?}", e);
                None
            }
        };
        if let Err(e) = gnss.standby().await {
            warn!("GNSS standby failed: {:?}", e);
        }
        sample
    }

    async fn gnss_attempts(gnss: &mut G, config: &TimeConfig) -> Option<DateTime> {
        let mut attempts = 0u32;
        loop {
            attempts += 1;
            if let Some(utc) = Self::gnss_read_fix(gnss, config.gnss_window).await {
                return Some(utc);
            }
            debug!("no valid RMC fix, attempt {}", attempts);
            if config.retry.is_exhausted(attempts) {
                warn!("GNSS exhausted after {} attempts", attempts);
                return None;
            }
            Timer::after(config.retry.delay).await;
        }
    }

    /// Scan sentences for up to `window`; malformed or void lines are
    /// discarded here and never reported upward.
    async fn gnss_read_fix(gnss: &mut G, window: Duration) -> Option<DateTime> {
        let deadline = Instant::now() + window;
        let mut buf = [0u8; NMEA_LINE_LEN];
        loop {
            let now = Instant::now();
            if now >= deadline {
                return None;
            }
            let line = match with_timeout(deadline - now, gnss.read_line(&mut buf)).await {
                Ok(Ok(line)) => line,
                Ok(Err(e)) => {
                    debug!("GNSS read error: {:?}", e);
                    return None;
                }
                Err(_) => return None,
            };
            let Ok(text) = core::str::from_utf8(line) else {
                continue;
            };
            if let Some(utc) = nmea::parse_rmc(text) {
                return Some(utc);
            }
        }
    }

    async fn fetch_network(&mut self) -> Option<DateTime> {
        let wifi = self.wifi.as_mut()?;
        let creds = self.wifi_config.as_ref()?;
        if let Err(e) = wifi.connect(creds).await {
            warn!("station association failed: {:?}", e);
            if let Err(e) = wifi.standby().await {
                warn!("radio standby failed: {:?}", e);
            }
            return None;
        }
        let sample = Self::ntp_attempts(wifi, &self.config).await;
        if let Err(e) = wifi.disconnect().await {
            warn!("station disconnect failed: {:?}", e);
        }
        if let Err(e) = wifi.standby().await {
            warn!("radio standby failed: {:?}", e);
        }
        sample
    }

    async fn ntp_attempts(wifi: &mut W, config: &TimeConfig) -> Option<DateTime> {
        let mut attempts = 0u32;
        loop {
            // The exchange needs an established link; if association came
            // up without one (or it dropped), the provider is done.
            if !wifi.is_connected() {
                warn!("no station link for the time exchange");
                return None;
            }
            attempts += 1;
            match wifi.sync_time().await {
                Ok(ts) if (NTP_MIN_UNIX..=NTP_MAX_UNIX).contains(&ts) => {
                    return Some(calendar::from_unix_seconds(ts));
                }
                Ok(ts) => debug!("implausible network timestamp {}", ts),
                Err(e) => debug!("network time exchange failed: {:?}", e),
            }
            if config.retry.is_exhausted(attempts) {
                warn!("network time exhausted after {} attempts", attempts);
                return None;
            }
            Timer::after(config.retry.delay).await;
        }
    }

    async fn read_rtc(&mut self) -> Option<DateTime> {
        let rtc = self.rtc.as_mut()?;
        match rtc.read().await {
            Ok(tuple) => match calendar::datetime_from_rtc(&tuple) {
                Ok(utc) => Some(utc),
                Err(_) => {
                    warn!("RTC returned an invalid tuple");
                    None
                }
            },
            Err(e) => {
                warn!("RTC read failed: {:?}", e);
                None
            }
        }
    }

    async fn read_clock(&mut self) -> Option<DateTime> {
        match self.clock.read_now().await {
            Ok(raw) => match calendar::datetime_from_ymd_hms(
                raw.year, raw.month, raw.day, raw.hour, raw.minute, raw.second,
            ) {
                Ok(utc) => Some(utc),
                Err(_) => {
                    warn!("internal clock returned an invalid tuple");
                    None
                }
            },
            Err(e) => {
                warn!("internal clock read failed: {:?}", e);
                None
            }
        }
    }
}
