//! The application: wire the services together and run the day loop.
//!
//! One refresh per day is the steady state. Between refreshes the device is
//! in chunked light sleep, racing the sleep against the button dispatcher;
//! whichever resolves first gets handled and the race restarts. Presses that
//! land while an action is being served are masked, not queued.

use embassy_futures::select::{Either, select};
use yearglass_common::{
    AppConfig, ButtonAction, ButtonBank, ConfigPortal, DisplayMode, FallbackPolicy, GnssReceiver,
    LowPowerUnit, NoPortal, ProgressRenderer, Rtc, StatusLed, SystemClock, WifiStation,
    YearProgress, info, warn,
};

use crate::calendar;
use crate::rng::Lcg;
use crate::services::{ButtonService, PowerService, TimeService};

// Blink codes. One for stale data, two for a failed refresh, three for a
// failed portal session.
const BLINK_DATA_FAULT: u8 = 1;
const BLINK_RENDER_FAULT: u8 = 2;
const BLINK_PORTAL_FAULT: u8 = 3;

pub struct Yearglass<G, W, R, C, L, B, D, S, P> {
    time: TimeService<G, W, R, C>,
    power: PowerService<L>,
    buttons: ButtonService<B>,
    renderer: D,
    led: S,
    portal: Option<P>,
    config: AppConfig,
    mode: DisplayMode,
    progress: YearProgress,
    lcg: Lcg,
}

impl<G, W, R, C, L, B, D, S> Yearglass<G, W, R, C, L, B, D, S, NoPortal> {
    pub fn new(
        time: TimeService<G, W, R, C>,
        power: PowerService<L>,
        buttons: ButtonService<B>,
        renderer: D,
        led: S,
        config: AppConfig,
    ) -> Self {
        let mode = config.initial_mode;
        Self {
            time,
            power,
            buttons,
            renderer,
            led,
            portal: None,
            config,
            mode,
            progress: YearProgress::ZERO,
            lcg: Lcg::new(),
        }
    }
}

impl<G, W, R, C, L, B, D, S, P> Yearglass<G, W, R, C, L, B, D, S, P> {
    pub fn with_portal<P2: ConfigPortal>(
        self,
        portal: P2,
    ) -> Yearglass<G, W, R, C, L, B, D, S, P2> {
        Yearglass {
            time: self.time,
            power: self.power,
            buttons: self.buttons,
            renderer: self.renderer,
            led: self.led,
            portal: Some(portal),
            config: self.config,
            mode: self.mode,
            progress: self.progress,
            lcg: self.lcg,
        }
    }
}

impl<G, W, R, C, L, B, D, S, P> Yearglass<G, W, R, C, L, B, D, S, P>
where
    G: GnssReceiver,
    W: WifiStation,
    R: Rtc,
    C: SystemClock,
    L: LowPowerUnit,
    B: ButtonBank,
    D: ProgressRenderer,
    S: StatusLed,
    P: ConfigPortal,
{
    pub async fn run(&mut self) {
        info!("starting up in {:?} mode", self.mode);
        self.update_data().await;
        self.refresh_display().await;
        loop {
            let Self {
                time,
                power,
                buttons,
                ..
            } = self;
            match select(power.sleep_till_midnight(time), buttons.wait_for_action()).await {
                Either::First(()) => {
                    info!("woke for the daily refresh");
                    self.update_data().await;
                    self.refresh_display().await;
                }
                Either::Second(action) => self.handle_action(action).await,
            }
        }
    }

    /// Run the full acquisition chain and recompute the day count. On
    /// failure the configured fallback policy decides what stays on screen.
    pub async fn update_data(&mut self) {
        match self.time.acquire().await {
            Ok(local) => {
                self.progress = calendar::year_progress(&local);
            }
            Err(e) => {
                warn!("no time sample for the refresh: {:?}", e);
                if self.config.on_time_failure == FallbackPolicy::ZeroProgress {
                    self.progress = YearProgress::ZERO;
                }
                let _ = self.led.blink(BLINK_DATA_FAULT).await;
            }
        }
    }

    pub async fn refresh_display(&mut self) {
        info!(
            "rendering {:?} at {}/{} days",
            self.mode, self.progress.days_elapsed, self.progress.days_total
        );
        if let Err(e) = self.renderer.render(self.mode, self.progress).await {
            warn!("refresh failed: {:?}", e);
            let _ = self.led.blink(BLINK_RENDER_FAULT).await;
        }
    }

    pub async fn handle_action(&mut self, action: ButtonAction) {
        // Masked for the whole action so a second press cannot land mid-way.
        self.buttons.suppress();
        let _ = self.led.on().await;
        match action {
            ButtonAction::NextMode => {
                self.mode = self.step_mode(1);
                self.refresh_display().await;
            }
            ButtonAction::PreviousMode => {
                self.mode = self.step_mode(-1);
                self.refresh_display().await;
            }
            ButtonAction::RandomMode => {
                self.mode = self.random_mode();
                self.refresh_display().await;
            }
            ButtonAction::RefreshDisplay => self.refresh_display().await,
            // Sync refreshes the data only; the new count reaches the panel
            // on the next refresh.
            ButtonAction::SyncData => self.update_data().await,
            ButtonAction::Configure => self.run_portal().await,
        }
        let _ = self.led.off().await;
        self.buttons.resume();
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn progress(&self) -> YearProgress {
        self.progress
    }

    fn step_mode(&self, delta: isize) -> DisplayMode {
        let modes = &self.config.modes;
        if modes.is_empty() {
            return self.mode;
        }
        let len = modes.len() as isize;
        let idx = modes.iter().position(|m| *m == self.mode).unwrap_or(0) as isize;
        modes[(idx + delta).rem_euclid(len) as usize]
    }

    /// Jump at least two positions in the carousel so the result is neither
    /// the current drawing nor one a single step would have reached.
    fn random_mode(&mut self) -> DisplayMode {
        let modes = &self.config.modes;
        let len = modes.len();
        if len < 4 {
            return self.step_mode(1);
        }
        let idx = modes.iter().position(|m| *m == self.mode).unwrap_or(0);
        let offset = 2 + self.lcg.next_index(len - 3);
        modes[(idx + offset) % len]
    }

    async fn run_portal(&mut self) {
        let Some(portal) = self.portal.as_mut() else {
            info!("no configuration surface on this build");
            return;
        };
        info!("serving the configuration portal");
        match portal.serve().await {
            Ok(Some(creds)) => {
                info!("new station credentials received");
                self.time.set_wifi_credentials(creds);
                self.update_data().await;
                self.refresh_display().await;
            }
            Ok(None) => info!("portal closed without changes"),
            Err(e) => {
                warn!("portal session failed: {:?}", e);
                let _ = self.led.blink(BLINK_PORTAL_FAULT).await;
            }
        }
    }

    #[cfg(test)]
    fn seed_rng(&mut self, seed: u32) {
        self.lcg = Lcg::with_seed(seed);
    }
}
