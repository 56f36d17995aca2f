//! Scripted device doubles for the service tests. Each mock exposes its
//! state through a shared handle so a test can keep inspecting it after the
//! mock has been moved into a service.

use std::collections::VecDeque;
use std::rc::Rc;
use std::string::String;
use std::vec::Vec;

use core::cell::RefCell;

use embassy_time::{Duration, Instant};
use yearglass_common::{
    ButtonBank, ConfigPortal, DateTime, DisplayMode, GnssReceiver, KeyId, LowPowerUnit,
    ProgressRenderer, Rtc, RtcDateTime, StatusLed, SystemClock, WifiConfig, WifiStation,
    YearProgress,
};

use crate::calendar;

#[derive(Default)]
pub struct ClockState {
    pub unix: Option<i64>,
    pub sets: Vec<DateTime>,
}

pub struct MockClock {
    pub state: Rc<RefCell<ClockState>>,
}

impl MockClock {
    pub fn at_unix(ts: i64) -> Self {
        Self {
            state: Rc::new(RefCell::new(ClockState {
                unix: Some(ts),
                sets: Vec::new(),
            })),
        }
    }

    pub fn unreadable() -> Self {
        Self {
            state: Rc::new(RefCell::new(ClockState::default())),
        }
    }
}

impl SystemClock for MockClock {
    type Error = ();

    async fn read_now(&mut self) -> Result<DateTime, Self::Error> {
        let ts = self.state.borrow().unix.ok_or(())?;
        Ok(calendar::from_unix_seconds(ts))
    }

    async fn set(&mut self, dt: &DateTime) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        state.unix = Some(calendar::to_unix_seconds(dt));
        state.sets.push(*dt);
        Ok(())
    }
}

#[derive(Default)]
pub struct RtcState {
    pub sample: Option<RtcDateTime>,
    pub writes: Vec<RtcDateTime>,
    pub fail_writes: bool,
}

pub struct MockRtc {
    pub state: Rc<RefCell<RtcState>>,
}

impl MockRtc {
    pub fn with_sample(utc: DateTime) -> Self {
        Self::with_raw(RtcDateTime::from(&utc))
    }

    pub fn with_raw(raw: RtcDateTime) -> Self {
        Self {
            state: Rc::new(RefCell::new(RtcState {
                sample: Some(raw),
                ..RtcState::default()
            })),
        }
    }

    pub fn empty() -> Self {
        Self {
            state: Rc::new(RefCell::new(RtcState::default())),
        }
    }

    pub fn failing_writes() -> Self {
        Self {
            state: Rc::new(RefCell::new(RtcState {
                fail_writes: true,
                ..RtcState::default()
            })),
        }
    }
}

impl Rtc for MockRtc {
    type Error = ();

    async fn read(&mut self) -> Result<RtcDateTime, Self::Error> {
        self.state.borrow().sample.ok_or(())
    }

    async fn write(&mut self, dt: &RtcDateTime) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        if state.fail_writes {
            return Err(());
        }
        state.writes.push(*dt);
        state.sample = Some(*dt);
        Ok(())
    }
}

#[derive(Default)]
pub struct GnssState {
    pub lines: VecDeque<String>,
    pub wakes: u32,
    pub standbys: u32,
    pub fail_wake: bool,
}

pub struct MockGnss {
    pub state: Rc<RefCell<GnssState>>,
}

impl MockGnss {
    pub fn with_lines(lines: &[&str]) -> Self {
        Self {
            state: Rc::new(RefCell::new(GnssState {
                lines: lines.iter().map(|l| String::from(*l)).collect(),
                ..GnssState::default()
            })),
        }
    }

    /// Wakes fine but never produces a sentence; every read errors out.
    pub fn dead() -> Self {
        Self::with_lines(&[])
    }

    /// Refuses to come out of standby.
    pub fn wake_failing() -> Self {
        Self {
            state: Rc::new(RefCell::new(GnssState {
                fail_wake: true,
                ..GnssState::default()
            })),
        }
    }
}

impl GnssReceiver for MockGnss {
    type Error = ();

    async fn wake(&mut self) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        state.wakes += 1;
        if state.fail_wake {
            return Err(());
        }
        Ok(())
    }

    async fn standby(&mut self) -> Result<(), Self::Error> {
        self.state.borrow_mut().standbys += 1;
        Ok(())
    }

    async fn read_line<'a>(&mut self, buf: &'a mut [u8]) -> Result<&'a [u8], Self::Error> {
        let line = self.state.borrow_mut().lines.pop_front().ok_or(())?;
        let len = line.len().min(buf.len());
        buf[..len].copy_from_slice(&line.as_bytes()[..len]);
        Ok(&buf[..len])
    }
}

#[derive(Default)]
pub struct WifiState {
    pub sync_results: VecDeque<Result<i64, ()>>,
    pub connects: u32,
    pub disconnects: u32,
    pub standbys: u32,
    pub sync_calls: u32,
    pub connected: bool,
    pub linkless: bool,
}

pub struct MockWifi {
    pub state: Rc<RefCell<WifiState>>,
}

impl MockWifi {
    /// Associates fine; each scripted result feeds one time exchange, and
    /// anything past the script is an error.
    pub fn reachable(sync_results: &[Result<i64, ()>]) -> Self {
        Self {
            state: Rc::new(RefCell::new(WifiState {
                sync_results: sync_results.iter().copied().collect(),
                ..WifiState::default()
            })),
        }
    }

    /// Association reports success but no link ever comes up.
    pub fn linkless() -> Self {
        Self {
            state: Rc::new(RefCell::new(WifiState {
                linkless: true,
                ..WifiState::default()
            })),
        }
    }
}

impl WifiStation for MockWifi {
    type Error = ();

    async fn connect(&mut self, _config: &WifiConfig) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        state.connects += 1;
        state.connected = !state.linkless;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.state.borrow().connected
    }

    async fn disconnect(&mut self) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        state.disconnects += 1;
        state.connected = false;
        Ok(())
    }

    async fn standby(&mut self) -> Result<(), Self::Error> {
        self.state.borrow_mut().standbys += 1;
        Ok(())
    }

    async fn sync_time(&mut self) -> Result<i64, Self::Error> {
        let mut state = self.state.borrow_mut();
        state.sync_calls += 1;
        state.sync_results.pop_front().ok_or(())?
    }
}

#[derive(Default)]
pub struct LpuState {
    pub sleeps: Vec<u64>,
    pub fail: bool,
    pub clock: Option<Rc<RefCell<ClockState>>>,
}

pub struct MockLpu {
    pub state: Rc<RefCell<LpuState>>,
}

impl MockLpu {
    /// Each sleep advances the attached clock by the slept duration, with
    /// no real waiting.
    pub fn advancing(clock: Rc<RefCell<ClockState>>) -> Self {
        Self {
            state: Rc::new(RefCell::new(LpuState {
                clock: Some(clock),
                ..LpuState::default()
            })),
        }
    }

    /// Sleeps succeed but time stands still.
    pub fn inert() -> Self {
        Self {
            state: Rc::new(RefCell::new(LpuState::default())),
        }
    }

    pub fn failing() -> Self {
        Self {
            state: Rc::new(RefCell::new(LpuState {
                fail: true,
                ..LpuState::default()
            })),
        }
    }
}

impl LowPowerUnit for MockLpu {
    type Error = ();

    async fn light_sleep(&mut self, duration: Duration) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        if state.fail {
            return Err(());
        }
        let secs = duration.as_secs();
        state.sleeps.push(secs);
        if let Some(clock) = &state.clock {
            let mut clock = clock.borrow_mut();
            if let Some(unix) = clock.unix {
                clock.unix = Some(unix + secs as i64);
            }
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct BankState {
    pub presses: VecDeque<(KeyId, Duration)>,
    pub active: Option<(KeyId, Instant)>,
    pub disables: u32,
    pub enables: u32,
}

pub struct MockBank {
    pub state: Rc<RefCell<BankState>>,
}

impl MockBank {
    /// Each entry is one press: the key and how long it stays down after
    /// the edge fires. An exhausted script waits forever.
    pub fn with_presses(presses: &[(KeyId, Duration)]) -> Self {
        Self {
            state: Rc::new(RefCell::new(BankState {
                presses: presses.iter().copied().collect(),
                ..BankState::default()
            })),
        }
    }
}

impl ButtonBank for MockBank {
    async fn wait_for_falling_edge(&mut self) -> KeyId {
        let next = self.state.borrow_mut().presses.pop_front();
        match next {
            Some((key, hold)) => {
                self.state.borrow_mut().active = Some((key, Instant::now() + hold));
                key
            }
            None => core::future::pending().await,
        }
    }

    fn is_pressed(&self, key: KeyId) -> bool {
        match self.state.borrow().active {
            Some((held, release_at)) => held == key && Instant::now() < release_at,
            None => false,
        }
    }

    fn disable_interrupts(&mut self) {
        self.state.borrow_mut().disables += 1;
    }

    fn enable_interrupts(&mut self) {
        self.state.borrow_mut().enables += 1;
    }
}

#[derive(Default)]
pub struct RenderState {
    pub frames: Vec<(DisplayMode, YearProgress)>,
    pub fail: bool,
}

pub struct MockRenderer {
    pub state: Rc<RefCell<RenderState>>,
}

impl MockRenderer {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(RenderState::default())),
        }
    }
}

impl ProgressRenderer for MockRenderer {
    type Error = ();

    async fn render(
        &mut self,
        mode: DisplayMode,
        progress: YearProgress,
    ) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        if state.fail {
            return Err(());
        }
        state.frames.push((mode, progress));
        Ok(())
    }
}

#[derive(Default)]
pub struct LedState {
    pub ons: u32,
    pub offs: u32,
    pub blinks: Vec<u8>,
}

pub struct MockLed {
    pub state: Rc<RefCell<LedState>>,
}

impl MockLed {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(LedState::default())),
        }
    }
}

impl StatusLed for MockLed {
    type Error = ();

    async fn on(&mut self) -> Result<(), Self::Error> {
        self.state.borrow_mut().ons += 1;
        Ok(())
    }

    async fn off(&mut self) -> Result<(), Self::Error> {
        self.state.borrow_mut().offs += 1;
        Ok(())
    }

    async fn blink(&mut self, times: u8) -> Result<(), Self::Error> {
        self.state.borrow_mut().blinks.push(times);
        Ok(())
    }
}

pub struct MockPortal {
    outcome: Result<Option<WifiConfig>, ()>,
    pub serves: Rc<RefCell<u32>>,
}

impl MockPortal {
    pub fn yielding(creds: Option<WifiConfig>) -> Self {
        Self {
            outcome: Ok(creds),
            serves: Rc::new(RefCell::new(0)),
        }
    }

    pub fn failing() -> Self {
        Self {
            outcome: Err(()),
            serves: Rc::new(RefCell::new(0)),
        }
    }
}

impl ConfigPortal for MockPortal {
    type Error = ();

    async fn serve(&mut self) -> Result<Option<WifiConfig>, Self::Error> {
        *self.serves.borrow_mut() += 1;
        self.outcome.clone()
    }
}
