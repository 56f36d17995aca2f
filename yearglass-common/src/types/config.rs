use embassy_time::Duration;

use crate::types::{DisplayMode, RetryPolicy};

/// Station credentials for the network time provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WifiConfig {
    pub ssid: heapless::String<32>,
    pub password: heapless::String<64>,
}

impl WifiConfig {
    pub fn new(ssid: &str, password: &str) -> Option<Self> {
        Some(Self {
            ssid: heapless::String::try_from(ssid).ok()?,
            password: heapless::String::try_from(password).ok()?,
        })
    }
}

/// What a classified press asks the application to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonAction {
    NextMode,
    PreviousMode,
    RandomMode,
    RefreshDisplay,
    SyncData,
    Configure,
}

/// Short action always present; the long slot is optional. A key without a
/// long action resolves to its short action no matter how long it was held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyBinding {
    pub short_press: ButtonAction,
    pub long_press: Option<ButtonAction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeConfig {
    pub retry: RetryPolicy,
    /// One GNSS attempt scans sentences for at most this long.
    pub gnss_window: Duration,
    /// Added on top of the raw seconds-till-midnight so the refresh lands
    /// just after the boundary even if the oscillator runs fast.
    pub midnight_margin_secs: u32,
    /// Returned when no time source can be read; feeds a sleep bound and
    /// must never be zero.
    pub midnight_fallback_secs: u32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            gnss_window: Duration::from_secs(5),
            midnight_margin_secs: 60,
            midnight_fallback_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonConfig {
    pub debounce: Duration,
    pub poll_interval: Duration,
    pub long_press: Duration,
    /// Key1, Key2, Key3 in order.
    pub bindings: [KeyBinding; 3],
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(20),
            poll_interval: Duration::from_millis(10),
            long_press: Duration::from_secs(5),
            bindings: [
                KeyBinding {
                    short_press: ButtonAction::NextMode,
                    long_press: Some(ButtonAction::RefreshDisplay),
                },
                KeyBinding {
                    short_press: ButtonAction::RandomMode,
                    long_press: Some(ButtonAction::SyncData),
                },
                KeyBinding {
                    short_press: ButtonAction::PreviousMode,
                    long_press: Some(ButtonAction::Configure),
                },
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SleepConfig {
    /// The low-power primitive has a practical single-call ceiling, so the
    /// scheduler never asks for more than this per chunk.
    pub max_chunk: Duration,
}

impl Default for SleepConfig {
    fn default() -> Self {
        Self {
            max_chunk: Duration::from_secs(3600),
        }
    }
}

/// What to show when every time provider is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FallbackPolicy {
    /// Keep the last successfully computed progress on screen.
    RetainLastKnown,
    /// Reset to the `(0, 0)` zero state.
    ZeroProgress,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub modes: heapless::Vec<DisplayMode, 8>,
    pub initial_mode: DisplayMode,
    pub on_time_failure: FallbackPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        let mut modes = heapless::Vec::new();
        for mode in DisplayMode::ALL {
            let _ = modes.push(mode);
        }
        Self {
            modes,
            initial_mode: DisplayMode::Crossout,
            on_time_failure: FallbackPolicy::RetainLastKnown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SystemConfig {
    pub time: TimeConfig,
    pub buttons: ButtonConfig,
    pub sleep: SleepConfig,
    pub app: AppConfig,
    pub wifi: Option<WifiConfig>,
}
