//! Debounce and classify key presses.
//!
//! The dispatcher owns the whole life of a press: falling edge, debounce
//! resample, polling until release, then short/long classification against
//! the key's binding. It never queues; whatever presses land while the
//! application is busy are simply not seen.

use embassy_time::{Instant, Timer};
use yearglass_common::{ButtonAction, ButtonBank, ButtonConfig, debug, info};

pub struct ButtonService<B> {
    bank: B,
    config: ButtonConfig,
}

impl<B: ButtonBank> ButtonService<B> {
    pub fn new(bank: B, config: ButtonConfig) -> Self {
        Self { bank, config }
    }

    /// Resolve the next debounced press into an action.
    ///
    /// Edges that do not survive the debounce resample are dropped and the
    /// wait continues. A key with no long binding resolves to its short
    /// action no matter how long it was held.
    pub async fn wait_for_action(&mut self) -> ButtonAction {
        loop {
            let key = self.bank.wait_for_falling_edge().await;
            Timer::after(self.config.debounce).await;
            if !self.bank.is_pressed(key) {
                debug!("bounce on {:?}, discarded", key);
                continue;
            }
            let pressed_at = Instant::now();
            while self.bank.is_pressed(key) {
                Timer::after(self.config.poll_interval).await;
            }
            let held = Instant::now() - pressed_at;
            let binding = self.config.bindings[key.index()];
            let action = match binding.long_press {
                Some(long) if held >= self.config.long_press => long,
                _ => binding.short_press,
            };
            info!("{:?} held for {} ms: {:?}", key, held.as_millis(), action);
            return action;
        }
    }

    /// Mask the edge interrupts while an action is being handled.
    pub fn suppress(&mut self) {
        self.bank.disable_interrupts();
    }

    pub fn resume(&mut self) {
        self.bank.enable_interrupts();
    }
}
