#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyId {
    Key1,
    Key2,
    Key3,
}

impl KeyId {
    pub const fn index(self) -> usize {
        match self {
            KeyId::Key1 => 0,
            KeyId::Key2 => 1,
            KeyId::Key3 => 2,
        }
    }
}

/// Three active-low, pull-up inputs behind one edge-interrupt block.
///
/// Interrupt enable/disable is all-or-nothing across the keys; the dispatcher
/// relies on that to keep a second press from landing mid-action.
pub trait ButtonBank {
    /// Resolve when a falling edge fires on any key.
    async fn wait_for_falling_edge(&mut self) -> KeyId;

    /// Sample the current level; true while the key is held down.
    fn is_pressed(&self, key: KeyId) -> bool;

    fn disable_interrupts(&mut self);

    fn enable_interrupts(&mut self);
}
