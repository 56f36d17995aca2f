use crate::types::{DisplayMode, YearProgress};

/// The e-paper side of the world. The core hands over a mode and a progress
/// pair; glyphs, grid size and refresh waveforms stay on the other side.
pub trait ProgressRenderer {
    type Error: core::fmt::Debug;

    async fn render(&mut self, mode: DisplayMode, progress: YearProgress)
    -> Result<(), Self::Error>;
}
