/// The year-progress drawings the renderer knows how to produce.
///
/// The core only selects a mode; grid dimensions and glyphs are entirely the
/// renderer's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    Crossout,
    Hourglass,
    Level,
    Spiral,
    Piechart,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 5] = [
        DisplayMode::Crossout,
        DisplayMode::Hourglass,
        DisplayMode::Level,
        DisplayMode::Spiral,
        DisplayMode::Piechart,
    ];
}
