//! Status colour selection.

use super::model::OperatingMode;

/// Colours the status LED can show.  Each channel is either fully on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColour {
    /// AUTO mode.
    Green,
    /// MANUAL mode.
    Blue,
    /// Emergency stop latched.
    Red,
}

impl StatusColour {
    /// Channel states as (R, G, B).
    pub const fn channels(self) -> (bool, bool, bool) {
        match self {
            Self::Green => (false, true, false),
            Self::Blue => (false, false, true),
            Self::Red => (true, false, false),
        }
    }
}

/// Colour shown by the status task while no emergency is latched.
pub const fn colour_for(mode: OperatingMode) -> StatusColour {
    match mode {
        OperatingMode::Auto => StatusColour::Green,
        OperatingMode::Manual => StatusColour::Blue,
    }
}
