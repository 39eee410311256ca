//! Domain values that flow between the tasks.

/// Full-scale value of the 12-bit ADC.
pub const ADC_MAX: u16 = 4095;

/// One ambient-light sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SensorReading {
    /// Analog magnitude, 0 – 4095.
    pub magnitude: u16,
    /// Comparator output: `true` when darker than the module threshold.
    pub below_threshold: bool,
}

impl SensorReading {
    /// Build a reading, clamping the magnitude to the ADC range.
    pub fn new(magnitude: u16, below_threshold: bool) -> Self {
        Self {
            magnitude: magnitude.min(ADC_MAX),
            below_threshold,
        }
    }
}

/// One potentiometer sample, 0 – 4095.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PotReading {
    pub position: u16,
}

impl PotReading {
    pub fn new(position: u16) -> Self {
        Self {
            position: position.min(ADC_MAX),
        }
    }
}

/// Brightness source selected by the mode button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum OperatingMode {
    /// Brightness follows the ambient light sensor.
    #[default]
    Auto = 0,
    /// Brightness follows the potentiometer.
    Manual = 1,
}

impl OperatingMode {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Auto => Self::Manual,
            Self::Manual => Self::Auto,
        }
    }

    pub const fn from_u8(raw: u8) -> Self {
        if raw & 1 == 0 { Self::Auto } else { Self::Manual }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Auto => "AUTO",
            Self::Manual => "MANUAL",
        }
    }
}

impl core::fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}
