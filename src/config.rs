use crate::calibration::LinearModel;

/// Resolution of the converter in bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Resolution(pub u32);

impl Resolution {
    pub const BITS_12: Self = Self(12);

    /// Largest raw code the converter can produce, eg. `4095` for 12 bits.
    /// Widths above 32 bits saturate at `u32::MAX`.
    pub const fn full_scale(self) -> u32 {
        match self.0 {
            0 => 0,
            bits if bits >= 32 => u32::MAX,
            bits => u32::MAX >> (32 - bits),
        }
    }
}

/// Constants for one monitored channel.
///
/// - `batch_size`: reads averaged into each [`Reading`](crate::Reading)
/// - `noise_threshold`: largest raw-code delta still treated as noise
/// - `stuck_tolerance`: a delta below this many codes counts as a stuck reading
/// - `reference_mv`: voltage at full scale when uncalibrated (mV)
/// - `full_scale`: largest raw code of the converter
///
/// # Examples
///
/// ```
/// use adc_monitor::{Config, Resolution};
///
/// let config = Config {
///     batch_size: 32,
///     full_scale: Resolution(10).full_scale(),
///     ..Config::default()
/// };
///
/// assert_eq!(config.linear().full_scale, 1023);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub batch_size: usize,
    pub noise_threshold: u32,
    pub stuck_tolerance: u32,
    pub reference_mv: u32,
    pub full_scale: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self::potentiometer()
    }
}

impl Config {
    /// Potentiometer on a 12-bit converter at 12 dB attenuation.
    pub const fn potentiometer() -> Self {
        Self {
            batch_size: 10,
            noise_threshold: 10,
            stuck_tolerance: 5,
            reference_mv: 3300,
            full_scale: Resolution::BITS_12.full_scale(),
        }
    }

    /// Light-dependent resistor; slower signal, heavier averaging.
    pub const fn light_sensor() -> Self {
        Self {
            batch_size: 64,
            ..Self::potentiometer()
        }
    }

    pub const fn linear(&self) -> LinearModel {
        LinearModel {
            reference_mv: self.reference_mv,
            full_scale: self.full_scale,
        }
    }
}
