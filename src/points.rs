use crate::calibration::{Fitting, RawToVoltage, SchemeFactory};
use crate::error::CalibrationError;
use crate::interpolate::extend;

/// Converts a nominal voltage into a `(raw code, millivolts)` calibration
/// point, assuming the converter is ideal at that voltage.
///
/// # Arguments
///
/// - `reference_mv`: The voltage at full scale (mV)
/// - `full_scale`: The largest raw code of the converter (eg. `4095` for 12 bits)
/// - `millivolts`: The voltage of the point (mV)
///
/// # Examples
///
/// ```
/// use adc_monitor::pair;
///
/// assert_eq!(pair(3300, 4095, 1650), (2047, 1650));
/// ```
pub fn pair(reference_mv: u32, full_scale: u32, millivolts: u32) -> (u32, u32) {
    let raw = u64::from(millivolts) * u64::from(full_scale) / u64::from(reference_mv.max(1));

    (u32::try_from(raw).unwrap_or(u32::MAX), millivolts)
}

/// Measured `(raw code, millivolts)` pairs, used as a software calibration
/// source.
///
/// Curve fitting interpolates across every point and needs at least three;
/// line fitting uses the first and last point only and needs two. Raw codes
/// must be strictly ascending and voltages must not decrease.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalibrationPoints<const LENGTH: usize> {
    points: [(u32, u32); LENGTH],
}

impl<const LENGTH: usize> CalibrationPoints<LENGTH> {
    pub const fn new(points: [(u32, u32); LENGTH]) -> Self {
        Self { points }
    }

    fn validate(&self, needed: usize) -> Result<(), CalibrationError> {
        if LENGTH < needed {
            return Err(CalibrationError::TooFewPoints {
                needed,
                found: LENGTH,
            });
        }

        if !self.points.windows(2).all(|w| w[0].0 < w[1].0) {
            return Err(CalibrationError::NotAscending);
        }

        if self.points.windows(2).all(|w| w[0].1 <= w[1].1) {
            Ok(())
        } else {
            Err(CalibrationError::Decreasing)
        }
    }
}

impl<const LENGTH: usize> SchemeFactory for CalibrationPoints<LENGTH> {
    type Handle = PointCalibration<LENGTH>;
    type Error = CalibrationError;

    fn create(&mut self, fitting: Fitting) -> Result<Self::Handle, Self::Error> {
        match fitting {
            Fitting::Curve => {
                self.validate(3)?;
                Ok(PointCalibration {
                    table: self.points,
                    len: LENGTH,
                })
            }
            Fitting::Line => {
                self.validate(2)?;
                let mut table = self.points;
                if let (Some(second), Some(&last)) = (table.get_mut(1), self.points.last()) {
                    *second = last;
                }
                Ok(PointCalibration { table, len: 2 })
            }
        }
    }
}

/// Piecewise-linear conversion over validated calibration points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointCalibration<const LENGTH: usize> {
    table: [(u32, u32); LENGTH],
    len: usize,
}

impl<const LENGTH: usize> PointCalibration<LENGTH> {
    pub fn points(&self) -> &[(u32, u32)] {
        &self.table[..self.len]
    }
}

impl<const LENGTH: usize> RawToVoltage for PointCalibration<LENGTH> {
    type Error = CalibrationError;

    /// Interpolates between the two points surrounding `raw`. Codes below
    /// the first point or above the last one follow the first or last
    /// segment, so the conversion never decreases as `raw` rises.
    fn raw_to_voltage(&self, raw: u32) -> Result<u32, Self::Error> {
        let table = self.points();

        table
            .windows(2)
            .find(|w| raw <= w[1].0)
            .or_else(|| table.windows(2).last())
            .map(|w| {
                let ((x0, y0), (x1, y1)) = (w[0], w[1]);
                extend(x0, x1, y0, y1, raw)
            })
            .ok_or(CalibrationError::OutOfRange(raw))
    }
}
