use crate::calibration::{CalibrationScheme, RawToVoltage};

/// One converted sample average.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    pub raw_average: u32,
    pub voltage_mv: u32,
    /// Fraction of full scale in percent, `0.0..=100.0` for in-range codes.
    pub percentage: f32,
}

impl Reading {
    pub fn volts(&self) -> f32 {
        self.voltage_mv as f32 / 1000.0
    }
}

impl<H: RawToVoltage> CalibrationScheme<H> {
    /// Converts `raw` to millivolts.
    ///
    /// A calibrated conversion that fails is logged and replaced by the
    /// linear model, so this never fails.
    pub fn to_millivolts(&self, raw: u32) -> u32 {
        match self.handle() {
            Some(handle) => handle.raw_to_voltage(raw).unwrap_or_else(|e| {
                log::warn!("calibrated conversion of {} failed: {:?}", raw, e);
                self.linear().to_millivolts(raw)
            }),
            None => self.linear().to_millivolts(raw),
        }
    }
}

/// Converts a raw average into a [`Reading`] with the active `scheme`.
///
/// # Examples
///
/// ```
/// use adc_monitor::{convert, CalibrationScheme, Config};
/// # use core::convert::Infallible;
///
/// let scheme: CalibrationScheme<Infallible> = CalibrationScheme::Uncalibrated(Config::default().linear());
///
/// let reading = convert(4095, &scheme);
/// assert_eq!(reading.voltage_mv, 3300);
/// assert_eq!(reading.percentage, 100.0);
/// ```
pub fn convert<H: RawToVoltage>(raw_average: u32, scheme: &CalibrationScheme<H>) -> Reading {
    Reading {
        raw_average,
        voltage_mv: scheme.to_millivolts(raw_average),
        percentage: scheme.linear().percentage(raw_average),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::tests::Doubling;
    use crate::calibration::{select, LinearModel, NoCalibration};
    use crate::points::CalibrationPoints;
    use approx::assert_relative_eq;
    use core::convert::Infallible;

    const LINEAR: LinearModel = LinearModel {
        reference_mv: 3300,
        full_scale: 4095,
    };

    fn uncalibrated() -> CalibrationScheme<Infallible> {
        CalibrationScheme::Uncalibrated(LINEAR)
    }

    #[test]
    fn uncalibrated_endpoints() {
        assert_eq!(uncalibrated().to_millivolts(0), 0);
        assert_eq!(uncalibrated().to_millivolts(4095), 3300);
    }

    #[test]
    fn mid_scale_reading() {
        let reading = convert(2044, &uncalibrated());

        assert_eq!(reading.raw_average, 2044);
        assert_eq!(reading.voltage_mv, 1647);
        assert_relative_eq!(reading.percentage, 49.914, epsilon = 0.001);
        assert_relative_eq!(reading.volts(), 1.647);
    }

    #[test]
    fn uses_calibrated_handle() {
        let scheme = CalibrationScheme::CurveFitting {
            handle: Doubling { fails: false },
            linear: LINEAR,
        };

        let reading = convert(1000, &scheme);

        assert_eq!(reading.voltage_mv, 2000);
        // percentage follows the raw code, not the calibrated voltage
        assert_relative_eq!(reading.percentage, 24.420, epsilon = 0.001);
    }

    #[test]
    fn failed_conversion_falls_back_to_linear() {
        let scheme = CalibrationScheme::LineFitting {
            handle: Doubling { fails: true },
            linear: LINEAR,
        };

        assert_eq!(scheme.to_millivolts(4095), 3300);
        assert_eq!(scheme.to_millivolts(1000), 805);
    }

    #[test]
    fn out_of_table_codes_follow_end_segments() {
        let mut points = CalibrationPoints::new([(400, 500), (2000, 1800), (3600, 2900)]);
        let scheme = select(&mut points, LINEAR);

        assert_eq!(scheme.to_millivolts(2000), 1800);
        assert_eq!(scheme.to_millivolts(100), 257);
        assert_eq!(scheme.to_millivolts(4095), 3240);
    }

    #[test]
    fn calibrated_scheme_is_monotonic_over_full_range() {
        // both end points sit off the linear 3300 mV / 4095 line
        let mut points = CalibrationPoints::new([(400, 500), (2000, 1800), (3600, 3000)]);
        let scheme = select(&mut points, LINEAR);
        assert!(scheme.is_calibrated());

        let mut last = 0;
        for raw in 0..=LINEAR.full_scale {
            let mv = scheme.to_millivolts(raw);
            assert!(mv >= last, "{} mV at {} after {} mV", mv, raw, last);
            last = mv;
        }
    }

    #[test]
    fn monotonic_for_fixed_scheme() {
        let schemes = [
            select(&mut NoCalibration, LINEAR),
            select(&mut NoCalibration, LinearModel {
                reference_mv: 1100,
                full_scale: 1023,
            }),
        ];

        for scheme in &schemes {
            let mut last = 0;
            for raw in 0..=scheme.linear().full_scale {
                let mv = scheme.to_millivolts(raw);
                assert!(mv >= last, "{} mV at {} after {} mV", mv, raw, last);
                last = mv;
            }
        }
    }

    #[test]
    fn uncalibrated_never_calls_handle() {
        let scheme: CalibrationScheme<Doubling> = CalibrationScheme::Uncalibrated(LINEAR);

        // a doubling handle would give 2000
        assert_eq!(scheme.to_millivolts(1000), 805);
    }
}
