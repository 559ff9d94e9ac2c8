//! Calibration schemes and the startup selection between them.

use core::convert::Infallible;
use core::fmt;

use crate::error::CalibrationError;

/// Converts a raw code to millivolts using calibration data.
pub trait RawToVoltage {
    type Error: fmt::Debug;

    fn raw_to_voltage(&self, raw: u32) -> Result<u32, Self::Error>;
}

impl RawToVoltage for Infallible {
    type Error = Infallible;

    fn raw_to_voltage(&self, _raw: u32) -> Result<u32, Self::Error> {
        match *self {}
    }
}

/// Kind of calibrated conversion a [`SchemeFactory`] can attempt to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fitting {
    Curve,
    Line,
}

/// Order in which [`select`] tries to build a calibrated scheme.
pub const PREFERENCE: [Fitting; 2] = [Fitting::Curve, Fitting::Line];

/// Builds calibration handles, eg. from eFuse data or measured points.
///
/// Each attempt may fail independently; a failure only means the next
/// candidate is tried.
pub trait SchemeFactory {
    type Handle: RawToVoltage;
    type Error: fmt::Debug;

    fn create(&mut self, fitting: Fitting) -> Result<Self::Handle, Self::Error>;
}

/// Factory for converters without any calibration data.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCalibration;

impl SchemeFactory for NoCalibration {
    type Handle = Infallible;
    type Error = CalibrationError;

    fn create(&mut self, _fitting: Fitting) -> Result<Self::Handle, Self::Error> {
        Err(CalibrationError::Unsupported)
    }
}

/// The uncalibrated conversion `raw * reference_mv / full_scale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinearModel {
    pub reference_mv: u32,
    pub full_scale: u32,
}

impl LinearModel {
    pub fn to_millivolts(&self, raw: u32) -> u32 {
        if self.full_scale == 0 {
            return 0;
        }

        let mv = u64::from(raw) * u64::from(self.reference_mv) / u64::from(self.full_scale);
        u32::try_from(mv).unwrap_or(u32::MAX)
    }

    /// Fraction of full scale, in percent.
    pub fn percentage(&self, raw: u32) -> f32 {
        if self.full_scale == 0 {
            return 0.0;
        }

        raw as f32 / self.full_scale as f32 * 100.0
    }
}

/// The conversion active for a channel, chosen once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationScheme<H> {
    CurveFitting { handle: H, linear: LinearModel },
    LineFitting { handle: H, linear: LinearModel },
    Uncalibrated(LinearModel),
}

impl<H> CalibrationScheme<H> {
    fn calibrated(fitting: Fitting, handle: H, linear: LinearModel) -> Self {
        match fitting {
            Fitting::Curve => Self::CurveFitting { handle, linear },
            Fitting::Line => Self::LineFitting { handle, linear },
        }
    }

    /// Linear model used when uncalibrated and as the fallback of a failed
    /// calibrated conversion.
    pub fn linear(&self) -> &LinearModel {
        match self {
            Self::CurveFitting { linear, .. }
            | Self::LineFitting { linear, .. }
            | Self::Uncalibrated(linear) => linear,
        }
    }

    pub fn handle(&self) -> Option<&H> {
        match self {
            Self::CurveFitting { handle, .. } | Self::LineFitting { handle, .. } => Some(handle),
            Self::Uncalibrated(_) => None,
        }
    }

    pub fn fitting(&self) -> Option<Fitting> {
        match self {
            Self::CurveFitting { .. } => Some(Fitting::Curve),
            Self::LineFitting { .. } => Some(Fitting::Line),
            Self::Uncalibrated(_) => None,
        }
    }

    pub fn is_calibrated(&self) -> bool {
        self.handle().is_some()
    }
}

/// Selects the first scheme `factory` can build, trying curve fitting before
/// line fitting, and falls back to `linear`.
///
/// # Examples
///
/// ```
/// use adc_monitor::{select, CalibrationPoints, Fitting};
/// # use adc_monitor::Config;
/// # let linear = Config::default().linear();
///
/// // Two points are enough for a line but not for a curve.
/// let mut points = CalibrationPoints::new([(0, 142), (4095, 3155)]);
///
/// let scheme = select(&mut points, linear);
/// assert_eq!(scheme.fitting(), Some(Fitting::Line));
/// ```
pub fn select<F: SchemeFactory>(factory: &mut F, linear: LinearModel) -> CalibrationScheme<F::Handle> {
    select_with(factory, &PREFERENCE, linear)
}

/// Like [`select`], with an explicit candidate order.
pub fn select_with<F: SchemeFactory>(
    factory: &mut F,
    order: &[Fitting],
    linear: LinearModel,
) -> CalibrationScheme<F::Handle> {
    for &fitting in order {
        match factory.create(fitting) {
            Ok(handle) => {
                log::info!("calibration scheme: {:?} fitting", fitting);
                return CalibrationScheme::calibrated(fitting, handle, linear);
            }
            Err(e) => log::warn!("{:?} fitting unavailable: {:?}", fitting, e),
        }
    }

    log::info!(
        "calibration scheme: uncalibrated ({} mV at code {})",
        linear.reference_mv,
        linear.full_scale
    );
    CalibrationScheme::Uncalibrated(linear)
}
