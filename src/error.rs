use thiserror::Error;

/// Failure of a whole sampling cycle.
///
/// This is the only error that leaves the pipeline. Individual read failures
/// are counted in the [`SampleBatch`](crate::SampleBatch), calibration
/// failures fall back to the linear model.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    #[error("all {attempted} reads in the batch failed")]
    NoSuccessfulReads { attempted: usize },
}

/// Failure to build or apply a calibration scheme.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationError {
    #[error("calibration scheme is not supported")]
    Unsupported,
    #[error("{needed} calibration points needed, {found} given")]
    TooFewPoints { needed: usize, found: usize },
    #[error("calibration points must be in strictly ascending order by raw code")]
    NotAscending,
    #[error("calibration voltages must not decrease as the raw code rises")]
    Decreasing,
    #[error("raw code {0} is outside the calibrated range")]
    OutOfRange(u32),
}
