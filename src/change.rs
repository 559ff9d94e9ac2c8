use crate::calibration::LinearModel;
use crate::converter::Reading;

/// Outcome of comparing a reading with the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Classification {
    /// First reading of the channel; nothing to compare against.
    Baseline,
    /// The raw average moved by more than the noise threshold.
    Significant,
    Noise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Rising,
    Falling,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChangeEvent {
    pub previous: Option<Reading>,
    pub current: Reading,
    /// `current.raw_average - previous.raw_average`, zero for the baseline.
    pub delta: i32,
    pub classification: Classification,
}

impl ChangeEvent {
    pub fn is_significant(&self) -> bool {
        self.classification == Classification::Significant
    }

    /// Whether the raw average moved by less than `tolerance` codes since the
    /// previous reading. A channel that stays stuck while its input is being
    /// moved points at a wiring fault.
    pub fn is_stuck(&self, tolerance: u32) -> bool {
        self.classification != Classification::Baseline && self.delta.unsigned_abs() < tolerance
    }

    /// Direction of a significant change.
    pub fn direction(&self) -> Option<Direction> {
        match self.classification {
            Classification::Significant if self.delta > 0 => Some(Direction::Rising),
            Classification::Significant => Some(Direction::Falling),
            _ => None,
        }
    }

    /// The raw delta expressed in millivolts with the linear model.
    pub fn delta_millivolts(&self, linear: &LinearModel) -> i32 {
        let mv = linear.to_millivolts(self.delta.unsigned_abs());
        let mv = i32::try_from(mv).unwrap_or(i32::MAX);

        if self.delta < 0 {
            -mv
        } else {
            mv
        }
    }
}

/// Classifies each reading of one channel against the one before it.
///
/// Keeps a single previous reading; every call to
/// [`classify`](ChangeDetector::classify) replaces it.
#[derive(Debug, Clone)]
pub struct ChangeDetector {
    previous: Option<Reading>,
    threshold: u32,
}

impl ChangeDetector {
    /// A change is significant when the raw average moves by more than
    /// `threshold` codes.
    pub const fn new(threshold: u32) -> Self {
        Self {
            previous: None,
            threshold,
        }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn previous(&self) -> Option<&Reading> {
        self.previous.as_ref()
    }

    /// # Examples
    ///
    /// ```
    /// use adc_monitor::{ChangeDetector, Classification, Reading};
    ///
    /// let reading = |raw_average| Reading { raw_average, voltage_mv: 0, percentage: 0.0 };
    /// let mut detector = ChangeDetector::new(10);
    ///
    /// assert_eq!(detector.classify(reading(1000)).classification, Classification::Baseline);
    ///
    /// let event = detector.classify(reading(1015));
    /// assert_eq!(event.classification, Classification::Significant);
    /// assert_eq!(event.delta, 15);
    /// ```
    pub fn classify(&mut self, current: Reading) -> ChangeEvent {
        let previous = self.previous.replace(current);

        let (delta, classification) = match previous {
            None => (0, Classification::Baseline),
            Some(previous) => {
                let delta = i64::from(current.raw_average) - i64::from(previous.raw_average);
                let classification = if delta.unsigned_abs() > u64::from(self.threshold) {
                    Classification::Significant
                } else {
                    Classification::Noise
                };

                (clamp_i32(delta), classification)
            }
        };

        ChangeEvent {
            previous,
            current,
            delta,
            classification,
        }
    }
}

fn clamp_i32(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}
