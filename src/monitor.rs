use core::fmt;

use embedded_hal::adc::{Channel, OneShot};

use crate::band::BandTable;
use crate::calibration::{CalibrationScheme, RawToVoltage};
use crate::change::{ChangeDetector, ChangeEvent};
use crate::config::Config;
use crate::converter::{convert, Reading};
use crate::error::Error;
use crate::sampler::Sampler;

/// Everything one sampling cycle produced, for the reporting layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleReport<B> {
    pub reading: Reading,
    pub min: u32,
    pub max: u32,
    pub successful: usize,
    pub failures: usize,
    pub band: B,
    pub change: ChangeEvent,
    /// The raw average moved by less than the configured stuck tolerance.
    pub stuck: bool,
}

/// The sampling pipeline for one analog channel.
///
/// Owns the channel's pin, its calibration scheme and its previous reading;
/// monitor several channels with one `Monitor` each.
pub struct Monitor<Pin, H, B, const BANDS: usize> {
    sampler: Sampler<Pin>,
    scheme: CalibrationScheme<H>,
    detector: ChangeDetector,
    bands: BandTable<f32, B, BANDS>,
    stuck_tolerance: u32,
    cycles: u32,
}

impl<Pin, H, B, const BANDS: usize> Monitor<Pin, H, B, BANDS> {
    /// Returns a monitor for `pin`, converting with `scheme` and classifying
    /// the percentage of full scale with `bands`.
    ///
    /// The scheme's linear model must match `config` or this function will
    /// panic when running in debug mode; build it with
    /// [`select`](crate::select) and [`Config::linear`].
    pub fn new<ADC>(
        pin: Pin,
        scheme: CalibrationScheme<H>,
        config: &Config,
        bands: BandTable<f32, B, BANDS>,
    ) -> Self
    where
        Pin: Channel<ADC>,
    {
        debug_assert_eq!(
            scheme.linear(),
            &config.linear(),
            "The calibration scheme must be built from the same config"
        );

        Self {
            sampler: Sampler::new(pin, config.batch_size),
            scheme,
            detector: ChangeDetector::new(config.noise_threshold),
            bands,
            stuck_tolerance: config.stuck_tolerance,
            cycles: 0,
        }
    }

    pub fn scheme(&self) -> &CalibrationScheme<H> {
        &self.scheme
    }

    /// Number of cycles that produced a report.
    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    /// Destroys the monitor and returns the `Pin`.
    pub fn free(self) -> Pin {
        self.sampler.free()
    }

    /// Runs one sampling cycle: acquires a batch, converts its average,
    /// compares it with the previous reading and classifies it.
    ///
    /// A cycle in which every read fails returns
    /// [`Error::NoSuccessfulReads`] and leaves the previous reading as it was.
    ///
    /// # Examples
    ///
    /// ```
    /// use adc_monitor::{select, Config, LightLevel, Monitor, NoCalibration, LIGHT_LEVELS};
    /// # use embedded_hal_mock::adc::{Mock, MockChan0, Transaction};
    /// #
    /// # let expectations: Vec<Transaction<u16>> =
    /// #     (2040..2050).map(|v| Transaction::read(0, v)).collect();
    /// # let mut adc = Mock::new(&expectations);
    /// # let pin = MockChan0 {};
    ///
    /// let config = Config::default();
    /// let scheme = select(&mut NoCalibration, config.linear());
    /// let mut monitor = Monitor::new(pin, scheme, &config, LIGHT_LEVELS);
    ///
    /// let report = monitor.cycle(&mut adc).unwrap();
    /// assert_eq!(report.reading.raw_average, 2044);
    /// assert_eq!(report.reading.voltage_mv, 1647);
    /// assert_eq!(report.band, LightLevel::Low);
    /// ```
    pub fn cycle<Adc, ADC, Word>(&mut self, adc: &mut Adc) -> Result<CycleReport<B>, Error>
    where
        Word: Copy + Into<u32>,
        Pin: Channel<ADC>,
        Adc: OneShot<ADC, Word, Pin>,
        <Adc as OneShot<ADC, Word, Pin>>::Error: fmt::Debug,
        H: RawToVoltage,
        B: Copy + fmt::Debug,
    {
        let batch = self.sampler.acquire(adc).map_err(|e| {
            log::warn!("cycle skipped: {}", e);
            e
        })?;

        let reading = convert(batch.average(), &self.scheme);
        let change = self.detector.classify(reading);
        let band = self.bands.classify(reading.percentage);
        let stuck = change.is_stuck(self.stuck_tolerance);
        if stuck {
            log::warn!(
                "reading barely moved ({} codes), check the circuit",
                change.delta
            );
        }
        self.cycles = self.cycles.wrapping_add(1);

        log::debug!(
            "raw {} ({}..={}), {} mV, {}% {:?}, {:?} by {}",
            reading.raw_average,
            batch.min,
            batch.max,
            reading.voltage_mv,
            reading.percentage,
            band,
            change.classification,
            change.delta
        );

        Ok(CycleReport {
            reading,
            min: batch.min,
            max: batch.max,
            successful: batch.count,
            failures: batch.failures,
            band,
            change,
            stuck,
        })
    }
}
