use core::fmt;

use embedded_hal::adc::{Channel, OneShot};

use crate::error::Error;

/// Raw codes accumulated over one batch of reads. Only successful reads
/// contribute to `sum`, `min` and `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SampleBatch {
    pub sum: u64,
    pub count: usize,
    pub min: u32,
    pub max: u32,
    pub failures: usize,
}

impl SampleBatch {
    fn first(raw: u32) -> Self {
        Self {
            sum: u64::from(raw),
            count: 1,
            min: raw,
            max: raw,
            failures: 0,
        }
    }

    fn push(&mut self, raw: u32) {
        self.sum += u64::from(raw);
        self.count += 1;
        self.min = self.min.min(raw);
        self.max = self.max.max(raw);
    }

    /// Truncated mean of the successful reads.
    pub fn average(&self) -> u32 {
        // count is never zero and the mean lies between min and max
        (self.sum / self.count as u64) as u32
    }
}

/// Draws fixed-size batches of reads from one channel.
#[derive(Debug)]
pub struct Sampler<Pin> {
    pin: Pin,
    batch_size: usize,
}

impl<Pin> Sampler<Pin> {
    /// Returns a sampler reading `batch_size` codes from `pin` per batch.
    ///
    /// # Examples
    ///
    /// ```
    /// use adc_monitor::Sampler;
    /// # use embedded_hal_mock::adc::MockChan0;
    /// #
    /// # let pin = MockChan0 {};
    ///
    /// let sampler = Sampler::new(pin, 10);
    /// # let _: Sampler<MockChan0> = sampler;
    /// ```
    pub fn new<ADC>(pin: Pin, batch_size: usize) -> Self
    where
        Pin: Channel<ADC>,
    {
        Self { pin, batch_size }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Destroys the sampler and returns the `Pin`.
    pub fn free(self) -> Pin {
        self.pin
    }

    /// Reads one batch from `adc`.
    ///
    /// A failed read is logged and skipped. If every read fails, returns
    /// [`Error::NoSuccessfulReads`].
    ///
    /// # Examples
    ///
    /// ```
    /// use adc_monitor::Sampler;
    /// # use embedded_hal_mock::{
    /// #     adc::{Mock, MockChan0, Transaction},
    /// #     MockError,
    /// # };
    /// # use std::io::ErrorKind;
    /// #
    /// # let expectations: [Transaction<u16>; 3] = [
    /// #     Transaction::read(0, 2040),
    /// #     Transaction::read(0, 0).with_error(MockError::Io(ErrorKind::InvalidData)),
    /// #     Transaction::read(0, 2050),
    /// # ];
    /// # let mut adc = Mock::new(&expectations);
    /// # let pin = MockChan0 {};
    ///
    /// let mut sampler = Sampler::new(pin, 3);
    ///
    /// // The second read fails and is left out of the batch
    /// let batch = sampler.acquire(&mut adc).unwrap();
    /// assert_eq!(batch.count, 2);
    /// assert_eq!(batch.failures, 1);
    /// assert_eq!(batch.average(), 2045);
    /// ```
    pub fn acquire<Adc, ADC, Word>(&mut self, adc: &mut Adc) -> Result<SampleBatch, Error>
    where
        Word: Copy + Into<u32>,
        Pin: Channel<ADC>,
        Adc: OneShot<ADC, Word, Pin>,
        <Adc as OneShot<ADC, Word, Pin>>::Error: fmt::Debug,
    {
        let mut batch: Option<SampleBatch> = None;
        let mut failures = 0;

        for _ in 0..self.batch_size {
            match nb::block!(adc.read(&mut self.pin)) {
                Ok(word) => {
                    let raw = word.into();
                    match batch.as_mut() {
                        Some(batch) => batch.push(raw),
                        None => batch = Some(SampleBatch::first(raw)),
                    }
                }
                Err(e) => {
                    failures += 1;
                    log::debug!("read failed: {:?}", e);
                }
            }
        }

        match batch {
            Some(batch) => Ok(SampleBatch { failures, ..batch }),
            None => Err(Error::NoSuccessfulReads {
                attempted: self.batch_size,
            }),
        }
    }
}
