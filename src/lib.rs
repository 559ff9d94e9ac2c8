//! Batched sampling, calibration and classification of a slowly varying
//! analog input, such as a potentiometer or a light-dependent resistor.
//!
//! Each cycle a [`Sampler`] reads a batch of raw codes through an
//! `embedded-hal` [`OneShot`](embedded_hal::adc::OneShot) converter, the
//! average is converted to millivolts with the [`CalibrationScheme`] chosen
//! once at startup by [`select`], a [`ChangeDetector`] separates real movement
//! from noise and a [`BandTable`] names the result. [`Monitor`] runs all of it
//! for one channel.
//!
//! # Examples
//!
//! ```
//! use adc_monitor::{select, CalibrationPoints, Config, Monitor, KNOB_POSITIONS};
//! # use embedded_hal_mock::adc::{Mock, MockChan0, Transaction};
//! #
//! # let expectations: Vec<Transaction<u16>> = (0..10).map(|_| Transaction::read(0, 2047)).collect();
//! # let mut adc = Mock::new(&expectations);
//! # let pin = MockChan0 {};
//!
//! let config = Config::potentiometer();
//! let mut points = CalibrationPoints::new([(0, 75), (2047, 1620), (4095, 3180)]);
//! let scheme = select(&mut points, config.linear());
//!
//! let mut monitor = Monitor::new(pin, scheme, &config, KNOB_POSITIONS);
//! let report = monitor.cycle(&mut adc).unwrap();
//!
//! assert_eq!(report.reading.voltage_mv, 1620);
//! ```

#![cfg_attr(not(test), no_std)]

mod band;
mod calibration;
mod change;
mod config;
mod converter;
mod error;
mod interpolate;
mod monitor;
mod points;
mod sampler;

pub use band::{
    BandTable, CircuitCheck, KnobPosition, LightLevel, SignalLevel, CIRCUIT_CHECKS,
    KNOB_POSITIONS, LIGHT_LEVELS, SIGNAL_LEVELS,
};
pub use calibration::{
    select, select_with, CalibrationScheme, Fitting, LinearModel, NoCalibration, RawToVoltage,
    SchemeFactory, PREFERENCE,
};
pub use change::{ChangeDetector, ChangeEvent, Classification, Direction};
pub use config::{Config, Resolution};
pub use converter::{convert, Reading};
pub use error::{CalibrationError, Error};
pub use monitor::{CycleReport, Monitor};
pub use points::{pair, CalibrationPoints, PointCalibration};
pub use sampler::{SampleBatch, Sampler};
