//! Qualitative bands over readings.
//!
//! A [`BandTable`] is a list of `(upper_bound, band)` entries in ascending
//! order plus a top band. A value belongs to the first entry whose bound is
//! strictly greater than it, so a value exactly on a bound falls in the band
//! above.

/// Ordered, non-overlapping bands over values of type `T`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandTable<T, B, const LENGTH: usize> {
    bounds: [(T, B); LENGTH],
    top: B,
}

impl<T, B, const LENGTH: usize> BandTable<T, B, LENGTH> {
    /// Returns a table with the given bounds, and `top` for every value at or
    /// above the last bound.
    ///
    /// The bounds must be in ascending order or this function will panic
    /// when running in debug mode.
    ///
    /// # Examples
    ///
    /// ```
    /// use adc_monitor::BandTable;
    ///
    /// let table = BandTable::new([(1.5, "cold"), (30.0, "mild")], "hot");
    ///
    /// assert_eq!(table.classify(-4.0), "cold");
    /// assert_eq!(table.classify(1.5), "mild");
    /// assert_eq!(table.classify(31.0), "hot");
    /// ```
    pub fn new(bounds: [(T, B); LENGTH], top: B) -> Self
    where
        T: PartialOrd,
    {
        debug_assert!(
            bounds.windows(2).all(|w| w[0].0 < w[1].0),
            "The bounds in a band table must be in ascending order"
        );

        Self { bounds, top }
    }

    pub fn classify(&self, value: T) -> B
    where
        T: PartialOrd,
        B: Copy,
    {
        self.bounds
            .iter()
            .find(|(bound, _)| value < *bound)
            .map_or(self.top, |&(_, band)| band)
    }
}

/// Light falling on a light-dependent resistor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LightLevel {
    Dark,
    Low,
    Medium,
    High,
}

impl LightLevel {
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Low => "low light",
            Self::Medium => "medium light",
            Self::High => "bright",
        }
    }
}

/// Light level by percentage of full scale.
pub const LIGHT_LEVELS: BandTable<f32, LightLevel, 3> = BandTable {
    bounds: [
        (20.0, LightLevel::Dark),
        (50.0, LightLevel::Low),
        (80.0, LightLevel::Medium),
    ],
    top: LightLevel::High,
};

/// Position of a potentiometer, turned from left (ground) to right (supply).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KnobPosition {
    Leftmost,
    Quarter,
    Half,
    ThreeQuarters,
    Rightmost,
}

impl KnobPosition {
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Leftmost => "leftmost (0%)",
            Self::Quarter => "1/4 (25%)",
            Self::Half => "1/2 (50%)",
            Self::ThreeQuarters => "3/4 (75%)",
            Self::Rightmost => "rightmost (100%)",
        }
    }
}

/// Knob position by percentage of full scale.
pub const KNOB_POSITIONS: BandTable<f32, KnobPosition, 4> = BandTable {
    bounds: [
        (5.0, KnobPosition::Leftmost),
        (25.0, KnobPosition::Quarter),
        (50.0, KnobPosition::Half),
        (75.0, KnobPosition::ThreeQuarters),
    ],
    top: KnobPosition::Rightmost,
};

/// Signal strength relative to ground and supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SignalLevel {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl SignalLevel {
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryLow => "very low",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::VeryHigh => "very high",
        }
    }
}

/// Signal level by raw code of a 12-bit converter.
pub const SIGNAL_LEVELS: BandTable<u32, SignalLevel, 4> = BandTable {
    bounds: [
        (100, SignalLevel::VeryLow),
        (1000, SignalLevel::Low),
        (2000, SignalLevel::Medium),
        (3000, SignalLevel::High),
    ],
    top: SignalLevel::VeryHigh,
};

/// Where a potentiometer wiper sits when checking the wiring of a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CircuitCheck {
    LeftEnd,
    NearLeftEnd,
    Travel,
    Centre,
    NearRightEnd,
    RightEnd,
}

impl CircuitCheck {
    pub const fn label(self) -> &'static str {
        match self {
            Self::LeftEnd => "left end, lowest value",
            Self::NearLeftEnd => "near left end, turn further left",
            Self::Travel => "between ends, turn to see the value change",
            Self::Centre => "centre, mid-scale value",
            Self::NearRightEnd => "near right end, turn further right",
            Self::RightEnd => "right end, highest value",
        }
    }

    /// Whether the wiper reached an end or the centre, ie. a reading that
    /// confirms the wiring.
    pub const fn is_landmark(self) -> bool {
        matches!(self, Self::LeftEnd | Self::Centre | Self::RightEnd)
    }
}

/// Wiring check by raw code of a 12-bit converter.
pub const CIRCUIT_CHECKS: BandTable<u32, CircuitCheck, 6> = BandTable {
    bounds: [
        (50, CircuitCheck::LeftEnd),
        (100, CircuitCheck::NearLeftEnd),
        (1901, CircuitCheck::Travel),
        (2200, CircuitCheck::Centre),
        (4001, CircuitCheck::Travel),
        (4046, CircuitCheck::NearRightEnd),
    ],
    top: CircuitCheck::RightEnd,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_levels() {
        assert_eq!(LIGHT_LEVELS.classify(0.0), LightLevel::Dark);
        assert_eq!(LIGHT_LEVELS.classify(19.9), LightLevel::Dark);
        assert_eq!(LIGHT_LEVELS.classify(20.0), LightLevel::Low);
        assert_eq!(LIGHT_LEVELS.classify(49.9), LightLevel::Low);
        assert_eq!(LIGHT_LEVELS.classify(50.0), LightLevel::Medium);
        assert_eq!(LIGHT_LEVELS.classify(80.0), LightLevel::High);
        assert_eq!(LIGHT_LEVELS.classify(100.0), LightLevel::High);
    }

    #[test]
    fn knob_positions() {
        assert_eq!(KNOB_POSITIONS.classify(4.99), KnobPosition::Leftmost);
        assert_eq!(KNOB_POSITIONS.classify(5.0), KnobPosition::Quarter);
        assert_eq!(KNOB_POSITIONS.classify(49.9), KnobPosition::Half);
        assert_eq!(KNOB_POSITIONS.classify(74.0), KnobPosition::ThreeQuarters);
        assert_eq!(KNOB_POSITIONS.classify(75.0), KnobPosition::Rightmost);
    }

    #[test]
    fn signal_levels() {
        assert_eq!(SIGNAL_LEVELS.classify(0), SignalLevel::VeryLow);
        assert_eq!(SIGNAL_LEVELS.classify(99), SignalLevel::VeryLow);
        assert_eq!(SIGNAL_LEVELS.classify(100), SignalLevel::Low);
        assert_eq!(SIGNAL_LEVELS.classify(1999), SignalLevel::Medium);
        assert_eq!(SIGNAL_LEVELS.classify(3000), SignalLevel::VeryHigh);
        assert_eq!(SIGNAL_LEVELS.classify(4095), SignalLevel::VeryHigh);
    }

    #[test]
    fn circuit_checks() {
        assert_eq!(CIRCUIT_CHECKS.classify(0), CircuitCheck::LeftEnd);
        assert_eq!(CIRCUIT_CHECKS.classify(49), CircuitCheck::LeftEnd);
        assert_eq!(CIRCUIT_CHECKS.classify(50), CircuitCheck::NearLeftEnd);
        assert_eq!(CIRCUIT_CHECKS.classify(99), CircuitCheck::NearLeftEnd);
        assert_eq!(CIRCUIT_CHECKS.classify(100), CircuitCheck::Travel);
        assert_eq!(CIRCUIT_CHECKS.classify(1900), CircuitCheck::Travel);
        assert_eq!(CIRCUIT_CHECKS.classify(1901), CircuitCheck::Centre);
        assert_eq!(CIRCUIT_CHECKS.classify(2199), CircuitCheck::Centre);
        assert_eq!(CIRCUIT_CHECKS.classify(2200), CircuitCheck::Travel);
        assert_eq!(CIRCUIT_CHECKS.classify(4000), CircuitCheck::Travel);
        assert_eq!(CIRCUIT_CHECKS.classify(4001), CircuitCheck::NearRightEnd);
        assert_eq!(CIRCUIT_CHECKS.classify(4045), CircuitCheck::NearRightEnd);
        assert_eq!(CIRCUIT_CHECKS.classify(4046), CircuitCheck::RightEnd);
        assert_eq!(CIRCUIT_CHECKS.classify(4095), CircuitCheck::RightEnd);
    }

    #[test]
    fn circuit_landmarks() {
        assert!(CircuitCheck::LeftEnd.is_landmark());
        assert!(CIRCUIT_CHECKS.classify(2048).is_landmark());
        assert!(!CIRCUIT_CHECKS.classify(3000).is_landmark());
        assert!(!CircuitCheck::NearRightEnd.is_landmark());
    }

    #[test]
    fn partitions_percentage_range() {
        // every step lands in the band of the step before or the next one
        let mut last = LIGHT_LEVELS.classify(0.0);

        for step in 0..=1000 {
            let band = LIGHT_LEVELS.classify(step as f32 / 10.0);
            assert!(band == last || band.index() == last.index() + 1);
            last = band;
        }

        assert_eq!(last, LightLevel::High);
    }

    #[test]
    fn status_index_matches_plotter_column() {
        assert_eq!(LightLevel::Dark.index(), 0);
        assert_eq!(LightLevel::High.index(), 3);
        assert_eq!(KnobPosition::Rightmost.index(), 4);
    }

    #[test]
    #[should_panic]
    fn panics_if_unsorted_table() {
        BandTable::new([(50.0, LightLevel::Low), (20.0, LightLevel::Dark)], LightLevel::High);
    }
}
