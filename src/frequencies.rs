//! The multi-octave frequency table of a musical scale.

use crate::cents_to_frequency;

/// Maps a computed frequency to the frequency actually used by the scale.
///
/// Stretch tuning compensates for the inharmonicity of physical strings by widening the
/// octaves; the plain identity mapping `()` disables stretching. The mapping is only consulted
/// while a [`ScaleFrequencies`] table is built, never afterwards.
pub trait StretchTuning {
    fn stretched_frequency(&self, frequency: f64) -> f64;
}

/// The identity stretch: every frequency is used as computed.
impl StretchTuning for () {
    fn stretched_frequency(&self, frequency: f64) -> f64 {
        frequency
    }
}

/// All audible frequencies of a temperament, spanning as many octaves as fit the window.
///
/// The table is an ascending array of frequencies together with the offset of the reference
/// note. Note indices are relative to the reference note (index 0); the reference may lie
/// outside the stored range when the reference frequency itself is outside the frequency
/// window. Once constructed the table is immutable.
///
/// All closeness decisions are made in log-frequency space, matching perceived pitch
/// distance, never by linear frequency difference.
///
/// # Examples
///
/// ```
/// # use assert_approx_eq::assert_approx_eq;
/// # use temper::frequencies::ScaleFrequencies;
/// let cents: Vec<f64> = (0..=12).map(|i| i as f64 * 100.0).collect();
/// let frequencies = ScaleFrequencies::new(&cents, 9, 440.0, 16.0, 17000.0, &());
///
/// assert_eq!(frequencies.at(0), 440.0); // exact, not just approximate
/// assert_approx_eq!(frequencies.at(12), 880.0, 1e-9);
/// assert_approx_eq!(frequencies.at(-12), 220.0, 1e-9);
/// assert_eq!(frequencies.closest_index(440.0), 0);
/// ```
#[derive(Clone, Debug)]
pub struct ScaleFrequencies {
    frequencies: Vec<f64>,
    index_of_reference_note: i32,
}

impl ScaleFrequencies {
    /// Computes the frequencies of a temperament over as many octaves as possible.
    ///
    /// `cents` is one octave of the temperament *including* the octave value (e.g. for 12-EDO:
    /// 0, 100, …, 1100, 1200). `reference_index_within_octave` is the index within `cents`
    /// carrying the reference frequency; walking starts there and wraps around the table in
    /// both directions, adding or subtracting the octave span, until the frequencies leave
    /// the window. The stored slot of the reference is overwritten with the exact input
    /// reference frequency so no floating-point round-trip drift remains.
    pub fn new(
        cents: &[f64],
        reference_index_within_octave: usize,
        reference_frequency: f64,
        frequency_min: f64,
        frequency_max: f64,
        stretch_tuning: &impl StretchTuning,
    ) -> Self {
        assert!(
            cents.len() >= 2,
            "cents table must include the unison and the octave entry"
        );
        let steps_per_octave = cents.len() - 1;
        let cents_reference = cents[reference_index_within_octave];
        let octave_span = cents[cents.len() - 1] - cents[0];

        // collect all frequencies from the reference up to the highest frequency
        let mut octave_wise_cents = 0.0;
        let mut index_within_octave = reference_index_within_octave;
        let mut higher_frequencies = Vec::new();
        let mut reference_offset_high = 0;
        let mut current_frequency = stretch_tuning.stretched_frequency(reference_frequency);
        while current_frequency < frequency_max {
            // the reference frequency itself may lie below the window
            if current_frequency > frequency_min {
                higher_frequencies.push(current_frequency);
            } else {
                reference_offset_high -= 1;
            }
            index_within_octave += 1;
            if index_within_octave == steps_per_octave {
                index_within_octave = 0;
                octave_wise_cents += octave_span;
            }
            let cents_next = octave_wise_cents + cents[index_within_octave] - cents_reference;
            current_frequency =
                stretch_tuning.stretched_frequency(cents_to_frequency(cents_next, reference_frequency));
        }

        // collect all frequencies from the reference down to the lowest frequency
        let mut octave_wise_cents = 0.0;
        let mut index_within_octave = reference_index_within_octave;
        let mut lower_frequencies = Vec::new();
        let mut reference_offset_low = 0;
        let mut current_frequency = stretch_tuning.stretched_frequency(reference_frequency);
        while current_frequency > frequency_min {
            // the reference frequency itself may lie above the window
            if current_frequency < frequency_max {
                lower_frequencies.push(current_frequency);
            } else {
                reference_offset_low -= 1;
            }
            if index_within_octave == 0 {
                index_within_octave = steps_per_octave;
                octave_wise_cents -= octave_span;
            }
            index_within_octave -= 1;
            let cents_next = octave_wise_cents + cents[index_within_octave] - cents_reference;
            current_frequency =
                stretch_tuning.stretched_frequency(cents_to_frequency(cents_next, reference_frequency));
        }

        // merge both walks into one ascending array, tracking the reference slot
        let mut result = if higher_frequencies.is_empty() {
            let index_of_reference_note =
                lower_frequencies.len() as i32 - 1 - reference_offset_low;
            lower_frequencies.reverse();
            ScaleFrequencies {
                frequencies: lower_frequencies,
                index_of_reference_note,
            }
        } else if lower_frequencies.is_empty() {
            ScaleFrequencies {
                frequencies: higher_frequencies,
                index_of_reference_note: reference_offset_high,
            }
        } else {
            // both walks contain the reference entry; overlap them there
            let index_of_reference_note = lower_frequencies.len() as i32 - 1;
            let mut frequencies = lower_frequencies;
            frequencies.reverse();
            frequencies.extend_from_slice(&higher_frequencies[1..]);
            ScaleFrequencies {
                frequencies,
                index_of_reference_note,
            }
        };

        let reference_slot = result.index_of_reference_note;
        if reference_slot >= 0 && (reference_slot as usize) < result.frequencies.len() {
            result.frequencies[reference_slot as usize] = reference_frequency;
        }

        result
    }

    /// First available note index (included).
    pub fn index_start(&self) -> i32 {
        -self.index_of_reference_note
    }

    /// End of the available note indices (excluded).
    pub fn index_end(&self) -> i32 {
        self.index_start() + self.frequencies.len() as i32
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Frequency at the given note index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is outside `index_start()..index_end()`.
    pub fn at(&self, index: i32) -> f64 {
        self.frequencies[(index + self.index_of_reference_note) as usize]
    }

    /// Frequency at a fractional note index.
    ///
    /// Fractional indices are interpolated logarithmically between the two bracketing notes;
    /// indices before the first or past the last note are extrapolated with the ratio of the
    /// nearest pair of notes. An empty table yields 0.
    pub fn at_fractional(&self, index: f64) -> f64 {
        if self.frequencies.is_empty() {
            return 0.0;
        }
        let index_start = self.index_start();
        let index_end = self.index_end();
        if self.frequencies.len() == 1 {
            return self.at(index_start);
        }

        let index_lower = index.floor() as i32;
        if index_lower < index_start {
            let anchor = self.at(index_start);
            anchor * (self.at(index_start + 1) / anchor).powf(index - index_start as f64)
        } else if index_lower >= index_end - 1 {
            let anchor = self.at(index_end - 1);
            anchor * (anchor / self.at(index_end - 2)).powf(index - (index_end - 1) as f64)
        } else {
            let anchor = self.at(index_lower);
            anchor * (self.at(index_lower + 1) / anchor).powf(index - index_lower as f64)
        }
    }

    /// The (possibly fractional) note index of the given frequency.
    ///
    /// Frequencies between two notes yield an index between the two integer indices, refined
    /// against whichever stored neighbor brackets the query; a frequency equal to a stored
    /// entry yields that exact integer index. An empty table yields 0.
    pub fn frequency_index(&self, frequency: f64) -> f64 {
        if self.frequencies.is_empty() {
            return 0.0;
        }

        let closest_index = self.closest_index(frequency);
        let closest_frequency = self.at(closest_index);
        let index_start = self.index_start();
        let index_end = self.index_end();

        if frequency == closest_frequency || self.frequencies.len() == 1 {
            closest_index as f64
        } else if closest_index > index_start
            && (frequency < closest_frequency || closest_index == index_end - 1)
        {
            closest_index as f64
                - (closest_frequency / frequency).log10()
                    / (closest_frequency / self.at(closest_index - 1)).log10()
        } else if closest_index < index_end - 1
            && (frequency > closest_frequency || closest_index == index_start)
        {
            closest_index as f64
                + (closest_frequency / frequency).log10()
                    / (closest_frequency / self.at(closest_index + 1)).log10()
        } else {
            unreachable!("no neighbor brackets frequency {}", frequency)
        }
    }

    /// The note index whose frequency is closest to the given frequency.
    ///
    /// Closeness is measured in log-frequency space; the query is clamped to the valid index
    /// range at either edge. An empty table yields 0.
    pub fn closest_index(&self, frequency: f64) -> i32 {
        if self.frequencies.is_empty() {
            return 0;
        }
        let index_after = match self
            .frequencies
            .binary_search_by(|stored| stored.total_cmp(&frequency))
        {
            Ok(index) => return index as i32 - self.index_of_reference_note,
            Err(insertion_index) => insertion_index,
        };

        if index_after == 0 {
            return -self.index_of_reference_note;
        }
        if index_after >= self.frequencies.len() {
            return self.frequencies.len() as i32 - 1 - self.index_of_reference_note;
        }

        let index_before = index_after - 1;
        // frequencies[index_before] < frequency < frequencies[index_after]
        if (frequency / self.frequencies[index_before]).log10()
            < (self.frequencies[index_after] / frequency).log10()
        {
            index_before as i32 - self.index_of_reference_note
        } else {
            index_after as i32 - self.index_of_reference_note
        }
    }
}

#[cfg(test)]
mod test {
    use assert_approx_eq::assert_approx_eq;

    use crate::cents_to_frequency;

    use super::*;

    fn edo12_cents() -> Vec<f64> {
        (0..=12).map(|i| i as f64 * 100.0).collect()
    }

    fn edo12_table() -> ScaleFrequencies {
        ScaleFrequencies::new(&edo12_cents(), 9, 440.0, 16.0, 17000.0, &())
    }

    #[test]
    fn reference_slot_is_exact_and_octaves_double() {
        let cents = edo12_cents();
        let frequencies = ScaleFrequencies::new(&cents, 0, 440.0, 16.0, 16000.0, &());

        assert_eq!(frequencies.at(0), 440.0);
        assert_approx_eq!(frequencies.at(12), 880.0, 1e-9);
        assert_approx_eq!(frequencies.at(-12), 220.0, 1e-9);
    }

    #[test]
    fn table_respects_the_window_and_is_ascending() {
        let frequencies = edo12_table();

        assert!(frequencies.at(frequencies.index_start()) >= 16.0);
        assert!(frequencies.at(frequencies.index_end() - 1) <= 17000.0);

        for index in frequencies.index_start() + 1..frequencies.index_end() {
            assert!(frequencies.at(index - 1) < frequencies.at(index));
        }
    }

    #[test]
    fn spans_about_ten_octaves() {
        // 16 Hz .. 17 kHz is slightly more than ten octaves, i.e. 121 twelve-tone steps
        let frequencies = edo12_table();
        assert_eq!(frequencies.len(), 121);
        assert_eq!(frequencies.at(0), 440.0);
        assert!(frequencies.index_start() <= -57);
        assert!(frequencies.index_end() > 63);
    }

    #[test]
    fn every_step_is_one_hundred_cents() {
        let frequencies = edo12_table();
        for index in frequencies.index_start() + 1..frequencies.index_end() {
            let expected = cents_to_frequency(100.0, frequencies.at(index - 1));
            assert_approx_eq!(frequencies.at(index), expected, 1e-3);
        }
    }

    #[test]
    fn closest_index_inverts_at() {
        let frequencies = edo12_table();
        for index in frequencies.index_start()..frequencies.index_end() {
            assert_eq!(frequencies.closest_index(frequencies.at(index)), index);
        }
    }

    #[test]
    fn closest_index_clamps_to_the_edges() {
        let frequencies = edo12_table();
        assert_eq!(frequencies.closest_index(1.0), frequencies.index_start());
        assert_eq!(
            frequencies.closest_index(1e6),
            frequencies.index_end() - 1
        );
    }

    #[test]
    fn closest_index_decides_in_log_space() {
        let cents = edo12_cents();
        let frequencies = ScaleFrequencies::new(&cents, 0, 440.0, 16.0, 16000.0, &());
        // 49 cents above the reference is still closest to the reference,
        // 51 cents above is closest to the next note
        assert_eq!(
            frequencies.closest_index(cents_to_frequency(49.0, 440.0)),
            0
        );
        assert_eq!(
            frequencies.closest_index(cents_to_frequency(51.0, 440.0)),
            1
        );
    }

    #[test]
    fn frequency_index_is_exact_on_stored_entries() {
        let frequencies = edo12_table();
        assert_eq!(frequencies.frequency_index(440.0), 0.0);
        assert_eq!(frequencies.frequency_index(frequencies.at(1)), 1.0);
        assert_eq!(frequencies.frequency_index(frequencies.at(-1)), -1.0);
    }

    #[test]
    fn frequency_index_interpolates_between_entries() {
        let frequencies = edo12_table();
        assert_approx_eq!(
            frequencies.frequency_index(cents_to_frequency(30.0, 440.0)),
            0.3,
            1e-5
        );
        assert_approx_eq!(
            frequencies.frequency_index(cents_to_frequency(70.0, 440.0)),
            0.7,
            1e-5
        );
    }

    #[test]
    fn frequency_index_extrapolates_beyond_the_window() {
        let frequencies = edo12_table();
        let index_max = frequencies.index_end() - 1;
        let index_min = frequencies.index_start();

        let above = cents_to_frequency(500.0, frequencies.at(index_max));
        assert_approx_eq!(
            frequencies.frequency_index(above),
            index_max as f64 + 5.0,
            1e-5
        );

        let below = cents_to_frequency(-500.0, frequencies.at(index_min));
        assert_approx_eq!(
            frequencies.frequency_index(below),
            index_min as f64 - 5.0,
            1e-5
        );
    }

    #[test]
    fn frequency_index_is_monotone() {
        let frequencies = edo12_table();
        let mut last = f64::NEG_INFINITY;
        let mut frequency = 15.0;
        while frequency < 18000.0 {
            let index = frequencies.frequency_index(frequency);
            assert!(index >= last, "index decreased at {} Hz", frequency);
            last = index;
            frequency *= 1.01;
        }
    }

    #[test]
    fn fractional_index_interpolates_logarithmically() {
        let cents = edo12_cents();
        let frequencies = ScaleFrequencies::new(&cents, 0, 440.0, 10.0, 16000.0, &());

        assert_eq!(frequencies.at_fractional(0.0), frequencies.at(0));
        assert_approx_eq!(
            frequencies.at_fractional(0.5),
            cents_to_frequency(50.0, frequencies.at(0)),
            1e-4
        );
        assert_approx_eq!(
            frequencies.at_fractional(-0.5),
            cents_to_frequency(-50.0, frequencies.at(0)),
            1e-4
        );
    }

    #[test]
    fn fractional_index_extrapolates_with_the_edge_ratio() {
        let cents = edo12_cents();
        let frequencies = ScaleFrequencies::new(&cents, 0, 440.0, 10.0, 16000.0, &());
        let index_start = frequencies.index_start();
        let index_last = frequencies.index_end() - 1;

        assert_approx_eq!(
            frequencies.at_fractional(index_start as f64 - 0.5),
            cents_to_frequency(-50.0, frequencies.at(index_start)),
            1e-4
        );
        assert_approx_eq!(
            frequencies.at_fractional(index_start as f64 - 5.0),
            cents_to_frequency(-500.0, frequencies.at(index_start)),
            1e-4
        );
        assert_approx_eq!(
            frequencies.at_fractional(index_last as f64 + 0.5),
            cents_to_frequency(50.0, frequencies.at(index_last)),
            1e-3
        );
        assert_approx_eq!(
            frequencies.at_fractional(index_last as f64 + 4.0),
            cents_to_frequency(400.0, frequencies.at(index_last)),
            1e-2
        );
    }

    #[test]
    fn reference_above_the_window_keeps_index_bookkeeping() {
        let cents = edo12_cents();
        let frequencies = ScaleFrequencies::new(&cents, 0, 440.0, 16.0, 300.0, &());

        assert!(frequencies.index_end() <= 0);
        assert_approx_eq!(frequencies.at(-12), 220.0, 1e-9);

        // the reference itself is not part of the table
        assert_eq!(frequencies.closest_index(440.0), frequencies.index_end() - 1);
        assert_eq!(frequencies.closest_index(220.0), -12);
    }

    #[test]
    fn reference_below_the_window_keeps_index_bookkeeping() {
        let cents = edo12_cents();
        let frequencies = ScaleFrequencies::new(&cents, 0, 440.0, 500.0, 16000.0, &());

        assert!(frequencies.index_start() > 0);
        assert_approx_eq!(frequencies.at(12), 880.0, 1e-9);

        assert_eq!(frequencies.closest_index(440.0), frequencies.index_start());
        assert_eq!(frequencies.closest_index(880.0), 12);
    }

    struct WideningStretch {
        factor: f64,
    }

    impl StretchTuning for WideningStretch {
        fn stretched_frequency(&self, frequency: f64) -> f64 {
            frequency * self.factor
        }
    }

    #[test]
    fn stretch_tuning_is_applied_during_construction() {
        let cents = edo12_cents();
        let stretch = WideningStretch { factor: 1.01 };
        let frequencies = ScaleFrequencies::new(&cents, 0, 440.0, 16.0, 16000.0, &stretch);

        // the reference slot is written back exactly, neighbors carry the stretch
        assert_eq!(frequencies.at(0), 440.0);
        assert_approx_eq!(
            frequencies.at(1),
            cents_to_frequency(100.0, 440.0) * 1.01,
            1e-9
        );
    }
}
