//! A concrete musical scale: a temperament anchored at a reference frequency.

use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

use serde::{Deserialize, Serialize};

use crate::frequencies::{ScaleFrequencies, StretchTuning};
use crate::math;
use crate::note::MusicalNote;
use crate::note_names::NoteNames;
use crate::temperament::Temperament;

/// The conventional reference frequency, A4 = 440 Hz.
pub const DEFAULT_REFERENCE_FREQUENCY: f64 = 440.0;
/// Default lower bound of the audible frequency window.
pub const DEFAULT_FREQUENCY_MIN: f64 = 16.0;
/// Default upper bound of the audible frequency window.
pub const DEFAULT_FREQUENCY_MAX: f64 = 16000.0;

/// The persisted scale configuration, consumed as a plain input record.
///
/// Storage and synchronization of this record are the caller's concern; the core only reads
/// it. Unset root and reference notes are resolved against the temperament's generated names
/// when the scale is built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScaleSpec {
    pub temperament: Temperament,
    pub root_note: Option<MusicalNote>,
    pub reference_note: Option<MusicalNote>,
    pub reference_frequency: f64,
    pub frequency_min: f64,
    pub frequency_max: f64,
}

impl ScaleSpec {
    pub fn new(temperament: Temperament) -> Self {
        Self {
            temperament,
            root_note: None,
            reference_note: None,
            reference_frequency: DEFAULT_REFERENCE_FREQUENCY,
            frequency_min: DEFAULT_FREQUENCY_MIN,
            frequency_max: DEFAULT_FREQUENCY_MAX,
        }
    }

    pub fn with_root_note(mut self, root_note: MusicalNote) -> Self {
        self.root_note = Some(root_note);
        self
    }

    pub fn with_reference_note(mut self, reference_note: MusicalNote) -> Self {
        self.reference_note = Some(reference_note);
        self
    }

    pub fn with_reference_frequency(mut self, reference_frequency: f64) -> Self {
        self.reference_frequency = reference_frequency;
        self
    }

    pub fn with_frequency_range(mut self, frequency_min: f64, frequency_max: f64) -> Self {
        self.frequency_min = frequency_min;
        self.frequency_max = frequency_max;
        self
    }
}

/// Errors detected while resolving a [`ScaleSpec`] into a [`MusicalScale`].
#[derive(Clone, Debug, PartialEq)]
pub enum ScaleError {
    /// No note names can be generated for a temperament of this size.
    NoteNamesUnavailable { steps: usize },
    /// The requested reference note is not part of the temperament's note names.
    UnknownReferenceNote(MusicalNote),
}

impl Display for ScaleError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ScaleError::NoteNamesUnavailable { steps } => {
                write!(f, "no note names available for {} steps per octave", steps)
            }
            ScaleError::UnknownReferenceNote(note) => {
                write!(f, "reference note {} is not part of the scale", note)
            }
        }
    }
}

/// Maps between scale-wide note indices and named notes.
///
/// Index 0 is the reference note; walking the table wraps at the stem marked as first note
/// of the octave, carrying the octave number along.
#[derive(Clone, Debug)]
pub struct ScaleNoteNames {
    note_names: NoteNames,
    reference_note: MusicalNote,
    reference_index_within_names: usize,
    octave_switch_index: usize,
    reference_octave: i32,
}

impl ScaleNoteNames {
    /// Pairs a name table with a reference note carrying an octave.
    ///
    /// Returns `None` if the reference note is not part of the table.
    pub fn new(note_names: NoteNames, reference_note: MusicalNote) -> Option<Self> {
        let reference_index_within_names = note_names.index_of(&reference_note)?;
        let octave_switch_index = note_names.index_of_first_note_of_octave().unwrap_or(0);
        let reference_octave = if reference_index_within_names < octave_switch_index {
            reference_note.octave
        } else {
            reference_note.octave - 1
        };
        Some(Self {
            note_names,
            reference_note,
            reference_index_within_names,
            octave_switch_index,
            reference_octave,
        })
    }

    pub fn note_names(&self) -> &NoteNames {
        &self.note_names
    }

    pub fn reference_note(&self) -> &MusicalNote {
        &self.reference_note
    }

    /// Index of the reference note within the name table, which is also its index within
    /// the cents table of the temperament.
    pub fn reference_index_within_names(&self) -> usize {
        self.reference_index_within_names
    }

    /// The note at the given scale index (0 = reference note), with its octave filled in.
    pub fn note_of_index(&self, note_index: i32) -> MusicalNote {
        let size = self.note_names.len() as u32;
        let (octave_delta, local_index) = math::div_mod_i32(
            note_index + self.reference_index_within_names as i32,
            size,
        );
        let mut octave = octave_delta + self.reference_octave;
        if local_index as usize >= self.octave_switch_index {
            octave += 1;
        }
        self.note_names.notes()[local_index as usize].with_octave(octave)
    }

    /// The scale index of the given note, or `None` if the note is not part of the scale.
    /// The note must carry an octave.
    pub fn index_of_note(&self, note: &MusicalNote) -> Option<i32> {
        let local_index = self.note_names.index_of(note)?;
        let octave = if local_index < self.octave_switch_index {
            note.octave
        } else {
            note.octave - 1
        };
        Some(
            (octave - self.reference_octave) * self.note_names.len() as i32 + local_index as i32
                - self.reference_index_within_names as i32,
        )
    }
}

/// A temperament made audible: the full index ↔ note ↔ frequency mapping of a scale.
///
/// Built once from a [`ScaleSpec`]; immutable afterwards and safe to share between threads.
///
/// # Examples
///
/// ```
/// # use assert_approx_eq::assert_approx_eq;
/// # use temper::scale::{MusicalScale, ScaleSpec};
/// # use temper::temperament;
/// let scale = MusicalScale::new(ScaleSpec::new(temperament::edo(12, -1)), &()).unwrap();
///
/// assert_eq!(scale.frequency(0), 440.0);
/// assert_eq!(scale.reference_note().to_string().contains("base=A"), true);
/// assert_eq!(scale.closest_note_index(443.0), 0);
/// assert_approx_eq!(scale.frequency(12), 880.0, 1e-9);
/// ```
#[derive(Clone, Debug)]
pub struct MusicalScale {
    temperament: Temperament,
    note_names: ScaleNoteNames,
    root_note: MusicalNote,
    reference_frequency: f64,
    frequency_min: f64,
    frequency_max: f64,
    frequencies: ScaleFrequencies,
}

impl MusicalScale {
    /// Resolves a [`ScaleSpec`] into a concrete scale.
    ///
    /// An unset root note defaults to the first possible root of the temperament, an unset
    /// reference note to the generated default reference (A4 where available).
    pub fn new(spec: ScaleSpec, stretch_tuning: &impl StretchTuning) -> Result<Self, ScaleError> {
        let ScaleSpec {
            temperament,
            root_note,
            reference_note,
            reference_frequency,
            frequency_min,
            frequency_max,
        } = spec;

        let names = temperament
            .note_names(root_note.as_ref())
            .ok_or(ScaleError::NoteNamesUnavailable {
                steps: temperament.size(),
            })?;
        let root_note = names.notes()[0];
        let reference_note = reference_note.unwrap_or_else(|| *names.default_reference_note());

        let note_names = ScaleNoteNames::new(names, reference_note)
            .ok_or(ScaleError::UnknownReferenceNote(reference_note))?;

        let frequencies = ScaleFrequencies::new(
            &temperament.cents(),
            note_names.reference_index_within_names(),
            reference_frequency,
            frequency_min,
            frequency_max,
            stretch_tuning,
        );

        Ok(Self {
            temperament,
            note_names,
            root_note,
            reference_frequency,
            frequency_min,
            frequency_max,
            frequencies,
        })
    }

    pub fn temperament(&self) -> &Temperament {
        &self.temperament
    }

    pub fn root_note(&self) -> &MusicalNote {
        &self.root_note
    }

    pub fn reference_note(&self) -> &MusicalNote {
        self.note_names.reference_note()
    }

    pub fn reference_frequency(&self) -> f64 {
        self.reference_frequency
    }

    pub fn frequency_min(&self) -> f64 {
        self.frequency_min
    }

    pub fn frequency_max(&self) -> f64 {
        self.frequency_max
    }

    pub fn size(&self) -> usize {
        self.temperament.size()
    }

    /// Smallest note index (included).
    pub fn note_index_begin(&self) -> i32 {
        self.frequencies.index_start()
    }

    /// End of the note indices (excluded).
    pub fn note_index_end(&self) -> i32 {
        self.frequencies.index_end()
    }

    /// The named note at the given index (0 = reference note).
    pub fn note(&self, note_index: i32) -> MusicalNote {
        self.note_names.note_of_index(note_index)
    }

    /// Frequency of the note at the given index.
    ///
    /// # Panics
    ///
    /// Panics if `note_index` is outside `note_index_begin()..note_index_end()`.
    pub fn frequency(&self, note_index: i32) -> f64 {
        self.frequencies.at(note_index)
    }

    /// Frequency at a fractional note index, interpolated logarithmically; indices outside
    /// the table are extrapolated. Falls back to the reference frequency when the frequency
    /// window is empty.
    pub fn frequency_fractional(&self, note_index: f64) -> f64 {
        if self.frequencies.is_empty() {
            return self.reference_frequency;
        }
        self.frequencies.at_fractional(note_index)
    }

    /// The (possibly fractional) note index of the given frequency.
    pub fn index_of_frequency(&self, frequency: f64) -> f64 {
        self.frequencies.frequency_index(frequency)
    }

    /// The note index closest to the given frequency, in log-frequency distance.
    pub fn closest_note_index(&self, frequency: f64) -> i32 {
        self.frequencies.closest_index(frequency)
    }

    /// The index of a named note, or `None` if the note is not part of the scale.
    pub fn index_of_note(&self, note: &MusicalNote) -> Option<i32> {
        self.note_names.index_of_note(note)
    }
}

#[cfg(test)]
mod test {
    use assert_approx_eq::assert_approx_eq;

    use crate::note::{MusicalNote, NoteLetter, NoteModifier};
    use crate::temperament;

    use super::*;

    fn edo12_scale() -> MusicalScale {
        MusicalScale::new(
            ScaleSpec::new(temperament::edo(12, -1)).with_frequency_range(16.0, 17000.0),
            &(),
        )
        .unwrap()
    }

    #[test]
    fn reference_resolves_to_a4_and_root_to_c() {
        let scale = edo12_scale();
        assert_eq!(
            *scale.reference_note(),
            MusicalNote::new(NoteLetter::A, NoteModifier::NATURAL).with_octave(4)
        );
        assert_eq!(
            scale.root_note().stem,
            MusicalNote::new(NoteLetter::C, NoteModifier::NATURAL).stem
        );
        assert_eq!(scale.frequency(0), 440.0);
    }

    #[test]
    fn note_indices_carry_octaves() {
        let scale = edo12_scale();

        // the reference A4 sits nine steps above C4
        assert_eq!(
            scale.note(0),
            MusicalNote::new(NoteLetter::A, NoteModifier::NATURAL).with_octave(4)
        );
        assert_eq!(
            scale.note(-9),
            MusicalNote::new(NoteLetter::C, NoteModifier::NATURAL).with_octave(4)
        );
        assert_eq!(
            scale.note(3),
            MusicalNote::new(NoteLetter::C, NoteModifier::NATURAL).with_octave(5)
        );
        assert_eq!(
            scale.note(-21),
            MusicalNote::new(NoteLetter::C, NoteModifier::NATURAL).with_octave(3)
        );
        assert_eq!(scale.note(2).stem.letter, NoteLetter::B);
    }

    #[test]
    fn index_of_note_inverts_note_of_index() {
        let scale = edo12_scale();
        for note_index in scale.note_index_begin()..scale.note_index_end() {
            let note = scale.note(note_index);
            assert_eq!(scale.index_of_note(&note), Some(note_index), "{}", note);
        }
    }

    #[test]
    fn unknown_notes_have_no_index() {
        let scale = edo12_scale();
        // E sharp is not a twelve-tone spelling
        let e_sharp = MusicalNote::new(NoteLetter::E, NoteModifier::SHARP).with_octave(4);
        assert_eq!(scale.index_of_note(&e_sharp), None);
    }

    #[test]
    fn frequencies_follow_equal_temperament() {
        let scale = edo12_scale();
        assert_approx_eq!(scale.frequency(12), 880.0, 1e-9);
        assert_approx_eq!(scale.frequency(-12), 220.0, 1e-9);
        assert_approx_eq!(scale.frequency(3), 523.251130, 1e-5);
        assert_approx_eq!(
            scale.frequency_fractional(0.5),
            440.0 * (50.0 / 1200.0_f64).exp2(),
            1e-6
        );
    }

    #[test]
    fn query_roundtrip_through_frequency() {
        let scale = edo12_scale();
        for note_index in scale.note_index_begin()..scale.note_index_end() {
            let frequency = scale.frequency(note_index);
            assert_eq!(scale.closest_note_index(frequency), note_index);
            assert_approx_eq!(scale.index_of_frequency(frequency), note_index as f64, 1e-9);
        }
    }

    #[test]
    fn empty_window_falls_back_to_the_reference_frequency() {
        let scale = MusicalScale::new(
            ScaleSpec::new(temperament::edo(12, -1)).with_frequency_range(100.0, 50.0),
            &(),
        )
        .unwrap();
        assert_eq!(scale.frequency_fractional(3.0), 440.0);
        assert_eq!(scale.index_of_frequency(440.0), 0.0);
        assert_eq!(scale.closest_note_index(440.0), 0);
    }

    #[test]
    fn oversized_divisions_are_rejected_at_construction() {
        let error = MusicalScale::new(ScaleSpec::new(temperament::edo(96, -1)), &()).unwrap_err();
        assert_eq!(error, ScaleError::NoteNamesUnavailable { steps: 96 });
    }

    #[test]
    fn unknown_reference_note_is_rejected_at_construction() {
        let reference = MusicalNote::new(NoteLetter::E, NoteModifier::SHARP).with_octave(4);
        let error = MusicalScale::new(
            ScaleSpec::new(temperament::edo(12, -1)).with_reference_note(reference),
            &(),
        )
        .unwrap_err();
        assert_eq!(error, ScaleError::UnknownReferenceNote(reference));
    }

    #[test]
    fn root_note_shifts_the_scale_steps() {
        let root = MusicalNote::new(NoteLetter::D, NoteModifier::NATURAL);
        let scale = MusicalScale::new(
            ScaleSpec::new(temperament::edo(12, -1)).with_root_note(root),
            &(),
        )
        .unwrap();

        assert_eq!(scale.root_note().stem, root.stem);
        // reference stays A4 and the octave still increments at C
        assert_eq!(
            scale.note(0),
            MusicalNote::new(NoteLetter::A, NoteModifier::NATURAL).with_octave(4)
        );
        assert_eq!(
            scale.note(3),
            MusicalNote::new(NoteLetter::C, NoteModifier::NATURAL).with_octave(5)
        );
    }

    #[test]
    fn pythagorean_scale_round_trips_notes_and_frequencies() {
        let scale = MusicalScale::new(
            ScaleSpec::new(temperament::pythagorean(-2)),
            &(),
        )
        .unwrap();

        assert_eq!(scale.size(), 12);
        assert_eq!(scale.frequency(0), 440.0);
        // a pure fifth above the octave-below reference
        let e_index = scale.index_of_note(
            &MusicalNote::new(NoteLetter::E, NoteModifier::NATURAL).with_octave(4),
        );
        assert!(e_index.is_some());
        for note_index in scale.note_index_begin()..scale.note_index_end() {
            let note = scale.note(note_index);
            assert_eq!(scale.index_of_note(&note), Some(note_index));
        }
    }
}
