//! Note name tables and the generators deriving them.
//!
//! Two generators are provided: one derives letter/accidental names for an arbitrary equal
//! division of the octave (the algorithm follows the notation scheme of the tall-kite note
//! namer), the other walks letters along a concrete chain of fifths. Both return [`NoteNames`]
//! tables whose stems are later combined with a temperament to label scale steps.

use serde::{Deserialize, Serialize};

use crate::fifths::ChainOfFifths;
use crate::note::{MusicalNote, NoteLetter, NoteModifier, NoteStem};

/// Maximum number of steps per octave for which names can be generated.
///
/// Beyond this the accidental vocabulary (triple flat/sharp combined with triple down/up)
/// is exhausted and the generators answer `None` instead.
pub const MAX_GENERATED_STEPS: usize = 72;

/// An ordered table of note stems covering one octave.
///
/// The stems are cyclically mapped to scale indices with octave carry at
/// `first_note_of_octave`; `default_reference_note` is the stem anchoring the reference
/// frequency (A natural where available). The table is built once per temperament and root
/// note and is immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteNames {
    notes: Vec<MusicalNote>,
    default_reference_note: MusicalNote,
    first_note_of_octave: MusicalNote,
}

impl NoteNames {
    pub fn new(
        notes: Vec<MusicalNote>,
        default_reference_note: MusicalNote,
        first_note_of_octave: MusicalNote,
    ) -> Self {
        Self {
            notes,
            default_reference_note,
            first_note_of_octave,
        }
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn notes(&self) -> &[MusicalNote] {
        &self.notes
    }

    pub fn get(&self, index: usize) -> Option<&MusicalNote> {
        self.notes.get(index)
    }

    pub fn default_reference_note(&self) -> &MusicalNote {
        &self.default_reference_note
    }

    pub fn first_note_of_octave(&self) -> &MusicalNote {
        &self.first_note_of_octave
    }

    /// Index of the stem at which a new octave starts.
    pub fn index_of_first_note_of_octave(&self) -> Option<usize> {
        self.notes
            .iter()
            .position(|note| *note == self.first_note_of_octave)
    }

    /// Index of the given note within the table, ignoring its octave.
    pub fn index_of(&self, note: &MusicalNote) -> Option<usize> {
        self.notes
            .iter()
            .position(|candidate| candidate.equals_ignore_octave(note))
    }

    pub fn contains(&self, note: &MusicalNote) -> bool {
        self.index_of(note).is_some()
    }

    /// Returns a table where every stem is exchanged with its enharmonic spelling.
    pub fn switch_enharmonics(&self) -> NoteNames {
        NoteNames {
            notes: self
                .notes
                .iter()
                .map(|note| note.switch_enharmonic())
                .collect(),
            default_reference_note: self.default_reference_note.switch_enharmonic(),
            first_note_of_octave: self.first_note_of_octave.switch_enharmonic(),
        }
    }
}

/// Returns the stem anchoring the reference frequency within the given names.
///
/// This is the first stem whose primary or enharmonic spelling is A natural, falling back to
/// the first stem of the table. The result carries octave 4 (A4 being the conventional
/// reference).
pub fn find_default_reference_note(notes: &[MusicalNote]) -> MusicalNote {
    notes
        .iter()
        .copied()
        .find(|note| {
            note.stem.is_natural(NoteLetter::A)
                || note
                    .enharmonic
                    .is_some_and(|stem| stem.is_natural(NoteLetter::A))
        })
        .unwrap_or_else(|| {
            notes
                .first()
                .copied()
                .unwrap_or_else(|| MusicalNote::new(NoteLetter::A, NoteModifier::NATURAL))
        })
        .with_octave(4)
}

/// Generates note names for an equal division of the octave into `steps` steps.
///
/// The generated table is rotated such that `root_note` sits at index 0 (an unknown root
/// leaves the order unchanged). Returns `None` for more than [`MAX_GENERATED_STEPS`] steps.
///
/// # Examples
///
/// ```
/// # use temper::note_names::edo_note_names;
/// let names = edo_note_names(12, None).unwrap();
/// assert_eq!(names.len(), 12);
/// assert_eq!(names.get(0).unwrap().to_string(),
///     "MusicalNote(base=C,modifier=None,octave=2147483647,octaveOffset=0,\
///      enharmonicBase=None,enharmonicModifier=None,enharmonicOctaveOffset=0)");
/// assert_eq!(names.default_reference_note().stem.letter, temper::note::NoteLetter::A);
///
/// assert!(edo_note_names(73, None).is_none());
/// ```
pub fn edo_note_names(steps: usize, root_note: Option<&MusicalNote>) -> Option<NoteNames> {
    if steps == 0 || steps > MAX_GENERATED_STEPS {
        return None;
    }
    let mut notes = generate_edo_names(steps)?;
    let default_reference_note = find_default_reference_note(&notes);
    let first_note_of_octave = notes[0];

    if let Some(root_note) = root_note {
        let shift = notes
            .iter()
            .position(|note| note.equals_ignore_octave(root_note))
            .unwrap_or(0);
        notes.rotate_left(shift);
    }
    Some(NoteNames::new(
        notes,
        default_reference_note,
        first_note_of_octave,
    ))
}

/// Returns the notes which may serve as root note of an EDO-named temperament.
pub fn edo_possible_root_notes(steps: usize) -> Vec<MusicalNote> {
    if steps == 0 || steps > MAX_GENERATED_STEPS {
        return Vec::new();
    }
    generate_edo_names(steps).unwrap_or_default()
}

/// Generates note names for a chain-of-fifths temperament by walking letters along the chain.
///
/// Starting from the root name, each step up the chain advances the letter a fifth (raising
/// the sharpness when crossing B–F♯), each step down lowers it (F–B♭). Enharmonic spellings
/// of the root are walked in parallel. The stems are then brought into pitch order using the
/// chain's ratios. Returns `None` when the walk runs out of accidentals (beyond triple
/// sharp/flat).
///
/// # Examples
///
/// ```
/// # use temper::comma::FifthModification;
/// # use temper::fifths::ChainOfFifths;
/// # use temper::note_names::chain_of_fifths_note_names;
/// # use temper::note::{NoteLetter, NoteModifier};
/// let chain = ChainOfFifths::new(vec![FifthModification::default(); 11], 5);
/// let names = chain_of_fifths_note_names(&chain, None).unwrap();
///
/// let letters: Vec<_> = names.notes().iter().map(|n| n.stem.letter).collect();
/// assert_eq!(letters[0], NoteLetter::C);
/// assert_eq!(names.len(), 12);
/// ```
pub fn chain_of_fifths_note_names(
    chain: &ChainOfFifths,
    root_note: Option<&MusicalNote>,
) -> Option<NoteNames> {
    let root_note = root_note
        .copied()
        .unwrap_or_else(|| MusicalNote::new(NoteLetter::C, NoteModifier::NATURAL));

    let size = chain.size();
    let mut names = vec![root_note; size];

    let mut stem = FifthWalker::from_stem(Some(root_note.stem))?;
    let mut enharmonic = FifthWalker::from_stem(root_note.enharmonic)?;
    for i in chain.root_index()..chain.fifths().len() {
        stem = stem.next_fifth();
        enharmonic = enharmonic.next_fifth();
        names[i + 1] = walked_note(stem, enharmonic)?;
    }

    let mut stem = FifthWalker::from_stem(Some(root_note.stem))?;
    let mut enharmonic = FifthWalker::from_stem(root_note.enharmonic)?;
    for i in (0..chain.root_index()).rev() {
        stem = stem.previous_fifth();
        enharmonic = enharmonic.previous_fifth();
        names[i] = walked_note(stem, enharmonic)?;
    }

    let mut ratios_and_names: Vec<_> = chain
        .ratios_along_fifths()
        .into_iter()
        .zip(names)
        .collect();
    ratios_and_names.sort_by(|(a, _), (b, _)| a.total_cmp(b));
    let mut sorted_names: Vec<_> = ratios_and_names.into_iter().map(|(_, name)| name).collect();

    let octave_switch_index = sorted_names
        .iter()
        .enumerate()
        .min_by_key(|(_, note)| octave_switch_measure(note))
        .map(|(index, _)| index)?;
    let first_note_of_octave = sorted_names[octave_switch_index];

    let half_size = (size / 2) as i32;
    for (index, note) in sorted_names.iter_mut().enumerate() {
        let mut relative_to_octave = index as i32 - octave_switch_index as i32;
        if relative_to_octave > half_size {
            relative_to_octave -= size as i32;
        } else if relative_to_octave <= -half_size {
            relative_to_octave += size as i32;
        }

        if relative_to_octave < 0 && note.stem.letter <= NoteLetter::D {
            note.stem.octave_offset = 1;
        } else if relative_to_octave > 0 && note.stem.letter >= NoteLetter::A {
            note.stem.octave_offset = -1;
        }
    }

    let default_reference_note = find_default_reference_note(&sorted_names);
    Some(NoteNames::new(
        sorted_names,
        default_reference_note,
        first_note_of_octave,
    ))
}

/// Returns the notes which may serve as root note of a chain-of-fifths temperament.
pub fn chain_of_fifths_possible_root_notes() -> Vec<MusicalNote> {
    [
        (NoteLetter::C, NoteModifier::NATURAL),
        (NoteLetter::C, NoteModifier::SHARP),
        (NoteLetter::D, NoteModifier::FLAT),
        (NoteLetter::D, NoteModifier::NATURAL),
        (NoteLetter::D, NoteModifier::SHARP),
        (NoteLetter::E, NoteModifier::FLAT),
        (NoteLetter::E, NoteModifier::NATURAL),
        (NoteLetter::F, NoteModifier::NATURAL),
        (NoteLetter::F, NoteModifier::SHARP),
        (NoteLetter::G, NoteModifier::FLAT),
        (NoteLetter::G, NoteModifier::NATURAL),
        (NoteLetter::G, NoteModifier::SHARP),
        (NoteLetter::A, NoteModifier::FLAT),
        (NoteLetter::A, NoteModifier::NATURAL),
        (NoteLetter::A, NoteModifier::SHARP),
        (NoteLetter::B, NoteModifier::FLAT),
        (NoteLetter::B, NoteModifier::NATURAL),
    ]
    .into_iter()
    .map(|(letter, modifier)| MusicalNote::new(letter, modifier))
    .collect()
}

/// A letter with an unbounded sharpness level, walked along the circle of fifths.
///
/// The letter is `None` when walking the (absent) enharmonic spelling of the root.
#[derive(Copy, Clone)]
struct FifthWalker {
    letter: Option<NoteLetter>,
    sharpness: i32,
}

impl FifthWalker {
    fn from_stem(stem: Option<NoteStem>) -> Option<FifthWalker> {
        match stem {
            None => Some(FifthWalker {
                letter: None,
                sharpness: 0,
            }),
            Some(stem) => {
                // chain naming only handles plain sharp/flat root spellings
                if stem.modifier.ups() != 0 {
                    return None;
                }
                Some(FifthWalker {
                    letter: Some(stem.letter),
                    sharpness: stem.modifier.sharpness() as i32,
                })
            }
        }
    }

    fn next_fifth(self) -> FifthWalker {
        let (letter, sharpness) = match self.letter {
            None => (None, self.sharpness),
            Some(NoteLetter::C) => (Some(NoteLetter::G), self.sharpness),
            Some(NoteLetter::D) => (Some(NoteLetter::A), self.sharpness),
            Some(NoteLetter::E) => (Some(NoteLetter::B), self.sharpness),
            Some(NoteLetter::F) => (Some(NoteLetter::C), self.sharpness),
            Some(NoteLetter::G) => (Some(NoteLetter::D), self.sharpness),
            Some(NoteLetter::A) => (Some(NoteLetter::E), self.sharpness),
            Some(NoteLetter::B) => (Some(NoteLetter::F), self.sharpness + 1),
        };
        FifthWalker { letter, sharpness }
    }

    fn previous_fifth(self) -> FifthWalker {
        let (letter, sharpness) = match self.letter {
            None => (None, self.sharpness),
            Some(NoteLetter::C) => (Some(NoteLetter::F), self.sharpness),
            Some(NoteLetter::D) => (Some(NoteLetter::G), self.sharpness),
            Some(NoteLetter::E) => (Some(NoteLetter::A), self.sharpness),
            Some(NoteLetter::F) => (Some(NoteLetter::B), self.sharpness - 1),
            Some(NoteLetter::G) => (Some(NoteLetter::C), self.sharpness),
            Some(NoteLetter::A) => (Some(NoteLetter::D), self.sharpness),
            Some(NoteLetter::B) => (Some(NoteLetter::E), self.sharpness),
        };
        FifthWalker { letter, sharpness }
    }

    fn modifier(self) -> Option<NoteModifier> {
        NoteModifier::new(i8::try_from(self.sharpness).ok()?, 0)
    }
}

fn walked_note(stem: FifthWalker, enharmonic: FifthWalker) -> Option<MusicalNote> {
    let letter = stem.letter?;
    let mut note = MusicalNote::new(letter, stem.modifier()?);
    if let Some(enharmonic_letter) = enharmonic.letter {
        note = note.with_enharmonic(NoteStem::new(enharmonic_letter, enharmonic.modifier()?));
    }
    Some(note)
}

fn octave_switch_measure(note: &MusicalNote) -> i64 {
    let measure =
        10_000 * note.stem.letter.index() as i64 + note.stem.modifier.sharpness() as i64;
    if measure >= 0 {
        measure
    } else {
        // wrap spellings below C (e.g. Cb) past the end of the octave
        measure + 120_000
    }
}

/// Type of diatonic second between two neighboring letters.
#[derive(Copy, Clone, PartialEq)]
enum Second {
    Major,
    Minor,
}

const LETTER_STEPS: [(NoteLetter, NoteLetter, Second); 7] = [
    (NoteLetter::C, NoteLetter::D, Second::Major),
    (NoteLetter::D, NoteLetter::E, Second::Major),
    (NoteLetter::E, NoteLetter::F, Second::Minor),
    (NoteLetter::F, NoteLetter::G, Second::Major),
    (NoteLetter::G, NoteLetter::A, Second::Major),
    (NoteLetter::A, NoteLetter::B, Second::Major),
    (NoteLetter::B, NoteLetter::C, Second::Minor),
];

#[derive(Copy, Clone)]
struct ExtendedModifier {
    sharpness: i32,
    ups: i32,
}

impl ExtendedModifier {
    fn complexity(self) -> i32 {
        self.sharpness.abs() + self.ups.abs()
    }

    fn to_note_modifier(self) -> Option<NoteModifier> {
        NoteModifier::new(
            i8::try_from(self.sharpness).ok()?,
            i8::try_from(self.ups).ok()?,
        )
    }
}

/// The name candidates of one subdivision position within a diatonic second.
#[derive(Copy, Clone)]
enum SecondStepName {
    /// Named from the lower of the two letters.
    Lower(NoteModifier),
    /// Named from the upper letter (the lower-anchored spelling was more complex).
    Upper(NoteModifier),
    /// Both spellings are equally simple; the lower one is primary, the upper the enharmonic.
    Both {
        lower: NoteModifier,
        upper: NoteModifier,
    },
}

/// Computes the names of the `num_steps` subdivision positions of one diatonic second.
///
/// Walking up from the lower letter, an "ups" counter is incremented until it would exceed
/// half an augmented prime (`aug1` scale steps); then the walk switches to the next sharpness
/// level. The upper half of the interval mirrors the lower half anchored at the upper letter.
fn second_interval_names(num_steps: i32, aug1: i32) -> Option<Vec<SecondStepName>> {
    if num_steps <= 0 {
        return Some(Vec::new());
    }

    let max_ups = (aug1 / 2).abs();
    let mut sharpness = 0;
    let mut ups = 0;
    let mut modifiers = Vec::with_capacity((num_steps - 1) as usize);
    for _ in 0..num_steps - 1 {
        ups += 1;
        if ups > max_ups {
            ups -= aug1.abs();
            sharpness += aug1.signum();
        }
        modifiers.push(ExtendedModifier { sharpness, ups });
    }

    let mut names = Vec::with_capacity(num_steps as usize);
    names.push(SecondStepName::Lower(NoteModifier::NATURAL));
    for i in 1..num_steps as usize {
        let lower = modifiers[i - 1];
        let mirrored = modifiers[modifiers.len() - i];
        let upper = ExtendedModifier {
            sharpness: -mirrored.sharpness,
            ups: -mirrored.ups,
        };

        let name = if lower.complexity() > upper.complexity() {
            SecondStepName::Upper(upper.to_note_modifier()?)
        } else if upper.complexity() > lower.complexity() {
            SecondStepName::Lower(lower.to_note_modifier()?)
        } else {
            SecondStepName::Both {
                lower: lower.to_note_modifier()?,
                upper: upper.to_note_modifier()?,
            }
        };
        names.push(name);
    }

    Some(names)
}

fn generate_edo_names(steps: usize) -> Option<Vec<MusicalNote>> {
    // 6 and 8 steps have degenerate fifths; decimate the 12- and 24-step results instead
    if steps == 6 {
        let names = generate_edo_names(12)?;
        return Some((0..6).map(|i| names[2 * i + 1]).collect());
    }
    if steps == 8 {
        let names = generate_edo_names(24)?;
        return Some((0..8).map(|i| names[3 * i]).collect());
    }

    let steps = steps as i32;
    let fifth_fit = (steps as f64 * 1.5f64.log2()).round() as i32;
    let fifth = if 5 * fifth_fit > 3 * steps {
        fifth_fit - 1
    } else {
        fifth_fit
    };

    let major_second = 2 * fifth - steps;
    let minor_second = 3 * steps - 5 * fifth;
    // scale steps of an augmented prime, e.g. from C to C sharp
    let aug1 = 7 * fifth - 4 * steps;

    let major_second_names = second_interval_names(major_second, aug1)?;
    let minor_second_names = second_interval_names(minor_second, aug1)?;

    let mut names = Vec::with_capacity(steps as usize);
    let mut last_step = LETTER_STEPS[LETTER_STEPS.len() - 1];
    for step in LETTER_STEPS {
        let (from, to, second) = step;
        let step_names = match second {
            Second::Major => &major_second_names,
            Second::Minor => &minor_second_names,
        };
        let last_step_names = match last_step.2 {
            Second::Major => &major_second_names,
            Second::Minor => &minor_second_names,
        };

        for (index, name) in step_names.iter().enumerate() {
            if index == 0 && last_step_names.is_empty() {
                // the previous second collapsed to nothing, so its two letters coincide here
                let octave_offset = if last_step.1 == NoteLetter::C { -1 } else { 0 };
                names.push(
                    MusicalNote::from_stem(
                        NoteStem::new(last_step.0, NoteModifier::NATURAL)
                            .with_octave_offset(octave_offset),
                    )
                    .with_enharmonic(NoteStem::new(last_step.1, NoteModifier::NATURAL)),
                );
            } else {
                let (primary, enharmonic) = match *name {
                    SecondStepName::Lower(modifier) => ((from, modifier), None),
                    SecondStepName::Upper(modifier) => ((to, modifier), None),
                    SecondStepName::Both { lower, upper } => ((from, lower), Some((to, upper))),
                };

                let mut primary_stem = NoteStem::new(primary.0, primary.1);
                let mut enharmonic_stem =
                    enharmonic.map(|(letter, modifier)| NoteStem::new(letter, modifier));
                if to == NoteLetter::C {
                    if primary_stem.letter == to {
                        primary_stem = primary_stem.with_octave_offset(1);
                    } else if let Some(stem) = enharmonic_stem {
                        if stem.letter == to {
                            enharmonic_stem = Some(stem.with_octave_offset(1));
                        }
                    }
                }

                let mut note = MusicalNote::from_stem(primary_stem);
                if let Some(stem) = enharmonic_stem {
                    note = note.with_enharmonic(stem);
                }
                names.push(note);
            }
        }
        last_step = step;
    }

    // degenerate divisions (fewer than five steps) can miss the diatonic frame entirely
    if names.len() != steps as usize {
        return None;
    }

    Some(names)
}
