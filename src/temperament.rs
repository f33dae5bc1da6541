//! The temperament variants and the catalog of predefined temperaments.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::comma::FifthModification;
use crate::fifths::ChainOfFifths;
use crate::note::MusicalNote;
use crate::note_names::{self, NoteNames};
use crate::ratio_to_cents;
use crate::rational::Rational;

/// Stable id of a temperament which has not been persisted yet.
///
/// Negative ids are reserved for the built-in temperaments of [`builtin_temperaments`].
pub const NO_STABLE_ID: i64 = i64::MAX;

/// A piece of display text which is either given literally or resolved by an external
/// localization lookup. This crate never resolves locale text itself.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum DisplayText {
    /// Literal text, shown as is.
    Plain(Cow<'static, str>),
    /// Key into an external localized string table.
    Resource(Cow<'static, str>),
    /// Key into an external localized string table, parameterized by a count
    /// (e.g. the number of notes of an equal temperament).
    ResourceWithCount(Cow<'static, str>, u16),
}

impl DisplayText {
    pub fn plain(text: impl Into<Cow<'static, str>>) -> Self {
        DisplayText::Plain(text.into())
    }

    pub fn resource(key: impl Into<Cow<'static, str>>) -> Self {
        DisplayText::Resource(key.into())
    }
}

/// A tuning system definition: how one octave divides into scale steps.
///
/// Each variant can produce its interval structure in cents (always `size() + 1` values,
/// starting at 0 and ending on the octave), and generates the note names labeling its steps.
/// Rational ratios and chain-of-fifths structure are exposed where the defining data carries
/// them.
///
/// # Examples
///
/// ```
/// # use assert_approx_eq::assert_approx_eq;
/// # use temper::temperament;
/// let edo12 = temperament::edo(12, -1);
/// let cents = edo12.cents();
/// assert_eq!(cents.len(), 13);
/// assert_approx_eq!(cents[1], 100.0);
/// assert_eq!(edo12.equal_octave_division(), Some(12));
/// assert!(edo12.chain_of_fifths().is_some());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Temperament {
    /// Equal division of the octave.
    Edo(EdoTemperament),
    /// Chain-of-fifths definition, named by walking letters along the chain.
    FifthChain(FifthChainTemperament),
    /// Chain-of-fifths definition, named like the equally divided octave of the same size.
    FifthChainEdoNames(FifthChainTemperament),
    /// A list of rational frequency ratios.
    RationalList(RationalListTemperament),
    /// A user-edited temperament.
    Custom(CustomTemperament),
}

impl Temperament {
    pub fn name(&self) -> DisplayText {
        match self {
            Temperament::Edo(edo) => edo.text_with_count("equal_temperament_x"),
            Temperament::FifthChain(chain) | Temperament::FifthChainEdoNames(chain) => {
                chain.name.clone()
            }
            Temperament::RationalList(list) => list.name.clone(),
            Temperament::Custom(custom) => DisplayText::plain(custom.name.clone()),
        }
    }

    pub fn abbreviation(&self) -> DisplayText {
        match self {
            Temperament::Edo(edo) => edo.text_with_count("equal_temperament_x_abbr"),
            Temperament::FifthChain(chain) | Temperament::FifthChainEdoNames(chain) => {
                chain.abbreviation.clone()
            }
            Temperament::RationalList(list) => list.abbreviation.clone(),
            Temperament::Custom(custom) => DisplayText::plain(custom.abbreviation.clone()),
        }
    }

    pub fn description(&self) -> DisplayText {
        match self {
            Temperament::Edo(edo) => edo.text_with_count("equal_temperament_x_desc"),
            Temperament::FifthChain(chain) | Temperament::FifthChainEdoNames(chain) => {
                chain.description.clone()
            }
            Temperament::RationalList(list) => list.description.clone(),
            Temperament::Custom(custom) => DisplayText::plain(custom.description.clone()),
        }
    }

    pub fn stable_id(&self) -> i64 {
        match self {
            Temperament::Edo(edo) => edo.stable_id,
            Temperament::FifthChain(chain) | Temperament::FifthChainEdoNames(chain) => {
                chain.stable_id
            }
            Temperament::RationalList(list) => list.stable_id,
            Temperament::Custom(custom) => custom.stable_id,
        }
    }

    /// Number of notes per octave.
    pub fn size(&self) -> usize {
        match self {
            Temperament::Edo(edo) => edo.steps as usize,
            Temperament::FifthChain(chain) | Temperament::FifthChainEdoNames(chain) => {
                chain.chain.size()
            }
            Temperament::RationalList(list) => list.ratios.len() - 1,
            Temperament::Custom(custom) => custom.cents.len() - 1,
        }
    }

    /// The interval structure in cents, including the octave value (`size() + 1` entries).
    pub fn cents(&self) -> Vec<f64> {
        match self {
            Temperament::Edo(edo) => (0..=edo.steps)
                .map(|i| f64::from(i) * 1200.0 / f64::from(edo.steps))
                .collect(),
            Temperament::FifthChain(chain) | Temperament::FifthChainEdoNames(chain) => {
                let mut cents: Vec<f64> = chain
                    .chain
                    .sorted_ratios()
                    .into_iter()
                    .map(ratio_to_cents)
                    .collect();
                cents.push(1200.0);
                cents
            }
            Temperament::RationalList(list) => list
                .ratios
                .iter()
                .map(|ratio| ratio_to_cents(ratio.as_float()))
                .collect(),
            Temperament::Custom(custom) => custom.cents.clone(),
        }
    }

    /// The frequency ratios of the scale steps, if the temperament defines them as rational
    /// numbers (including the octave ratio).
    pub fn rational_numbers(&self) -> Option<Vec<Rational>> {
        match self {
            Temperament::RationalList(list) => Some(list.ratios.clone()),
            Temperament::Custom(custom) => {
                custom.ratios.iter().copied().collect::<Option<Vec<_>>>()
            }
            _ => None,
        }
    }

    /// The chain-of-fifths structure, if the temperament is defined by one. 12-EDO reports
    /// its equivalent chain of eleven 1/12-Pythagorean-comma tempered fifths.
    pub fn chain_of_fifths(&self) -> Option<ChainOfFifths> {
        match self {
            Temperament::Edo(edo) if edo.steps == 12 => Some(ChainOfFifths::new(
                vec![
                    FifthModification::from_pythagorean(Rational::new(-1, 12));
                    11
                ],
                0,
            )),
            Temperament::FifthChain(chain) | Temperament::FifthChainEdoNames(chain) => {
                Some(chain.chain.clone())
            }
            _ => None,
        }
    }

    /// Number of notes per octave if the temperament is an equal division, else `None`.
    pub fn equal_octave_division(&self) -> Option<u16> {
        match self {
            Temperament::Edo(edo) => Some(edo.steps),
            _ => None,
        }
    }

    /// The notes which may serve as root note (the note of the first scale step).
    pub fn possible_root_notes(&self) -> Vec<MusicalNote> {
        match self {
            Temperament::Edo(edo) => note_names::edo_possible_root_notes(edo.steps as usize),
            Temperament::FifthChain(_) => note_names::chain_of_fifths_possible_root_notes(),
            Temperament::FifthChainEdoNames(chain) => {
                note_names::edo_possible_root_notes(chain.chain.size())
            }
            Temperament::RationalList(list) => {
                note_names::edo_possible_root_notes(list.ratios.len() - 1)
            }
            Temperament::Custom(custom) => match custom.valid_note_names() {
                Some(names) => names.to_vec(),
                None => note_names::edo_possible_root_notes(custom.cents.len() - 1),
            },
        }
    }

    /// The note names labeling the scale steps, with `root_note` as the first step.
    ///
    /// The octave repeat carries no name of its own, so the result has `size()` entries.
    /// `None` is returned when no names can be generated (more steps than the notation
    /// vocabulary supports, see [`note_names::MAX_GENERATED_STEPS`]).
    pub fn note_names(&self, root_note: Option<&MusicalNote>) -> Option<NoteNames> {
        match self {
            Temperament::Edo(edo) => note_names::edo_note_names(edo.steps as usize, root_note),
            Temperament::FifthChain(chain) => {
                note_names::chain_of_fifths_note_names(&chain.chain, root_note)
            }
            Temperament::FifthChainEdoNames(chain) => {
                note_names::edo_note_names(chain.chain.size(), root_note)
            }
            Temperament::RationalList(list) => {
                note_names::edo_note_names(list.ratios.len() - 1, root_note)
            }
            Temperament::Custom(custom) => custom.note_names(root_note),
        }
    }
}

/// Equal division of the octave into `steps` equal steps.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdoTemperament {
    steps: u16,
    stable_id: i64,
}

impl EdoTemperament {
    pub fn new(steps: u16, stable_id: i64) -> Self {
        assert!(steps > 0, "equal division needs at least one step");
        Self { steps, stable_id }
    }

    pub fn steps(&self) -> u16 {
        self.steps
    }

    fn text_with_count(&self, key: &'static str) -> DisplayText {
        DisplayText::ResourceWithCount(Cow::Borrowed(key), self.steps)
    }
}

/// A temperament defined by a chain of tempered fifths.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FifthChainTemperament {
    name: DisplayText,
    abbreviation: DisplayText,
    description: DisplayText,
    chain: ChainOfFifths,
    stable_id: i64,
}

impl FifthChainTemperament {
    pub fn new(
        name: DisplayText,
        abbreviation: DisplayText,
        description: DisplayText,
        chain: ChainOfFifths,
        stable_id: i64,
    ) -> Self {
        Self {
            name,
            abbreviation,
            description,
            chain,
            stable_id,
        }
    }

    pub fn chain(&self) -> &ChainOfFifths {
        &self.chain
    }
}

/// A temperament defined by a list of rational frequency ratios (including the octave).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RationalListTemperament {
    name: DisplayText,
    abbreviation: DisplayText,
    description: DisplayText,
    ratios: Vec<Rational>,
    stable_id: i64,
}

impl RationalListTemperament {
    /// # Panics
    ///
    /// The ratio list must contain at least the unison and the octave entry.
    pub fn new(
        name: DisplayText,
        abbreviation: DisplayText,
        description: DisplayText,
        ratios: Vec<Rational>,
        stable_id: i64,
    ) -> Self {
        assert!(
            ratios.len() >= 2,
            "ratio list must include unison and octave"
        );
        Self {
            name,
            abbreviation,
            description,
            ratios,
            stable_id,
        }
    }

    pub fn ratios(&self) -> &[Rational] {
        &self.ratios
    }
}

/// A user-edited temperament with per-step cent or ratio values and optional note names.
///
/// Per step, a given ratio takes precedence over the given cent value. Tables with undefined
/// steps cannot be represented here; they live in
/// [`EditableTemperament`](crate::editable::EditableTemperament) until completed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CustomTemperament {
    name: String,
    abbreviation: String,
    description: String,
    /// Resolved cent values, including the octave entry.
    cents: Vec<f64>,
    /// Rational ratios where given, aligned with `cents`.
    ratios: Vec<Option<Rational>>,
    /// User note names (one octave, without the octave repeat), if the user provided any.
    note_names: Option<Vec<MusicalNote>>,
    stable_id: i64,
}

impl CustomTemperament {
    /// Creates a custom temperament from per-step values.
    ///
    /// `cents` must include the octave entry; `ratios` is aligned with it and a given ratio
    /// overrides the cent value of its step.
    ///
    /// # Panics
    ///
    /// Panics if `ratios` is not aligned with `cents` or fewer than two steps are given.
    pub fn new(
        name: impl Into<String>,
        abbreviation: impl Into<String>,
        description: impl Into<String>,
        cents: Vec<f64>,
        ratios: Vec<Option<Rational>>,
        note_names: Option<Vec<MusicalNote>>,
        stable_id: i64,
    ) -> Self {
        assert!(cents.len() >= 2, "temperament must include unison and octave");
        assert_eq!(
            cents.len(),
            ratios.len(),
            "ratio table must align with cent table"
        );
        let cents = cents
            .into_iter()
            .zip(&ratios)
            .map(|(cent, ratio)| match ratio {
                Some(ratio) => ratio_to_cents(ratio.as_float()),
                None => cent,
            })
            .collect();
        Self {
            name: name.into(),
            abbreviation: abbreviation.into(),
            description: description.into(),
            cents,
            ratios,
            note_names,
            stable_id,
        }
    }

    fn valid_note_names(&self) -> Option<&[MusicalNote]> {
        match &self.note_names {
            Some(names) if names.len() == self.cents.len() - 1 => Some(names),
            _ => None,
        }
    }

    fn note_names(&self, root_note: Option<&MusicalNote>) -> Option<NoteNames> {
        let names = match self.valid_note_names() {
            None => {
                return note_names::edo_note_names(self.cents.len() - 1, root_note);
            }
            Some(names) => names,
        };

        let default_reference_note = note_names::find_default_reference_note(names);
        let first_note_of_octave = names[0];
        let mut notes = names.to_vec();
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
}

/// Creates an equal division of the octave into `steps` steps.
pub fn edo(steps: u16, stable_id: i64) -> Temperament {
    Temperament::Edo(EdoTemperament::new(steps, stable_id))
}

fn chain_temperament(
    key: &'static str,
    description: DisplayText,
    fifths: Vec<FifthModification>,
    root_index: usize,
    stable_id: i64,
) -> FifthChainTemperament {
    FifthChainTemperament::new(
        DisplayText::resource(key),
        DisplayText::resource(format!("{}_abbr", key)),
        description,
        ChainOfFifths::new(fifths, root_index),
        stable_id,
    )
}

fn syntonic_fifths(amount: Rational, count: usize) -> Vec<FifthModification> {
    vec![FifthModification::from_syntonic(amount); count]
}

fn pythagorean_fifths(twelfths: &[i64]) -> Vec<FifthModification> {
    fifths_of(twelfths, 12)
}

fn fifths_of(numerators: &[i64], denom: i64) -> Vec<FifthModification> {
    numerators
        .iter()
        .map(|&numer| {
            if numer == 0 {
                FifthModification::default()
            } else {
                FifthModification::from_pythagorean(Rational::new(numer, denom))
            }
        })
        .collect()
}

/// Pythagorean tuning: eleven pure fifths from D flat to F sharp.
pub fn pythagorean(stable_id: i64) -> Temperament {
    Temperament::FifthChain(chain_temperament(
        "pythagorean_tuning",
        DisplayText::plain(""),
        vec![FifthModification::default(); 11],
        5,
        stable_id,
    ))
}

/// Pure (just) intonation based on 5-limit ratios.
pub fn pure(stable_id: i64) -> Temperament {
    Temperament::RationalList(RationalListTemperament::new(
        DisplayText::resource("pure_tuning"),
        DisplayText::resource("pure_tuning_abbr"),
        DisplayText::resource("pure_tuning_desc"),
        [
            (1, 1),
            (16, 15),
            (9, 8),
            (6, 5),
            (5, 4),
            (4, 3),
            (45, 32),
            (3, 2),
            (8, 5),
            (5, 3),
            (9, 5),
            (15, 8),
            (2, 1),
        ]
        .into_iter()
        .map(|(numer, denom)| Rational::new(numer, denom))
        .collect(),
        stable_id,
    ))
}

/// Quarter-comma meantone: eleven fifths narrowed by 1/4 syntonic comma, pure major thirds.
pub fn quarter_comma_meantone(stable_id: i64) -> Temperament {
    Temperament::FifthChain(chain_temperament(
        "quarter_comma_mean_tone",
        DisplayText::resource("quarter_comma_mean_tone_desc"),
        syntonic_fifths(Rational::new(-1, 4), 11),
        3,
        stable_id,
    ))
}

/// Quarter-comma meantone extended to 15 notes per octave.
pub fn extended_quarter_comma_meantone(stable_id: i64) -> Temperament {
    Temperament::FifthChain(chain_temperament(
        "extended_quarter_comma_mean_tone",
        DisplayText::resource("extended_quarter_comma_mean_tone_desc"),
        syntonic_fifths(Rational::new(-1, 4), 14),
        4,
        stable_id,
    ))
}

/// Third-comma meantone: fifths narrowed by 1/3 syntonic comma, pure minor thirds.
pub fn third_comma_meantone(stable_id: i64) -> Temperament {
    Temperament::FifthChain(chain_temperament(
        "third_comma_mean_tone",
        DisplayText::resource("third_comma_mean_tone_desc"),
        syntonic_fifths(Rational::new(-1, 3), 11),
        3,
        stable_id,
    ))
}

/// Fifth-comma meantone: fifths narrowed by 1/5 syntonic comma.
pub fn fifth_comma_meantone(stable_id: i64) -> Temperament {
    Temperament::FifthChain(chain_temperament(
        "fifth_comma_mean_tone",
        DisplayText::resource("fifth_comma_mean_tone_desc"),
        syntonic_fifths(Rational::new(-1, 5), 11),
        3,
        stable_id,
    ))
}

/// Werckmeister III (1691): four fifths narrowed by 1/4 Pythagorean comma.
pub fn werckmeister_iii(stable_id: i64) -> Temperament {
    Temperament::FifthChainEdoNames(chain_temperament(
        "werckmeister_iii",
        DisplayText::resource("werckmeister_iii_desc"),
        fifths_of(&[-1, -1, -1, 0, 0, -1, 0, 0, 0, 0, 0], 4),
        0,
        stable_id,
    ))
}

/// Werckmeister IV (1691): alternating 1/3-comma tempered and pure fifths.
pub fn werckmeister_iv(stable_id: i64) -> Temperament {
    Temperament::FifthChainEdoNames(chain_temperament(
        "werckmeister_iv",
        DisplayText::resource("werckmeister_iv_desc"),
        fifths_of(&[-1, 0, -1, 0, -1, 0, -1, 0, 1, 1, -1], 3),
        0,
        stable_id,
    ))
}

/// Werckmeister V (1691).
pub fn werckmeister_v(stable_id: i64) -> Temperament {
    Temperament::FifthChainEdoNames(chain_temperament(
        "werckmeister_v",
        DisplayText::resource("werckmeister_v_desc"),
        fifths_of(&[0, 0, -1, -1, 0, 0, -1, -1, 1, 0, 0], 4),
        0,
        stable_id,
    ))
}

/// Werckmeister VI, the "septenarius" tuning derived from a string length of 196.
pub fn werckmeister_vi(stable_id: i64) -> Temperament {
    let mut ratios = vec![Rational::ONE];
    ratios.extend(
        [186, 175, 165, 156, 147, 139, 131, 124, 117, 110, 104]
            .into_iter()
            .map(|denom| Rational::new(196, denom)),
    );
    ratios.push(Rational::new(2, 1));
    Temperament::RationalList(RationalListTemperament::new(
        DisplayText::resource("werckmeister_vi"),
        DisplayText::resource("werckmeister_vi_abbr"),
        DisplayText::resource("werckmeister_vi_desc"),
        ratios,
        stable_id,
    ))
}

/// Kirnberger I: one fifth narrowed by a full syntonic comma, one by a schisma.
pub fn kirnberger1(stable_id: i64) -> Temperament {
    let mut fifths = vec![FifthModification::default(); 11];
    fifths[2] = FifthModification::from_syntonic(Rational::new(-1, 1));
    fifths[6] = FifthModification::from_schisma(Rational::new(-1, 1));
    Temperament::FifthChainEdoNames(chain_temperament(
        "kirnberger1",
        DisplayText::resource("kirnberger1_desc"),
        fifths,
        0,
        stable_id,
    ))
}

/// Kirnberger II: the syntonic comma split over two fifths.
pub fn kirnberger2(stable_id: i64) -> Temperament {
    let mut fifths = vec![FifthModification::default(); 11];
    fifths[2] = FifthModification::from_syntonic(Rational::new(-1, 2));
    fifths[3] = FifthModification::from_syntonic(Rational::new(-1, 2));
    fifths[6] = FifthModification::from_schisma(Rational::new(-1, 1));
    Temperament::FifthChainEdoNames(chain_temperament(
        "kirnberger2",
        DisplayText::resource("kirnberger2_desc"),
        fifths,
        0,
        stable_id,
    ))
}

/// Kirnberger III: the syntonic comma split over four fifths.
pub fn kirnberger3(stable_id: i64) -> Temperament {
    let mut fifths = vec![FifthModification::default(); 11];
    for fifth in fifths.iter_mut().take(4) {
        *fifth = FifthModification::from_syntonic(Rational::new(-1, 4));
    }
    fifths[6] = FifthModification::from_schisma(Rational::new(-1, 1));
    Temperament::FifthChainEdoNames(chain_temperament(
        "kirnberger3",
        DisplayText::resource("kirnberger3_desc"),
        fifths,
        0,
        stable_id,
    ))
}

/// Neidhardt I ("für ein Dorf", 1732).
pub fn neidhardt1(stable_id: i64) -> Temperament {
    Temperament::FifthChainEdoNames(chain_temperament(
        "neidhardt1",
        DisplayText::resource("neidhardt1_desc"),
        pythagorean_fifths(&[-1, -2, -3, -3, 0, -1, 0, -1, 0, 0, -1]),
        0,
        stable_id,
    ))
}

/// Neidhardt II ("für ein Dorf" 1724, "für eine kleine Stadt" 1732).
pub fn neidhardt2(stable_id: i64) -> Temperament {
    Temperament::FifthChainEdoNames(chain_temperament(
        "neidhardt2",
        DisplayText::resource("neidhardt2_desc"),
        pythagorean_fifths(&[-2, -2, -2, -2, -1, -1, 0, 0, -1, -1, 0]),
        0,
        stable_id,
    ))
}

/// Neidhardt III ("für eine kleine Stadt" 1724, "für eine große Stadt" 1732).
pub fn neidhardt3(stable_id: i64) -> Temperament {
    Temperament::FifthChainEdoNames(chain_temperament(
        "neidhardt3",
        DisplayText::resource("neidhardt3_desc"),
        pythagorean_fifths(&[-2, -2, -2, -1, 0, -1, -1, -1, 0, 0, -1]),
        0,
        stable_id,
    ))
}

/// Vallotti (1754): six fifths narrowed by 1/6 Pythagorean comma.
pub fn vallotti(stable_id: i64) -> Temperament {
    Temperament::FifthChainEdoNames(chain_temperament(
        "valotti",
        DisplayText::plain(""),
        pythagorean_fifths(&[-2, -2, -2, -2, -2, 0, 0, 0, 0, 0, 0]),
        0,
        stable_id,
    ))
}

/// Young II (1800).
pub fn young2(stable_id: i64) -> Temperament {
    Temperament::FifthChainEdoNames(chain_temperament(
        "young2",
        DisplayText::plain(""),
        pythagorean_fifths(&[-2, -2, -2, -2, -2, -2, 0, 0, 0, 0, 0]),
        0,
        stable_id,
    ))
}

/// The built-in temperaments, with stable ids -1, -2, … in listing order.
pub fn builtin_temperaments() -> Vec<Temperament> {
    let factories: [fn(i64) -> Temperament; 19] = [
        |id| edo(12, id),
        pythagorean,
        pure,
        quarter_comma_meantone,
        extended_quarter_comma_meantone,
        third_comma_meantone,
        fifth_comma_meantone,
        werckmeister_iii,
        werckmeister_iv,
        werckmeister_v,
        werckmeister_vi,
        kirnberger1,
        kirnberger2,
        kirnberger3,
        neidhardt1,
        neidhardt2,
        neidhardt3,
        vallotti,
        young2,
    ];

    factories
        .iter()
        .enumerate()
        .map(|(index, factory)| factory(-1 - index as i64))
        .collect()
}

#[cfg(test)]
mod test {
    use assert_approx_eq::assert_approx_eq;

    use crate::note::{NoteLetter, NoteModifier};

    use super::*;

    #[test]
    fn edo_cents_are_equally_spaced() {
        let temperament = edo(19, NO_STABLE_ID);
        let cents = temperament.cents();
        assert_eq!(cents.len(), 20);
        for (i, cent) in cents.iter().enumerate() {
            assert_approx_eq!(cent, i as f64 * 1200.0 / 19.0);
        }
        assert_eq!(temperament.size(), 19);
        assert_eq!(temperament.equal_octave_division(), Some(19));
        assert_eq!(temperament.rational_numbers(), None);
    }

    #[test]
    fn twelve_edo_reports_its_chain_of_fifths() {
        let chain = edo(12, NO_STABLE_ID).chain_of_fifths().unwrap();
        assert_eq!(chain.size(), 12);
        assert_eq!(
            chain.fifths()[0],
            FifthModification::from_pythagorean(Rational::new(-1, 12))
        );
        assert!(edo(19, NO_STABLE_ID).chain_of_fifths().is_none());
    }

    #[test]
    fn all_cents_tables_are_strictly_increasing_and_span_the_octave() {
        for temperament in builtin_temperaments() {
            let cents = temperament.cents();
            assert_eq!(cents.len(), temperament.size() + 1);
            assert_approx_eq!(cents[0], 0.0);
            assert_approx_eq!(cents[cents.len() - 1], 1200.0, 1e-6);
            for window in cents.windows(2) {
                assert!(
                    window[0] < window[1],
                    "cents not increasing for {:?}",
                    temperament.name()
                );
            }
        }
    }

    #[test]
    fn builtin_ids_are_negative_and_unique() {
        let temperaments = builtin_temperaments();
        for (index, temperament) in temperaments.iter().enumerate() {
            assert_eq!(temperament.stable_id(), -1 - index as i64);
        }
    }

    #[test]
    fn builtin_temperaments_have_note_names() {
        for temperament in builtin_temperaments() {
            let names = temperament.note_names(None).unwrap();
            assert_eq!(names.len(), temperament.size());
            let roots = temperament.possible_root_notes();
            assert!(!roots.is_empty());
        }
    }

    #[test]
    fn pure_tuning_exposes_its_ratios() {
        let ratios = pure(-1).rational_numbers().unwrap();
        assert_eq!(ratios[0], Rational::ONE);
        assert_eq!(ratios[7], Rational::new(3, 2));
        assert_eq!(ratios[12], Rational::new(2, 1));
    }

    #[test]
    fn werckmeister_vi_ratio_list_matches_the_septenarius_numbers() {
        let ratios = werckmeister_vi(-1).rational_numbers().unwrap();
        assert_eq!(ratios.len(), 13);
        assert_eq!(ratios[0], Rational::ONE);
        assert_eq!(ratios[1], Rational::new(196, 186));
        assert_eq!(ratios[11], Rational::new(196, 104));
        assert_eq!(ratios[12], Rational::new(2, 1));
    }

    #[test]
    fn quarter_comma_meantone_has_pure_major_thirds() {
        let cents = quarter_comma_meantone(-1).cents();
        // C to E, four meantone fifths, is a pure 5/4 third
        assert_approx_eq!(cents[4], ratio_to_cents(1.25), 1e-9);
    }

    #[test]
    fn custom_temperament_prefers_ratios_over_cents() {
        let custom = CustomTemperament::new(
            "custom",
            "cst",
            "",
            vec![0.0, 95.0, 1200.0],
            vec![None, Some(Rational::new(9, 8)), None],
            None,
            NO_STABLE_ID,
        );
        let temperament = Temperament::Custom(custom);
        let cents = temperament.cents();
        assert_approx_eq!(cents[1], ratio_to_cents(9.0 / 8.0), 1e-12);
        // not all steps carry ratios
        assert_eq!(temperament.rational_numbers(), None);
    }

    #[test]
    fn custom_temperament_falls_back_to_generated_names() {
        let custom = Temperament::Custom(CustomTemperament::new(
            "custom",
            "cst",
            "",
            vec![0.0, 700.0, 1200.0],
            vec![None, None, None],
            None,
            NO_STABLE_ID,
        ));
        let names = custom.note_names(None).unwrap();
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn custom_temperament_rotates_user_names_to_the_root() {
        let user_names: Vec<_> = [NoteLetter::C, NoteLetter::E, NoteLetter::G]
            .into_iter()
            .map(|letter| MusicalNote::new(letter, NoteModifier::NATURAL))
            .collect();
        let custom = Temperament::Custom(CustomTemperament::new(
            "custom",
            "cst",
            "",
            vec![0.0, 400.0, 700.0, 1200.0],
            vec![None; 4],
            Some(user_names.clone()),
            NO_STABLE_ID,
        ));

        let root = MusicalNote::new(NoteLetter::E, NoteModifier::NATURAL);
        let names = custom.note_names(Some(&root)).unwrap();
        assert_eq!(names.get(0), Some(&user_names[1]));
        assert_eq!(names.get(2), Some(&user_names[0]));
        assert_eq!(names.first_note_of_octave(), &user_names[0]);
    }
}
