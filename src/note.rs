//! Musical note representation and its stable text encoding.

use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Octave value of a note whose octave has not been assigned yet.
///
/// Stems within a [`crate::note_names::NoteNames`] table carry no octave; the octave is
/// attached once a stem is placed on a concrete scale position. The sentinel is rendered
/// literally by the stable text encoding and must therefore keep this exact value.
pub const NO_OCTAVE: i32 = i32::MAX;

/// The seven diatonic letters, in scale order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NoteLetter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl NoteLetter {
    pub const ALL: [NoteLetter; 7] = [
        NoteLetter::C,
        NoteLetter::D,
        NoteLetter::E,
        NoteLetter::F,
        NoteLetter::G,
        NoteLetter::A,
        NoteLetter::B,
    ];

    /// Position within the diatonic scale, with C at 0 and B at 6.
    pub fn index(self) -> usize {
        match self {
            NoteLetter::C => 0,
            NoteLetter::D => 1,
            NoteLetter::E => 2,
            NoteLetter::F => 3,
            NoteLetter::G => 4,
            NoteLetter::A => 5,
            NoteLetter::B => 6,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NoteLetter::C => "C",
            NoteLetter::D => "D",
            NoteLetter::E => "E",
            NoteLetter::F => "F",
            NoteLetter::G => "G",
            NoteLetter::A => "A",
            NoteLetter::B => "B",
        }
    }

    fn from_name(name: &str) -> Option<NoteLetter> {
        NoteLetter::ALL
            .into_iter()
            .find(|letter| letter.as_str() == name)
    }
}

/// An accidental attached to a note letter.
///
/// The modifier combines a *sharpness* level (♭♭♭ … ♯♯♯) with an *ups* level (vvv … ^^^),
/// each between −3 and 3. The ups are microtonal inflections used by the generated names of
/// non-12-tone scales; their actual step size depends on the temperament, so a modifier only
/// orders notes *for printing* (most flat first), not necessarily by pitch.
///
/// # Examples
///
/// ```
/// # use temper::note::NoteModifier;
/// assert_eq!(NoteModifier::NATURAL.name(), "None");
/// assert_eq!(NoteModifier::new(1, 0).unwrap().name(), "Sharp");
/// assert_eq!(NoteModifier::new(-2, 1).unwrap().name(), "FlatFlatUp");
/// assert_eq!(NoteModifier::new(0, -3).unwrap().name(), "NaturalDownDownDown");
/// assert_eq!(NoteModifier::from_name("SharpUpUp"), NoteModifier::new(1, 2));
/// assert_eq!(NoteModifier::new(4, 0), None);
/// ```
#[derive(
    Copy, Clone, Debug, Default, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct NoteModifier {
    sharpness: i8,
    ups: i8,
}

impl NoteModifier {
    /// The plain, unmodified note (no accidental, no ups or downs).
    pub const NATURAL: NoteModifier = NoteModifier { sharpness: 0, ups: 0 };

    pub const FLAT: NoteModifier = NoteModifier { sharpness: -1, ups: 0 };
    pub const SHARP: NoteModifier = NoteModifier { sharpness: 1, ups: 0 };

    /// Creates a modifier, or `None` if either level exceeds the notation vocabulary of
    /// three sharps/flats and three ups/downs.
    pub fn new(sharpness: i8, ups: i8) -> Option<NoteModifier> {
        if (-3..=3).contains(&sharpness) && (-3..=3).contains(&ups) {
            Some(NoteModifier { sharpness, ups })
        } else {
            None
        }
    }

    pub fn sharpness(self) -> i8 {
        self.sharpness
    }

    pub fn ups(self) -> i8 {
        self.ups
    }

    pub fn is_natural(self) -> bool {
        self == Self::NATURAL
    }

    /// Total number of accidental marks, used to pick the simpler of two enharmonic spellings.
    pub fn complexity(self) -> u32 {
        self.sharpness.unsigned_abs() as u32 + self.ups.unsigned_abs() as u32
    }

    /// The canonical name used by the stable text encoding, e.g. `Flat`, `SharpDownDown`,
    /// `NaturalUp` or `None` for the plain note.
    pub fn name(self) -> String {
        if self == Self::NATURAL {
            return "None".to_string();
        }
        let sharpness_part = match self.sharpness {
            -3 => "FlatFlatFlat",
            -2 => "FlatFlat",
            -1 => "Flat",
            0 => "Natural",
            1 => "Sharp",
            2 => "SharpSharp",
            3 => "SharpSharpSharp",
            _ => unreachable!("sharpness was {}", self.sharpness),
        };
        let ups_part = match self.ups {
            -3 => "DownDownDown",
            -2 => "DownDown",
            -1 => "Down",
            0 => "",
            1 => "Up",
            2 => "UpUp",
            3 => "UpUpUp",
            _ => unreachable!("ups was {}", self.ups),
        };
        format!("{}{}", sharpness_part, ups_part)
    }

    /// Parses a canonical modifier name. Returns `None` for anything the encoding does not
    /// produce (including a bare `Natural`, which is spelled `None`).
    pub fn from_name(name: &str) -> Option<NoteModifier> {
        if name == "None" {
            return Some(Self::NATURAL);
        }
        let sharpness_parts = [
            ("FlatFlatFlat", -3),
            ("FlatFlat", -2),
            ("Flat", -1),
            ("SharpSharpSharp", 3),
            ("SharpSharp", 2),
            ("Sharp", 1),
            ("Natural", 0),
        ];
        let (rest, sharpness) = sharpness_parts
            .into_iter()
            .find_map(|(part, sharpness)| name.strip_prefix(part).map(|rest| (rest, sharpness)))?;
        let ups = match rest {
            "DownDownDown" => -3,
            "DownDown" => -2,
            "Down" => -1,
            "Up" => 1,
            "UpUp" => 2,
            "UpUpUp" => 3,
            "" if sharpness != 0 => 0,
            _ => return None,
        };
        Some(NoteModifier { sharpness, ups })
    }
}

/// A note name without an octave: letter, accidental and the octave offset of the spelling.
///
/// The octave offset accounts for spellings that cross the octave boundary: in a scale
/// `… B3, Cb4 | C4 …` the stem Cb belongs to octave 3 but is printed with octave 4, so its
/// offset is 1.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct NoteStem {
    pub letter: NoteLetter,
    pub modifier: NoteModifier,
    pub octave_offset: i32,
}

impl NoteStem {
    pub fn new(letter: NoteLetter, modifier: NoteModifier) -> Self {
        Self {
            letter,
            modifier,
            octave_offset: 0,
        }
    }

    pub fn with_octave_offset(mut self, octave_offset: i32) -> Self {
        self.octave_offset = octave_offset;
        self
    }

    pub fn is_natural(self, letter: NoteLetter) -> bool {
        self.letter == letter && self.modifier.is_natural()
    }
}

/// A musical note: a primary stem, an optional enharmonically equivalent stem and an octave.
///
/// Two notes denoting the same scale step through different spellings (e.g. C♯ and D♭) are
/// *not* equal under `==`; use [`MusicalNote::matches`] to compare across enharmonics and
/// [`MusicalNote::equals_ignore_octave`] for strict octave-less identity. These deliberately
/// are named functions rather than operators since their semantics differ from plain equality.
///
/// # Examples
///
/// ```
/// # use temper::note::{MusicalNote, NoteLetter, NoteModifier, NoteStem};
/// let c_sharp = MusicalNote::new(NoteLetter::C, NoteModifier::SHARP)
///     .with_enharmonic(NoteStem::new(NoteLetter::D, NoteModifier::FLAT));
/// let d_flat = MusicalNote::new(NoteLetter::D, NoteModifier::FLAT);
///
/// assert!(c_sharp.matches(&d_flat, true));
/// assert!(!c_sharp.equals_ignore_octave(&d_flat));
/// assert_eq!(c_sharp.switch_enharmonic().stem.letter, NoteLetter::D);
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct MusicalNote {
    pub stem: NoteStem,
    pub enharmonic: Option<NoteStem>,
    pub octave: i32,
}

impl MusicalNote {
    /// Creates a note without an enharmonic spelling and with an unset octave.
    pub fn new(letter: NoteLetter, modifier: NoteModifier) -> Self {
        Self {
            stem: NoteStem::new(letter, modifier),
            enharmonic: None,
            octave: NO_OCTAVE,
        }
    }

    pub fn from_stem(stem: NoteStem) -> Self {
        Self {
            stem,
            enharmonic: None,
            octave: NO_OCTAVE,
        }
    }

    pub fn with_enharmonic(mut self, enharmonic: NoteStem) -> Self {
        self.enharmonic = Some(enharmonic);
        self
    }

    pub fn with_octave(mut self, octave: i32) -> Self {
        self.octave = octave;
        self
    }

    /// Returns a note where the primary and the enharmonic spelling are exchanged, or the
    /// unchanged note if there is no enharmonic spelling.
    pub fn switch_enharmonic(self) -> MusicalNote {
        match self.enharmonic {
            None => self,
            Some(enharmonic) => MusicalNote {
                stem: enharmonic,
                enharmonic: Some(self.stem),
                octave: self.octave,
            },
        }
    }

    /// Checks whether any spelling of `self` coincides with any spelling of `other`.
    ///
    /// C♯ (with enharmonic D♭) matches a plain D♭, while `==` and
    /// [`MusicalNote::equals_ignore_octave`] distinguish them.
    pub fn matches(&self, other: &MusicalNote, ignore_octave: bool) -> bool {
        if !ignore_octave && self.octave != other.octave {
            return false;
        }
        let spellings = [Some(self.stem), self.enharmonic];
        let other_spellings = [Some(other.stem), other.enharmonic];
        spellings
            .into_iter()
            .flatten()
            .any(|stem| other_spellings.into_iter().flatten().any(|o| o == stem))
    }

    /// Checks strict spelling identity while ignoring the octave (but not the octave offset).
    pub fn equals_ignore_octave(&self, other: &MusicalNote) -> bool {
        self.stem == other.stem && self.enharmonic == other.enharmonic
    }
}

/// The stable text encoding of a [`MusicalNote`].
///
/// The encoding is used for persistence and must stay byte-for-byte reproducible: exactly
/// the keys below, in exactly this order, comma-separated, without spaces. An unset octave
/// is rendered as the literal [`NO_OCTAVE`] value.
///
/// # Examples
///
/// ```
/// # use temper::note::{MusicalNote, NoteLetter, NoteModifier, NoteStem};
/// let a = MusicalNote::new(NoteLetter::A, NoteModifier::NATURAL).with_octave(4);
/// assert_eq!(
///     a.to_string(),
///     "MusicalNote(base=A,modifier=None,octave=4,octaveOffset=0,\
///      enharmonicBase=None,enharmonicModifier=None,enharmonicOctaveOffset=0)"
/// );
///
/// let c_sharp = MusicalNote::new(NoteLetter::C, NoteModifier::SHARP)
///     .with_enharmonic(NoteStem::new(NoteLetter::D, NoteModifier::FLAT));
/// assert_eq!(
///     c_sharp.to_string(),
///     "MusicalNote(base=C,modifier=Sharp,octave=2147483647,octaveOffset=0,\
///      enharmonicBase=D,enharmonicModifier=Flat,enharmonicOctaveOffset=0)"
/// );
/// ```
impl Display for MusicalNote {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "MusicalNote(base={},modifier={},octave={},octaveOffset={},",
            self.stem.letter.as_str(),
            self.stem.modifier.name(),
            self.octave,
            self.stem.octave_offset
        )?;
        match self.enharmonic {
            Some(stem) => write!(
                f,
                "enharmonicBase={},enharmonicModifier={},enharmonicOctaveOffset={})",
                stem.letter.as_str(),
                stem.modifier.name(),
                stem.octave_offset
            ),
            None => write!(
                f,
                "enharmonicBase=None,enharmonicModifier=None,enharmonicOctaveOffset=0)"
            ),
        }
    }
}

/// Parsing accepts only the exact shape produced by the [`Display`] impl.
///
/// # Examples
///
/// ```
/// # use temper::note::{MusicalNote, NoteLetter, NoteModifier};
/// let a4 = MusicalNote::new(NoteLetter::A, NoteModifier::NATURAL).with_octave(4);
/// assert_eq!(a4.to_string().parse::<MusicalNote>().unwrap(), a4);
///
/// assert!("MusicalNote(base=A)".parse::<MusicalNote>().is_err());
/// assert!("Note(base=A,modifier=None,octave=4,octaveOffset=0,enharmonicBase=None,enharmonicModifier=None,enharmonicOctaveOffset=0)"
///     .parse::<MusicalNote>()
///     .is_err());
/// ```
impl FromStr for MusicalNote {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const KEYS: [&str; 7] = [
            "base",
            "modifier",
            "octave",
            "octaveOffset",
            "enharmonicBase",
            "enharmonicModifier",
            "enharmonicOctaveOffset",
        ];

        let content = s
            .strip_prefix("MusicalNote(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| format!("Invalid note '{}': Must be of shape MusicalNote(...)", s))?;

        let mut values = [""; 7];
        let mut fields = content.split(',');
        for (key, value) in KEYS.iter().zip(&mut values) {
            let field = fields
                .next()
                .ok_or_else(|| format!("Invalid note '{}': Missing key '{}'", s, key))?;
            *value = field
                .strip_prefix(key)
                .and_then(|rest| rest.strip_prefix('='))
                .ok_or_else(|| format!("Invalid note '{}': Expected '{}=' in '{}'", s, key, field))?;
        }
        if fields.next().is_some() {
            return Err(format!("Invalid note '{}': Too many fields", s));
        }

        let parse_letter = |value: &str, key: &str| {
            if value == "None" {
                Ok(None)
            } else {
                NoteLetter::from_name(value)
                    .map(Some)
                    .ok_or_else(|| format!("Invalid note '{}': Unknown {} '{}'", s, key, value))
            }
        };
        let parse_modifier = |value: &str, key: &str| {
            NoteModifier::from_name(value)
                .ok_or_else(|| format!("Invalid note '{}': Unknown {} '{}'", s, key, value))
        };
        let parse_int = |value: &str, key: &str| {
            value
                .parse::<i32>()
                .map_err(|_| format!("Invalid note '{}': Invalid {} '{}'", s, key, value))
        };

        let letter = parse_letter(values[0], "base")?
            .ok_or_else(|| format!("Invalid note '{}': Base must not be None", s))?;
        let modifier = parse_modifier(values[1], "modifier")?;
        let octave = parse_int(values[2], "octave")?;
        let octave_offset = parse_int(values[3], "octaveOffset")?;
        let enharmonic_letter = parse_letter(values[4], "enharmonicBase")?;
        let enharmonic_modifier = parse_modifier(values[5], "enharmonicModifier")?;
        let enharmonic_octave_offset = parse_int(values[6], "enharmonicOctaveOffset")?;

        Ok(MusicalNote {
            stem: NoteStem {
                letter,
                modifier,
                octave_offset,
            },
            enharmonic: enharmonic_letter.map(|letter| NoteStem {
                letter,
                modifier: enharmonic_modifier,
                octave_offset: enharmonic_octave_offset,
            }),
            octave,
        })
    }
}

impl From<MusicalNote> for String {
    fn from(note: MusicalNote) -> String {
        note.to_string()
    }
}

impl TryFrom<String> for MusicalNote {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn c_sharp_d_flat() -> MusicalNote {
        MusicalNote::new(NoteLetter::C, NoteModifier::SHARP)
            .with_enharmonic(NoteStem::new(NoteLetter::D, NoteModifier::FLAT))
    }

    #[test]
    fn modifier_names_round_trip() {
        for sharpness in -3..=3 {
            for ups in -3..=3 {
                let modifier = NoteModifier::new(sharpness, ups).unwrap();
                assert_eq!(
                    NoteModifier::from_name(&modifier.name()),
                    Some(modifier),
                    "failed for {}",
                    modifier.name()
                );
            }
        }
    }

    #[test]
    fn modifier_rejects_unknown_names() {
        for name in ["Natural", "Foo", "SharpUpUpUpUp", "FlatFlatFlatFlat", ""] {
            assert_eq!(NoteModifier::from_name(name), None, "accepted '{}'", name);
        }
    }

    #[test]
    fn modifier_ordering_is_sharpness_major() {
        let flat_up = NoteModifier::new(-1, 1).unwrap();
        let natural_down = NoteModifier::new(0, -1).unwrap();
        let sharp = NoteModifier::SHARP;
        assert!(flat_up < natural_down);
        assert!(natural_down < NoteModifier::NATURAL);
        assert!(NoteModifier::NATURAL < sharp);
    }

    #[test]
    fn encoding_round_trip() {
        let test_cases = [
            MusicalNote::new(NoteLetter::A, NoteModifier::NATURAL).with_octave(4),
            c_sharp_d_flat(),
            MusicalNote::new(NoteLetter::B, NoteModifier::NATURAL)
                .with_enharmonic(
                    NoteStem::new(NoteLetter::C, NoteModifier::FLAT).with_octave_offset(1),
                )
                .with_octave(-2),
            MusicalNote::new(NoteLetter::G, NoteModifier::new(2, -3).unwrap()),
        ];

        for note in test_cases {
            let encoded = note.to_string();
            assert_eq!(encoded.parse::<MusicalNote>().unwrap(), note, "{}", encoded);
        }
    }

    #[test]
    fn encoding_is_byte_stable() {
        let note = MusicalNote::new(NoteLetter::E, NoteModifier::FLAT)
            .with_enharmonic(
                NoteStem::new(NoteLetter::D, NoteModifier::SHARP).with_octave_offset(-1),
            )
            .with_octave(3);
        assert_eq!(
            note.to_string(),
            "MusicalNote(base=E,modifier=Flat,octave=3,octaveOffset=0,\
             enharmonicBase=D,enharmonicModifier=Sharp,enharmonicOctaveOffset=-1)"
        );
    }

    #[test]
    fn parsing_rejects_malformed_strings() {
        let test_cases = [
            "",
            "MusicalNote()",
            "MusicalNote(base=A,modifier=None,octave=4,octaveOffset=0)",
            // reordered keys
            "MusicalNote(modifier=None,base=A,octave=4,octaveOffset=0,\
             enharmonicBase=None,enharmonicModifier=None,enharmonicOctaveOffset=0)",
            // spaces
            "MusicalNote(base=A, modifier=None,octave=4,octaveOffset=0,\
             enharmonicBase=None,enharmonicModifier=None,enharmonicOctaveOffset=0)",
            // trailing field
            "MusicalNote(base=A,modifier=None,octave=4,octaveOffset=0,\
             enharmonicBase=None,enharmonicModifier=None,enharmonicOctaveOffset=0,extra=1)",
            // base must be a letter
            "MusicalNote(base=None,modifier=None,octave=4,octaveOffset=0,\
             enharmonicBase=None,enharmonicModifier=None,enharmonicOctaveOffset=0)",
            "MusicalNote(base=H,modifier=None,octave=4,octaveOffset=0,\
             enharmonicBase=None,enharmonicModifier=None,enharmonicOctaveOffset=0)",
        ];

        for input in test_cases {
            assert!(input.parse::<MusicalNote>().is_err(), "accepted '{}'", input);
        }
    }

    #[test]
    fn matches_compares_across_enharmonics() {
        let c_sharp = c_sharp_d_flat();
        let d_flat = MusicalNote::new(NoteLetter::D, NoteModifier::FLAT);
        let d = MusicalNote::new(NoteLetter::D, NoteModifier::NATURAL);

        assert!(c_sharp.matches(&d_flat, true));
        assert!(d_flat.matches(&c_sharp, true));
        assert!(!c_sharp.matches(&d, true));

        let c_sharp_4 = c_sharp.with_octave(4);
        let d_flat_5 = d_flat.with_octave(5);
        assert!(!c_sharp_4.matches(&d_flat_5, false));
        assert!(c_sharp_4.matches(&d_flat_5, true));
    }

    #[test]
    fn switch_enharmonic_swaps_spellings() {
        let switched = c_sharp_d_flat().with_octave(4).switch_enharmonic();
        assert_eq!(switched.stem, NoteStem::new(NoteLetter::D, NoteModifier::FLAT));
        assert_eq!(
            switched.enharmonic,
            Some(NoteStem::new(NoteLetter::C, NoteModifier::SHARP))
        );
        assert_eq!(switched.octave, 4);
        assert_eq!(switched.switch_enharmonic(), c_sharp_d_flat().with_octave(4));

        let plain = MusicalNote::new(NoteLetter::F, NoteModifier::NATURAL);
        assert_eq!(plain.switch_enharmonic(), plain);
    }
}
