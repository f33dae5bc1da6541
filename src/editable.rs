//! User-edited temperament tables, which may be incomplete while being edited.

use serde::{Deserialize, Serialize};

use crate::note::MusicalNote;
use crate::note_names;
use crate::ratio_to_cents;
use crate::rational::Rational;
use crate::temperament::{CustomTemperament, Temperament, NO_STABLE_ID};
use crate::validation::{self, NoteNameError, ValueOrdering};

/// One row of an [`EditableTemperament`]: a note name and an interval value, each optional.
///
/// The interval may be given as a cent value, as a rational ratio or not at all; a given
/// ratio takes precedence over the cent value.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoteLine {
    pub note: Option<MusicalNote>,
    pub cent: Option<f64>,
    pub ratio: Option<Rational>,
}

impl NoteLine {
    /// The effective cent value of this row: the ratio where given, else the cent value,
    /// else `None`.
    pub fn resolve_cent_value(&self) -> Option<f64> {
        match (self.ratio, self.cent) {
            (Some(ratio), _) => Some(ratio_to_cents(ratio.as_float())),
            (None, cent) => cent,
        }
    }
}

/// A temperament under user editing.
///
/// Unlike [`Temperament`], an editable temperament may contain holes: rows which failed to
/// parse (`None` lines), rows without an interval value and rows without a note name. Such a
/// table is inert; it only becomes usable once [`EditableTemperament::has_errors`] clears and
/// [`EditableTemperament::to_temperament`] succeeds. The rows include the octave row, so a
/// twelve-note temperament has thirteen lines.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EditableTemperament {
    pub name: String,
    pub abbreviation: String,
    pub description: String,
    pub note_lines: Vec<Option<NoteLine>>,
    pub stable_id: i64,
}

impl EditableTemperament {
    /// Checks whether anything keeps this table from becoming a temperament.
    ///
    /// Errors are: an empty table, unparsed rows, rows without an interval value,
    /// non-increasing interval values, and (only when no generated names are available for
    /// this size) missing or duplicate note names. Per-index details can be obtained through
    /// the [`crate::validation`] checks directly.
    pub fn has_errors(&self) -> bool {
        if self.note_lines.is_empty() {
            return true;
        }
        if self.note_lines.iter().any(Option::is_none) {
            return true;
        }
        if self
            .note_lines
            .iter()
            .flatten()
            .any(|line| line.cent.is_none() && line.ratio.is_none())
        {
            return true;
        }
        let ordering = validation::check_value_ordering(
            self.note_lines.len(),
            |index| self.note_lines[index].and_then(|line| line.resolve_cent_value()),
            None,
        );
        if ordering != ValueOrdering::Increasing {
            return true;
        }

        // user note names only matter when no names can be generated for this size
        let generated_names = note_names::edo_note_names(self.note_lines.len() - 1, None);
        if generated_names.is_some() {
            return false;
        }
        let name_error = validation::check_note_names(
            self.note_lines.len(),
            |index| self.note_lines[index].and_then(|line| line.note),
            None,
        );
        name_error != NoteNameError::None
    }

    /// Converts the table into a [`Temperament`], or `None` while it is incomplete.
    ///
    /// When the user names coincide with the generated names of this size (or no user names
    /// are given), the generated names are used so the temperament keeps profiting from
    /// enharmonics and root-note rotation of the generator.
    pub fn to_temperament(&self) -> Option<Temperament> {
        if self.note_lines.is_empty() {
            return None;
        }

        let mut ratios = Vec::with_capacity(self.note_lines.len());
        let mut cents = Vec::with_capacity(self.note_lines.len());
        let mut notes = Vec::with_capacity(self.note_lines.len());
        for line in &self.note_lines {
            let line = line.as_ref()?;
            ratios.push(line.ratio);
            cents.push(line.resolve_cent_value()?);
            notes.push(line.note);
        }
        // the octave row repeats the first note and carries no name of its own
        notes.pop();

        let steps = self.note_lines.len() - 1;
        let generated = note_names::edo_note_names(steps, None);
        let has_missing_note = notes.iter().any(Option::is_none);
        if has_missing_note && generated.is_none() {
            return None;
        }

        let resolved_notes = if has_missing_note {
            None // fall back to the generated names
        } else {
            let notes: Vec<MusicalNote> = notes.into_iter().flatten().collect();
            match &generated {
                Some(generated)
                    if generated
                        .notes()
                        .iter()
                        .zip(&notes)
                        .all(|(generated, user)| generated == user) =>
                {
                    None
                }
                _ => Some(notes),
            }
        };

        Some(Temperament::Custom(CustomTemperament::new(
            self.name.clone(),
            self.abbreviation.clone(),
            self.description.clone(),
            cents,
            ratios,
            resolved_notes,
            NO_STABLE_ID,
        )))
    }
}
