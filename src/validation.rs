//! Pure validators for user-edited temperament tables.
//!
//! The checks never fail hard; they classify the whole table and optionally report per-index
//! flags through callbacks so an editor can highlight the offending rows.

use crate::note::MusicalNote;

/// Aggregate classification of the interval values of a temperament table.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ValueOrdering {
    /// All values are defined and strictly increasing.
    Increasing,
    /// All values are defined but at least one is not larger than its predecessor.
    Unordered,
    /// At least one value is missing. Overrides `Unordered`.
    Undefined,
}

/// Checks the cent values of a temperament table for missing or non-increasing entries.
///
/// `value_at` supplies the cent value for the indices `0..count` (`None` for an undefined
/// entry). `on_decreasing`, when given, is invoked once per index with a flag telling whether
/// that entry fails to increase over its predecessor; the flag is independent of the aggregate
/// result, so an editor can highlight exactly the broken rows.
///
/// # Examples
///
/// ```
/// # use temper::validation::{check_value_ordering, ValueOrdering};
/// let cents = [Some(0.0), Some(100.0), Some(200.0)];
/// let ordering = check_value_ordering(cents.len(), |i| cents[i], None);
/// assert_eq!(ordering, ValueOrdering::Increasing);
///
/// let cents = [Some(0.0), None, Some(200.0)];
/// let ordering = check_value_ordering(cents.len(), |i| cents[i], None);
/// assert_eq!(ordering, ValueOrdering::Undefined);
/// ```
pub fn check_value_ordering(
    count: usize,
    value_at: impl Fn(usize) -> Option<f64>,
    mut on_decreasing: Option<&mut dyn FnMut(usize, bool)>,
) -> ValueOrdering {
    if count < 2 {
        if let Some(callback) = on_decreasing.as_mut() {
            for index in 0..count {
                callback(index, false);
            }
        }
        return ValueOrdering::Increasing;
    }
    if let Some(callback) = on_decreasing.as_mut() {
        callback(0, false);
    }

    let mut result = ValueOrdering::Increasing;
    for index in 1..count {
        let previous = value_at(index - 1);
        let current = value_at(index);
        match (previous, current) {
            (Some(previous), Some(current)) if current <= previous => {
                if let Some(callback) = on_decreasing.as_mut() {
                    callback(index, true);
                }
                if result != ValueOrdering::Undefined {
                    result = ValueOrdering::Unordered;
                }
            }
            (Some(_), Some(_)) => {
                if let Some(callback) = on_decreasing.as_mut() {
                    callback(index, false);
                }
            }
            _ => {
                if let Some(callback) = on_decreasing.as_mut() {
                    callback(index, false);
                }
                result = ValueOrdering::Undefined;
            }
        }
    }
    result
}

/// Aggregate classification of the note names of a temperament table.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum NoteNameError {
    /// All names are defined and distinct.
    None,
    /// At least one name appears more than once.
    Duplicates,
    /// At least one name is missing. Overrides `Duplicates`.
    Undefined,
}

/// Checks the note names of a temperament table for missing or duplicate entries.
///
/// The table spans `count` rows including the octave row; the last row repeats the first note
/// an octave up and is excluded from the check. Duplicates are detected with
/// [`MusicalNote::equals_ignore_octave`]. `on_duplicate`, when given, is invoked once per
/// checked index with a flag telling whether that entry collides with another one.
pub fn check_note_names(
    count: usize,
    note_at: impl Fn(usize) -> Option<MusicalNote>,
    on_duplicate: Option<&mut dyn FnMut(usize, bool)>,
) -> NoteNameError {
    let checked_count = count.saturating_sub(1);
    let mut result = NoteNameError::None;
    let mut duplicate_flags = vec![false; checked_count];

    for i in 0..checked_count {
        match note_at(i) {
            None => result = NoteNameError::Undefined,
            Some(note) => {
                for j in i + 1..checked_count {
                    if let Some(other) = note_at(j) {
                        if note.equals_ignore_octave(&other) {
                            duplicate_flags[i] = true;
                            duplicate_flags[j] = true;
                            if result != NoteNameError::Undefined {
                                result = NoteNameError::Duplicates;
                            }
                        }
                    }
                }
            }
        }
    }

    if let Some(callback) = on_duplicate {
        for (index, duplicate) in duplicate_flags.iter().enumerate() {
            callback(index, *duplicate);
        }
    }

    result
}
