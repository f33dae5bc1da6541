//! Musical temperaments and the arithmetic behind them.
//!
//! `temper` turns an abstract tuning-system definition — an equal division of the octave, a
//! chain of tempered fifths, a list of rational ratios or a user-edited table — into concrete,
//! queryable data: the interval structure in cents, a bidirectional mapping between note index
//! and audible frequency over as many octaves as fit a frequency window, and generated note
//! names for arbitrary equal divisions.
//!
//! # Examples
//!
//! ```
//! # use assert_approx_eq::assert_approx_eq;
//! use temper::scale::{MusicalScale, ScaleSpec};
//! use temper::temperament;
//!
//! let scale = MusicalScale::new(ScaleSpec::new(temperament::edo(12, -1)), &()).unwrap();
//!
//! assert_eq!(scale.frequency(0), 440.0); // A4
//! assert_approx_eq!(scale.frequency(-9), 261.625565, 1e-5); // C4
//! assert_eq!(scale.closest_note_index(442.5), 0);
//! ```

pub mod comma;
pub mod editable;
pub mod fifths;
pub mod frequencies;
pub mod math;
pub mod note;
pub mod note_names;
pub mod rational;
pub mod scale;
pub mod temperament;
pub mod validation;

/// Converts a frequency ratio to cents, `1200 * log2(ratio)`.
///
/// # Examples
///
/// ```
/// # use assert_approx_eq::assert_approx_eq;
/// assert_approx_eq!(temper::ratio_to_cents(2.0), 1200.0);
/// assert_approx_eq!(temper::ratio_to_cents(1.5), 701.955001);
/// ```
pub fn ratio_to_cents(ratio: f64) -> f64 {
    1200.0 * ratio.log2()
}

/// Converts cents to a frequency ratio, `2^(cents / 1200)`.
///
/// # Examples
///
/// ```
/// # use assert_approx_eq::assert_approx_eq;
/// assert_approx_eq!(temper::cents_to_ratio(1200.0), 2.0);
/// assert_approx_eq!(temper::cents_to_ratio(-1200.0), 0.5);
/// ```
pub fn cents_to_ratio(cents: f64) -> f64 {
    (cents / 1200.0).exp2()
}

/// The frequency lying the given amount of cents above a reference frequency.
///
/// # Examples
///
/// ```
/// # use assert_approx_eq::assert_approx_eq;
/// assert_approx_eq!(temper::cents_to_frequency(1200.0, 440.0), 880.0);
/// ```
pub fn cents_to_frequency(cents: f64, reference_frequency: f64) -> f64 {
    reference_frequency * cents_to_ratio(cents)
}

/// The distance in cents of a frequency above a reference frequency.
///
/// # Examples
///
/// ```
/// # use assert_approx_eq::assert_approx_eq;
/// assert_approx_eq!(temper::frequency_to_cents(880.0, 440.0), 1200.0);
/// ```
pub fn frequency_to_cents(frequency: f64, reference_frequency: f64) -> f64 {
    ratio_to_cents(frequency / reference_frequency)
}
