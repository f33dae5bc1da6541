//! Tempering commas and fractional corrections to the pure fifth.

use std::ops::{Add, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::rational::Rational;

/// Returns the ratio of the Pythagorean comma, 3^12 / 2^19.
pub fn pythagorean_comma() -> Rational {
    Rational::new(531_441, 524_288)
}

/// Returns the ratio of the syntonic comma, 81/80.
pub fn syntonic_comma() -> Rational {
    Rational::new(81, 80)
}

/// Returns the ratio of the schisma, 32805/32768.
pub fn schisma() -> Rational {
    Rational::new(32_805, 32_768)
}

/// A tempering correction to a pure 3:2 fifth.
///
/// The correction is expressed log-additively as rational multiples of the three classical
/// comma units (Pythagorean comma, syntonic comma, schisma). Since one Pythagorean comma equals
/// one syntonic comma plus one schisma, the same correction has several component
/// representations. [`FifthModification`] values are kept in a canonical, *simplified* form:
/// whenever two components satisfy one of the collapse identities
///
/// - `syntonic == schisma` (folds into the Pythagorean component),
/// - `pythagorean == -schisma` (folds into the syntonic component),
/// - `pythagorean == -syntonic` (folds into the schisma component),
///
/// the pair is folded into the remaining component. The zero correction therefore has a unique
/// representation, and equality on [`FifthModification`] is well defined.
///
/// Values are immutable; every operation returns a new, already simplified value.
///
/// # Examples
///
/// ```
/// # use assert_approx_eq::assert_approx_eq;
/// # use temper::comma::FifthModification;
/// # use temper::rational::Rational;
/// assert_approx_eq!(FifthModification::default().as_float(), 1.0);
///
/// // One syntonic comma plus one schisma is one Pythagorean comma.
/// let folded = FifthModification::from_syntonic(Rational::new(1, 2))
///     + FifthModification::from_schisma(Rational::new(1, 2));
/// assert_eq!(
///     folded,
///     FifthModification::from_pythagorean(Rational::new(1, 2))
/// );
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RawFifthModification")]
pub struct FifthModification {
    pythagorean: Rational,
    syntonic: Rational,
    schisma: Rational,
}

impl FifthModification {
    pub fn new(pythagorean: Rational, syntonic: Rational, schisma: Rational) -> Self {
        Self {
            pythagorean,
            syntonic,
            schisma,
        }
        .simplified()
    }

    pub fn from_pythagorean(amount: Rational) -> Self {
        Self::new(amount, Rational::ZERO, Rational::ZERO)
    }

    pub fn from_syntonic(amount: Rational) -> Self {
        Self::new(Rational::ZERO, amount, Rational::ZERO)
    }

    pub fn from_schisma(amount: Rational) -> Self {
        Self::new(Rational::ZERO, Rational::ZERO, amount)
    }

    pub fn pythagorean(self) -> Rational {
        self.pythagorean
    }

    pub fn syntonic(self) -> Rational {
        self.syntonic
    }

    pub fn schisma(self) -> Rational {
        self.schisma
    }

    /// Evaluates the correction as a frequency ratio factor.
    ///
    /// # Examples
    ///
    /// ```
    /// # use assert_approx_eq::assert_approx_eq;
    /// # use temper::comma::{self, FifthModification};
    /// # use temper::rational::Rational;
    /// let full_comma = FifthModification::from_pythagorean(Rational::ONE);
    /// assert_approx_eq!(full_comma.as_float(), comma::pythagorean_comma().as_float());
    ///
    /// let twelfth = FifthModification::from_pythagorean(Rational::new(-1, 12));
    /// assert_approx_eq!(
    ///     twelfth.as_float(),
    ///     comma::pythagorean_comma().as_float().powf(-1.0 / 12.0)
    /// );
    /// ```
    pub fn as_float(self) -> f64 {
        pythagorean_comma()
            .as_float()
            .powf(self.pythagorean.as_float())
            * syntonic_comma().as_float().powf(self.syntonic.as_float())
            * schisma().as_float().powf(self.schisma.as_float())
    }

    fn simplified(mut self) -> Self {
        if self.syntonic == self.schisma {
            self.pythagorean = self.pythagorean + self.schisma;
            self.syntonic = Rational::ZERO;
            self.schisma = Rational::ZERO;
        } else if self.pythagorean == -self.schisma {
            self.syntonic = self.syntonic + self.pythagorean;
            self.pythagorean = Rational::ZERO;
            self.schisma = Rational::ZERO;
        } else if self.pythagorean == -self.syntonic {
            self.schisma = self.schisma + self.pythagorean;
            self.pythagorean = Rational::ZERO;
            self.syntonic = Rational::ZERO;
        }
        self
    }
}

impl Add for FifthModification {
    type Output = FifthModification;

    fn add(self, rhs: FifthModification) -> FifthModification {
        FifthModification::new(
            self.pythagorean + rhs.pythagorean,
            self.syntonic + rhs.syntonic,
            self.schisma + rhs.schisma,
        )
    }
}

impl Sub for FifthModification {
    type Output = FifthModification;

    fn sub(self, rhs: FifthModification) -> FifthModification {
        FifthModification::new(
            self.pythagorean - rhs.pythagorean,
            self.syntonic - rhs.syntonic,
            self.schisma - rhs.schisma,
        )
    }
}

impl Neg for FifthModification {
    type Output = FifthModification;

    fn neg(self) -> FifthModification {
        FifthModification::new(-self.pythagorean, -self.syntonic, -self.schisma)
    }
}

#[derive(Deserialize)]
struct RawFifthModification {
    pythagorean: Rational,
    syntonic: Rational,
    schisma: Rational,
}

impl From<RawFifthModification> for FifthModification {
    fn from(raw: RawFifthModification) -> Self {
        FifthModification::new(raw.pythagorean, raw.syntonic, raw.schisma)
    }
}
