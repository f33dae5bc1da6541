//! Chains of individually tempered fifths.

use serde::{Deserialize, Serialize};

use crate::comma::FifthModification;
use crate::rational::Rational;

/// An ordered sequence of tempered fifths describing one octave of a temperament.
///
/// A chain of `n - 1` fifths describes a temperament with `n` notes per octave. The fifths are
/// given in chain order (e.g. Eb–Bb–F–C–G–D–A–…), which is generally *not* pitch order, and
/// `root_index` marks the position of the root note within the chain.
///
/// # Examples
///
/// A chain of eleven fifths, each narrowed by 1/12 Pythagorean comma, is 12-EDO:
///
/// ```
/// # use assert_approx_eq::assert_approx_eq;
/// # use temper::comma::FifthModification;
/// # use temper::fifths::ChainOfFifths;
/// # use temper::rational::Rational;
/// let tempered = FifthModification::from_pythagorean(Rational::new(-1, 12));
/// let chain = ChainOfFifths::new(vec![tempered; 11], 0);
///
/// for (i, ratio) in chain.sorted_ratios().iter().enumerate() {
///     assert_approx_eq!(ratio, (i as f64 / 12.0).exp2(), 1e-6);
/// }
/// // the implicit closing fifth needs the same tempering as the others
/// assert_eq!(chain.closing_circle_correction(), tempered);
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ChainOfFifths {
    fifths: Vec<FifthModification>,
    root_index: usize,
}

impl ChainOfFifths {
    /// Creates a chain from its fifths and the root position within the chain.
    ///
    /// # Panics
    ///
    /// Panics if `root_index > fifths.len()`.
    pub fn new(fifths: Vec<FifthModification>, root_index: usize) -> Self {
        assert!(
            root_index <= fifths.len(),
            "root index {} outside of chain of {} fifths",
            root_index,
            fifths.len()
        );
        Self { fifths, root_index }
    }

    pub fn fifths(&self) -> &[FifthModification] {
        &self.fifths
    }

    pub fn root_index(&self) -> usize {
        self.root_index
    }

    /// Number of notes per octave described by this chain.
    pub fn size(&self) -> usize {
        self.fifths.len() + 1
    }

    /// Returns the ratio between the root note and every other note, in chain order.
    ///
    /// Each ratio is octave-reduced (multiplied or divided by powers of two) such that it lies
    /// within `[1, 2)`. The returned array has `fifths.len() + 1` entries since the fifths sit
    /// between two notes each; the root note carries ratio 1 at `root_index`.
    pub fn ratios_along_fifths(&self) -> Vec<f64> {
        let mut ratios = vec![0.0; self.fifths.len() + 1];
        ratios[self.root_index] = 1.0;

        let three_half = Rational::new(3, 2);

        let mut total_correction = FifthModification::default();
        let mut fifth_ratio = Rational::ONE;
        for i in self.root_index..self.fifths.len() {
            total_correction = total_correction + self.fifths[i];
            fifth_ratio = fifth_ratio * three_half;
            if fifth_ratio.numer() > 2 * fifth_ratio.denom() {
                fifth_ratio = fifth_ratio / 2;
            }
            ratios[i + 1] = fifth_ratio.as_float() * total_correction.as_float();
        }

        let mut total_correction = FifthModification::default();
        let mut fifth_ratio = Rational::ONE;
        for i in (0..self.root_index).rev() {
            total_correction = total_correction - self.fifths[i];
            fifth_ratio = fifth_ratio / three_half;
            if fifth_ratio.numer() < fifth_ratio.denom() {
                fifth_ratio = fifth_ratio * 2;
            }
            ratios[i] = fifth_ratio.as_float() * total_correction.as_float();
        }

        ratios
    }

    /// Returns the ratios of [`ChainOfFifths::ratios_along_fifths`] sorted by pitch.
    pub fn sorted_ratios(&self) -> Vec<f64> {
        let mut ratios = self.ratios_along_fifths();
        ratios.sort_unstable_by(|a, b| a.total_cmp(b));
        ratios
    }

    /// Returns the correction carried by the implicit fifth closing the circle.
    ///
    /// Twelve pure fifths overshoot seven octaves by one Pythagorean comma, so the closing
    /// fifth must make up for one negative Pythagorean comma minus the sum of all listed
    /// fifth corrections. For a chain whose listed fifths already absorb the full comma the
    /// closing fifth is pure and the returned correction has ratio 1.
    pub fn closing_circle_correction(&self) -> FifthModification {
        let mut total_correction =
            FifthModification::from_pythagorean(Rational::new(-1, 1));
        for fifth in &self.fifths {
            total_correction = total_correction - *fifth;
        }
        total_correction
    }
}

#[cfg(test)]
mod test {
    use assert_approx_eq::assert_approx_eq;

    use crate::comma;

    use super::*;

    fn pythagorean_chain() -> ChainOfFifths {
        ChainOfFifths::new(vec![FifthModification::default(); 11], 5)
    }

    #[test]
    fn pythagorean_ratios_are_stacked_pure_fifths() {
        let chain = pythagorean_chain();
        let ratios = chain.ratios_along_fifths();

        assert_eq!(ratios.len(), 12);
        assert_approx_eq!(ratios[5], 1.0);

        // one pure fifth up and down from the root, octave-reduced
        assert_approx_eq!(ratios[6], 1.5);
        assert_approx_eq!(ratios[4], 4.0 / 3.0);

        // all ratios stay within one octave
        for ratio in &ratios {
            assert!((1.0..2.0).contains(ratio));
        }
    }

    #[test]
    fn sorted_ratios_are_ascending() {
        let sorted = pythagorean_chain().sorted_ratios();
        for window in sorted.windows(2) {
            assert!(window[0] < window[1]);
        }
    }

    #[test]
    fn pure_chain_misses_closure_by_one_pythagorean_comma() {
        let correction = pythagorean_chain().closing_circle_correction();
        assert_approx_eq!(
            correction.as_float(),
            1.0 / comma::pythagorean_comma().as_float(),
            1e-12
        );
    }

    #[test]
    fn equally_tempered_chain_closes_with_an_equally_tempered_fifth() {
        let tempered = FifthModification::from_pythagorean(Rational::new(-1, 12));
        let chain = ChainOfFifths::new(vec![tempered; 11], 0);
        assert_eq!(chain.closing_circle_correction(), tempered);
        assert_approx_eq!(
            chain.closing_circle_correction().as_float(),
            1.0,
            2e-3
        );
    }

    #[test]
    fn quarter_comma_meantone_major_third_is_pure() {
        let tempered = FifthModification::from_syntonic(Rational::new(-1, 4));
        let chain = ChainOfFifths::new(vec![tempered; 11], 3);
        let ratios = chain.ratios_along_fifths();
        // four meantone fifths up from the root give a pure major third
        assert_approx_eq!(ratios[7] / ratios[3], 5.0 / 4.0, 1e-12);
    }
}
