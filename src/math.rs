//! Small integer helpers used by the rational and scale arithmetic.

/// Returns the greatest common divisor of `a` and `b`.
///
/// The result is always non-negative. `gcd(0, 0)` is defined to be 0.
///
/// # Examples
///
/// ```
/// # use temper::math;
/// assert_eq!(math::gcd(12, 18), 6);
/// assert_eq!(math::gcd(-12, 18), 6);
/// assert_eq!(math::gcd(12, -18), 6);
/// assert_eq!(math::gcd(0, 5), 5);
/// assert_eq!(math::gcd(5, 0), 5);
/// assert_eq!(math::gcd(7, 13), 1);
/// ```
pub fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        let remainder = a % b;
        a = b;
        b = remainder;
    }
    a
}

/// Returns the integer division and remainder with `numer` being an `i32` and `denom` being a `u32`.
///
/// The resulting remainder is a *positive* number between 0 and `denom-1` with
/// `result.0 * denom + result.1 = numer`.
///
/// # Panics
///
/// Panics if `denom == 0`.
///
/// # Examples
///
/// ```
/// # use temper::math;
/// // numer is positive
/// assert_eq!(math::div_mod_i32(1, 5), (0, 1));
/// assert_eq!(math::div_mod_i32(4, 5), (0, 4));
/// assert_eq!(math::div_mod_i32(5, 5), (1, 0));
/// assert_eq!(math::div_mod_i32(6, 5), (1, 1));
///
/// // numer is negative
/// assert_eq!(math::div_mod_i32(-6, 5), (-2, 4));
/// assert_eq!(math::div_mod_i32(-5, 5), (-1, 0));
/// assert_eq!(math::div_mod_i32(-4, 5), (-1, 1));
/// assert_eq!(math::div_mod_i32(-1, 5), (-1, 4));
///
/// // numer is zero
/// assert_eq!(math::div_mod_i32(0, 5), (0, 0));
/// ```
pub fn div_mod_i32(numer: i32, denom: u32) -> (i32, u32) {
    if numer >= 0 {
        let pos_numer = numer as u32;
        ((pos_numer / denom) as i32, pos_numer % denom)
    } else {
        let neg_numer = numer.unsigned_abs();
        let division = (neg_numer / denom) as i32;
        let remainder = neg_numer % denom;
        if remainder != 0 {
            (-division - 1, denom - remainder)
        } else {
            (-division, 0)
        }
    }
}
