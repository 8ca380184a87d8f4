//! Exponent vectors and the operations on them.
//!
//! A term (power product) in `n` variables is stored as a slice of `n`
//! exponents. The free functions in this module operate on such slices and are
//! the primitives that all ideal and slice operations are built from. [Term] is
//! the owned counterpart.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::ops::{Deref, DerefMut};

use smallvec::{smallvec, SmallVec};

/// The compact exponent type used inside the engine.
pub type Exponent = u32;

/// The number of exponents stored inline in a [Term] before it spills to the heap.
pub const INLINED_EXPONENTS: usize = 6;

/// Set `res` to the product of `a` and `b`.
#[inline]
pub fn product(res: &mut [Exponent], a: &[Exponent], b: &[Exponent]) {
    debug_assert!(res.len() == a.len() && a.len() == b.len());
    for ((r, x), y) in res.iter_mut().zip(a).zip(b) {
        *r = x + y;
    }
}

/// Set `res` to the colon `a : b`, i.e. `lcm(a, b) / b`.
#[inline]
pub fn colon(res: &mut [Exponent], a: &[Exponent], b: &[Exponent]) {
    debug_assert!(res.len() == a.len() && a.len() == b.len());
    for ((r, x), y) in res.iter_mut().zip(a).zip(b) {
        *r = x.saturating_sub(*y);
    }
}

#[inline]
pub fn gcd(res: &mut [Exponent], a: &[Exponent], b: &[Exponent]) {
    debug_assert!(res.len() == a.len() && a.len() == b.len());
    for ((r, x), y) in res.iter_mut().zip(a).zip(b) {
        *r = *x.min(y);
    }
}

#[inline]
pub fn lcm(res: &mut [Exponent], a: &[Exponent], b: &[Exponent]) {
    debug_assert!(res.len() == a.len() && a.len() == b.len());
    for ((r, x), y) in res.iter_mut().zip(a).zip(b) {
        *r = *x.max(y);
    }
}

/// Returns `true` iff `a` divides `b`.
#[inline]
pub fn divides(a: &[Exponent], b: &[Exponent]) -> bool {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).all(|(x, y)| x <= y)
}

/// Returns `true` iff `a` divides `b` and `a != b`.
#[inline]
pub fn properly_divides(a: &[Exponent], b: &[Exponent]) -> bool {
    divides(a, b) && a != b
}

/// Returns `true` iff `a` strictly divides `b`: every variable that appears in
/// `a` has a strictly larger exponent in `b`.
#[inline]
pub fn strictly_divides(a: &[Exponent], b: &[Exponent]) -> bool {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).all(|(x, y)| *x == 0 || x < y)
}

#[inline]
pub fn is_identity(a: &[Exponent]) -> bool {
    a.iter().all(|x| *x == 0)
}

#[inline]
pub fn is_square_free(a: &[Exponent]) -> bool {
    a.iter().all(|x| *x <= 1)
}

/// The number of variables with a non-zero exponent.
#[inline]
pub fn support_size(a: &[Exponent]) -> usize {
    a.iter().filter(|x| **x > 0).count()
}

#[inline]
pub fn has_same_support(a: &[Exponent], b: &[Exponent]) -> bool {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).all(|(x, y)| (*x == 0) == (*y == 0))
}

/// Returns `true` iff some variable appears in both `a` and `b`.
#[inline]
pub fn shares_variable(a: &[Exponent], b: &[Exponent]) -> bool {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).any(|(x, y)| *x > 0 && *y > 0)
}

#[inline]
pub fn first_non_zero(a: &[Exponent]) -> Option<usize> {
    a.iter().position(|x| *x > 0)
}

/// Returns the variable of a pure power `x_i^e` with `e > 0`.
#[inline]
pub fn pure_power_variable(a: &[Exponent]) -> Option<usize> {
    let var = first_non_zero(a)?;
    if a[var + 1..].iter().all(|x| *x == 0) {
        Some(var)
    } else {
        None
    }
}

/// Subtract one from every non-zero exponent.
#[inline]
pub fn decrement_support(a: &mut [Exponent]) {
    for x in a {
        *x = x.saturating_sub(1);
    }
}

#[inline]
pub fn total_degree(a: &[Exponent]) -> u64 {
    a.iter().map(|x| *x as u64).sum()
}

#[inline]
pub fn lex_cmp(a: &[Exponent], b: &[Exponent]) -> Ordering {
    a.cmp(b)
}

/// Lexicographic order with the variables read from last to first.
#[inline]
pub fn reverse_lex_cmp(a: &[Exponent], b: &[Exponent]) -> Ordering {
    a.iter().rev().cmp(b.iter().rev())
}

/// An owned power product `x_0^e_0 * ... * x_{n-1}^e_{n-1}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Term {
    exponents: SmallVec<[Exponent; INLINED_EXPONENTS]>,
}

impl Term {
    /// The identity in `var_count` variables.
    pub fn new(var_count: usize) -> Term {
        Term {
            exponents: smallvec![0; var_count],
        }
    }

    /// The term `x_var` in `var_count` variables.
    pub fn variable(var_count: usize, var: usize) -> Term {
        let mut t = Term::new(var_count);
        t[var] = 1;
        t
    }

    pub fn from_exponents(exponents: &[Exponent]) -> Term {
        Term {
            exponents: SmallVec::from_slice(exponents),
        }
    }

    #[inline]
    pub fn var_count(&self) -> usize {
        self.exponents.len()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Exponent] {
        &self.exponents
    }

    /// Overwrite the exponents with those of `other`, which must have the same length.
    #[inline]
    pub fn assign(&mut self, other: &[Exponent]) {
        self.exponents.copy_from_slice(other);
    }

    /// Change the number of variables, setting all exponents to zero.
    pub fn reset(&mut self, var_count: usize) {
        self.exponents.clear();
        self.exponents.resize(var_count, 0);
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        is_identity(self)
    }

    #[inline]
    pub fn is_square_free(&self) -> bool {
        is_square_free(self)
    }

    #[inline]
    pub fn support_size(&self) -> usize {
        support_size(self)
    }

    #[inline]
    pub fn divides(&self, other: &[Exponent]) -> bool {
        divides(self, other)
    }

    #[inline]
    pub fn strictly_divides(&self, other: &[Exponent]) -> bool {
        strictly_divides(self, other)
    }

    #[inline]
    pub fn mul_assign(&mut self, other: &[Exponent]) {
        for (x, y) in self.exponents.iter_mut().zip(other) {
            *x += y;
        }
    }

    #[inline]
    pub fn colon_assign(&mut self, other: &[Exponent]) {
        for (x, y) in self.exponents.iter_mut().zip(other) {
            *x = x.saturating_sub(*y);
        }
    }

    #[inline]
    pub fn gcd_assign(&mut self, other: &[Exponent]) {
        for (x, y) in self.exponents.iter_mut().zip(other) {
            *x = (*x).min(*y);
        }
    }

    #[inline]
    pub fn lcm_assign(&mut self, other: &[Exponent]) {
        for (x, y) in self.exponents.iter_mut().zip(other) {
            *x = (*x).max(*y);
        }
    }

    /// The variable with the largest exponent, the first one on ties.
    pub fn first_max_variable(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, e) in self.exponents.iter().enumerate() {
            if best.map_or(true, |b| *e > self.exponents[b]) {
                best = Some(i);
            }
        }
        best
    }
}

impl Deref for Term {
    type Target = [Exponent];

    #[inline]
    fn deref(&self) -> &[Exponent] {
        &self.exponents
    }
}

impl DerefMut for Term {
    #[inline]
    fn deref_mut(&mut self) -> &mut [Exponent] {
        &mut self.exponents
    }
}

impl AsRef<[Exponent]> for Term {
    fn as_ref(&self) -> &[Exponent] {
        &self.exponents
    }
}

impl Borrow<[Exponent]> for Term {
    fn borrow(&self) -> &[Exponent] {
        &self.exponents
    }
}

impl From<&[Exponent]> for Term {
    fn from(exponents: &[Exponent]) -> Self {
        Term::from_exponents(exponents)
    }
}

impl From<Vec<Exponent>> for Term {
    fn from(exponents: Vec<Exponent>) -> Self {
        Term {
            exponents: SmallVec::from_vec(exponents),
        }
    }
}

impl<const N: usize> From<[Exponent; N]> for Term {
    fn from(exponents: [Exponent; N]) -> Self {
        Term::from_exponents(&exponents)
    }
}

#[cfg(test)]
mod test {
    use std::cmp::Ordering;

    use super::*;

    #[test]
    fn divisibility() {
        assert!(divides(&[1, 0, 2], &[1, 1, 2]));
        assert!(!divides(&[1, 0, 3], &[1, 1, 2]));
        assert!(properly_divides(&[1, 0, 2], &[1, 1, 2]));
        assert!(!properly_divides(&[1, 1, 2], &[1, 1, 2]));

        // only the support of the divisor has to be strictly smaller
        assert!(strictly_divides(&[1, 0, 1], &[2, 0, 2]));
        assert!(strictly_divides(&[0, 0, 0], &[0, 0, 0]));
        assert!(!strictly_divides(&[1, 0, 2], &[2, 5, 2]));
    }

    #[test]
    fn arithmetic() {
        let a = [3, 0, 1];
        let b = [1, 2, 1];
        let mut r = [0; 3];

        product(&mut r, &a, &b);
        assert_eq!(r, [4, 2, 2]);
        colon(&mut r, &a, &b);
        assert_eq!(r, [2, 0, 0]);
        gcd(&mut r, &a, &b);
        assert_eq!(r, [1, 0, 1]);
        lcm(&mut r, &a, &b);
        assert_eq!(r, [3, 2, 1]);

        let mut t = Term::from([2, 0, 1]);
        decrement_support(&mut t);
        assert_eq!(t.as_slice(), &[1, 0, 0]);
        assert_eq!(pure_power_variable(&t), Some(0));
        assert_eq!(pure_power_variable(&[0, 0, 0]), None);
        assert_eq!(pure_power_variable(&[1, 0, 1]), None);
    }

    #[test]
    fn orders() {
        assert_eq!(lex_cmp(&[1, 0], &[0, 5]), Ordering::Greater);
        assert_eq!(reverse_lex_cmp(&[1, 0], &[0, 5]), Ordering::Less);
        assert_eq!(reverse_lex_cmp(&[1, 2], &[3, 2]), Ordering::Less);
        assert_eq!(reverse_lex_cmp(&[1, 2], &[1, 2]), Ordering::Equal);
    }

    #[test]
    fn support() {
        let t = Term::from([0, 4, 0, 1]);
        assert_eq!(t.support_size(), 2);
        assert!(!t.is_square_free());
        assert_eq!(t.first_max_variable(), Some(1));
        assert!(has_same_support(&t, &[0, 1, 0, 7]));
        assert!(!shares_variable(&t, &[3, 0, 2, 0]));
        assert_eq!(total_degree(&t), 5);
    }
}
