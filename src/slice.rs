//! Slices: the subproblems of the Slice Algorithm.
//!
//! A slice `(I, S, q)` stands for the content `q * m` for every `m` in the
//! content of the ideal `I` that does not lie in the subtract ideal `S`. Which
//! monomials form the content of `I` depends on the computation: the maximal
//! standard monomials for decompositions, and the Hilbert-Poincaré
//! coefficients for Hilbert series. This choice is made by the [SlicePolicy].
//!
//! A slice is split on a pivot `p` into the inner slice `(I : p, S : p, q * p)`
//! and the outer slice `(I', S + <p>, q)`, where `I'` drops the generators that
//! `p` strictly divides. The union of their contents is the content of the
//! original slice.

pub mod engine;
pub mod hilbert;
pub mod independence;
pub mod msm;
pub mod optimize;
pub mod projection;
pub mod split;
pub mod strategy;

use std::fmt;
use std::marker::PhantomData;

use crate::{
    ideal::Ideal,
    printer::{IdealPrinter, TermPrinter, VarNames},
    term::{self, Exponent, Term},
};

/// The rule that bounds the content of a slice from below.
pub trait SlicePolicy: Sized {
    /// Compute a term `bound` that divides every content monomial of `slice`
    /// that is divisible by `x_var`. Returns `false` if the content is empty.
    fn lower_bound(slice: &mut Slice<Self>, var: usize, bound: &mut Term) -> bool;
}

/// Content is the set of maximal standard monomials.
#[derive(Debug, Clone, Copy)]
pub struct MsmPolicy;

/// Content is the Hilbert-Poincaré numerator contribution.
#[derive(Debug, Clone, Copy)]
pub struct HilbertPolicy;

impl SlicePolicy for MsmPolicy {
    fn lower_bound(slice: &mut Slice<Self>, var: usize, bound: &mut Term) -> bool {
        slice.update_lcm();

        let lcm = &slice.lcm;
        let mut found = false;
        for g in slice.ideal.iter() {
            if g[var] == 0 {
                continue;
            }

            // a generator that reaches the lcm in another variable can never be
            // the one that makes m * x_var non-standard
            if g
                .iter()
                .zip(lcm.iter())
                .enumerate()
                .any(|(j, (e, l))| j != var && e >= l)
            {
                continue;
            }

            if found {
                bound.gcd_assign(g);
            } else {
                bound.assign(g);
                found = true;
            }
        }

        if !found {
            return false;
        }

        bound[var] -= 1;
        true
    }
}

impl SlicePolicy for HilbertPolicy {
    fn lower_bound(slice: &mut Slice<Self>, var: usize, bound: &mut Term) -> bool {
        let mut found = false;
        for g in slice.ideal.iter() {
            if g[var] == 0 {
                continue;
            }

            if found {
                bound.gcd_assign(g);
            } else {
                bound.assign(g);
                found = true;
            }
        }

        if !found {
            return false;
        }

        term::decrement_support(bound);
        true
    }
}

/// A subproblem `(ideal, subtract, multiply)`.
pub struct Slice<P: SlicePolicy> {
    pub(crate) ideal: Ideal,
    pub(crate) subtract: Ideal,
    pub(crate) multiply: Term,
    lcm: Term,
    lcm_valid: bool,
    lower_bound_hint: usize,
    _policy: PhantomData<P>,
}

impl<P: SlicePolicy> Slice<P> {
    /// The slice with no generators, an empty subtract and the identity as multiply.
    pub fn new(var_count: usize) -> Slice<P> {
        Slice {
            ideal: Ideal::new(var_count),
            subtract: Ideal::new(var_count),
            multiply: Term::new(var_count),
            lcm: Term::new(var_count),
            lcm_valid: true,
            lower_bound_hint: 0,
            _policy: PhantomData,
        }
    }

    pub fn from_parts(ideal: Ideal, subtract: Ideal, multiply: Term) -> Slice<P> {
        debug_assert_eq!(ideal.var_count(), subtract.var_count());
        debug_assert_eq!(ideal.var_count(), multiply.var_count());
        let var_count = ideal.var_count();
        Slice {
            ideal,
            subtract,
            multiply,
            lcm: Term::new(var_count),
            lcm_valid: false,
            lower_bound_hint: 0,
            _policy: PhantomData,
        }
    }

    /// The slice `(ideal, <0>, 1)`.
    pub fn from_ideal(ideal: Ideal) -> Slice<P> {
        let var_count = ideal.var_count();
        Slice::from_parts(ideal, Ideal::new(var_count), Term::new(var_count))
    }

    #[inline]
    pub fn var_count(&self) -> usize {
        self.multiply.var_count()
    }

    #[inline]
    pub fn ideal(&self) -> &Ideal {
        &self.ideal
    }

    #[inline]
    pub fn subtract(&self) -> &Ideal {
        &self.subtract
    }

    #[inline]
    pub fn multiply(&self) -> &Term {
        &self.multiply
    }

    /// Modify the ideal. The cached lcm is invalidated.
    pub fn ideal_mut(&mut self) -> &mut Ideal {
        self.lcm_valid = false;
        &mut self.ideal
    }

    pub fn subtract_mut(&mut self) -> &mut Ideal {
        &mut self.subtract
    }

    fn update_lcm(&mut self) {
        if !self.lcm_valid {
            self.ideal.lcm_into(&mut self.lcm);
            self.lcm_valid = true;
        }
    }

    /// The least common multiple of the generators of the ideal.
    pub fn lcm(&mut self) -> &Term {
        self.update_lcm();
        &self.lcm
    }

    /// Make the content empty.
    pub fn clear(&mut self) {
        let var_count = self.var_count();
        self.ideal.clear();
        self.ideal.insert(&Term::new(var_count));
        self.subtract.clear();
        self.lcm.reset(var_count);
        self.lcm_valid = true;
    }

    /// Returns `true` if the content is empty for a reason that is visible
    /// without any computation.
    pub fn is_trivially_empty(&mut self) -> bool {
        if self.ideal.contains_identity() || self.subtract.contains_identity() {
            return true;
        }

        self.update_lcm();
        self.lcm.support_size() < self.var_count()
    }

    /// Turn this slice into its inner slice for `pivot`.
    ///
    /// Returns `true` if the support of some generator of the ideal changed.
    pub fn inner_slice(&mut self, pivot: &[Exponent]) -> bool {
        debug_assert_eq!(pivot.len(), self.var_count());
        self.multiply.mul_assign(pivot);

        let support_changed = self.ideal.colon_reminimize(pivot);
        self.subtract.colon_reminimize(pivot);

        if support_changed {
            self.lcm_valid = false;
            if let Some(var) = term::first_non_zero(pivot) {
                self.lower_bound_hint = var;
            }
        } else {
            self.lcm.colon_assign(pivot);
        }

        support_changed
    }

    /// Turn this slice into its outer slice for `pivot`.
    pub fn outer_slice(&mut self, pivot: &[Exponent]) {
        debug_assert_eq!(pivot.len(), self.var_count());
        if self.ideal.remove_strict_multiples(pivot) {
            self.lcm_valid = false;
        }

        // a pure power pivot cuts the lcm down to below itself, which
        // already excludes its multiples from the content
        if term::support_size(pivot) > 1 {
            self.subtract.insert(pivot);
        }
    }

    /// Remove the generators of the ideal that are strict multiples of a
    /// generator of the subtract ideal.
    pub fn normalize(&mut self) -> bool {
        let subtract = &self.subtract;
        let changed = self.ideal.remove_if(|g| {
            subtract
                .iter()
                .any(|s| term::strictly_divides(s, g))
        });

        if changed {
            self.lcm_valid = false;
        }
        changed
    }

    /// Remove the generators of the subtract ideal that cannot affect the content.
    pub fn prune_subtract(&mut self) -> bool {
        if self.subtract.is_zero_ideal() {
            return false;
        }

        self.update_lcm();
        let lcm = &self.lcm;
        let ideal = &self.ideal;
        self.subtract
            .remove_if(|s| !term::strictly_divides(s, lcm) || ideal.contains(s))
    }

    /// Apply lower bounds for all variables until none of them is an improvement.
    /// Returns `true` if the slice changed.
    pub fn apply_lower_bound(&mut self) -> bool {
        let var_count = self.var_count();
        if var_count == 0 || self.ideal.is_zero_ideal() || self.ideal.contains_identity() {
            return false;
        }

        let mut bound = Term::new(var_count);
        let mut changed = false;
        let mut steps_without_change = 0;
        let mut var = self.lower_bound_hint % var_count;
        while steps_without_change < var_count {
            if !P::lower_bound(self, var, &mut bound) {
                self.clear();
                return true;
            }

            if bound.is_identity() {
                steps_without_change += 1;
            } else {
                self.inner_slice(&bound);
                changed = true;
                steps_without_change = 0;
            }

            var = (var + 1) % var_count;
        }

        changed
    }

    /// Perform one round of simplification. Returns `true` if the slice changed.
    pub fn simplify_step(&mut self) -> bool {
        let mut changed = self.normalize();
        changed |= self.apply_lower_bound();
        changed |= self.prune_subtract();
        changed
    }

    /// Simplify until a fixed point is reached. Returns `true` if the slice changed.
    pub fn simplify(&mut self) -> bool {
        let mut changed = false;
        while self.simplify_step() {
            changed = true;
        }
        changed
    }

    /// Returns `true` if every generator of the ideal is a pure power and
    /// there is one for every variable.
    pub fn is_artinian_pure_powers(&self) -> bool {
        self.ideal.len() == self.var_count()
            && self
                .ideal
                .iter()
                .all(|g| term::pure_power_variable(g).is_some())
    }

}

impl<P: SlicePolicy> Clone for Slice<P> {
    fn clone(&self) -> Self {
        Slice {
            ideal: self.ideal.clone(),
            subtract: self.subtract.clone(),
            multiply: self.multiply.clone(),
            lcm: self.lcm.clone(),
            lcm_valid: self.lcm_valid,
            lower_bound_hint: self.lower_bound_hint,
            _policy: PhantomData,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.ideal.clone_from(&source.ideal);
        self.subtract.clone_from(&source.subtract);
        self.multiply.clone_from(&source.multiply);
        self.lcm.clone_from(&source.lcm);
        self.lcm_valid = source.lcm_valid;
        self.lower_bound_hint = source.lower_bound_hint;
    }
}

impl<P: SlicePolicy> fmt::Display for Slice<P> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let names = VarNames::default();
        write!(
            f,
            "slice(ideal: {}, subtract: {}, multiply: {})",
            IdealPrinter::new(&self.ideal, &names),
            IdealPrinter::new(&self.subtract, &names),
            TermPrinter::new(&self.multiply, &names)
        )
    }
}

impl<P: SlicePolicy> fmt::Debug for Slice<P> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Slice")
            .field("ideal", &self.ideal)
            .field("subtract", &self.subtract)
            .field("multiply", &self.multiply)
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::{HilbertPolicy, MsmPolicy, Slice, SlicePolicy};
    use crate::{ideal::Ideal, term::Term};

    #[test]
    fn display() {
        let slice: Slice<MsmPolicy> = Slice::from_parts(
            Ideal::from_terms(2, [[2, 0], [1, 1]]),
            Ideal::from_terms(2, [[0, 1]]),
            Term::from([1, 0]),
        );
        assert_eq!(
            slice.to_string(),
            "slice(ideal: <x0^2, x0*x1>, subtract: <x1>, multiply: x0)"
        );
    }

    #[test]
    fn pivot_split() {
        let ideal = Ideal::from_terms(2, [[3, 0], [2, 1], [0, 2]]);
        let mut inner: Slice<MsmPolicy> = Slice::from_ideal(ideal);
        let mut outer = inner.clone();

        inner.inner_slice(&[2, 0]);
        assert!(inner
            .ideal()
            .same_generators(&Ideal::from_terms(2, [[1, 0], [0, 1]])));
        assert_eq!(inner.multiply(), &Term::from([2, 0]));

        outer.outer_slice(&[2, 0]);
        assert!(outer
            .ideal()
            .same_generators(&Ideal::from_terms(2, [[2, 1], [0, 2]])));
        assert!(outer.subtract().is_zero_ideal());

        let mut outer = Slice::<MsmPolicy>::from_ideal(Ideal::from_terms(2, [[3, 0], [2, 2]]));
        outer.outer_slice(&[1, 1]);
        assert!(outer.ideal().same_generators(&Ideal::from_terms(2, [[3, 0]])));
        assert!(outer
            .subtract()
            .same_generators(&Ideal::from_terms(2, [[1, 1]])));
    }

    #[test]
    fn normalize_and_prune() {
        let ideal = Ideal::from_terms(2, [[3, 0], [2, 2], [1, 3]]);
        let subtract = Ideal::from_terms(2, [[1, 1], [5, 0]]);
        let mut slice: Slice<MsmPolicy> = Slice::from_parts(ideal, subtract, Term::new(2));

        assert!(slice.normalize());
        assert!(slice
            .ideal()
            .same_generators(&Ideal::from_terms(2, [[3, 0], [1, 3]])));
        assert!(!slice.normalize());

        assert_eq!(slice.lcm(), &Term::from([3, 3]));
        assert!(slice.prune_subtract());
        assert!(slice
            .subtract()
            .same_generators(&Ideal::from_terms(2, [[1, 1]])));
        assert!(!slice.prune_subtract());
    }

    #[test]
    fn msm_lower_bound() {
        // the maximal standard monomials of <x^3, x^2 y, y^2> are x^2 and x y
        let ideal = Ideal::from_terms(2, [[3, 0], [2, 1], [0, 2]]);
        let mut slice: Slice<MsmPolicy> = Slice::from_ideal(ideal);
        let mut bound = Term::new(2);
        assert!(MsmPolicy::lower_bound(&mut slice, 0, &mut bound));
        assert_eq!(bound, Term::from([1, 0]));
        assert!(MsmPolicy::lower_bound(&mut slice, 1, &mut bound));
        assert!(bound.is_identity());

        // no generator is below the lcm in the other variable
        let ideal = Ideal::from_terms(2, [[1, 1]]);
        let mut slice: Slice<MsmPolicy> = Slice::from_ideal(ideal);
        assert!(!MsmPolicy::lower_bound(&mut slice, 0, &mut bound));
    }

    #[test]
    fn hilbert_lower_bound() {
        let ideal = Ideal::from_terms(3, [[2, 1, 0], [3, 0, 2], [0, 0, 1]]);
        let mut slice: Slice<HilbertPolicy> = Slice::from_ideal(ideal);
        let mut bound = Term::new(3);
        assert!(HilbertPolicy::lower_bound(&mut slice, 0, &mut bound));
        assert_eq!(bound, Term::from([1, 0, 0]));

        assert!(HilbertPolicy::lower_bound(&mut slice, 1, &mut bound));
        assert_eq!(bound, Term::from([1, 0, 0]));
    }

    #[test]
    fn simplify_fixed_point() {
        let ideal = Ideal::from_terms(3, [[2, 0, 0], [0, 2, 0], [0, 0, 2], [1, 1, 1]]);
        let mut slice: Slice<MsmPolicy> = Slice::from_ideal(ideal);
        slice.subtract_mut().insert(&[1, 1, 0]);
        slice.simplify();

        assert!(!slice.normalize());
        assert!(!slice.apply_lower_bound());
        assert!(!slice.prune_subtract());
        assert!(!slice.simplify());
    }

    #[test]
    fn empty_content() {
        let mut slice: Slice<MsmPolicy> = Slice::from_ideal(Ideal::from_terms(2, [[1, 0]]));
        assert!(slice.is_trivially_empty());

        let mut slice: Slice<MsmPolicy> = Slice::from_ideal(Ideal::from_terms(2, [[1, 0], [0, 1]]));
        assert!(!slice.is_trivially_empty());
        slice.clear();
        assert!(slice.is_trivially_empty());
    }
}
