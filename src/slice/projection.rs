use smallvec::SmallVec;

use crate::{
    ideal::Ideal,
    term::{Exponent, INLINED_EXPONENTS},
};

/// A map from the variables of a smaller ring onto an ordered subset of the
/// variables of a larger ring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    vars: SmallVec<[usize; INLINED_EXPONENTS]>,
    super_var_count: usize,
}

impl Projection {
    /// Create a projection onto the variables `vars` of a ring with
    /// `super_var_count` variables. The variables must be increasing.
    pub fn new(super_var_count: usize, vars: &[usize]) -> Projection {
        debug_assert!(vars.windows(2).all(|w| w[0] < w[1]));
        debug_assert!(vars.iter().all(|v| *v < super_var_count));
        Projection {
            vars: SmallVec::from_slice(vars),
            super_var_count,
        }
    }

    pub fn identity(var_count: usize) -> Projection {
        Projection {
            vars: (0..var_count).collect(),
            super_var_count: var_count,
        }
    }

    /// The number of variables of the smaller ring.
    #[inline]
    pub fn var_count(&self) -> usize {
        self.vars.len()
    }

    /// The number of variables of the larger ring.
    #[inline]
    pub fn super_var_count(&self) -> usize {
        self.super_var_count
    }

    #[inline]
    pub fn super_var(&self, var: usize) -> usize {
        self.vars[var]
    }

    #[inline]
    pub fn vars(&self) -> &[usize] {
        &self.vars
    }

    /// Restrict `from` to the projected variables.
    pub fn project(&self, to: &mut [Exponent], from: &[Exponent]) {
        debug_assert_eq!(to.len(), self.vars.len());
        debug_assert_eq!(from.len(), self.super_var_count);
        for (t, v) in to.iter_mut().zip(&self.vars) {
            *t = from[*v];
        }
    }

    /// Embed `from` into the larger ring, with zero exponents outside the projected variables.
    pub fn inverse_project(&self, to: &mut [Exponent], from: &[Exponent]) {
        debug_assert_eq!(to.len(), self.super_var_count);
        to.iter_mut().for_each(|x| *x = 0);
        self.inverse_project_mul(to, from);
    }

    /// Multiply `to` by the embedding of `from`.
    pub fn inverse_project_mul(&self, to: &mut [Exponent], from: &[Exponent]) {
        debug_assert_eq!(from.len(), self.vars.len());
        for (f, v) in from.iter().zip(&self.vars) {
            to[*v] += f;
        }
    }

    /// Returns `true` if every variable in the support of `term` is projected.
    pub fn covers_support(&self, term: &[Exponent]) -> bool {
        term.iter()
            .enumerate()
            .all(|(i, e)| *e == 0 || self.vars.binary_search(&i).is_ok())
    }

    pub fn project_ideal(&self, ideal: &Ideal, res: &mut Ideal) {
        res.reset(self.vars.len());
        let mut t = vec![0; self.vars.len()];
        for g in ideal.iter() {
            self.project(&mut t, g);
            res.insert(&t);
        }
    }
}
