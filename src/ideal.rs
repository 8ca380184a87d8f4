//! Monomial ideals represented by a list of generators.
//!
//! An [Ideal] stores its generators in a [TermArena], in insertion order. It
//! does not enforce uniqueness or minimality of the generators, except right
//! after [Ideal::minimize] and the operations documented to reminimize.

pub mod arena;

use std::fmt;

use crate::term::{self, Exponent, Term};

use self::arena::TermArena;

/// A monomial ideal in `var_count` variables.
pub struct Ideal {
    var_count: usize,
    arena: TermArena,
    generators: Vec<u32>,
}

impl Ideal {
    /// The zero ideal in `var_count` variables.
    pub fn new(var_count: usize) -> Ideal {
        Ideal {
            var_count,
            arena: TermArena::new(var_count),
            generators: vec![],
        }
    }

    /// Create an ideal from a list of generators.
    pub fn from_terms<T: AsRef<[Exponent]>>(
        var_count: usize,
        terms: impl IntoIterator<Item = T>,
    ) -> Ideal {
        let mut ideal = Ideal::new(var_count);
        for t in terms {
            ideal.insert(t.as_ref());
        }
        ideal
    }

    /// The ideal generated by the identity, i.e. the whole polynomial ring.
    pub fn whole_ring(var_count: usize) -> Ideal {
        let mut ideal = Ideal::new(var_count);
        ideal.insert(&Term::new(var_count));
        ideal
    }

    #[inline]
    pub fn var_count(&self) -> usize {
        self.var_count
    }

    /// The number of generators.
    #[inline]
    pub fn len(&self) -> usize {
        self.generators.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Returns `true` iff the ideal has no generators.
    #[inline]
    pub fn is_zero_ideal(&self) -> bool {
        self.generators.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> &[Exponent] {
        self.arena.get(self.generators[index])
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &[Exponent]> + '_ {
        self.generators.iter().map(move |s| self.arena.get(*s))
    }

    /// Copy the generators into a list of terms.
    pub fn terms(&self) -> Vec<Term> {
        self.iter().map(Term::from_exponents).collect()
    }

    /// Add a generator. No check for redundancy is made.
    #[inline]
    pub fn insert(&mut self, term: &[Exponent]) {
        debug_assert_eq!(term.len(), self.var_count);
        let slot = self.arena.alloc(term);
        self.generators.push(slot);
    }

    pub fn insert_all(&mut self, other: &Ideal) {
        debug_assert_eq!(other.var_count, self.var_count);
        for g in other.iter() {
            let slot = self.arena.alloc(g);
            self.generators.push(slot);
        }
    }

    /// Add `term` to a minimally generated ideal and keep it minimal.
    /// Returns `false` if `term` already lies in the ideal.
    pub fn insert_reminimize(&mut self, term: &[Exponent]) -> bool {
        if self.contains(term) {
            return false;
        }

        self.remove_multiples(term);
        self.insert(term);
        true
    }

    /// Remove all generators.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.generators.clear();
    }

    /// Remove all generators and change the number of variables.
    pub fn reset(&mut self, var_count: usize) {
        self.var_count = var_count;
        self.arena.reset(var_count);
        self.generators.clear();
    }

    /// Returns `true` iff `term` lies in the ideal.
    pub fn contains(&self, term: &[Exponent]) -> bool {
        debug_assert_eq!(term.len(), self.var_count);
        self.iter().any(|g| term::divides(g, term))
    }

    pub fn contains_identity(&self) -> bool {
        self.iter().any(term::is_identity)
    }

    /// Returns `true` iff `term` is one of the generators.
    pub fn contains_generator(&self, term: &[Exponent]) -> bool {
        self.iter().any(|g| g == term)
    }

    pub fn is_minimally_generated(&self) -> bool {
        for (i, a) in self.iter().enumerate() {
            for (j, b) in self.iter().enumerate() {
                if i != j && term::divides(a, b) {
                    return false;
                }
            }
        }
        true
    }

    /// Returns `true` iff every generator is square free.
    pub fn is_square_free(&self) -> bool {
        self.iter().all(term::is_square_free)
    }

    /// Remove the generators for which `predicate` returns `true`.
    /// Returns `true` if any generator was removed.
    pub fn remove_if<F: FnMut(&[Exponent]) -> bool>(&mut self, mut predicate: F) -> bool {
        let before = self.generators.len();
        let arena = &mut self.arena;
        self.generators.retain(|s| {
            let remove = predicate(arena.get(*s));
            if remove {
                arena.free(*s);
            }
            !remove
        });
        before != self.generators.len()
    }

    /// Remove every generator that is a multiple of another one. Of equal
    /// generators, the first one is kept. Returns `true` if any generator was removed.
    pub fn minimize(&mut self) -> bool {
        let n = self.generators.len();
        if n <= 1 {
            return false;
        }

        let mut redundant = vec![false; n];
        for (i, r) in redundant.iter_mut().enumerate() {
            let a = self.arena.get(self.generators[i]);
            for (j, s) in self.generators.iter().enumerate() {
                if i == j {
                    continue;
                }

                let b = self.arena.get(*s);
                if term::divides(b, a) && (j < i || b != a) {
                    *r = true;
                    break;
                }
            }
        }

        let mut index = 0;
        let arena = &mut self.arena;
        self.generators.retain(|s| {
            let remove = redundant[index];
            index += 1;
            if remove {
                arena.free(*s);
            }
            !remove
        });

        self.generators.len() != n
    }

    /// Replace every generator `g` by `g : by` without reminimizing.
    pub fn colon(&mut self, by: &[Exponent]) {
        debug_assert_eq!(by.len(), self.var_count);
        for s in &self.generators {
            let g = self.arena.get_mut(*s);
            for (x, y) in g.iter_mut().zip(by) {
                *x = x.saturating_sub(*y);
            }
        }
    }

    /// Replace every generator `g` by `g : by` and minimize.
    ///
    /// Returns `true` iff the support of some generator changed. Only then can
    /// the generators stop being minimal, so the minimization is skipped otherwise.
    pub fn colon_reminimize(&mut self, by: &[Exponent]) -> bool {
        debug_assert_eq!(by.len(), self.var_count);
        let mut support_changed = false;
        for s in &self.generators {
            let g = self.arena.get_mut(*s);
            for (x, y) in g.iter_mut().zip(by) {
                if *x > 0 && *x <= *y {
                    support_changed = true;
                }
                *x = x.saturating_sub(*y);
            }
        }

        if support_changed {
            self.minimize();
        }
        support_changed
    }

    /// Multiply every generator by `by`.
    pub fn product(&mut self, by: &[Exponent]) {
        debug_assert_eq!(by.len(), self.var_count);
        for s in &self.generators {
            let g = self.arena.get_mut(*s);
            for (x, y) in g.iter_mut().zip(by) {
                *x += y;
            }
        }
    }

    /// Remove the generators that are divisible by `term`.
    pub fn remove_multiples(&mut self, term: &[Exponent]) -> bool {
        self.remove_if(|g| term::divides(term, g))
    }

    /// Remove the generators that `term` strictly divides.
    pub fn remove_strict_multiples(&mut self, term: &[Exponent]) -> bool {
        self.remove_if(|g| term::strictly_divides(term, g))
    }

    /// Write the least common multiple of the generators into `res`.
    /// The lcm of the zero ideal is the identity.
    pub fn lcm_into(&self, res: &mut Term) {
        res.reset(self.var_count);
        for g in self.iter() {
            res.lcm_assign(g);
        }
    }

    pub fn lcm(&self) -> Term {
        let mut res = Term::new(self.var_count);
        self.lcm_into(&mut res);
        res
    }

    /// The greatest common divisor of the generators. The gcd of the zero
    /// ideal is the identity.
    pub fn gcd(&self) -> Term {
        let mut it = self.iter();
        let Some(first) = it.next() else {
            return Term::new(self.var_count);
        };

        let mut res = Term::from_exponents(first);
        for g in it {
            res.gcd_assign(g);
        }
        res
    }

    /// Count for every variable the number of generators it appears in.
    pub fn support_counts_into(&self, res: &mut Term) {
        res.reset(self.var_count);
        for g in self.iter() {
            for (c, e) in res.iter_mut().zip(g) {
                if *e > 0 {
                    *c += 1;
                }
            }
        }
    }

    pub fn support_counts(&self) -> Term {
        let mut res = Term::new(self.var_count);
        self.support_counts_into(&mut res);
        res
    }

    /// Sort the generators in ascending lexicographic order.
    pub fn sort_lex(&mut self) {
        let arena = &self.arena;
        self.generators
            .sort_by(|a, b| term::lex_cmp(arena.get(*a), arena.get(*b)));
    }

    /// Sort the generators in ascending reverse lexicographic order.
    pub fn sort_reverse_lex(&mut self) {
        let arena = &self.arena;
        self.generators
            .sort_by(|a, b| term::reverse_lex_cmp(arena.get(*a), arena.get(*b)));
    }

    /// Remove repeated generators, keeping the first occurrence.
    pub fn remove_duplicates(&mut self) -> bool {
        let n = self.generators.len();
        let mut keep = vec![true; n];
        for i in 0..n {
            for j in 0..i {
                if keep[j] && self.get(i) == self.get(j) {
                    keep[i] = false;
                    break;
                }
            }
        }

        let mut index = 0;
        let arena = &mut self.arena;
        self.generators.retain(|s| {
            let k = keep[index];
            index += 1;
            if !k {
                arena.free(*s);
            }
            k
        });
        self.generators.len() != n
    }

    /// Replace every generator by the product of the variables in its support
    /// and minimize, which yields the radical of the ideal.
    pub fn radical(&mut self) {
        for s in &self.generators {
            for x in self.arena.get_mut(*s) {
                *x = (*x).min(1);
            }
        }
        self.minimize();
    }

    /// The intersection of two ideals, minimally generated.
    pub fn intersection(&self, other: &Ideal) -> Ideal {
        debug_assert_eq!(self.var_count, other.var_count);
        let mut res = Ideal::new(self.var_count);
        let mut l = Term::new(self.var_count);
        for a in self.iter() {
            for b in other.iter() {
                term::lcm(&mut l, a, b);
                res.insert(&l);
            }
        }
        res.minimize();
        res
    }

    /// Returns `true` iff both ideals have the same generators, in any order.
    pub fn same_generators(&self, other: &Ideal) -> bool {
        if self.var_count != other.var_count || self.len() != other.len() {
            return false;
        }

        let mut a = self.terms();
        let mut b = other.terms();
        a.sort();
        b.sort();
        a == b
    }
}

impl Clone for Ideal {
    fn clone(&self) -> Self {
        let mut ideal = Ideal::new(self.var_count);
        ideal.insert_all(self);
        ideal
    }

    fn clone_from(&mut self, source: &Self) {
        self.reset(source.var_count);
        self.insert_all(source);
    }
}

impl fmt::Debug for Ideal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod test {
    use super::Ideal;
    use crate::term::Term;

    #[test]
    fn minimize() {
        let mut i = Ideal::from_terms(3, [[1, 1, 0], [2, 1, 0], [0, 0, 1], [1, 1, 0], [0, 1, 1]]);
        assert!(!i.is_minimally_generated());
        assert!(i.minimize());
        assert_eq!(i.terms(), vec![Term::from([1, 1, 0]), Term::from([0, 0, 1])]);
        assert!(i.is_minimally_generated());

        // idempotent
        assert!(!i.minimize());
        assert_eq!(i.len(), 2);
    }

    #[test]
    fn colon_reminimize() {
        let mut i = Ideal::from_terms(2, [[2, 0], [1, 1], [0, 3]]);
        assert!(!i.colon_reminimize(&[0, 0]));

        // y^3 : y = y^2 and xy : y = x, which makes x^2 redundant
        assert!(i.colon_reminimize(&[0, 1]));
        assert!(i.same_generators(&Ideal::from_terms(2, [[1, 0], [0, 2]])));

        // only exponents shrink, no support changes
        assert!(!i.colon_reminimize(&[0, 1]));
        assert!(i.same_generators(&Ideal::from_terms(2, [[1, 0], [0, 1]])));
    }

    #[test]
    fn removal() {
        let mut i = Ideal::from_terms(2, [[2, 0], [1, 1], [0, 3], [3, 3]]);
        assert!(i.remove_strict_multiples(&[1, 0]));
        assert!(i.same_generators(&Ideal::from_terms(2, [[1, 1], [0, 3]])));

        assert!(i.remove_multiples(&[0, 1]));
        assert!(i.is_zero_ideal());
        assert!(!i.remove_multiples(&[0, 1]));

        let mut j = Ideal::from_terms(2, [[2, 0], [1, 1], [0, 3]]);
        assert!(j.remove_if(|g| g[0] == 1));
        assert_eq!(j.len(), 2);

        // slots are reused after removal
        j.insert(&[5, 5]);
        assert_eq!(j.terms().last(), Some(&Term::from([5, 5])));
        assert!(j.contains_generator(&[5, 5]));
        assert!(!j.contains_generator(&[5, 6]));

        let mut k = Ideal::from_terms(2, [[2, 0], [1, 2], [0, 3]]);
        assert!(!k.insert_reminimize(&[2, 2]));
        assert!(k.insert_reminimize(&[1, 1]));
        assert!(k.same_generators(&Ideal::from_terms(2, [[2, 0], [1, 1], [0, 3]])));
        assert!(k.is_minimally_generated());
    }

    #[test]
    fn scans() {
        let i = Ideal::from_terms(3, [[2, 1, 0], [1, 3, 0], [0, 1, 0]]);
        assert_eq!(i.lcm(), Term::from([2, 3, 0]));
        assert_eq!(i.gcd(), Term::from([0, 1, 0]));
        assert_eq!(i.support_counts(), Term::from([2, 3, 0]));
        assert!(i.contains(&[3, 3, 1]));
        assert!(!i.contains(&[3, 0, 1]));

        let z = Ideal::new(3);
        assert_eq!(z.lcm(), Term::new(3));
        assert_eq!(z.gcd(), Term::new(3));
        assert!(Ideal::whole_ring(3).contains_identity());
    }

    #[test]
    fn radical_and_intersection() {
        let mut i = Ideal::from_terms(2, [[2, 0], [1, 3]]);
        i.radical();
        assert!(i.same_generators(&Ideal::from_terms(2, [[1, 0]])));

        let a = Ideal::from_terms(2, [[1, 0], [0, 1]]);
        let b = Ideal::from_terms(2, [[2, 0], [0, 2]]);
        let c = a.intersection(&b);
        assert!(c.same_generators(&b));

        let x = Ideal::from_terms(2, [[1, 0]]);
        let y = Ideal::from_terms(2, [[0, 1]]);
        assert!(x
            .intersection(&y)
            .same_generators(&Ideal::from_terms(2, [[1, 1]])));
    }

    #[test]
    fn sorting() {
        let mut i = Ideal::from_terms(2, [[0, 2], [1, 0], [0, 1], [1, 0]]);
        assert!(i.remove_duplicates());
        i.sort_lex();
        assert_eq!(
            i.terms(),
            vec![Term::from([0, 1]), Term::from([0, 2]), Term::from([1, 0])]
        );
        i.sort_reverse_lex();
        assert_eq!(
            i.terms(),
            vec![Term::from([1, 0]), Term::from([0, 1]), Term::from([0, 2])]
        );
    }
}
