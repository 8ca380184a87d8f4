//! Accumulators for Hilbert-Poincaré series numerators.

use std::fmt;

use ahash::HashMap;
use rug::Integer;

use crate::{
    consumer::CoefTermConsumer,
    printer::{PolynomialPrinter, PrintOptions, VarNames},
    term::{self, Exponent, Term},
};

/// A polynomial with integer coefficients in `var_count` variables, stored
/// as a map from terms to their non-zero coefficients.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultigradedSeries {
    var_count: usize,
    terms: HashMap<Term, Integer>,
}

impl MultigradedSeries {
    pub fn new(var_count: usize) -> MultigradedSeries {
        MultigradedSeries {
            var_count,
            terms: HashMap::default(),
        }
    }

    #[inline]
    pub fn var_count(&self) -> usize {
        self.var_count
    }

    /// The number of terms with a non-zero coefficient.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Add `coef * term`.
    pub fn add(&mut self, coef: &Integer, term: &[Exponent]) {
        debug_assert_eq!(term.len(), self.var_count);
        if *coef == 0 {
            return;
        }

        if let Some(c) = self.terms.get_mut(term) {
            *c += coef;
            if *c == 0 {
                self.terms.remove(term);
            }
        } else {
            self.terms.insert(Term::from_exponents(term), coef.clone());
        }
    }

    pub fn coefficient(&self, term: &[Exponent]) -> Integer {
        self.terms.get(term).cloned().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Term, &Integer)> {
        self.terms.iter()
    }

    /// The terms in descending lexicographic order.
    pub fn sorted_terms(&self) -> Vec<(&Term, &Integer)> {
        let mut t: Vec<_> = self.terms.iter().collect();
        t.sort_by(|a, b| term::lex_cmp(b.0, a.0));
        t
    }

    /// Substitute the same variable `t` for every variable.
    pub fn to_univariate(&self) -> UnivariateSeries {
        let mut res = UnivariateSeries::new();
        for (t, c) in &self.terms {
            res.add(c, term::total_degree(t) as usize);
        }
        res
    }

    pub fn printer<'a>(&'a self, names: &'a VarNames) -> impl fmt::Display + 'a {
        let sorted = self.sorted_terms();
        SortedPrinter {
            terms: sorted,
            names,
        }
    }
}

struct SortedPrinter<'a> {
    terms: Vec<(&'a Term, &'a Integer)>,
    names: &'a VarNames,
}

impl fmt::Display for SortedPrinter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            PolynomialPrinter {
                terms: self.terms.iter().map(|(t, c)| (*c, t.as_slice())),
                names: self.names,
                opts: PrintOptions::default(),
            }
        )
    }
}

impl fmt::Display for MultigradedSeries {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let names = VarNames::default();
        let p = self.printer(&names);
        write!(f, "{}", p)
    }
}

impl CoefTermConsumer for MultigradedSeries {
    fn consume(&mut self, coef: &Integer, term: &[Exponent]) {
        self.add(coef, term);
    }
}

/// A polynomial with integer coefficients in one variable, indexed by degree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnivariateSeries {
    coefficients: Vec<Integer>,
}

impl UnivariateSeries {
    pub fn new() -> UnivariateSeries {
        UnivariateSeries {
            coefficients: vec![],
        }
    }

    /// Add `coef * t^degree`.
    pub fn add(&mut self, coef: &Integer, degree: usize) {
        if *coef == 0 {
            return;
        }

        if self.coefficients.len() <= degree {
            self.coefficients.resize(degree + 1, Integer::new());
        }
        self.coefficients[degree] += coef;

        while self.coefficients.last().map_or(false, |c| *c == 0) {
            self.coefficients.pop();
        }
    }

    pub fn coefficient(&self, degree: usize) -> Integer {
        self.coefficients.get(degree).cloned().unwrap_or_default()
    }

    /// The coefficients from degree zero up to the degree.
    pub fn coefficients(&self) -> &[Integer] {
        &self.coefficients
    }

    /// The degree, or `None` for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.coefficients.len().checked_sub(1)
    }

    pub fn is_zero(&self) -> bool {
        self.coefficients.is_empty()
    }
}

impl fmt::Display for UnivariateSeries {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let exps: Vec<[Exponent; 1]> = (0..self.coefficients.len())
            .map(|d| [d as Exponent])
            .collect();
        let names = VarNames::new(&["t"]);
        write!(
            f,
            "{}",
            PolynomialPrinter {
                terms: self
                    .coefficients
                    .iter()
                    .zip(exps.iter().map(|e| e.as_slice())),
                names: &names,
                opts: PrintOptions::default(),
            }
        )
    }
}

impl CoefTermConsumer for UnivariateSeries {
    fn consume(&mut self, coef: &Integer, term: &[Exponent]) {
        self.add(coef, term::total_degree(term) as usize);
    }
}
