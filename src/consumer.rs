//! Receivers of the output of a computation.
//!
//! Results are pushed one at a time, between a call to `begin_consuming` and
//! a call to `done_consuming`.

use rug::Integer;

use crate::{
    ideal::Ideal,
    term::{Exponent, Term},
};

pub trait TermConsumer {
    fn begin_consuming(&mut self) {}
    fn consume(&mut self, term: &[Exponent]);
    fn done_consuming(&mut self) {}
}

/// A consumer of terms with integer coefficients.
pub trait CoefTermConsumer {
    fn begin_consuming(&mut self) {}
    fn consume(&mut self, coef: &Integer, term: &[Exponent]);
    fn done_consuming(&mut self) {}
}

impl TermConsumer for Ideal {
    fn consume(&mut self, term: &[Exponent]) {
        self.insert(term);
    }
}

impl TermConsumer for Vec<Term> {
    fn consume(&mut self, term: &[Exponent]) {
        self.push(Term::from_exponents(term));
    }
}

impl CoefTermConsumer for Vec<(Integer, Term)> {
    fn consume(&mut self, coef: &Integer, term: &[Exponent]) {
        self.push((coef.clone(), Term::from_exponents(term)));
    }
}

/// Counts the consumed terms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountingConsumer {
    pub count: usize,
}

impl TermConsumer for CountingConsumer {
    fn consume(&mut self, _term: &[Exponent]) {
        self.count += 1;
    }
}
